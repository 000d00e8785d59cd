#![deny(missing_docs)]

//! Fixation grasping for a pair of simulated hands.
//!
//! Each hand watches a small sensor volume for objects it could pick up. Objects are classified by
//! mass and size as graspable with one hand, with two hands, or not at all. A grasp rigidly attaches
//! the object to the hand (a "fixation grasp") instead of simulating finger contacts; releasing it
//! hands the object back to the physics simulation with the hand's velocity.
//!
//! Two-hand grasps need both hands to agree on the same object. The hand that starts the grasp owns
//! the attachment and tells its partner, which follows along until either hand lets go.
//!
//! # Getting started
//! Build a [`Simulation`], spawn a hand pair and some graspable objects, then call
//! [`Simulation::update`] once per frame:
//!
//! ```no_run
//! use fixation_grasp::{components::BodyType, GraspConfig, Simulation};
//! use fixation_grasp::rapier3d::prelude::SharedShape;
//! use glam::{Affine3A, Vec3};
//!
//! let mut simulation = Simulation::new(GraspConfig::default());
//! let hands = simulation.spawn_hand_pair(
//!     Affine3A::from_translation(Vec3::new(-20., 100., 0.)),
//!     Affine3A::from_translation(Vec3::new(20., 100., 0.)),
//! );
//! simulation.spawn_graspable(
//!     "Cup",
//!     SharedShape::cuboid(3., 5., 3.),
//!     0.3,
//!     BodyType::Dynamic,
//!     Affine3A::from_translation(Vec3::new(-20., 100., 0.)),
//! );
//!
//! simulation.update(1. / 72.);
//! simulation.try_one_hand_grasp(hands.left);
//! ```

pub use grasp_error::GraspError;
pub use hecs;
pub use rapier3d;

pub use classify::{classify, Graspability, GraspThresholds, GraspableProperties};
pub use config::{DriveParams, GraspConfig};
pub use grasp_policy::{GraspPolicy, GraspPose, PoseBlend};
pub use hand_pair::HandPair;
pub use simulation::{GraspAction, HandCommand, Simulation};

/// Rules deciding whether an object can be picked up, and with how many hands
pub mod classify;
/// Components are data attached to hands and objects in the world
pub mod components;
/// Grasp configuration, settable before a simulation is built
pub mod config;
/// Contexts are wrappers around external state the grasp system interacts with
pub mod contexts;
mod grasp_error;
/// Strategies for driving finger joints towards a grasp pose
pub mod grasp_policy;
/// Coordination between the two hands of a pair
pub mod hand_pair;
mod simulation;
/// Systems are functions called each frame to update the world
pub mod systems;
/// Kitchen sink utility functions
pub mod util;

/// Fixation grasp result type
pub type GraspResult<T> = std::result::Result<T, GraspError>;
