/// Objects currently in reach of a hand
pub mod candidate_pool;
/// Collision shapes
pub mod collider;
/// Finger bones and their joint drives
pub mod finger_rig;
/// World space transforms
pub mod global_transform;
/// The sensor volume a hand uses to find candidates
pub mod grasp_area;
/// What a hand is currently holding
pub mod grasp_state;
/// Marks objects that are attached to a hand
pub mod grasped;
/// Per-hand grasp pose strategies
pub mod grip_controller;
/// Hands
pub mod hand;
/// Debugging names
pub mod info;
/// Attachment of one entity to another
pub mod parent;
/// Physical bodies
pub mod rigid_body;

pub use candidate_pool::CandidatePool;
pub use collider::Collider;
pub use finger_rig::{Finger, FingerPart, FingerRig, FingerSegment};
pub use global_transform::GlobalTransform;
pub use grasp_area::GraspArea;
pub use grasp_state::{GraspState, GripPose};
pub use grasped::Grasped;
pub use grip_controller::GripController;
pub use hand::{Hand, Handedness};
pub use info::Info;
pub use parent::Parent;
pub use rigid_body::{BodyType, RigidBody};
