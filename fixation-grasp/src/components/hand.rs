use hecs::Entity;

use super::GraspState;

/// A component that represents the "side" or "handedness" that an entity is on
#[derive(Debug, PartialEq, Clone, Copy, Eq, PartialOrd, Ord, Hash)]
pub enum Handedness {
    /// Left hand side
    Left,
    /// Right hand side
    Right,
}

impl Handedness {
    /// The suffix used by skeletal bone names on this side
    pub fn bone_suffix(&self) -> &'static str {
        match self {
            Handedness::Left => "l",
            Handedness::Right => "r",
        }
    }
}

/// A component that's added to an entity to represent a hand that can pick things up.
/// Requires [`crate::components::CandidatePool`] and [`crate::components::GraspArea`] to find
/// anything to grasp; see [`crate::Simulation::spawn_hand`].
#[derive(Debug, Clone)]
pub struct Hand {
    /// Which side is this hand on?
    pub handedness: Handedness,
    /// How far has this hand been closed? 0 is fully open, 1 is a fist
    pub grip_value: f32,
    /// The other hand of the pair, needed for two-hand grasps
    pub partner: Option<Entity>,
    /// What are we holding?
    pub grasp: GraspState,
}

impl Hand {
    /// Shortcut helper to create a Left hand
    pub fn left() -> Hand {
        Hand::new(Handedness::Left)
    }

    /// Shortcut helper to create a right hand
    pub fn right() -> Hand {
        Hand::new(Handedness::Right)
    }

    /// Create an open, empty hand with no partner
    pub fn new(handedness: Handedness) -> Hand {
        Hand {
            handedness,
            grip_value: 0.,
            partner: None,
            grasp: GraspState::Empty,
        }
    }

    /// Hands only look for new candidates while their grasp is empty
    pub fn detects_proximity(&self) -> bool {
        self.grasp.is_empty()
    }
}
