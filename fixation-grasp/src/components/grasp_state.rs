use hecs::Entity;

/// Are the fingers still closing around a one-hand grasp, or have they been frozen in place?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GripPose {
    /// Fingers are still being driven towards the grip pose
    Closing,
    /// Finger targets have been frozen at the angles they had when the grasp closed
    Held,
}

/// What a hand is holding. A hand holds at most one object, with one hand or with both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraspState {
    /// Nothing in hand; the hand is looking for candidates
    #[default]
    Empty,
    /// Holding an object on its own
    OneHandHeld {
        /// The grasped object
        object: Entity,
        /// Is the grip still closing?
        pose: GripPose,
    },
    /// Holding an object together with the partner hand
    TwoHandHeld {
        /// The grasped object
        object: Entity,
        /// The hand the object is physically attached to - the hand that started the grasp
        anchor: Entity,
    },
}

impl GraspState {
    /// Is the hand free?
    pub fn is_empty(&self) -> bool {
        matches!(self, GraspState::Empty)
    }

    /// The object being held, if any
    pub fn object(&self) -> Option<Entity> {
        match self {
            GraspState::Empty => None,
            GraspState::OneHandHeld { object, .. } | GraspState::TwoHandHeld { object, .. } => {
                Some(*object)
            }
        }
    }

    /// Have the fingers been frozen around a one-hand grasp?
    pub fn is_held(&self) -> bool {
        matches!(
            self,
            GraspState::OneHandHeld {
                pose: GripPose::Held,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_grasp_state_accessors() {
        let mut world = hecs::World::new();
        let object = world.spawn(());
        let hand = world.spawn(());

        assert!(GraspState::default().is_empty());
        assert_eq!(GraspState::Empty.object(), None);

        let closing = GraspState::OneHandHeld {
            object,
            pose: GripPose::Closing,
        };
        assert_eq!(closing.object(), Some(object));
        assert!(!closing.is_held());

        let held = GraspState::OneHandHeld {
            object,
            pose: GripPose::Held,
        };
        assert!(held.is_held());

        let both = GraspState::TwoHandHeld {
            object,
            anchor: hand,
        };
        assert_eq!(both.object(), Some(object));
        assert!(!both.is_held());
        assert!(!both.is_empty());
    }
}
