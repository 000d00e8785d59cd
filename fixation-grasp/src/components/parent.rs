use glam::Affine3A;
use hecs::Entity;

/// Component added to indicate that an entity is attached to another one.
///
/// Grasped objects are attached to the hand holding them, and the follower hand of a two-hand grasp is
/// attached to the hand that started it. [`crate::systems::update_global_transform_with_parent_system`]
/// moves attached entities along with their parents each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parent {
    /// The entity this one is attached to
    pub entity: Entity,
    /// Transform from the child's space into the parent's space
    pub from_child: Affine3A,
}

impl Parent {
    /// Attach to `entity` such that the child stays exactly where it currently is in the world.
    pub fn keeping_world(
        entity: Entity,
        global_from_parent: &Affine3A,
        global_from_child: &Affine3A,
    ) -> Self {
        Self {
            entity,
            from_child: global_from_parent.inverse() * *global_from_child,
        }
    }
}
