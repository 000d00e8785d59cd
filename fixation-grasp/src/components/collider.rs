use std::fmt::Debug;

use hecs::Entity;
pub use rapier3d::prelude::{ActiveCollisionTypes, SharedShape};

/// A component that enables collision detection - essentially a thin wrapper around [`rapier3d::prelude::Collider`].
#[derive(Clone)]
pub struct Collider {
    /// Entities whose colliders intersected this one during the last physics step.
    /// Only filled in for sensors; see [`crate::systems::collision_system`]
    pub collisions_this_frame: Vec<Entity>,
    /// The shape of this collider
    pub shape: SharedShape,
    /// Is this a sensor collider?
    pub sensor: bool,
    /// What kinds of bodies can this collider interact with?
    pub active_collision_types: ActiveCollisionTypes,
}

impl Debug for Collider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collider")
            .field("collisions_this_frame", &self.collisions_this_frame)
            .field("shape", &self.shape.shape_type())
            .field("sensor", &self.sensor)
            .field("active_collision_types", &self.active_collision_types)
            .finish()
    }
}

impl Collider {
    /// Create a new solid collider
    pub fn new(shape: SharedShape) -> Collider {
        Collider {
            shape,
            ..Default::default()
        }
    }

    /// Create a new sensor collider that reports intersections with every kind of body
    pub fn sensor(shape: SharedShape) -> Collider {
        Collider {
            shape,
            sensor: true,
            active_collision_types: ActiveCollisionTypes::all(),
            ..Default::default()
        }
    }
}

impl Default for Collider {
    fn default() -> Self {
        Self {
            collisions_this_frame: Default::default(),
            shape: SharedShape::ball(1.0),
            sensor: false,
            active_collision_types: ActiveCollisionTypes::default(),
        }
    }
}
