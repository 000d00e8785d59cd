use hecs::World;
use rapier3d::prelude::ColliderHandle;

use crate::{components::Collider, contexts::PhysicsContext, Simulation};

/// Collision system
/// Walks through each sensor collider and checks what it intersected during the last physics step.
/// Intersecting entities are added to `collisions_this_frame` for ease of reference.
pub fn collision_system(simulation: &mut Simulation) {
    let world = &mut simulation.world;
    let physics_context = &simulation.physics_context;
    collision_system_inner(world, physics_context);
}

pub(crate) fn collision_system_inner(world: &mut World, physics_context: &PhysicsContext) {
    for (_, (collider, handle)) in world.query_mut::<(&mut Collider, &ColliderHandle)>() {
        // Clear out any collisions from previous frames.
        collider.collisions_this_frame.clear();
        if !collider.sensor {
            continue;
        }

        for (a, b, intersecting) in physics_context.narrow_phase.intersections_with(*handle) {
            if !intersecting {
                continue;
            }
            let other = if a == *handle { b } else { a };
            if let Some(other_entity) = physics_context.entity_for_collider(other) {
                collider.collisions_this_frame.push(other_entity);
            }
        }
    }
}
