use hecs::World;
use rapier3d::prelude::{RigidBodyHandle, RigidBodyType};

use crate::{
    components::{Collider, GlobalTransform, RigidBody},
    contexts::PhysicsContext,
    util::{affine_from_isometry, glam_vec_from_na, na_vector_from_glam},
    Simulation,
};

/// Physics system
///
/// 1. Creates rapier bodies for any entities that need them
/// 1. Pushes the state of *game controlled* bodies (anything not [`crate::components::BodyType::Dynamic`])
///    into the physics simulation
/// 1. Steps the physics simulation
/// 1. Pulls the positions and velocities of *simulated* bodies back into the world
///
/// When a body becomes dynamic again - eg. an object is released by a hand - the velocity stored in its
/// [`RigidBody`] component is handed to the physics simulation.
pub fn physics_system(simulation: &mut Simulation, delta_time: f32) {
    let world = &mut simulation.world;
    let physics_context = &mut simulation.physics_context;
    physics_system_inner(world, physics_context, delta_time);
}

pub(crate) fn physics_system_inner(
    world: &mut World,
    physics_context: &mut PhysicsContext,
    delta_time: f32,
) {
    create_rigid_bodies(world, physics_context);
    update_rigid_bodies_from_world(world, physics_context);
    physics_context.update(delta_time);
    update_world_from_rigid_bodies(world, physics_context);
}

fn create_rigid_bodies(world: &mut World, physics_context: &mut PhysicsContext) {
    let mut created = Vec::new();
    for (entity, (rigid_body, collider, global_transform)) in world
        .query::<(&RigidBody, &Collider, &GlobalTransform)>()
        .without::<&RigidBodyHandle>()
        .iter()
    {
        let handles = physics_context.create_rigid_body_and_collider(
            entity,
            rigid_body,
            collider,
            global_transform,
        );
        created.push((entity, handles));
    }

    for (entity, handles) in created {
        // The entity was just returned by a query, so it must still exist.
        let _ = world.insert(entity, handles);
    }
}

fn update_rigid_bodies_from_world(world: &mut World, physics_context: &mut PhysicsContext) {
    for (_, (rigid_body, handle, global_transform)) in
        world.query_mut::<(&RigidBody, &RigidBodyHandle, &GlobalTransform)>()
    {
        let Some(body) = physics_context.rigid_bodies.get_mut(*handle) else {
            continue;
        };

        let body_type: RigidBodyType = rigid_body.body_type.into();
        if body.body_type() != body_type {
            let becomes_dynamic = body_type == RigidBodyType::Dynamic;

            // Kinematic bodies are never asleep, and rapier only moves a body into its set of active
            // dynamic bodies when it wakes up.
            if becomes_dynamic {
                body.sleep();
            }
            body.set_body_type(body_type, true);

            if becomes_dynamic {
                body.set_linvel(na_vector_from_glam(rigid_body.linear_velocity), true);
                body.set_angvel(na_vector_from_glam(rigid_body.angular_velocity), true);
            }
        }

        if body.is_kinematic() {
            body.set_next_kinematic_position(global_transform.to_isometry());
        }
    }
}

fn update_world_from_rigid_bodies(world: &mut World, physics_context: &PhysicsContext) {
    for (_, (rigid_body, handle, global_transform)) in
        world.query_mut::<(&mut RigidBody, &RigidBodyHandle, &mut GlobalTransform)>()
    {
        let Some(body) = physics_context.rigid_bodies.get(*handle) else {
            continue;
        };

        if body.is_dynamic() {
            global_transform.0 = affine_from_isometry(body.position());
        }

        if body.is_dynamic() || body.is_kinematic() {
            rigid_body.linear_velocity = glam_vec_from_na(body.linvel());
            rigid_body.angular_velocity = glam_vec_from_na(body.angvel());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{BodyType, Info};
    use approx::assert_relative_eq;
    use glam::{Affine3A, Vec3};
    use rapier3d::prelude::SharedShape;
    use std::ops::Deref;

    #[test]
    pub fn test_physics_system() {
        let mut world = World::new();
        let mut physics_context = PhysicsContext::default();

        let mut rigid_body = RigidBody::dynamic(1.);
        rigid_body.linear_velocity = Vec3::new(1., 0., 0.);
        let entity = world.spawn((
            Info::new("Ball"),
            rigid_body,
            Collider::new(SharedShape::ball(0.5)),
            GlobalTransform::default(),
        ));

        physics_system_inner(&mut world, &mut physics_context, 1.);
        assert!(world.get::<&RigidBodyHandle>(entity).is_ok());

        // No gravity, so the ball just drifts along x
        let global_transform = *world.get::<&GlobalTransform>(entity).unwrap();
        assert_relative_eq!(global_transform.translation().x, 1., epsilon = 0.01);
        assert_relative_eq!(global_transform.translation().y, 0., epsilon = 0.01);
    }

    #[test]
    pub fn test_release_hands_over_velocity() {
        let mut world = World::new();
        let mut physics_context = PhysicsContext::default();

        let entity = world.spawn((
            Info::new("Ball"),
            RigidBody {
                body_type: BodyType::KinematicPositionBased,
                ..RigidBody::dynamic(1.)
            },
            Collider::new(SharedShape::ball(0.5)),
            GlobalTransform(Affine3A::from_translation(Vec3::new(0., 0., 5.))),
        ));

        physics_system_inner(&mut world, &mut physics_context, 1. / 72.);
        {
            let body = physics_context.get_rigid_body_mut(&world, entity).unwrap().unwrap();
            assert!(body.is_kinematic());
        }

        // Release it
        {
            let mut rigid_body = world.get::<&mut RigidBody>(entity).unwrap();
            rigid_body.set_simulate_physics(true);
            rigid_body.linear_velocity = Vec3::new(0., 0., -2.);
        }
        physics_system_inner(&mut world, &mut physics_context, 0.5);
        {
            let rigid_body = world.get::<&RigidBody>(entity).unwrap();
            assert!(rigid_body.is_simulating());
            assert_relative_eq!(rigid_body.linear_velocity.z, -2., epsilon = 0.01);

            let global_transform = world.get::<&GlobalTransform>(entity).unwrap();
            assert_relative_eq!(global_transform.translation().z, 4., epsilon = 0.01);
        }

        // And it keeps going
        physics_system_inner(&mut world, &mut physics_context, 0.5);
        let global_transform = world.get::<&GlobalTransform>(entity).unwrap();
        assert_relative_eq!(global_transform.translation().z, 3., epsilon = 0.01);
        assert!(physics_context
            .island_manager
            .active_dynamic_bodies()
            .contains(world.get::<&RigidBodyHandle>(entity).unwrap().deref()));
    }

    #[test]
    pub fn test_grasp_and_release_keeps_simulating() {
        let mut world = World::new();
        let mut physics_context = PhysicsContext::default();

        let entity = world.spawn((
            Info::new("Cup"),
            RigidBody::dynamic(0.3),
            Collider::new(SharedShape::ball(0.5)),
            GlobalTransform(Affine3A::from_translation(Vec3::new(0., 0., 10.))),
        ));
        physics_system_inner(&mut world, &mut physics_context, 1. / 72.);

        // Held by a hand for a couple of frames
        world
            .get::<&mut RigidBody>(entity)
            .unwrap()
            .set_simulate_physics(false);
        physics_system_inner(&mut world, &mut physics_context, 1. / 72.);
        physics_system_inner(&mut world, &mut physics_context, 1. / 72.);

        // Thrown
        {
            let mut rigid_body = world.get::<&mut RigidBody>(entity).unwrap();
            rigid_body.set_simulate_physics(true);
            rigid_body.linear_velocity = Vec3::new(0., 0., 72.);
        }
        physics_system_inner(&mut world, &mut physics_context, 1. / 72.);
        assert_relative_eq!(
            world.get::<&GlobalTransform>(entity).unwrap().translation().z,
            11.,
            epsilon = 0.01
        );
        physics_system_inner(&mut world, &mut physics_context, 1. / 72.);
        assert_relative_eq!(
            world.get::<&GlobalTransform>(entity).unwrap().translation().z,
            12.,
            epsilon = 0.01
        );
    }
}
