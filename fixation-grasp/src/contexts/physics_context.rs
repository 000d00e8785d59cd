use hecs::{Entity, World};
use rapier3d::na::Matrix3x1;
use rapier3d::prelude::*;

use crate::{
    components::{Collider as ColliderComponent, GlobalTransform, RigidBody as RigidBodyComponent},
    util::na_vector_from_glam,
    GraspResult,
};

/// The physics simulation the grasp system runs against - a thin wrapper around a [`rapier3d`] pipeline.
///
/// Entities don't get rapier bodies straight away: [`crate::systems::physics_system`] creates them for
/// any entity with a [`RigidBodyComponent`], a [`ColliderComponent`] and a [`GlobalTransform`], and
/// stores the resulting [`RigidBodyHandle`] and [`ColliderHandle`] on the entity.
pub struct PhysicsContext {
    #[allow(missing_docs)]
    pub physics_pipeline: PhysicsPipeline,
    #[allow(missing_docs)]
    pub gravity: Matrix3x1<f32>,
    #[allow(missing_docs)]
    pub colliders: ColliderSet,
    #[allow(missing_docs)]
    pub broad_phase: BroadPhase,
    #[allow(missing_docs)]
    pub narrow_phase: NarrowPhase,
    #[allow(missing_docs)]
    pub rigid_bodies: RigidBodySet,
    #[allow(missing_docs)]
    pub island_manager: IslandManager,
    #[allow(missing_docs)]
    pub integration_parameters: IntegrationParameters,
    /// Joints, including the finger drives of a bound hand skeleton
    pub impulse_joints: ImpulseJointSet,
    #[allow(missing_docs)]
    pub multibody_joints: MultibodyJointSet,
    #[allow(missing_docs)]
    pub ccd_solver: CCDSolver,
}

impl Default for PhysicsContext {
    fn default() -> Self {
        // Hands hold things up; anything they let go of floats.
        let gravity: Matrix3x1<f32> = vector![0.0, 0.0, 0.0];
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = 1. / 72.;

        PhysicsContext {
            physics_pipeline: PhysicsPipeline::new(),
            gravity,
            colliders: ColliderSet::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_bodies: RigidBodySet::new(),
            island_manager: IslandManager::new(),
            integration_parameters,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }
}

impl PhysicsContext {
    /// Step the simulation forward by `delta_time` seconds
    pub fn update(&mut self, delta_time: f32) {
        if delta_time > 0. {
            self.integration_parameters.dt = delta_time;
        }

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    /// Create the rapier body and collider for `entity`. The collider's user data points back at the entity.
    pub fn create_rigid_body_and_collider(
        &mut self,
        entity: Entity,
        rigid_body: &RigidBodyComponent,
        collider: &ColliderComponent,
        global_transform: &GlobalTransform,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let rigid_body = RigidBodyBuilder::new(rigid_body.body_type.into())
            .position(global_transform.to_isometry())
            .linvel(na_vector_from_glam(rigid_body.linear_velocity))
            .angvel(na_vector_from_glam(rigid_body.angular_velocity))
            .additional_mass(rigid_body.mass)
            .build();

        // Mass comes from the rigid body component alone.
        let mut collider = ColliderBuilder::new(collider.shape.clone())
            .sensor(collider.sensor)
            .active_collision_types(collider.active_collision_types)
            .density(0.)
            .build();
        collider.user_data = entity.to_bits().get() as _;

        let rigid_body_handle = self.rigid_bodies.insert(rigid_body);
        let collider_handle =
            self.colliders
                .insert_with_parent(collider, rigid_body_handle, &mut self.rigid_bodies);

        (rigid_body_handle, collider_handle)
    }

    /// Get the rapier body backing `entity`, if it has one
    pub fn get_rigid_body_mut<'a>(
        &'a mut self,
        world: &World,
        entity: Entity,
    ) -> GraspResult<Option<&'a mut RigidBody>> {
        let handle = *world.get::<&RigidBodyHandle>(entity)?;
        Ok(self.rigid_bodies.get_mut(handle))
    }

    /// Find the entity that owns a collider
    pub fn entity_for_collider(&self, handle: ColliderHandle) -> Option<Entity> {
        let collider = self.colliders.get(handle)?;
        Entity::from_bits(collider.user_data as u64)
    }
}
