use glam::{Affine3A, Quat, Vec3};
use hecs::{Entity, World};
use rapier3d::na::{self, Isometry3, UnitQuaternion, Vector3};

use crate::components::Info;

#[inline]
/// Convert a [`glam::Affine3A`] into a [`rapier3d::na::Isometry3`]
pub fn isometry_from_affine(a: &Affine3A) -> Isometry3<f32> {
    let (_, r, t) = a.to_scale_rotation_translation();
    let translation = na::Translation3::new(t.x, t.y, t.z);
    let rotation = na_quat_from_glam(r);

    Isometry3::from_parts(translation, rotation)
}

#[inline]
/// Convert a [`rapier3d::na::Isometry3`] into a [`glam::Affine3A`]
pub fn affine_from_isometry(i: &Isometry3<f32>) -> Affine3A {
    let t = i.translation.vector;
    Affine3A::from_rotation_translation(glam_quat_from_na(&i.rotation), Vec3::new(t.x, t.y, t.z))
}

#[inline]
/// Convert a [`glam::Quat`] into a [`rapier3d::na::UnitQuaternion`]
pub fn na_quat_from_glam(q: Quat) -> UnitQuaternion<f32> {
    UnitQuaternion::new_unchecked(na::Quaternion::new(q.w, q.x, q.y, q.z))
}

#[inline]
/// Convert a [`rapier3d::na::UnitQuaternion`] into a [`glam::Quat`]
pub fn glam_quat_from_na(q: &UnitQuaternion<f32>) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

#[inline]
/// Convert a [`glam::Vec3`] into a [`rapier3d::na::Vector3`]
pub fn na_vector_from_glam(v: Vec3) -> Vector3<f32> {
    [v.x, v.y, v.z].into()
}

#[inline]
/// Convert a [`rapier3d::na::Vector3`] into a [`glam::Vec3`]
pub fn glam_vec_from_na(v: &Vector3<f32>) -> Vec3 {
    [v.x, v.y, v.z].into()
}

/// A name for `entity` that's fit for a log message
pub fn entity_name(world: &World, entity: Entity) -> String {
    world
        .get::<&Info>(entity)
        .map(|i| i.name.clone())
        .unwrap_or_else(|_| format!("{entity:?}"))
}

#[cfg(test)]
use crate::{
    components::{BodyType, GlobalTransform, RigidBody},
    simulation::{spawn_graspable, spawn_hand},
    GraspConfig, HandPair,
};

/// Convenience function to get a world with a linked pair of hands
#[cfg(test)]
pub fn get_world_with_hands() -> (World, HandPair) {
    let config = GraspConfig::default();
    let mut world = World::new();
    let left = spawn_hand(
        &mut world,
        &config,
        "Left Hand",
        crate::components::Handedness::Left,
        Affine3A::from_translation([-20., 100., 0.].into()),
    );
    let right = spawn_hand(
        &mut world,
        &config,
        "Right Hand",
        crate::components::Handedness::Right,
        Affine3A::from_translation([20., 100., 0.].into()),
    );
    let hands = crate::hand_pair::link_hands(&mut world, left, right).unwrap();

    // Sanity check
    {
        let mut query = world.query::<&crate::components::Hand>();
        assert_eq!(query.iter().len(), 2);
    }

    (world, hands)
}

/// Convenience function to add a dynamic box to the world
#[cfg(test)]
pub fn add_box(world: &mut World, name: &str, mass: f32, half_extent: f32, position: Vec3) -> Entity {
    spawn_graspable(
        world,
        name,
        rapier3d::prelude::SharedShape::cuboid(half_extent, half_extent, half_extent),
        mass,
        BodyType::Dynamic,
        Affine3A::from_translation(position),
    )
}

/// Sanity checks shared by the grasping tests
#[cfg(test)]
pub fn assert_released(world: &World, object: Entity) {
    use crate::components::{Grasped, Parent};

    let rigid_body = world.get::<&RigidBody>(object).unwrap();
    assert!(rigid_body.is_simulating());
    assert!(world.get::<&Parent>(object).is_err());
    assert!(world.get::<&Grasped>(object).is_err());
    assert!(world.get::<&GlobalTransform>(object).is_ok());
}
