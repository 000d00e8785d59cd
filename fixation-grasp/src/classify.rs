use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use crate::components::{Collider, GlobalTransform, RigidBody};

/// How many hands it takes to pick something up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Graspability {
    /// Fixed in place, not simulated, or simply too heavy or too large
    NotGraspable,
    /// Light and small enough for a single hand
    OneHand,
    /// Needs both hands
    TwoHands,
}

/// Mass and size limits used by [`classify`]. Both limits of a pair are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GraspThresholds {
    /// Objects lighter than this may be picked up with one hand
    pub one_hand_max_mass: f32,
    /// Objects whose bounding box diagonal is shorter than this may be picked up with one hand
    pub one_hand_max_size: f32,
    /// Objects lighter than this may be picked up with two hands
    pub two_hands_max_mass: f32,
    /// Objects whose bounding box diagonal is shorter than this may be picked up with two hands
    pub two_hands_max_size: f32,
}

impl Default for GraspThresholds {
    fn default() -> Self {
        Self {
            one_hand_max_mass: 5.,
            one_hand_max_size: 50.,
            two_hands_max_mass: 15.,
            two_hands_max_size: 120.,
        }
    }
}

/// The physical facts about an object that decide whether it can be grasped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraspableProperties {
    /// Mass of the object
    pub mass: f32,
    /// Length of the diagonal of the object's world space bounding box
    pub bounding_size: f32,
    /// Can the object move at all?
    pub movable: bool,
    /// Is the object currently driven by the physics simulation?
    pub simulated: bool,
}

impl GraspableProperties {
    /// Read the properties of `entity` from the world.
    ///
    /// Any entity with a [`RigidBody`] and a [`Collider`] is a potential grasp target. Entities
    /// without them return `None`.
    pub fn query(world: &World, entity: Entity) -> Option<Self> {
        let rigid_body = world.get::<&RigidBody>(entity).ok()?;
        let collider = world.get::<&Collider>(entity).ok()?;
        let global_transform = world
            .get::<&GlobalTransform>(entity)
            .map(|g| *g)
            .unwrap_or_default();

        let aabb = collider
            .shape
            .compute_aabb(&global_transform.to_isometry());

        Some(Self {
            mass: rigid_body.mass,
            bounding_size: aabb.extents().norm(),
            movable: rigid_body.is_movable(),
            simulated: rigid_body.is_simulating(),
        })
    }
}

/// Decide how many hands are needed to pick up an object. The first matching rule wins:
///
/// 1. Objects that can't move or aren't simulated can't be grasped
/// 1. Objects under both one hand limits need one hand
/// 1. Objects under both two hand limits need two hands
/// 1. Everything else can't be grasped
pub fn classify(properties: &GraspableProperties, thresholds: &GraspThresholds) -> Graspability {
    if !properties.movable || !properties.simulated {
        return Graspability::NotGraspable;
    }

    if properties.mass < thresholds.one_hand_max_mass
        && properties.bounding_size < thresholds.one_hand_max_size
    {
        return Graspability::OneHand;
    }

    if properties.mass < thresholds.two_hands_max_mass
        && properties.bounding_size < thresholds.two_hands_max_size
    {
        return Graspability::TwoHands;
    }

    Graspability::NotGraspable
}

/// Classify an entity straight from the world. Entities that aren't graspable objects at all are
/// [`Graspability::NotGraspable`].
pub fn classify_entity(world: &World, entity: Entity, thresholds: &GraspThresholds) -> Graspability {
    GraspableProperties::query(world, entity)
        .map(|properties| classify(&properties, thresholds))
        .unwrap_or(Graspability::NotGraspable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{BodyType, Info};
    use approx::assert_relative_eq;
    use glam::{Affine3A, Quat, Vec3};
    use rapier3d::prelude::SharedShape;

    fn object(mass: f32, bounding_size: f32) -> GraspableProperties {
        GraspableProperties {
            mass,
            bounding_size,
            movable: true,
            simulated: true,
        }
    }

    #[test]
    pub fn test_classify_one_hand() {
        let thresholds = GraspThresholds::default();
        assert_eq!(
            classify(&object(3., 40.), &thresholds),
            Graspability::OneHand
        );
    }

    #[test]
    pub fn test_classify_two_hands() {
        let thresholds = GraspThresholds::default();
        assert_eq!(
            classify(&object(10., 80.), &thresholds),
            Graspability::TwoHands
        );

        // Light, but too big for one hand
        assert_eq!(
            classify(&object(1., 60.), &thresholds),
            Graspability::TwoHands
        );

        // Small, but too heavy for one hand
        assert_eq!(
            classify(&object(6., 10.), &thresholds),
            Graspability::TwoHands
        );
    }

    #[test]
    pub fn test_classify_limits_are_exclusive() {
        let thresholds = GraspThresholds::default();
        assert_eq!(
            classify(&object(5., 10.), &thresholds),
            Graspability::TwoHands
        );
        assert_eq!(
            classify(&object(15., 10.), &thresholds),
            Graspability::NotGraspable
        );
        assert_eq!(
            classify(&object(1., 120.), &thresholds),
            Graspability::NotGraspable
        );
    }

    #[test]
    pub fn test_classify_immovable_or_unsimulated() {
        let thresholds = GraspThresholds::default();
        for (movable, simulated) in [(false, true), (true, false), (false, false)] {
            for (mass, size) in [(0.1, 1.), (10., 80.), (100., 1000.)] {
                let properties = GraspableProperties {
                    mass,
                    bounding_size: size,
                    movable,
                    simulated,
                };
                assert_eq!(
                    classify(&properties, &thresholds),
                    Graspability::NotGraspable
                );
            }
        }
    }

    #[test]
    pub fn test_query_properties() {
        let mut world = World::new();
        let rotation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_4);
        let entity = world.spawn((
            Info::new("Box"),
            RigidBody::dynamic(2.),
            Collider::new(SharedShape::cuboid(1., 2., 3.)),
            GlobalTransform(Affine3A::from_rotation_translation(
                Quat::IDENTITY,
                Vec3::new(0., 10., 0.),
            )),
        ));

        let properties = GraspableProperties::query(&world, entity).unwrap();
        assert_relative_eq!(properties.mass, 2.);
        assert_relative_eq!(properties.bounding_size, (4_f32 + 16. + 36.).sqrt());
        assert!(properties.movable);
        assert!(properties.simulated);

        // Rotating the box grows its world space bounding box
        world
            .get::<&mut GlobalTransform>(entity)
            .unwrap()
            .0 = Affine3A::from_quat(rotation);
        let rotated = GraspableProperties::query(&world, entity).unwrap();
        assert!(rotated.bounding_size > properties.bounding_size);

        world.get::<&mut RigidBody>(entity).unwrap().body_type = BodyType::Fixed;
        let fixed = GraspableProperties::query(&world, entity).unwrap();
        assert!(!fixed.movable);
        assert!(!fixed.simulated);
        assert_eq!(
            classify_entity(&world, entity, &GraspThresholds::default()),
            Graspability::NotGraspable
        );
    }

    #[test]
    pub fn test_query_without_capability() {
        let mut world = World::new();
        let entity = world.spawn((Info::new("Just a name"),));
        assert!(GraspableProperties::query(&world, entity).is_none());
        assert_eq!(
            classify_entity(&world, entity, &GraspThresholds::default()),
            Graspability::NotGraspable
        );
    }
}
