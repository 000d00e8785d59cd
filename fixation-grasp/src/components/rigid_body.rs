use glam::Vec3;
use rapier3d::prelude::RigidBodyType as RapierBodyType;

/// A component used to synchronise this entity's position in the world with the physics simulation.
///
/// The `body_type` decides who is in charge of the entity's position. A [`BodyType::Dynamic`] body is
/// *simulated*: [`crate::systems::physics_system`] overwrites its [`crate::components::GlobalTransform`]
/// and velocities with the results of each physics step. Any other kind of body is *game controlled*:
/// its global transform is pushed into the physics simulation instead.
///
/// Grasping an object switches it to [`BodyType::KinematicPositionBased`] so it follows the hand;
/// releasing it switches it back to [`BodyType::Dynamic`]. Whatever is in `linear_velocity` at the
/// moment a body becomes dynamic again is handed to the physics simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    /// Who controls the position of this body?
    pub body_type: BodyType,
    /// Linear velocity in world space
    pub linear_velocity: Vec3,
    /// Angular velocity in world space
    pub angular_velocity: Vec3,
    /// Mass of the body
    pub mass: f32,
}

/// The kinds of body understood by the physics simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    /// Moved by setting its position; pushes dynamic bodies around but isn't pushed itself
    KinematicPositionBased,
    /// Fully simulated
    Dynamic,
    /// Never moves
    Fixed,
}

impl From<BodyType> for RapierBodyType {
    fn from(b: BodyType) -> Self {
        match b {
            BodyType::KinematicPositionBased => RapierBodyType::KinematicPositionBased,
            BodyType::Dynamic => RapierBodyType::Dynamic,
            BodyType::Fixed => RapierBodyType::Fixed,
        }
    }
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            body_type: BodyType::Dynamic,
            linear_velocity: Default::default(),
            angular_velocity: Default::default(),
            mass: 0.,
        }
    }
}

impl RigidBody {
    /// A simulated body with the given mass
    pub fn dynamic(mass: f32) -> Self {
        Self {
            mass,
            ..Default::default()
        }
    }

    /// A game controlled body, eg. a tracked hand
    pub fn kinematic_position_based() -> Self {
        Self {
            body_type: BodyType::KinematicPositionBased,
            ..Default::default()
        }
    }

    /// A body that never moves
    pub fn fixed(mass: f32) -> Self {
        Self {
            body_type: BodyType::Fixed,
            mass,
            ..Default::default()
        }
    }

    /// Can this body move at all?
    pub fn is_movable(&self) -> bool {
        self.body_type != BodyType::Fixed
    }

    /// Is this body currently driven by the physics simulation?
    pub fn is_simulating(&self) -> bool {
        self.body_type == BodyType::Dynamic
    }

    /// Hand this body over to the physics simulation, or take it back.
    /// Fixed bodies stay fixed.
    pub fn set_simulate_physics(&mut self, simulate: bool) {
        if !self.is_movable() {
            return;
        }

        self.body_type = if simulate {
            BodyType::Dynamic
        } else {
            self.linear_velocity = Vec3::ZERO;
            self.angular_velocity = Vec3::ZERO;
            BodyType::KinematicPositionBased
        };
    }
}
