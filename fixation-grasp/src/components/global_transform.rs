use glam::{Affine3A, Vec3};

use crate::util;

/// Component used to represent the global transform of the entity.
/// This is the transformation from local to global space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalTransform(pub Affine3A);

impl Default for GlobalTransform {
    fn default() -> Self {
        Self(Affine3A::IDENTITY)
    }
}

impl GlobalTransform {
    /// Convenience function to convert the [`GlobalTransform`] into a [`rapier3d::na::Isometry3`]
    pub fn to_isometry(&self) -> rapier3d::na::Isometry3<f32> {
        util::isometry_from_affine(&self.0)
    }

    /// Where is this entity in the world?
    pub fn translation(&self) -> Vec3 {
        self.0.translation.into()
    }
}

impl From<Affine3A> for GlobalTransform {
    fn from(a: Affine3A) -> Self {
        GlobalTransform(a)
    }
}
