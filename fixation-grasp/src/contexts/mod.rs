/// Wrapper around the rapier physics pipeline
pub mod physics_context;

pub use physics_context::PhysicsContext;
