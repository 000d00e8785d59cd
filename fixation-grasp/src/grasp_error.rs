use hecs::{ComponentError, Entity, NoSuchEntity};
use thiserror::Error;

/// Everything that can go wrong while talking to the world or loading configuration
#[derive(Error, Debug)]
pub enum GraspError {
    /// An entity was missing a component the grasp system relies on
    #[error("There was a problem reading a component from the world")]
    ComponentError(#[from] ComponentError),
    /// An entity has already been despawned
    #[error("The entity does not exist")]
    NoSuchEntity(#[from] NoSuchEntity),
    /// A hand was asked to coordinate with a partner it was never linked to
    #[error("Hand {0:?} has no partner hand")]
    MissingPartner(Entity),
    /// The configuration could not be parsed
    #[error("Unable to parse the grasp configuration")]
    ConfigError(#[from] toml::de::Error),
    #[error(transparent)]
    /// An IO problem, usually while reading a configuration file
    IO(#[from] std::io::Error),
    #[error(transparent)]
    /// Anything else
    Other(#[from] anyhow::Error),
}
