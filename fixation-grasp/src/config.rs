use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{classify::GraspThresholds, GraspResult};

/// Parameters for the angular drives that pull finger joints towards their targets
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DriveParams {
    /// Stiffness of the drive
    pub spring: f32,
    /// Damping of the drive
    pub damping: f32,
    /// Maximum force the drive may apply. Zero means unlimited.
    pub force_limit: f32,
}

impl Default for DriveParams {
    fn default() -> Self {
        Self {
            spring: 9000.,
            damping: 1000.,
            force_limit: 0.,
        }
    }
}

impl DriveParams {
    /// The force limit as understood by the physics engine
    pub fn max_force(&self) -> f32 {
        if self.force_limit > 0. {
            self.force_limit
        } else {
            f32::MAX
        }
    }
}

/// Everything that can be tuned about fixation grasping.
///
/// A [`crate::Simulation`] takes ownership of its configuration when it is built and only hands out
/// shared references afterwards, so these values are fixed for the lifetime of the simulation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GraspConfig {
    /// Can hands pick objects up at all?
    pub fixation_grasp_enabled: bool,
    /// Can both hands pick up heavier objects together?
    pub two_hands_fixation_grasp_enabled: bool,
    /// Radius of the sensor around each hand used to find candidates
    pub grasp_area_radius: f32,
    /// Mass and size limits for one and two hand grasps
    pub thresholds: GraspThresholds,
    /// Finger drive tuning
    pub drive: DriveParams,
}

impl Default for GraspConfig {
    fn default() -> Self {
        Self {
            fixation_grasp_enabled: true,
            two_hands_fixation_grasp_enabled: true,
            grasp_area_radius: 4.,
            thresholds: Default::default(),
            drive: Default::default(),
        }
    }
}

impl GraspConfig {
    /// Parse a configuration from TOML. Missing fields keep their defaults.
    pub fn from_toml_str(toml: &str) -> GraspResult<Self> {
        Ok(toml::from_str(toml)?)
    }

    /// Read and parse a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> GraspResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
