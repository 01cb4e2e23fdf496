//! Culling configuration
//!
//! Loaded from TOML; every field is optional and falls back to its default.
//!
//! ```toml
//! enable_mesh_culling = true
//! show_debug_spheres = false
//! release_delay_secs = 1.0
//!
//! [small]
//! maximum_object_size = 1.0
//! culling_distance = 50.0
//!
//! [medium]
//! maximum_object_size = 5.0
//! culling_distance = 100.0
//!
//! [large]
//! culling_distance = 200.0
//! ```

use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::culling::SizeThresholds;
use crate::error::{Error, Result};

/// Size limit and culling distance of one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CullingGroupConfig {
    /// Largest bounding-sphere diameter (m) kept in this group
    pub maximum_object_size: f32,
    /// Objects farther than this (m) are hidden
    pub culling_distance: f32,
}

impl CullingGroupConfig {
    pub fn new(maximum_object_size: f32, culling_distance: f32) -> Self {
        Self { maximum_object_size, culling_distance }
    }
}

impl Default for CullingGroupConfig {
    fn default() -> Self {
        Self::new(f32::MAX, 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CullingConfig {
    /// Master switch. When false every manager operation is a no-op.
    pub enable_mesh_culling: bool,
    /// Draw bucket spheres through the debug drawer
    pub show_debug_spheres: bool,
    pub small: CullingGroupConfig,
    pub medium: CullingGroupConfig,
    /// `maximum_object_size` is unused: everything bigger than medium lands here
    pub large: CullingGroupConfig,
    /// Wait between the end of a manipulation and the first settle check
    pub release_delay_secs: f32,
}

impl Default for CullingConfig {
    fn default() -> Self {
        Self {
            enable_mesh_culling: true,
            show_debug_spheres: false,
            small: CullingGroupConfig::new(1.0, 50.0),
            medium: CullingGroupConfig::new(5.0, 100.0),
            large: CullingGroupConfig::new(f32::MAX, 200.0),
            release_delay_secs: 1.0,
        }
    }
}

impl CullingConfig {
    /// Default configuration with culling switched off.
    pub fn disabled() -> Self {
        Self {
            enable_mesh_culling: false,
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let small = self.small.maximum_object_size;
        let medium = self.medium.maximum_object_size;

        if !(small.is_finite() && small > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "small.maximum_object_size must be finite and positive, got {}", small
            )));
        }
        if !(medium.is_finite() && medium > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "medium.maximum_object_size must be finite and positive, got {}", medium
            )));
        }
        if small > medium {
            return Err(Error::InvalidConfig(format!(
                "small.maximum_object_size ({}) exceeds medium.maximum_object_size ({})", small, medium
            )));
        }
        for (name, group) in [("small", &self.small), ("medium", &self.medium), ("large", &self.large)] {
            if group.culling_distance.is_nan() || group.culling_distance < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{}.culling_distance must be >= 0, got {}", name, group.culling_distance
                )));
            }
        }
        if !(self.release_delay_secs >= 0.0) || Duration::try_from_secs_f32(self.release_delay_secs).is_err() {
            return Err(Error::InvalidConfig(format!(
                "release_delay_secs must be a representable duration >= 0, got {}", self.release_delay_secs
            )));
        }
        Ok(())
    }

    pub fn thresholds(&self) -> SizeThresholds {
        SizeThresholds::new(self.small.maximum_object_size, self.medium.maximum_object_size)
    }

    /// Culling distances in Small, Medium, Large order.
    pub fn distances(&self) -> [f32; 3] {
        [self.small.culling_distance, self.medium.culling_distance, self.large.culling_distance]
    }

    /// Release delay as a Duration. Values `validate` rejects saturate
    /// (negative or NaN to zero, too large to `Duration::MAX`).
    pub fn release_delay(&self) -> Duration {
        match Duration::try_from_secs_f32(self.release_delay_secs) {
            Ok(delay) => delay,
            Err(_) if self.release_delay_secs > 0.0 => Duration::MAX,
            Err(_) => Duration::ZERO,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
