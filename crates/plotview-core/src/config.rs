//! Interaction settings.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What happens when a resize drags an edge past the opposite edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsPolicy {
    /// Bounds may invert (left > right, bottom > top).
    #[default]
    Allow,
    /// The moving edge stops at the opposite edge.
    Clamp,
    /// Bounds are re-ordered after every update.
    Swap,
}

/// Settings shared by every box annotation view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Half-width of the band around an edge or corner that counts as a handle.
    #[serde(default = "default_handle_tolerance")]
    pub handle_tolerance: f64,
    #[serde(default)]
    pub bounds_policy: BoundsPolicy,
}

fn default_handle_tolerance() -> f64 {
    0.025
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            handle_tolerance: default_handle_tolerance(),
            bounds_policy: BoundsPolicy::default(),
        }
    }
}

impl InteractionConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded interaction config from {}", path.display());
        Ok(config)
    }
}
