//! Gesture scripts.

use crate::AppError;
use plotview_core::GestureEvent;
use plotview_core::gesture::Bounds;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The box to build and the pointer events to replay against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default = "default_bounds")]
    pub bounds: Bounds,
    #[serde(default)]
    pub use_handles: bool,
    pub events: Vec<GestureEvent>,
}

fn default_bounds() -> Bounds {
    Bounds::new(0.0, 0.0, 0.5, 0.5)
}

impl Script {
    /// A handle-mode box: hovering, a pan that starts outside the box, and a
    /// pan that drags the box across the plot.
    pub fn builtin() -> Self {
        Self {
            bounds: default_bounds(),
            use_handles: true,
            events: vec![
                GestureEvent::hover(0.25, 0.25),
                GestureEvent::hover(0.4, 0.4),
                GestureEvent::pan_start(0.75, 0.75),
                GestureEvent::pan_move(0.4, 0.4),
                GestureEvent::pan_end(0.4, 0.4),
                GestureEvent::pan_start(0.25, 0.25),
                GestureEvent::pan_end(0.75, 0.75),
            ],
        }
    }

    /// Parse a script from JSON.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a script from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let script = Self::from_json(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded {} events from {}", script.events.len(), path.display());
        Ok(script)
    }
}
