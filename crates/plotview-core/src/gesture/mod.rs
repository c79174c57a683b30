//! Pointer gestures and cursor feedback for box annotations.
//!
//! A [`BoxGesture`] consumes [`GestureEvent`]s in arrival order, may move or
//! resize the annotation's [`Bounds`], and answers every event with the
//! [`Cursor`] the plot should show.

mod hit;
mod machine;

pub use hit::{Bounds, BoxProps, Corner, Edge, HitTarget, Movable, Resizable, cursor_for, hit_test};
pub use machine::{BoxGesture, Drag, Interaction};

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A pointer gesture, in the annotation's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GestureEvent {
    Hover { position: Point },
    PanStart { position: Point },
    PanMove { position: Point },
    PanEnd { position: Point },
}

impl GestureEvent {
    /// A hover at `(x, y)`.
    pub fn hover(x: f64, y: f64) -> Self {
        Self::Hover { position: Point::new(x, y) }
    }

    /// A pan starting at `(x, y)`.
    pub fn pan_start(x: f64, y: f64) -> Self {
        Self::PanStart { position: Point::new(x, y) }
    }

    /// A pan moving at `(x, y)`.
    pub fn pan_move(x: f64, y: f64) -> Self {
        Self::PanMove { position: Point::new(x, y) }
    }

    /// A pan ending at `(x, y)`.
    pub fn pan_end(x: f64, y: f64) -> Self {
        Self::PanEnd { position: Point::new(x, y) }
    }

    /// Where the pointer is.
    pub fn position(&self) -> Point {
        match *self {
            Self::Hover { position }
            | Self::PanStart { position }
            | Self::PanMove { position }
            | Self::PanEnd { position } => position,
        }
    }
}

/// A straight pan from `from` to `to`, as a pointer would record it.
///
/// Produces a hover at the press point, the pan start, `samples` moves evenly
/// spaced along the line (the last one at `to`), and the pan end at `to`.
pub fn pan_line(from: Point, to: Point, samples: usize) -> Vec<GestureEvent> {
    let mut events = Vec::with_capacity(samples + 3);
    events.push(GestureEvent::Hover { position: from });
    events.push(GestureEvent::PanStart { position: from });
    for i in 1..=samples {
        let t = i as f64 / samples as f64;
        events.push(GestureEvent::PanMove {
            position: from.lerp(to, t),
        });
    }
    events.push(GestureEvent::PanEnd { position: to });
    events
}

/// Cursor shown over the plot, named by its CSS keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cursor {
    #[default]
    Default,
    Grab,
    Grabbing,
    Move,
    EwResize,
    NsResize,
    NwseResize,
    NeswResize,
}

impl Cursor {
    /// Get the CSS cursor keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
            Self::Move => "move",
            Self::EwResize => "ew-resize",
            Self::NsResize => "ns-resize",
            Self::NwseResize => "nwse-resize",
            Self::NeswResize => "nesw-resize",
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
