//! Concrete models: plots and what is laid out on them.
//!
//! These carry only what views and gestures read. Models are shared through
//! [`ModelRef`](crate::model::ModelRef) handles, so mutable properties use
//! interior mutability.

mod box_annotation;
mod plot;
mod toolbar;

pub use box_annotation::BoxAnnotation;
pub use plot::Plot;
pub use toolbar::{ClickPanTool, PanDirection, Toolbar, ToolbarPanel};
