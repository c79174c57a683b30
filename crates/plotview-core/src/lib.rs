//! plotview core library
//!
//! View trees for plots: building views from models, querying and tearing them
//! down through a hierarchy of view managers, and the pointer gestures of box
//! annotations.

pub mod config;
pub mod error;
pub mod gesture;
pub mod model;
pub mod models;
pub mod view;
pub mod views;

pub use config::{BoundsPolicy, InteractionConfig};
pub use error::{BuildError, BuildResult, ConfigError, ViewError, ViewResult};
pub use gesture::{BoxGesture, Cursor, GestureEvent, pan_line};
pub use model::{Model, ModelId, ModelRef, model_as, same_model};
pub use view::{
    BoxFuture, BuildOptions, PreOrder, QueryViews, View, ViewBase, ViewFactory, ViewId,
    ViewManager, ViewQuery, ViewRef, ViewRegistry, view_as,
};
pub use views::default_registry;
