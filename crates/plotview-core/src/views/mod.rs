//! Views of the concrete models, and the registry that builds them.

mod box_annotation;
mod plot;
mod toolbar;

pub use box_annotation::BoxAnnotationView;
pub use plot::PlotView;
pub use toolbar::{ClickPanToolView, PanRequest, ToolbarPanelView, ToolbarView};

use crate::config::InteractionConfig;
use crate::error::{BuildError, BuildResult};
use crate::model::{Model, ModelRef, model_as};
use crate::models::{BoxAnnotation, ClickPanTool, Plot, Toolbar, ToolbarPanel};
use crate::view::{View, ViewManager, ViewRegistry};
use std::rc::Rc;

/// A registry with a constructor for every model in [`crate::models`].
///
/// `config` is handed to every box annotation view.
pub fn default_registry(config: InteractionConfig) -> ViewRegistry {
    let mut registry = ViewRegistry::new();
    registry.register(Plot::TYPE, PlotView::build);
    registry.register(BoxAnnotation::TYPE, move |model, options| {
        BoxAnnotationView::build(model, options, config)
    });
    registry.register(ToolbarPanel::TYPE, ToolbarPanelView::build);
    registry.register(Toolbar::TYPE, ToolbarView::build);
    registry.register(ClickPanTool::TYPE, ClickPanToolView::build);
    registry
}

/// Typed handle to the model a constructor was called with.
fn typed_model<M: Model>(model: &ModelRef, expected: &str) -> BuildResult<Rc<M>> {
    model_as::<M>(model).ok_or_else(|| BuildError::Failed {
        model: model.to_string(),
        reason: format!("expected a {expected}"),
    })
}

/// Remove the views `owner` already built under `parent` whose build then failed.
fn discard_children(owner: &ViewManager, parent: &dyn View) {
    let parent_id = parent.id();
    for child in owner.roots() {
        if child.parent().is_some_and(|view| view.id() == parent_id) {
            child.remove();
        }
    }
}
