//! Plot model.

use crate::model::{Model, ModelId, ModelRef};
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

/// A plot and the renderers laid out on it.
#[derive(Debug, Default)]
pub struct Plot {
    id: ModelId,
    layouts: RefCell<Vec<ModelRef>>,
}

impl Plot {
    pub const TYPE: &'static str = "Plot";

    /// Create an empty plot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model id.
    pub fn with_id(mut self, id: impl Into<ModelId>) -> Self {
        self.id = id.into();
        self
    }

    /// Lay out another model (annotation, toolbar panel) on the plot.
    pub fn add_layout(&self, model: ModelRef) {
        self.layouts.borrow_mut().push(model);
    }

    /// Laid out models, in the order they were added.
    pub fn layouts(&self) -> Vec<ModelRef> {
        self.layouts.borrow().clone()
    }
}

impl Model for Plot {
    fn id(&self) -> &ModelId {
        &self.id
    }

    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}
