//! Box annotation model.

use crate::gesture::{Bounds, BoxProps, Movable, Resizable};
use crate::model::{Model, ModelId};
use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;

/// A rectangular annotation that may be dragged and resized.
#[derive(Debug, Default)]
pub struct BoxAnnotation {
    id: ModelId,
    bounds: Cell<Bounds>,
    props: Cell<BoxProps>,
}

impl BoxAnnotation {
    pub const TYPE: &'static str = "BoxAnnotation";

    /// A read-only box covering `bounds`.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            id: ModelId::new(),
            bounds: Cell::new(bounds),
            props: Cell::new(BoxProps::default()),
        }
    }

    /// Set the model id.
    pub fn with_id(mut self, id: impl Into<ModelId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set whether the box reacts to pointer gestures.
    pub fn editable(self, editable: bool) -> Self {
        self.update_props(|props| props.editable = editable);
        self
    }

    /// Set the axes the box may be moved along.
    pub fn movable(self, movable: Movable) -> Self {
        self.update_props(|props| props.movable = movable);
        self
    }

    /// Set the edges that may be dragged.
    pub fn resizable(self, resizable: Resizable) -> Self {
        self.update_props(|props| props.resizable = resizable);
        self
    }

    /// Set whether edges and corners act as resize handles.
    pub fn use_handles(self, use_handles: bool) -> Self {
        self.update_props(|props| props.use_handles = use_handles);
        self
    }

    /// Get the current bounds.
    pub fn bounds(&self) -> Bounds {
        self.bounds.get()
    }

    /// Set the bounds.
    pub fn set_bounds(&self, bounds: Bounds) {
        self.bounds.set(bounds);
    }

    /// Get the interaction properties.
    pub fn props(&self) -> BoxProps {
        self.props.get()
    }

    /// Set the interaction properties.
    pub fn set_props(&self, props: BoxProps) {
        self.props.set(props);
    }

    fn update_props(&self, f: impl FnOnce(&mut BoxProps)) {
        let mut props = self.props.get();
        f(&mut props);
        self.props.set(props);
    }
}

impl Model for BoxAnnotation {
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
