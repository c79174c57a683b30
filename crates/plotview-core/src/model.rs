//! Model identity.
//!
//! Models are the declarative objects views are bound to. This crate never
//! looks inside them beyond an id and a type name: two models are the same
//! model only when they are the same allocation.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::rc::Rc;
use uuid::Uuid;

/// String identity of a model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    /// Create a new random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ModelId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for ModelId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ModelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A declarative object a view can be bound to.
pub trait Model: Any + fmt::Debug {
    /// The model's identity.
    fn id(&self) -> &ModelId;

    /// Name of the model's type, used to pick a view constructor.
    fn type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Rc<Self>) -> Rc<dyn Any>;
}

/// Shared handle to a model.
pub type ModelRef = Rc<dyn Model>;

impl fmt::Display for dyn Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.type_name(), self.id())
    }
}

/// Check whether two handles refer to the same model instance.
pub fn same_model(a: &ModelRef, b: &ModelRef) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// Get a typed handle to a model, if it is an `M`.
pub fn model_as<M: Model>(model: &ModelRef) -> Option<Rc<M>> {
    Rc::clone(model).into_any().downcast::<M>().ok()
}
