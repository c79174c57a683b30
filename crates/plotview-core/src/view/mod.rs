//! Views and view management.
//!
//! A view is the runtime counterpart of one model. Views form a tree through
//! [`View::children`]; a [`ViewManager`] keeps track of the views it owns and,
//! together with [`ViewQuery`], exposes the traversal and lookup operations
//! rendering and interaction code is built on.

mod factory;
mod manager;
mod query;
mod traversal;

#[cfg(test)]
pub(crate) mod testing;

pub use factory::{BoxFuture, BuildOptions, ViewFactory, ViewRegistry};
pub use manager::ViewManager;
pub use query::{QueryViews, ViewQuery, Views};
pub use traversal::PreOrder;

use crate::model::ModelRef;
use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};
use uuid::Uuid;

/// Stable identity of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(Uuid);

impl ViewId {
    /// Create a new unique view id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node of the view tree.
pub trait View: Any + fmt::Debug {
    /// The view's identity. Traversal and manager bookkeeping key on it.
    fn id(&self) -> ViewId;

    /// The model this view renders.
    fn model(&self) -> &ModelRef;

    /// The view this one is nested in, if any.
    fn parent(&self) -> Option<ViewRef>;

    /// Direct children, in rendering order.
    fn children(&self) -> Vec<ViewRef> {
        Vec::new()
    }

    /// Tear the view down and unregister it from its owner.
    fn remove(&self);

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Rc<Self>) -> Rc<dyn Any>;
}

/// Shared handle to a view.
pub type ViewRef = Rc<dyn View>;

impl fmt::Display for dyn View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let model = self.model();
        write!(f, "{}View({})", model.type_name(), model.id())
    }
}

/// Get a typed handle to a view, if it is a `V`.
pub fn view_as<V: View>(view: &ViewRef) -> Option<Rc<V>> {
    Rc::clone(view).into_any().downcast::<V>().ok()
}

/// State every concrete view carries: identity, model, owner and parent.
#[derive(Debug)]
pub struct ViewBase {
    id: ViewId,
    model: ModelRef,
    owner: Weak<ViewManager>,
    parent: Option<Weak<dyn View>>,
    removed: Cell<bool>,
}

impl ViewBase {
    /// Create the base state for a view of `model` built with `options`.
    pub fn new(model: ModelRef, options: &BuildOptions) -> Self {
        Self {
            id: ViewId::new(),
            model,
            owner: Rc::downgrade(&options.owner),
            parent: options.parent.as_ref().map(Rc::downgrade),
            removed: Cell::new(false),
        }
    }

    /// Get the view id.
    pub fn id(&self) -> ViewId {
        self.id
    }

    /// Get the model the view was built for.
    pub fn model(&self) -> &ModelRef {
        &self.model
    }

    /// The manager that built this view, while it is alive.
    pub fn owner(&self) -> Option<Rc<ViewManager>> {
        self.owner.upgrade()
    }

    /// Get the parent view, if it is still alive.
    pub fn parent(&self) -> Option<ViewRef> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    /// Check if the view has been removed.
    pub fn is_removed(&self) -> bool {
        self.removed.get()
    }

    /// Unregister `view` from its owner.
    ///
    /// Only the first call has an effect; returns whether this call did the removal.
    pub fn remove(&self, view: &dyn View) -> bool {
        if self.removed.replace(true) {
            return false;
        }
        if let Some(owner) = self.owner.upgrade() {
            owner.delete(view);
        }
        true
    }
}
