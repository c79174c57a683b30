//! Hand-wired views and models for unit tests.

use super::{BoxFuture, BuildOptions, View, ViewFactory, ViewId, ViewManager, ViewRef};
use crate::error::{BuildError, BuildResult};
use crate::model::{Model, ModelId, ModelRef};
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

#[derive(Debug)]
pub(crate) struct TestModel {
    id: ModelId,
}

impl Model for TestModel {
    fn id(&self) -> &ModelId {
        &self.id
    }

    fn type_name(&self) -> &'static str {
        "Test"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

pub(crate) fn test_model(id: &str) -> ModelRef {
    Rc::new(TestModel { id: id.into() })
}

/// A view whose tree shape and owner are set by hand.
#[derive(Debug)]
pub(crate) struct TestView {
    id: ViewId,
    model: ModelRef,
    parent: RefCell<Option<Weak<dyn View>>>,
    children: RefCell<Vec<ViewRef>>,
    owner: RefCell<Weak<ViewManager>>,
    removals: Cell<usize>,
    children_calls: Cell<usize>,
}

impl TestView {
    pub(crate) fn new(model: ModelRef) -> Rc<Self> {
        Rc::new(Self {
            id: ViewId::new(),
            model,
            parent: RefCell::new(None),
            children: RefCell::new(Vec::new()),
            owner: RefCell::new(Weak::new()),
            removals: Cell::new(0),
            children_calls: Cell::new(0),
        })
    }

    /// A view nested in `parent`. The parent does not list it as a child.
    pub(crate) fn with_parent(model: ModelRef, parent: &ViewRef) -> Rc<Self> {
        let view = Self::new(model);
        *view.parent.borrow_mut() = Some(Rc::downgrade(parent));
        view
    }

    pub(crate) fn handle(self: &Rc<Self>) -> ViewRef {
        Rc::clone(self) as ViewRef
    }

    pub(crate) fn push_child(&self, child: ViewRef) {
        self.children.borrow_mut().push(child);
    }

    pub(crate) fn clear_children(&self) {
        self.children.borrow_mut().clear();
    }

    pub(crate) fn attach(&self, owner: &Rc<ViewManager>) {
        *self.owner.borrow_mut() = Rc::downgrade(owner);
    }

    pub(crate) fn removals(&self) -> usize {
        self.removals.get()
    }

    pub(crate) fn children_calls(&self) -> usize {
        self.children_calls.get()
    }
}

impl View for TestView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn model(&self) -> &ModelRef {
        &self.model
    }

    fn parent(&self) -> Option<ViewRef> {
        self.parent.borrow().as_ref().and_then(Weak::upgrade)
    }

    fn children(&self) -> Vec<ViewRef> {
        self.children_calls.set(self.children_calls.get() + 1);
        self.children.borrow().clone()
    }

    fn remove(&self) {
        self.removals.set(self.removals.get() + 1);
        let owner = self.owner.borrow().upgrade();
        if let Some(owner) = owner {
            owner.delete(self);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

/// A factory that knows no models.
#[derive(Debug, Default)]
pub(crate) struct NoViews;

impl ViewFactory for NoViews {
    fn build(
        &self,
        model: ModelRef,
        _options: BuildOptions,
    ) -> BoxFuture<'_, BuildResult<ViewRef>> {
        Box::pin(async move { Err(BuildError::UnknownModel(model.to_string())) })
    }
}

pub(crate) fn manager() -> Rc<ViewManager> {
    ViewManager::new(Rc::new(NoViews))
}
