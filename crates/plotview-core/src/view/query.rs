//! Lookup operations shared by view managers and single-view queries.

use super::{PreOrder, View, ViewRef, view_as};
use crate::error::{ViewError, ViewResult};
use crate::model::{ModelRef, same_model};
use std::fmt;
use std::rc::Rc;

/// Lazy sequence of views produced by a query.
pub type Views<'a> = Box<dyn Iterator<Item = ViewRef> + 'a>;

/// Queries over a collection of views.
///
/// Implementors only provide [`QueryViews::query`]; every lookup is defined in
/// terms of it. Misses are empty results, except for the `get_one*` accessors
/// which turn a miss into [`ViewError::NotFound`].
pub trait QueryViews {
    /// Views accepted by `predicate`.
    fn query<'a>(&'a self, predicate: impl Fn(&ViewRef) -> bool + 'a) -> Views<'a>;

    fn all_views(&self) -> Views<'_> {
        self.query(|_| true)
    }

    /// First view accepted by `predicate`.
    fn query_one<'a>(&'a self, predicate: impl Fn(&ViewRef) -> bool + 'a) -> Option<ViewRef> {
        self.query(predicate).next()
    }

    /// Views bound to this exact model instance.
    fn find(&self, model: &ModelRef) -> Views<'_> {
        let model = Rc::clone(model);
        self.query(move |view| same_model(view.model(), &model))
    }

    /// Views whose model has the given id.
    fn find_by_id(&self, id: &str) -> Views<'_> {
        let id = id.to_owned();
        self.query(move |view| view.model().id().as_str() == id)
    }

    fn find_one(&self, model: &ModelRef) -> Option<ViewRef> {
        self.find(model).next()
    }

    fn find_one_by_id(&self, id: &str) -> Option<ViewRef> {
        self.find_by_id(id).next()
    }

    /// First view of `model` that is a `V`.
    fn find_one_as<V: View>(&self, model: &ModelRef) -> Option<Rc<V>> {
        self.find(model).find_map(|view| view_as::<V>(&view))
    }

    fn get_one(&self, model: &ModelRef) -> ViewResult<ViewRef> {
        self.find_one(model)
            .ok_or_else(|| ViewError::NotFound(model.to_string()))
    }

    fn get_one_by_id(&self, id: &str) -> ViewResult<ViewRef> {
        self.find_one_by_id(id)
            .ok_or_else(|| ViewError::NotFound(format!("a model with '{id}' identity")))
    }

    /// All views of `model`, in traversal order.
    fn find_all(&self, model: &ModelRef) -> Vec<ViewRef> {
        self.find(model).collect()
    }

    fn find_all_by_id(&self, id: &str) -> Vec<ViewRef> {
        self.find_by_id(id).collect()
    }

    /// One view per model, in the order of `models`. Models without a view are skipped.
    fn select(&self, models: &[ModelRef]) -> Vec<ViewRef> {
        models.iter().filter_map(|model| self.find_one(model)).collect()
    }
}

/// Queries over the subtree rooted at one view.
#[derive(Debug, Clone)]
pub struct ViewQuery {
    view: ViewRef,
}

impl ViewQuery {
    /// Wrap the tree rooted at `view`.
    pub fn new(view: ViewRef) -> Self {
        Self { view }
    }

    /// Get the root view.
    pub fn view(&self) -> &ViewRef {
        &self.view
    }
}

impl QueryViews for ViewQuery {
    fn query<'a>(&'a self, predicate: impl Fn(&ViewRef) -> bool + 'a) -> Views<'a> {
        Box::new(PreOrder::filtered([Rc::clone(&self.view)], predicate))
    }
}

impl fmt::Display for ViewQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ViewQuery({})", self.view)
    }
}
