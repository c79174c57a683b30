//! View manager: root bookkeeping and the manager hierarchy.

use super::{
    BoxFuture, BuildOptions, PreOrder, QueryViews, View, ViewFactory, ViewId, ViewRef, Views,
};
use crate::error::BuildResult;
use crate::model::{ModelRef, same_model};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// Insertion-ordered set of views keyed by [`ViewId`].
#[derive(Default)]
struct ViewSet {
    order: Vec<ViewRef>,
    ids: HashSet<ViewId>,
}

impl ViewSet {
    fn insert(&mut self, view: ViewRef) -> bool {
        let inserted = self.ids.insert(view.id());
        if inserted {
            self.order.push(view);
        }
        inserted
    }

    fn remove(&mut self, id: ViewId) -> bool {
        let removed = self.ids.remove(&id);
        if removed {
            self.order.retain(|view| view.id() != id);
        }
        removed
    }

    fn contains(&self, id: ViewId) -> bool {
        self.ids.contains(&id)
    }

    fn iter(&self) -> std::slice::Iter<'_, ViewRef> {
        self.order.iter()
    }

    fn snapshot(&self) -> Vec<ViewRef> {
        self.order.clone()
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

impl FromIterator<ViewRef> for ViewSet {
    fn from_iter<I: IntoIterator<Item = ViewRef>>(iter: I) -> Self {
        let mut set = Self::default();
        for view in iter {
            set.insert(view);
        }
        set
    }
}

/// Owns a set of root views and a cache of every view reachable from them.
///
/// The cache is a snapshot taken at construction. Later changes to the shape of
/// the tree are only seen through [`ViewManager::add`] and [`ViewManager::delete`],
/// both of which cascade to the parent manager.
pub struct ViewManager {
    roots: RefCell<ViewSet>,
    views: RefCell<ViewSet>,
    parent: Option<Rc<ViewManager>>,
    factory: Rc<dyn ViewFactory>,
}

impl ViewManager {
    /// Create an empty top-level manager.
    pub fn new(factory: Rc<dyn ViewFactory>) -> Rc<Self> {
        Self::with_roots(factory, [], None)
    }

    /// Create a manager over `roots`, caching every view reachable from them.
    pub fn with_roots(
        factory: Rc<dyn ViewFactory>,
        roots: impl IntoIterator<Item = ViewRef>,
        parent: Option<Rc<ViewManager>>,
    ) -> Rc<Self> {
        let roots: ViewSet = roots.into_iter().collect();
        let views: ViewSet = PreOrder::new(roots.snapshot()).collect();
        Rc::new(Self {
            roots: RefCell::new(roots),
            views: RefCell::new(views),
            parent,
            factory,
        })
    }

    /// Create an empty manager nested in this one, sharing its factory.
    pub fn child(self: &Rc<Self>) -> Rc<Self> {
        Self::with_roots(Rc::clone(&self.factory), [], Some(Rc::clone(self)))
    }

    /// Get the manager this one cascades to.
    pub fn parent(&self) -> Option<&Rc<ViewManager>> {
        self.parent.as_ref()
    }

    /// Get the factory views are built with.
    pub fn factory(&self) -> &Rc<dyn ViewFactory> {
        &self.factory
    }

    /// Build a view for `model` owned by this manager, then register it.
    ///
    /// Resolves once the view and all of its sub-views are constructed.
    /// Construction errors are returned as the factory produced them.
    pub fn build_view(
        self: &Rc<Self>,
        model: ModelRef,
        parent: Option<ViewRef>,
    ) -> BoxFuture<'_, BuildResult<ViewRef>> {
        let options = BuildOptions {
            owner: Rc::clone(self),
            parent,
        };
        Box::pin(async move {
            let view = self.factory.build(model, options).await?;
            self.add(&view);
            Ok(view)
        })
    }

    /// Register a view.
    ///
    /// A view nested in another view (one with a parent) becomes a root of this
    /// manager and is registered with the parent manager too. A view without a
    /// parent only enters the cache; top-level roots are given to
    /// [`ViewManager::with_roots`].
    pub fn add(&self, view: &ViewRef) {
        if view.parent().is_some() {
            self.roots.borrow_mut().insert(Rc::clone(view));
            if let Some(parent) = &self.parent {
                parent.add(view);
            }
        }
        self.views.borrow_mut().insert(Rc::clone(view));
        log::debug!("Added {view} to {self}");
    }

    /// Unregister a view from this manager and every ancestor manager.
    pub fn delete(&self, view: &dyn View) {
        let id = view.id();
        self.views.borrow_mut().remove(id);
        self.roots.borrow_mut().remove(id);
        if let Some(parent) = &self.parent {
            parent.delete(view);
        }
        log::debug!("Deleted {view} from {self}");
    }

    /// Same as [`ViewManager::delete`].
    pub fn remove(&self, view: &dyn View) {
        self.delete(view);
    }

    /// Remove every view currently known to this manager.
    pub fn clear(&self) {
        let views: Vec<ViewRef> = self.all_views().collect();
        log::debug!("Clearing {} views from {self}", views.len());
        for view in views {
            view.remove();
        }
    }

    /// Root view of `model`. Only roots are searched, unlike [`QueryViews::find`].
    pub fn get(&self, model: &ModelRef) -> Option<ViewRef> {
        self.roots
            .borrow()
            .iter()
            .find(|view| same_model(view.model(), model))
            .cloned()
    }

    /// Root view whose model has the given id.
    pub fn get_by_id(&self, id: &str) -> Option<ViewRef> {
        self.roots
            .borrow()
            .iter()
            .find(|view| view.model().id().as_str() == id)
            .cloned()
    }

    /// Get a snapshot of the root views, in insertion order.
    pub fn roots(&self) -> Vec<ViewRef> {
        self.roots.borrow().snapshot()
    }

    /// Check if `view` is a root of this manager.
    pub fn is_root(&self, view: &dyn View) -> bool {
        self.roots.borrow().contains(view.id())
    }

    /// Check if `view` is in the cache.
    pub fn contains(&self, view: &dyn View) -> bool {
        self.views.borrow().contains(view.id())
    }

    /// Number of views in the cache.
    pub fn len(&self) -> usize {
        self.views.borrow().len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl QueryViews for ViewManager {
    fn query<'a>(&'a self, predicate: impl Fn(&ViewRef) -> bool + 'a) -> Views<'a> {
        // Snapshot so callers may add or delete while consuming the result.
        let views = self.views.borrow().snapshot();
        Box::new(views.into_iter().filter(move |view| predicate(view)))
    }
}

impl fmt::Display for ViewManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roots = self.roots.borrow();
        let names: Vec<String> = roots.iter().map(|view| view.to_string()).collect();
        write!(f, "ViewManager({})", names.join(", "))
    }
}

impl fmt::Debug for ViewManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewManager")
            .field("roots", &self.roots.borrow().len())
            .field("views", &self.views.borrow().len())
            .field("has_parent", &self.parent.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::testing::{TestView, manager, test_model};

    /// root ── a ── a1
    ///      └─ b
    fn tree() -> (Rc<TestView>, Vec<Rc<TestView>>) {
        let root = TestView::new(test_model("root"));
        let a = TestView::with_parent(test_model("a"), &root.handle());
        let a1 = TestView::with_parent(test_model("a1"), &a.handle());
        let b = TestView::with_parent(test_model("b"), &root.handle());
        a.push_child(a1.clone());
        root.push_child(a.clone());
        root.push_child(b.clone());
        (root, vec![a, a1, b])
    }

    fn with_roots(roots: Vec<ViewRef>, parent: Option<Rc<ViewManager>>) -> Rc<ViewManager> {
        let factory = Rc::clone(manager().factory());
        ViewManager::with_roots(factory, roots, parent)
    }

    #[test]
    fn test_construction_caches_reachable_views() {
        let (root, rest) = tree();
        let vm = with_roots(vec![root.handle()], None);

        assert_eq!(vm.len(), 4);
        assert_eq!(vm.roots().len(), 1);
        assert!(vm.contains(root.as_ref()));
        for view in &rest {
            assert!(vm.contains(view.as_ref()));
            assert!(!vm.is_root(view.as_ref()));
        }
    }

    #[test]
    fn test_cache_is_a_snapshot() {
        let (root, _) = tree();
        let vm = with_roots(vec![root.handle()], None);

        root.push_child(TestView::new(test_model("late")));
        assert_eq!(vm.len(), 4);
        assert!(vm.find_one_by_id("late").is_none());
    }

    #[test]
    fn test_get_searches_roots_only() {
        let (root, rest) = tree();
        let vm = with_roots(vec![root.handle()], None);

        let a_model = rest[0].model().clone();
        assert!(vm.get(&a_model).is_none());
        assert!(vm.get_by_id("a").is_none());
        assert!(vm.find_one(&a_model).is_some());
        assert!(vm.find_one_by_id("a").is_some());

        assert!(vm.get(root.model()).is_some());
        assert!(vm.get_by_id("root").is_some_and(|v| v.id() == root.id()));
    }

    #[test]
    fn test_root_lookup_after_delete() {
        let root = TestView::new(test_model("solo"));
        let vm = with_roots(vec![root.handle()], None);

        assert!(vm.get_by_id("solo").is_some_and(|v| v.id() == root.id()));
        vm.delete(root.as_ref());
        assert!(vm.get_by_id("solo").is_none());
        assert!(vm.is_empty());
    }

    #[test]
    fn test_add_parented_view_becomes_root_and_cascades() {
        let page = manager();
        let plot = page.child();
        let host = TestView::new(test_model("host"));
        let nested = TestView::with_parent(test_model("nested"), &host.handle());

        plot.add(&nested.handle());

        assert!(plot.is_root(nested.as_ref()));
        assert!(plot.contains(nested.as_ref()));
        assert!(page.is_root(nested.as_ref()));
        assert!(page.contains(nested.as_ref()));
        assert!(plot.get_by_id("nested").is_some());
    }

    #[test]
    fn test_add_parentless_view_is_cached_but_not_a_root() {
        let page = manager();
        let plot = page.child();
        let top = TestView::new(test_model("top"));

        plot.add(&top.handle());

        assert!(plot.contains(top.as_ref()));
        assert!(!plot.is_root(top.as_ref()));
        assert!(plot.get_by_id("top").is_none());
        assert!(plot.find_one_by_id("top").is_some());
        // The parent manager never hears about it.
        assert!(!page.contains(top.as_ref()));
    }

    #[test]
    fn test_delete_cascades_to_every_ancestor() {
        let page = manager();
        let plot = page.child();
        let panel = plot.child();
        let host = TestView::new(test_model("host"));
        let nested = TestView::with_parent(test_model("nested"), &host.handle());

        panel.add(&nested.handle());
        assert!(page.contains(nested.as_ref()));

        panel.remove(nested.as_ref());
        for vm in [&panel, &plot, &page] {
            assert!(!vm.contains(nested.as_ref()));
            assert!(!vm.is_root(nested.as_ref()));
        }
    }

    #[test]
    fn test_delete_unknown_view_is_harmless() {
        let vm = manager();
        let stranger = TestView::new(test_model("stranger"));
        vm.delete(stranger.as_ref());
        assert!(vm.is_empty());
    }

    #[test]
    fn test_clear_removes_each_view_once() {
        let (root, rest) = tree();
        let vm = with_roots(vec![root.handle()], None);
        root.attach(&vm);
        for view in &rest {
            view.attach(&vm);
        }

        vm.clear();

        assert_eq!(root.removals(), 1);
        for view in &rest {
            assert_eq!(view.removals(), 1);
        }
        assert!(vm.is_empty());
        assert!(vm.roots().is_empty());
    }

    #[test]
    fn test_query_never_repeats() {
        let root = TestView::new(test_model("root"));
        let shared = TestView::new(test_model("shared"));
        let a = TestView::new(test_model("a"));
        let b = TestView::new(test_model("b"));
        a.push_child(shared.clone());
        b.push_child(shared.clone());
        root.push_child(a);
        root.push_child(b);
        let vm = with_roots(vec![root.handle(), shared.handle()], None);

        let views: Vec<_> = vm.query(|_| true).collect();
        let unique: HashSet<_> = views.iter().map(|v| v.id()).collect();
        assert_eq!(views.len(), unique.len());
        assert_eq!(views.len(), 4);
    }

    #[test]
    fn test_display() {
        let root = TestView::new(test_model("p1"));
        let vm = with_roots(vec![root.handle()], None);
        assert_eq!(vm.to_string(), "ViewManager(TestView(p1))");
        assert_eq!(manager().to_string(), "ViewManager()");
    }
}
