//! Deduplicated pre-order traversal of the view tree.

use super::{ViewId, ViewRef};
use std::collections::HashSet;
use std::fmt;

/// Lazy pre-order walk over every view reachable from a set of roots.
///
/// Each view is visited at most once per walk, keyed by [`ViewId`], so shared
/// children and cycles terminate. A view is yielded (if it passes the
/// predicate) before its children are expanded, and children are expanded
/// only when the walk is resumed, so stopping early never touches views past
/// the last one yielded.
pub struct PreOrder<'a> {
    /// Views still to visit, in reverse visiting order.
    stack: Vec<ViewRef>,
    visited: HashSet<ViewId>,
    /// Last visited view whose children are not yet on the stack.
    pending: Option<ViewRef>,
    predicate: Option<Box<dyn Fn(&ViewRef) -> bool + 'a>>,
}

impl<'a> PreOrder<'a> {
    /// Walk every view reachable from `roots`.
    pub fn new(roots: impl IntoIterator<Item = ViewRef>) -> Self {
        let mut stack: Vec<ViewRef> = roots.into_iter().collect();
        stack.reverse();
        Self {
            stack,
            visited: HashSet::new(),
            pending: None,
            predicate: None,
        }
    }

    /// Walk every view reachable from `roots`, yielding only those accepted by `predicate`.
    ///
    /// The predicate runs exactly once for each distinct view reached.
    pub fn filtered(
        roots: impl IntoIterator<Item = ViewRef>,
        predicate: impl Fn(&ViewRef) -> bool + 'a,
    ) -> Self {
        let mut walk = Self::new(roots);
        walk.predicate = Some(Box::new(predicate));
        walk
    }

    fn expand_pending(&mut self) {
        if let Some(view) = self.pending.take() {
            let children = view.children();
            self.stack.extend(children.into_iter().rev());
        }
    }
}

impl Iterator for PreOrder<'_> {
    type Item = ViewRef;

    fn next(&mut self) -> Option<ViewRef> {
        loop {
            self.expand_pending();
            let view = self.stack.pop()?;
            if !self.visited.insert(view.id()) {
                continue;
            }
            self.pending = Some(ViewRef::clone(&view));
            let accepted = self.predicate.as_ref().is_none_or(|accept| accept(&view));
            if accepted {
                return Some(view);
            }
        }
    }
}

impl fmt::Debug for PreOrder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreOrder")
            .field("queued", &self.stack.len())
            .field("visited", &self.visited.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::View;
    use crate::view::testing::{TestView, test_model};
    use std::cell::Cell;
    use std::collections::HashMap;

    fn ids(views: impl Iterator<Item = ViewRef>) -> Vec<String> {
        views.map(|v| v.model().id().to_string()).collect()
    }

    /// root
    /// ├── a
    /// │   ├── a1
    /// │   └── a2
    /// └── b
    ///     └── b1
    fn sample_tree() -> ViewRef {
        let root = TestView::new(test_model("root"));
        let a = TestView::new(test_model("a"));
        let b = TestView::new(test_model("b"));
        a.push_child(TestView::new(test_model("a1")));
        a.push_child(TestView::new(test_model("a2")));
        b.push_child(TestView::new(test_model("b1")));
        root.push_child(a);
        root.push_child(b);
        root
    }

    #[test]
    fn test_pre_order() {
        let root = sample_tree();
        assert_eq!(
            ids(PreOrder::new([root])),
            vec!["root", "a", "a1", "a2", "b", "b1"]
        );
    }

    #[test]
    fn test_deterministic_and_restartable() {
        let root = sample_tree();
        let first = ids(PreOrder::new([root.clone()]));
        let second = ids(PreOrder::new([root]));
        assert_eq!(first, second);
    }

    #[test]
    fn test_diamond_yields_shared_child_once() {
        let root = TestView::new(test_model("root"));
        let left = TestView::new(test_model("left"));
        let right = TestView::new(test_model("right"));
        let shared = TestView::new(test_model("shared"));
        left.push_child(shared.clone());
        right.push_child(shared);
        root.push_child(left);
        root.push_child(right);

        assert_eq!(
            ids(PreOrder::new([root.handle()])),
            vec!["root", "left", "shared", "right"]
        );
    }

    #[test]
    fn test_cycle_terminates() {
        let a = TestView::new(test_model("a"));
        let b = TestView::new(test_model("b"));
        a.push_child(b.clone());
        b.push_child(a.clone());

        assert_eq!(ids(PreOrder::new([a.handle()])), vec!["a", "b"]);

        // Break the cycle so the test doesn't leak.
        a.clear_children();
    }

    #[test]
    fn test_roots_sharing_nodes() {
        let first = TestView::new(test_model("first"));
        let second = TestView::new(test_model("second"));
        let shared = TestView::new(test_model("shared"));
        first.push_child(shared.clone());
        second.push_child(shared);

        assert_eq!(
            ids(PreOrder::new([first.handle(), second.handle()])),
            vec!["first", "shared", "second"]
        );
    }

    #[test]
    fn test_predicate_runs_once_per_view() {
        let root = TestView::new(test_model("root"));
        let shared = TestView::new(test_model("shared"));
        let a = TestView::new(test_model("a"));
        let b = TestView::new(test_model("b"));
        a.push_child(shared.clone());
        b.push_child(shared);
        root.push_child(a);
        root.push_child(b);

        let calls = std::cell::RefCell::new(HashMap::<String, usize>::new());
        let matched = PreOrder::filtered([root.handle()], |view| {
            *calls
                .borrow_mut()
                .entry(view.model().id().to_string())
                .or_default() += 1;
            view.model().id().as_str() != "a"
        })
        .count();

        assert_eq!(matched, 3);
        assert!(calls.borrow().values().all(|&n| n == 1));
        assert_eq!(calls.borrow().len(), 4);
    }

    #[test]
    fn test_early_stop_does_not_expand_children() {
        let root = TestView::new(test_model("root"));
        let child = TestView::new(test_model("child"));
        root.push_child(child.clone());

        let first = PreOrder::new([root.handle()]).next();
        assert_eq!(first.map(|v| v.id()), Some(root.id()));
        assert_eq!(root.children_calls(), 0);
        assert_eq!(child.children_calls(), 0);
    }

    #[test]
    fn test_filtered_order_follows_traversal() {
        let root = sample_tree();
        let seen = Cell::new(0);
        let leaves = PreOrder::filtered([root], |view| {
            seen.set(seen.get() + 1);
            view.model().id().as_str().len() == 2
        });
        assert_eq!(ids(leaves), vec!["a1", "a2", "b1"]);
        assert_eq!(seen.get(), 6);
    }
}
