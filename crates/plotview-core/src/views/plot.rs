//! Plot view: builds the views of the plot's layouts and routes pointer events to them.

use super::{BoxAnnotationView, ToolbarPanelView, typed_model};
use crate::error::BuildResult;
use crate::gesture::{Cursor, GestureEvent};
use crate::model::ModelRef;
use crate::models::Plot;
use crate::view::{BuildOptions, View, ViewBase, ViewId, ViewManager, ViewRef, view_as};
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// View of a [`Plot`].
///
/// Layout views are built through a manager nested in the plot's owner, so
/// they can be looked up from the plot and from every manager above it.
#[derive(Debug)]
pub struct PlotView {
    base: ViewBase,
    plot: Rc<Plot>,
    manager: Rc<ViewManager>,
    annotations: RefCell<Vec<Rc<BoxAnnotationView>>>,
    panels: RefCell<Vec<Rc<ToolbarPanelView>>>,
    others: RefCell<Vec<ViewRef>>,
    /// Annotation that received the last event.
    active: RefCell<Option<Rc<BoxAnnotationView>>>,
    cursor: Cell<Cursor>,
}

impl PlotView {
    /// Build the plot view, then the views of its layouts in order.
    pub async fn build(model: ModelRef, options: BuildOptions) -> BuildResult<ViewRef> {
        let plot = typed_model::<Plot>(&model, Plot::TYPE)?;
        let view = Rc::new(Self {
            base: ViewBase::new(model, &options),
            plot,
            manager: options.owner.child(),
            annotations: RefCell::new(Vec::new()),
            panels: RefCell::new(Vec::new()),
            others: RefCell::new(Vec::new()),
            active: RefCell::new(None),
            cursor: Cell::new(Cursor::Default),
        });

        let parent: ViewRef = view.clone();
        for layout in view.plot.layouts() {
            match view.manager.build_view(layout, Some(Rc::clone(&parent))).await {
                Ok(child) => view.attach(child),
                Err(err) => {
                    log::warn!("Discarding partly built {}: {err}", view.base.model());
                    view.remove();
                    return Err(err);
                }
            }
        }

        Ok(view as ViewRef)
    }

    fn attach(&self, child: ViewRef) {
        if let Some(annotation) = view_as::<BoxAnnotationView>(&child) {
            self.annotations.borrow_mut().push(annotation);
        } else if let Some(panel) = view_as::<ToolbarPanelView>(&child) {
            self.panels.borrow_mut().push(panel);
        } else {
            self.others.borrow_mut().push(child);
        }
    }

    /// Get the plot model.
    pub fn plot(&self) -> &Rc<Plot> {
        &self.plot
    }

    /// Manager holding the views of the plot's layouts.
    pub fn manager(&self) -> &Rc<ViewManager> {
        &self.manager
    }

    /// Get the box annotation views, bottom to top.
    pub fn annotation_views(&self) -> Vec<Rc<BoxAnnotationView>> {
        self.annotations.borrow().clone()
    }

    /// Get the toolbar panel views.
    pub fn toolbar_panel_views(&self) -> Vec<Rc<ToolbarPanelView>> {
        self.panels.borrow().clone()
    }

    /// Cursor currently shown over the plot.
    pub fn cursor(&self) -> Cursor {
        self.cursor.get()
    }

    /// Route a pointer event to the annotation it concerns.
    ///
    /// An annotation being dragged receives every event until the drag ends.
    /// Otherwise the topmost annotation claiming the position receives it, and
    /// the one that had the previous event is told the pointer left.
    pub fn dispatch(&self, event: &GestureEvent) -> Cursor {
        let previous = self.active.borrow().clone();
        if let Some(dragging) = previous.as_ref().filter(|view| view.is_dragging()) {
            return self.show(dragging.on_gesture(event));
        }

        let position = event.position();
        let target = self
            .annotations
            .borrow()
            .iter()
            .rev()
            .find(|view| view.interactive_hit(position))
            .cloned();

        if let Some(previous) = &previous {
            let same = target.as_ref().is_some_and(|view| Rc::ptr_eq(view, previous));
            if !same {
                previous.leave();
            }
        }

        let cursor = match &target {
            Some(view) => view.on_gesture(event),
            None => Cursor::Default,
        };
        *self.active.borrow_mut() = target;
        self.show(cursor)
    }

    /// Feed a sequence of events, returning the cursor after each one.
    pub fn replay<'a>(&self, events: impl IntoIterator<Item = &'a GestureEvent>) -> Vec<Cursor> {
        events.into_iter().map(|event| self.dispatch(event)).collect()
    }

    /// The pointer entered the plot: show auto-hiding toolbars.
    pub fn pointer_enter(&self) {
        for panel in self.panels.borrow().iter() {
            panel.set_visibility(true);
        }
    }

    /// The pointer left the plot: hide auto-hiding toolbars and reset the cursor.
    pub fn pointer_leave(&self) {
        for panel in self.panels.borrow().iter() {
            panel.set_visibility(false);
        }
        let active = self.active.borrow().clone();
        if let Some(view) = active.filter(|view| !view.is_dragging()) {
            view.leave();
            *self.active.borrow_mut() = None;
            self.show(Cursor::Default);
        }
    }

    /// The plot gained focus.
    pub fn focus(&self) {
        for panel in self.panels.borrow().iter() {
            panel.toggle_auto(true);
        }
    }

    /// The plot lost focus.
    pub fn blur(&self) {
        for panel in self.panels.borrow().iter() {
            panel.toggle_auto(false);
        }
    }

    fn show(&self, cursor: Cursor) -> Cursor {
        self.cursor.set(cursor);
        cursor
    }
}

impl View for PlotView {
    fn id(&self) -> ViewId {
        self.base.id()
    }

    fn model(&self) -> &ModelRef {
        self.base.model()
    }

    fn parent(&self) -> Option<ViewRef> {
        self.base.parent()
    }

    fn children(&self) -> Vec<ViewRef> {
        let annotations = self.annotations.borrow();
        let panels = self.panels.borrow();
        let others = self.others.borrow();
        annotations
            .iter()
            .map(|view| Rc::clone(view) as ViewRef)
            .chain(panels.iter().map(|view| Rc::clone(view) as ViewRef))
            .chain(others.iter().cloned())
            .collect()
    }

    fn remove(&self) {
        if self.base.is_removed() {
            return;
        }
        *self.active.borrow_mut() = None;
        for child in self.children() {
            child.remove();
        }
        self.base.remove(self);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}
