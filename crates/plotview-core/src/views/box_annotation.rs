//! Box annotation view.

use super::typed_model;
use crate::config::InteractionConfig;
use crate::error::BuildResult;
use crate::gesture::{BoxGesture, Cursor, GestureEvent, Interaction, cursor_for};
use crate::model::ModelRef;
use crate::models::BoxAnnotation;
use crate::view::{BuildOptions, View, ViewBase, ViewId, ViewRef};
use kurbo::Point;
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

/// View of a [`BoxAnnotation`]. Owns the box's gesture state.
#[derive(Debug)]
pub struct BoxAnnotationView {
    base: ViewBase,
    annotation: Rc<BoxAnnotation>,
    gesture: RefCell<BoxGesture>,
}

impl BoxAnnotationView {
    pub async fn build(
        model: ModelRef,
        options: BuildOptions,
        config: InteractionConfig,
    ) -> BuildResult<ViewRef> {
        let annotation = typed_model::<BoxAnnotation>(&model, BoxAnnotation::TYPE)?;
        let view = Rc::new(Self {
            base: ViewBase::new(model, &options),
            annotation,
            gesture: RefCell::new(BoxGesture::new(config)),
        });
        Ok(view as ViewRef)
    }

    /// Get the annotation model.
    pub fn annotation(&self) -> &Rc<BoxAnnotation> {
        &self.annotation
    }

    /// Feed a pointer event to the gesture state machine, writing any bounds
    /// change back to the model.
    pub fn on_gesture(&self, event: &GestureEvent) -> Cursor {
        let before = self.annotation.bounds();
        let mut bounds = before;
        let props = self.annotation.props();
        let cursor = self.gesture.borrow_mut().handle(event, &mut bounds, &props);
        if bounds != before {
            self.annotation.set_bounds(bounds);
        }
        cursor
    }

    /// Cursor a hover at `point` would produce, without changing any state.
    pub fn cursor(&self, point: Point) -> Cursor {
        let props = self.annotation.props();
        let bounds = self.annotation.bounds();
        let target = self.gesture.borrow().hit(point, &bounds, &props);
        cursor_for(target, &props, false)
    }

    /// Whether the box wants pointer events at `point`.
    pub fn interactive_hit(&self, point: Point) -> bool {
        let props = self.annotation.props();
        props.editable
            && self
                .gesture
                .borrow()
                .hit(point, &self.annotation.bounds(), &props)
                .is_some()
    }

    /// Check if a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.gesture.borrow().is_dragging()
    }

    /// Get the gesture state.
    pub fn interaction(&self) -> Interaction {
        self.gesture.borrow().state()
    }

    /// The pointer moved on to something else.
    pub fn leave(&self) -> Cursor {
        self.gesture.borrow_mut().leave()
    }

    /// Abort an active drag and put the box back where it started.
    pub fn cancel(&self) -> Cursor {
        let mut bounds = self.annotation.bounds();
        let cursor = self.gesture.borrow_mut().cancel(&mut bounds);
        self.annotation.set_bounds(bounds);
        cursor
    }
}

impl View for BoxAnnotationView {
    fn id(&self) -> ViewId {
        self.base.id()
    }

    fn model(&self) -> &ModelRef {
        self.base.model()
    }

    fn parent(&self) -> Option<ViewRef> {
        self.base.parent()
    }

    fn remove(&self) {
        self.base.remove(self);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{Bounds, HitTarget};
    use crate::view::{QueryViews, ViewManager, view_as};
    use crate::views::default_registry;

    fn build(model: BoxAnnotation) -> (Rc<ViewManager>, Rc<BoxAnnotationView>) {
        let manager = ViewManager::new(Rc::new(default_registry(InteractionConfig::default())));
        let view = pollster::block_on(manager.build_view(Rc::new(model), None)).unwrap();
        let view = view_as::<BoxAnnotationView>(&view).unwrap();
        (manager, view)
    }

    #[test]
    fn test_drag_writes_bounds_to_model() {
        let annotation = BoxAnnotation::new(Bounds::new(0.0, 0.0, 0.5, 0.5)).editable(true);
        let (_manager, view) = build(annotation);

        view.on_gesture(&GestureEvent::pan_start(0.25, 0.25));
        assert!(view.is_dragging());
        view.on_gesture(&GestureEvent::pan_end(0.5, 0.25));

        assert_eq!(view.annotation().bounds().right, 0.75);
        assert_eq!(view.interaction(), Interaction::Hovering(Some(HitTarget::Area)));
    }

    #[test]
    fn test_cursor_lookup_has_no_side_effects() {
        let (_manager, view) = build(
            BoxAnnotation::new(Bounds::new(0.0, 0.0, 0.5, 0.5))
                .editable(true)
                .use_handles(true),
        );

        assert_eq!(view.cursor(Point::new(0.25, 0.25)), Cursor::Move);
        assert_eq!(view.cursor(Point::new(0.0, 0.25)), Cursor::EwResize);
        assert_eq!(view.interaction(), Interaction::Idle);
    }

    #[test]
    fn test_read_only_box_does_not_claim_events() {
        let (_manager, view) = build(BoxAnnotation::new(Bounds::new(0.0, 0.0, 0.5, 0.5)));
        assert!(!view.interactive_hit(Point::new(0.25, 0.25)));
    }

    #[test]
    fn test_cancel_restores_model_bounds() {
        let annotation = BoxAnnotation::new(Bounds::new(0.0, 0.0, 0.5, 0.5)).editable(true);
        let (_manager, view) = build(annotation);

        view.on_gesture(&GestureEvent::pan_start(0.25, 0.25));
        view.on_gesture(&GestureEvent::pan_move(0.45, 0.25));
        assert_ne!(view.annotation().bounds(), Bounds::new(0.0, 0.0, 0.5, 0.5));

        view.cancel();
        assert_eq!(view.annotation().bounds(), Bounds::new(0.0, 0.0, 0.5, 0.5));
    }

    #[test]
    fn test_remove_unregisters_once() {
        let (manager, view) = build(BoxAnnotation::new(Bounds::default()));
        assert_eq!(manager.all_views().count(), 1);

        view.remove();
        view.remove();
        assert_eq!(manager.all_views().count(), 0);
    }
}
