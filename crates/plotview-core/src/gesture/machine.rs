//! The box annotation interaction state machine.

use super::hit::{Bounds, BoxProps, Edge, HitTarget, cursor_for, hit_test};
use super::{Cursor, GestureEvent};
use crate::config::{BoundsPolicy, InteractionConfig};
use kurbo::Point;

/// An active drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    /// What the pan started on.
    pub target: HitTarget,
    /// Where the pan started.
    pub start: Point,
    /// Bounds when the pan started.
    pub origin: Bounds,
}

/// Interaction state of one box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    /// The pointer is over the plot, possibly over part of the box.
    Hovering(Option<HitTarget>),
    Dragging(Drag),
}

/// Turns pointer gestures into bounds updates and cursors.
#[derive(Debug, Clone, Default)]
pub struct BoxGesture {
    state: Interaction,
    config: InteractionConfig,
}

impl BoxGesture {
    /// Create an idle gesture using `config`.
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            state: Interaction::Idle,
            config,
        }
    }

    /// Get the current interaction state.
    pub fn state(&self) -> Interaction {
        self.state
    }

    /// Get the interaction settings.
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Check if a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, Interaction::Dragging(_))
    }

    /// What part of the box is under `point`.
    pub fn hit(&self, point: Point, bounds: &Bounds, props: &BoxProps) -> Option<HitTarget> {
        hit_test(point, bounds, props, self.config.handle_tolerance)
    }

    /// Feed one event. May update `bounds`; returns the cursor to show.
    pub fn handle(
        &mut self,
        event: &GestureEvent,
        bounds: &mut Bounds,
        props: &BoxProps,
    ) -> Cursor {
        let cursor = match (*event, self.state) {
            // A second press mid-drag keeps the drag going.
            (GestureEvent::PanStart { .. }, Interaction::Dragging(drag)) => {
                cursor_for(Some(drag.target), props, true)
            }
            (GestureEvent::PanStart { position }, _) => self.press(position, bounds, props),
            // Pointer motion during a drag follows the drag, whichever event reported it.
            (
                GestureEvent::PanMove { position } | GestureEvent::Hover { position },
                Interaction::Dragging(drag),
            ) => {
                self.apply(&drag, position, bounds, props);
                cursor_for(Some(drag.target), props, true)
            }
            (GestureEvent::PanEnd { position }, Interaction::Dragging(drag)) => {
                self.apply(&drag, position, bounds, props);
                log::trace!("Drag of {:?} ended at {:?}", drag.target, bounds);
                self.hover(position, bounds, props)
            }
            (event, _) => self.hover(event.position(), bounds, props),
        };
        log::trace!("{:?} -> {:?} ({})", event, self.state, cursor);
        cursor
    }

    /// The pointer left the box's plot. An active drag is kept.
    pub fn leave(&mut self) -> Cursor {
        if !self.is_dragging() {
            self.state = Interaction::Idle;
        }
        Cursor::Default
    }

    /// Abort an active drag, restoring the bounds it started from.
    pub fn cancel(&mut self, bounds: &mut Bounds) -> Cursor {
        if let Interaction::Dragging(drag) = self.state {
            *bounds = drag.origin;
            log::trace!("Drag of {:?} cancelled", drag.target);
        }
        self.state = Interaction::Idle;
        Cursor::Default
    }

    fn hover(&mut self, position: Point, bounds: &Bounds, props: &BoxProps) -> Cursor {
        let target = self.hit(position, bounds, props);
        self.state = Interaction::Hovering(target);
        cursor_for(target, props, false)
    }

    fn press(&mut self, position: Point, bounds: &Bounds, props: &BoxProps) -> Cursor {
        match self.hit(position, bounds, props) {
            Some(target) if props.can_drag(target) => {
                self.state = Interaction::Dragging(Drag {
                    target,
                    start: position,
                    origin: *bounds,
                });
                cursor_for(Some(target), props, true)
            }
            // Nothing to drag: leave the state alone.
            target => cursor_for(target, props, false),
        }
    }

    fn apply(&self, drag: &Drag, position: Point, bounds: &mut Bounds, props: &BoxProps) {
        let delta = position - drag.start;
        let origin = drag.origin;
        match drag.target {
            HitTarget::Area => {
                if let Some(delta) = props.movable.restrict(delta) {
                    *bounds = origin.translate(delta);
                }
            }
            HitTarget::Edge(edge) => {
                let mut next = origin;
                shift_edge(&mut next, edge, delta.x, delta.y);
                *bounds = settle(origin, next, &[edge], self.config.bounds_policy);
            }
            HitTarget::Corner(corner) => {
                let (x, y) = corner.edges();
                let mut next = origin;
                shift_edge(&mut next, x, delta.x, delta.y);
                shift_edge(&mut next, y, delta.x, delta.y);
                *bounds = settle(origin, next, &[x, y], self.config.bounds_policy);
            }
        }
    }
}

fn shift_edge(bounds: &mut Bounds, edge: Edge, dx: f64, dy: f64) {
    let value = bounds.edge_value_mut(edge);
    *value += if edge.is_vertical() { dx } else { dy };
}

/// Apply the inversion policy to bounds whose `moved` edges were dragged.
///
/// Orientation is taken from `origin`, so boxes stored with `top > bottom`
/// keep that order under `Clamp` and `Swap`.
fn settle(origin: Bounds, mut next: Bounds, moved: &[Edge], policy: BoundsPolicy) -> Bounds {
    match policy {
        BoundsPolicy::Allow => {}
        BoundsPolicy::Clamp => {
            for &edge in moved {
                let anchor = origin.edge_value(edge.opposite());
                let ascending = origin.edge_value(edge) <= anchor;
                let value = next.edge_value_mut(edge);
                *value = if ascending { value.min(anchor) } else { value.max(anchor) };
            }
        }
        BoundsPolicy::Swap => {
            for (low, high) in [(Edge::Left, Edge::Right), (Edge::Top, Edge::Bottom)] {
                let was_ascending = origin.edge_value(low) <= origin.edge_value(high);
                let is_ascending = next.edge_value(low) <= next.edge_value(high);
                if was_ascending != is_ascending {
                    let (a, b) = (next.edge_value(low), next.edge_value(high));
                    *next.edge_value_mut(low) = b;
                    *next.edge_value_mut(high) = a;
                }
            }
        }
    }
    next
}
