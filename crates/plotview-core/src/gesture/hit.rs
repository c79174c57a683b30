//! Box geometry, interaction properties and hit testing.

use super::Cursor;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Box extents. `left`/`right` are x values, `top`/`bottom` are y values.
///
/// Nothing forces `left <= right` or `top <= bottom`; an inverted box still
/// covers the area between its edges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    /// Create bounds from their four edges.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    /// The covered area, normalised.
    pub fn rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.right, self.bottom).abs()
    }

    /// Get these bounds shifted by `delta`.
    pub fn translate(&self, delta: Vec2) -> Self {
        Self {
            left: self.left + delta.x,
            top: self.top + delta.y,
            right: self.right + delta.x,
            bottom: self.bottom + delta.y,
        }
    }

    /// Whether the point lies in the covered area, edges included.
    pub fn contains(&self, point: Point) -> bool {
        let rect = self.rect();
        (rect.x0..=rect.x1).contains(&point.x) && (rect.y0..=rect.y1).contains(&point.y)
    }

    pub(crate) fn edge_value(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Left => self.left,
            Edge::Right => self.right,
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
        }
    }

    pub(crate) fn edge_value_mut(&mut self, edge: Edge) -> &mut f64 {
        match edge {
            Edge::Left => &mut self.left,
            Edge::Right => &mut self.right,
            Edge::Top => &mut self.top,
            Edge::Bottom => &mut self.bottom,
        }
    }

    fn corner_point(&self, corner: Corner) -> Point {
        let (x, y) = corner.edges();
        Point::new(self.edge_value(x), self.edge_value(y))
    }
}

/// Edge of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// The edge across the box from this one.
    pub fn opposite(self) -> Edge {
        match self {
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
            Edge::Top => Edge::Bottom,
            Edge::Bottom => Edge::Top,
        }
    }

    /// Whether the edge is a vertical line (moves along x).
    pub fn is_vertical(self) -> bool {
        matches!(self, Edge::Left | Edge::Right)
    }
}

/// Corner of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// The vertical and horizontal edge meeting at this corner.
    pub fn edges(self) -> (Edge, Edge) {
        match self {
            Corner::TopLeft => (Edge::Left, Edge::Top),
            Corner::TopRight => (Edge::Right, Edge::Top),
            Corner::BottomLeft => (Edge::Left, Edge::Bottom),
            Corner::BottomRight => (Edge::Right, Edge::Bottom),
        }
    }
}

/// Part of a box under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitTarget {
    /// Inside the box, away from any handle.
    Area,
    Edge(Edge),
    Corner(Corner),
}

/// Directions in which a box may be dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movable {
    None,
    #[default]
    Both,
    X,
    Y,
}

impl Movable {
    /// Drag delta with the locked axes zeroed, or `None` if the box can't move.
    pub fn restrict(self, delta: Vec2) -> Option<Vec2> {
        match self {
            Movable::None => None,
            Movable::Both => Some(delta),
            Movable::X => Some(Vec2::new(delta.x, 0.0)),
            Movable::Y => Some(Vec2::new(0.0, delta.y)),
        }
    }
}

/// Edges that may be dragged to resize a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resizable {
    None,
    Left,
    Right,
    Top,
    Bottom,
    X,
    Y,
    #[default]
    All,
}

impl Resizable {
    /// Check if `edge` may be dragged.
    pub fn allows_edge(self, edge: Edge) -> bool {
        match self {
            Resizable::None => false,
            Resizable::Left => edge == Edge::Left,
            Resizable::Right => edge == Edge::Right,
            Resizable::Top => edge == Edge::Top,
            Resizable::Bottom => edge == Edge::Bottom,
            Resizable::X => edge.is_vertical(),
            Resizable::Y => !edge.is_vertical(),
            Resizable::All => true,
        }
    }

    /// A corner resizes only when both of its edges may move.
    pub fn allows_corner(self, corner: Corner) -> bool {
        let (x, y) = corner.edges();
        self.allows_edge(x) && self.allows_edge(y)
    }
}

/// Interaction properties of a box annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxProps {
    pub editable: bool,
    pub movable: Movable,
    pub resizable: Resizable,
    pub use_handles: bool,
}

impl Default for BoxProps {
    fn default() -> Self {
        Self {
            editable: false,
            movable: Movable::Both,
            resizable: Resizable::All,
            use_handles: false,
        }
    }
}

impl BoxProps {
    /// Whether a pan starting on `target` drags anything.
    pub fn can_drag(&self, target: HitTarget) -> bool {
        if !self.editable {
            return false;
        }
        match target {
            HitTarget::Area => self.movable != Movable::None,
            HitTarget::Edge(edge) => self.resizable.allows_edge(edge),
            HitTarget::Corner(corner) => self.resizable.allows_corner(corner),
        }
    }
}

/// Find what part of the box is under `point`.
///
/// With handles, corners win over edges and edges over the area. A handle
/// covers a band of half-width `tolerance` around its corner or edge, and is
/// skipped when `resizable` doesn't allow it. Without handles only the area
/// is tested.
pub fn hit_test(
    point: Point,
    bounds: &Bounds,
    props: &BoxProps,
    tolerance: f64,
) -> Option<HitTarget> {
    if props.use_handles {
        let near = |a: f64, b: f64| (a - b).abs() <= tolerance;

        for corner in Corner::ALL {
            let at = bounds.corner_point(corner);
            if props.resizable.allows_corner(corner) && near(point.x, at.x) && near(point.y, at.y) {
                return Some(HitTarget::Corner(corner));
            }
        }

        let band = bounds.rect().inflate(tolerance, tolerance);
        for edge in Edge::ALL {
            if !props.resizable.allows_edge(edge) {
                continue;
            }
            let value = bounds.edge_value(edge);
            let hit = if edge.is_vertical() {
                near(point.x, value) && (band.y0..=band.y1).contains(&point.y)
            } else {
                near(point.y, value) && (band.x0..=band.x1).contains(&point.x)
            };
            if hit {
                return Some(HitTarget::Edge(edge));
            }
        }
    }

    bounds.contains(point).then_some(HitTarget::Area)
}

/// Cursor for the pointer over `target`.
///
/// `dragging` selects the cursor shown while a drag started on `target` is in
/// progress; it only differs from the hover cursor for a freely movable box
/// without handles.
pub fn cursor_for(target: Option<HitTarget>, props: &BoxProps, dragging: bool) -> Cursor {
    if !props.editable {
        return Cursor::Default;
    }
    match target {
        None => Cursor::Default,
        Some(HitTarget::Area) => match (props.movable, props.use_handles) {
            (Movable::None, _) => Cursor::Default,
            (Movable::X, _) => Cursor::EwResize,
            (Movable::Y, _) => Cursor::NsResize,
            (Movable::Both, true) => Cursor::Move,
            (Movable::Both, false) if dragging => Cursor::Grabbing,
            (Movable::Both, false) => Cursor::Grab,
        },
        Some(HitTarget::Edge(edge)) if edge.is_vertical() => Cursor::EwResize,
        Some(HitTarget::Edge(_)) => Cursor::NsResize,
        Some(HitTarget::Corner(Corner::TopLeft | Corner::BottomRight)) => Cursor::NwseResize,
        Some(HitTarget::Corner(Corner::TopRight | Corner::BottomLeft)) => Cursor::NeswResize,
    }
}
