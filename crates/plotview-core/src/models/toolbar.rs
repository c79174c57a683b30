//! Toolbar models: the panel laid out on a plot, the toolbar, and click-pan tools.

use crate::model::{Model, ModelId, ModelRef};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Annotation that hosts a toolbar on a plot.
#[derive(Debug)]
pub struct ToolbarPanel {
    id: ModelId,
    toolbar: Rc<Toolbar>,
}

impl ToolbarPanel {
    pub const TYPE: &'static str = "ToolbarPanel";

    /// Create a panel hosting `toolbar`.
    pub fn new(toolbar: Rc<Toolbar>) -> Self {
        Self {
            id: ModelId::new(),
            toolbar,
        }
    }

    /// Set the model id.
    pub fn with_id(mut self, id: impl Into<ModelId>) -> Self {
        self.id = id.into();
        self
    }

    /// Get the hosted toolbar.
    pub fn toolbar(&self) -> &Rc<Toolbar> {
        &self.toolbar
    }
}

/// A strip of tools.
#[derive(Debug)]
pub struct Toolbar {
    id: ModelId,
    tools: Vec<ModelRef>,
    horizontal: bool,
    autohide: Cell<bool>,
}

impl Toolbar {
    pub const TYPE: &'static str = "Toolbar";

    /// Create a horizontal toolbar holding `tools`.
    pub fn new(tools: Vec<ModelRef>) -> Self {
        Self {
            id: ModelId::new(),
            tools,
            horizontal: true,
            autohide: Cell::new(false),
        }
    }

    /// Set the model id.
    pub fn with_id(mut self, id: impl Into<ModelId>) -> Self {
        self.id = id.into();
        self
    }

    /// Lay the tools out vertically.
    pub fn vertical(mut self) -> Self {
        self.horizontal = false;
        self
    }

    /// Hide the toolbar unless the pointer is over the plot.
    pub fn with_autohide(self, autohide: bool) -> Self {
        self.autohide.set(autohide);
        self
    }

    /// Get the tools, in display order.
    pub fn tools(&self) -> &[ModelRef] {
        &self.tools
    }

    /// Check if the tools are laid out horizontally.
    pub fn horizontal(&self) -> bool {
        self.horizontal
    }

    /// Check if the toolbar hides while the pointer is away.
    pub fn autohide(&self) -> bool {
        self.autohide.get()
    }

    /// Set whether the toolbar auto-hides.
    pub fn set_autohide(&self, autohide: bool) {
        self.autohide.set(autohide);
    }
}

/// Direction a click-pan tool pans in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanDirection {
    Left,
    Right,
    Up,
    Down,
    West,
    East,
    North,
    South,
}

impl PanDirection {
    pub const ALL: [PanDirection; 8] = [
        PanDirection::Left,
        PanDirection::Right,
        PanDirection::Up,
        PanDirection::Down,
        PanDirection::West,
        PanDirection::East,
        PanDirection::North,
        PanDirection::South,
    ];

    /// Get the direction name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PanDirection::Left => "left",
            PanDirection::Right => "right",
            PanDirection::Up => "up",
            PanDirection::Down => "down",
            PanDirection::West => "west",
            PanDirection::East => "east",
            PanDirection::North => "north",
            PanDirection::South => "south",
        }
    }

    /// Unit vector of the direction, with y growing upwards.
    pub fn unit(&self) -> Vec2 {
        match self {
            PanDirection::Left | PanDirection::West => Vec2::new(-1.0, 0.0),
            PanDirection::Right | PanDirection::East => Vec2::new(1.0, 0.0),
            PanDirection::Up | PanDirection::North => Vec2::new(0.0, 1.0),
            PanDirection::Down | PanDirection::South => Vec2::new(0.0, -1.0),
        }
    }
}

impl fmt::Display for PanDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A toolbar button that pans the plot by a fraction of its extent.
#[derive(Debug)]
pub struct ClickPanTool {
    id: ModelId,
    direction: PanDirection,
    factor: f64,
}

impl ClickPanTool {
    pub const TYPE: &'static str = "ClickPanTool";
    pub const TOOL_NAME: &'static str = "Click Pan";
    pub const DEFAULT_FACTOR: f64 = 0.1;

    /// Create a tool panning in `direction` by the default factor.
    pub fn new(direction: PanDirection) -> Self {
        Self {
            id: ModelId::new(),
            direction,
            factor: Self::DEFAULT_FACTOR,
        }
    }

    /// Create a tool from its alias, e.g. `pan_left` or `pan_north`.
    pub fn from_alias(alias: &str) -> Option<Self> {
        let name = alias.strip_prefix("pan_")?;
        PanDirection::ALL
            .into_iter()
            .find(|direction| direction.as_str() == name)
            .map(Self::new)
    }

    /// Set the model id.
    pub fn with_id(mut self, id: impl Into<ModelId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the fraction of the visible extent to pan by.
    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    /// Get the pan direction.
    pub fn direction(&self) -> PanDirection {
        self.direction
    }

    /// Get the pan factor.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Get the tool's display name.
    pub fn tool_name(&self) -> &'static str {
        Self::TOOL_NAME
    }

    /// Get the tooltip, e.g. "Pan Left".
    pub fn tooltip(&self) -> String {
        format!("Pan {}", self.direction)
    }

    /// Icon class; compass directions share the icons of their screen equivalents.
    pub fn icon(&self) -> &'static str {
        match self.direction {
            PanDirection::Left | PanDirection::West => "tool_icon_pan_left",
            PanDirection::Right | PanDirection::East => "tool_icon_pan_right",
            PanDirection::Up | PanDirection::North => "tool_icon_pan_up",
            PanDirection::Down | PanDirection::South => "tool_icon_pan_down",
        }
    }
}

macro_rules! impl_model {
    ($($ty:ty),*) => {
        $(
            impl Model for $ty {
                fn id(&self) -> &ModelId {
                    &self.id
                }

                fn type_name(&self) -> &'static str {
                    Self::TYPE
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
                    self
                }
            }
        )*
    };
}

impl_model!(ToolbarPanel, Toolbar, ClickPanTool);
