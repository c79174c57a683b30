//! Toolbar panel, toolbar and click-pan tool views.

use super::{discard_children, typed_model};
use crate::error::{BuildError, BuildResult};
use crate::model::ModelRef;
use crate::models::{ClickPanTool, PanDirection, Toolbar, ToolbarPanel};
use crate::view::{BuildOptions, View, ViewBase, ViewId, ViewRef, view_as};
use futures_util::future::try_join_all;
use kurbo::{Size, Vec2};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// View of a [`ToolbarPanel`]: hosts the toolbar view on the plot.
#[derive(Debug)]
pub struct ToolbarPanelView {
    base: ViewBase,
    panel: Rc<ToolbarPanel>,
    toolbar_view: RefCell<Option<Rc<ToolbarView>>>,
}

impl ToolbarPanelView {
    /// Build the panel, then its toolbar view nested in it.
    pub async fn build(model: ModelRef, options: BuildOptions) -> BuildResult<ViewRef> {
        let panel = typed_model::<ToolbarPanel>(&model, ToolbarPanel::TYPE)?;
        let view = Rc::new(Self {
            base: ViewBase::new(model, &options),
            panel,
            toolbar_view: RefCell::new(None),
        });

        let parent: ViewRef = view.clone();
        let toolbar: ModelRef = view.panel.toolbar().clone();
        let built = options.owner.build_view(toolbar, Some(parent)).await?;
        let Some(toolbar_view) = view_as::<ToolbarView>(&built) else {
            built.remove();
            return Err(BuildError::Failed {
                model: built.model().to_string(),
                reason: "toolbar was not built as a toolbar view".to_string(),
            });
        };
        *view.toolbar_view.borrow_mut() = Some(toolbar_view);

        Ok(view as ViewRef)
    }

    /// Get the panel model.
    pub fn panel(&self) -> &Rc<ToolbarPanel> {
        &self.panel
    }

    /// Get the hosted toolbar view.
    pub fn toolbar_view(&self) -> Option<Rc<ToolbarView>> {
        self.toolbar_view.borrow().clone()
    }

    /// Show or hide the toolbar as the pointer enters or leaves the plot.
    pub fn set_visibility(&self, visible: bool) {
        if let Some(toolbar_view) = self.toolbar_view() {
            toolbar_view.set_visibility(visible);
        }
    }

    /// Keep an auto-hiding toolbar shown while the plot has focus.
    pub fn toggle_auto(&self, focused: bool) {
        if let Some(toolbar_view) = self.toolbar_view() {
            toolbar_view.toggle_auto(focused);
        }
    }
}

impl View for ToolbarPanelView {
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
        self.toolbar_view()
            .map(|view| vec![view as ViewRef])
            .unwrap_or_default()
    }

    fn remove(&self) {
        if self.base.is_removed() {
            return;
        }
        if let Some(toolbar_view) = self.toolbar_view() {
            toolbar_view.remove();
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

/// View of a [`Toolbar`]. Children are the tool views, in toolbar order.
#[derive(Debug)]
pub struct ToolbarView {
    base: ViewBase,
    toolbar: Rc<Toolbar>,
    tool_views: RefCell<Vec<ViewRef>>,
    visible: Cell<bool>,
    focused: Cell<bool>,
}

impl ToolbarView {
    /// Build the toolbar and all of its tool views concurrently.
    pub async fn build(model: ModelRef, options: BuildOptions) -> BuildResult<ViewRef> {
        let toolbar = typed_model::<Toolbar>(&model, Toolbar::TYPE)?;
        let view = Rc::new(Self {
            base: ViewBase::new(model, &options),
            toolbar,
            tool_views: RefCell::new(Vec::new()),
            visible: Cell::new(false),
            focused: Cell::new(false),
        });

        let parent: ViewRef = view.clone();
        let builds = view
            .toolbar
            .tools()
            .iter()
            .map(|tool| options.owner.build_view(Rc::clone(tool), Some(Rc::clone(&parent))));
        let tool_views = match try_join_all(builds).await {
            Ok(tool_views) => tool_views,
            Err(err) => {
                log::warn!("Discarding partly built {}: {err}", view.base.model());
                discard_children(&options.owner, &*view);
                return Err(err);
            }
        };
        log::debug!("Built {} tool views for {}", tool_views.len(), view.base.model());
        *view.tool_views.borrow_mut() = tool_views;

        Ok(view as ViewRef)
    }

    /// Get the toolbar model.
    pub fn toolbar(&self) -> &Rc<Toolbar> {
        &self.toolbar
    }

    /// Get the tool views, in toolbar order.
    pub fn tool_views(&self) -> Vec<ViewRef> {
        self.tool_views.borrow().clone()
    }

    /// Set whether the pointer is over the plot.
    pub fn set_visibility(&self, visible: bool) {
        self.visible.set(visible);
    }

    /// Set whether the plot has focus.
    pub fn toggle_auto(&self, focused: bool) {
        self.focused.set(focused);
    }

    /// Check if the pointer is over the plot.
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Check if the plot has focus.
    pub fn is_focused(&self) -> bool {
        self.focused.get()
    }

    /// Whether the toolbar is on screen. An auto-hiding toolbar shows only
    /// while the pointer is over the plot or the plot has focus.
    pub fn is_shown(&self) -> bool {
        !self.toolbar.autohide() || self.visible.get() || self.focused.get()
    }
}

impl View for ToolbarView {
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
        self.tool_views()
    }

    fn remove(&self) {
        if self.base.is_removed() {
            return;
        }
        for tool_view in self.tool_views() {
            tool_view.remove();
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

/// A request to pan the plot, produced by a click-pan tool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanRequest {
    pub direction: PanDirection,
    /// Fraction of the visible extent to pan by.
    pub factor: f64,
}

impl PanRequest {
    /// Offset for a plot whose visible extent is `extent`.
    pub fn offset(&self, extent: Size) -> Vec2 {
        let unit = self.direction.unit();
        Vec2::new(
            unit.x * self.factor * extent.width,
            unit.y * self.factor * extent.height,
        )
    }
}

/// View of a [`ClickPanTool`].
#[derive(Debug)]
pub struct ClickPanToolView {
    base: ViewBase,
    tool: Rc<ClickPanTool>,
}

impl ClickPanToolView {
    /// Build the view of a click-pan tool.
    pub async fn build(model: ModelRef, options: BuildOptions) -> BuildResult<ViewRef> {
        let tool = typed_model::<ClickPanTool>(&model, ClickPanTool::TYPE)?;
        let view = Rc::new(Self {
            base: ViewBase::new(model, &options),
            tool,
        });
        Ok(view as ViewRef)
    }

    /// Get the tool model.
    pub fn tool(&self) -> &Rc<ClickPanTool> {
        &self.tool
    }

    /// Activate the tool.
    pub fn doit(&self) -> PanRequest {
        let request = PanRequest {
            direction: self.tool.direction(),
            factor: self.tool.factor(),
        };
        log::debug!(
            "{} requested a pan {} by {}",
            self.tool.tooltip(),
            request.direction,
            request.factor
        );
        request
    }
}

impl View for ClickPanToolView {
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
    use crate::config::InteractionConfig;
    use crate::view::{QueryViews, ViewManager};
    use crate::views::default_registry;

    fn pan_tools() -> Vec<ModelRef> {
        ["pan_left", "pan_up", "pan_east"]
            .into_iter()
            .filter_map(ClickPanTool::from_alias)
            .map(|tool| Rc::new(tool) as ModelRef)
            .collect()
    }

    fn build_panel(toolbar: Toolbar) -> (Rc<ViewManager>, Rc<ToolbarPanelView>) {
        let manager = ViewManager::new(Rc::new(default_registry(InteractionConfig::default())));
        let panel: ModelRef = Rc::new(ToolbarPanel::new(Rc::new(toolbar)).with_id("panel"));
        let view = pollster::block_on(manager.build_view(panel, None)).unwrap();
        (manager, view_as::<ToolbarPanelView>(&view).unwrap())
    }

    #[test]
    fn test_panel_builds_toolbar_and_tools() {
        let (manager, panel_view) = build_panel(Toolbar::new(pan_tools()).with_id("tb"));

        let toolbar_view = panel_view.toolbar_view().unwrap();
        let is_child_of = |view: &ViewRef, parent: ViewId| {
            view.parent().is_some_and(|view_parent| view_parent.id() == parent)
        };
        assert!(is_child_of(&(toolbar_view.clone() as ViewRef), panel_view.id()));
        assert_eq!(toolbar_view.tool_views().len(), 3);
        for tool_view in toolbar_view.tool_views() {
            assert!(is_child_of(&tool_view, toolbar_view.id()));
        }
        // panel, toolbar, three tools
        assert_eq!(manager.all_views().count(), 5);
        // The panel has no parent view; the nested views do.
        assert_eq!(manager.roots().len(), 4);
    }

    #[test]
    fn test_tool_views_keep_toolbar_order() {
        let (_manager, panel_view) = build_panel(Toolbar::new(pan_tools()));
        let directions: Vec<_> = panel_view
            .toolbar_view()
            .unwrap()
            .tool_views()
            .iter()
            .filter_map(view_as::<ClickPanToolView>)
            .map(|view| view.tool().direction())
            .collect();
        assert_eq!(
            directions,
            vec![PanDirection::Left, PanDirection::Up, PanDirection::East]
        );
    }

    #[test]
    fn test_remove_takes_toolbar_down_first() {
        let (manager, panel_view) = build_panel(Toolbar::new(pan_tools()));
        let toolbar_view = panel_view.toolbar_view().unwrap();

        panel_view.remove();

        assert!(manager.all_views().next().is_none());
        assert!(manager.roots().is_empty());
        assert!(!manager.contains(toolbar_view.as_ref()));

        // A second remove is a no-op.
        panel_view.remove();
        assert!(manager.is_empty());
    }

    #[test]
    fn test_autohide_visibility() {
        let toolbar = Toolbar::new(pan_tools()).with_autohide(true);
        let (_manager, panel_view) = build_panel(toolbar);
        let toolbar_view = panel_view.toolbar_view().unwrap();
        assert!(!toolbar_view.is_shown());

        panel_view.set_visibility(true);
        assert!(toolbar_view.is_visible());
        assert!(toolbar_view.is_shown());

        panel_view.set_visibility(false);
        panel_view.toggle_auto(true);
        assert!(toolbar_view.is_focused());
        assert!(toolbar_view.is_shown());

        panel_view.toggle_auto(false);
        assert!(!toolbar_view.is_shown());
    }

    #[test]
    fn test_toolbar_without_autohide_is_always_shown() {
        let (_manager, panel_view) = build_panel(Toolbar::new(Vec::new()));
        let toolbar_view = panel_view.toolbar_view().unwrap();
        assert!(toolbar_view.tool_views().is_empty());
        assert!(toolbar_view.is_shown());
    }

    #[test]
    fn test_click_pan_request() {
        let (_manager, panel_view) = build_panel(Toolbar::new(pan_tools()));
        let tool_views = panel_view.toolbar_view().unwrap().tool_views();
        let left = view_as::<ClickPanToolView>(&tool_views[0]).unwrap();

        let request = left.doit();
        assert_eq!(request.direction, PanDirection::Left);
        assert_eq!(request.factor, 0.1);
        assert_eq!(
            request.offset(Size::new(200.0, 100.0)),
            Vec2::new(-20.0, 0.0)
        );
    }

    #[test]
    fn test_failed_tool_discards_built_tools() {
        let manager = ViewManager::new(Rc::new(default_registry(InteractionConfig::default())));
        let tools = vec![
            Rc::new(ClickPanTool::new(PanDirection::Left)) as ModelRef,
            crate::view::testing::test_model("unregistered"),
        ];
        let panel: ModelRef = Rc::new(ToolbarPanel::new(Rc::new(Toolbar::new(tools))));

        let result = pollster::block_on(manager.build_view(panel, None));

        assert!(matches!(result, Err(BuildError::UnknownModel(_))));
        assert!(manager.is_empty());
        assert!(manager.roots().is_empty());
    }
}
