//! The demo document and its views.

use crate::{AppError, Script};
use plotview_core::models::{BoxAnnotation, ClickPanTool, Plot, Toolbar, ToolbarPanel};
use plotview_core::views::{ClickPanToolView, PlotView, ToolbarPanelView};
use plotview_core::{
    BuildError, Cursor, InteractionConfig, ModelRef, QueryViews, ViewManager, default_registry,
    view_as,
};
use std::rc::Rc;

const TOOLS: [&str; 4] = ["pan_left", "pan_right", "pan_up", "pan_down"];

/// A page holding one plot with a box annotation and a toolbar.
#[derive(Debug)]
pub struct Demo {
    manager: Rc<ViewManager>,
    plot_view: Rc<PlotView>,
}

impl Demo {
    /// Build the document described by `script` and all of its views.
    pub async fn build(script: &Script, config: InteractionConfig) -> Result<Self, AppError> {
        let annotation = BoxAnnotation::new(script.bounds)
            .with_id("box")
            .editable(true)
            .use_handles(script.use_handles);
        let tools: Vec<ModelRef> = TOOLS
            .into_iter()
            .filter_map(ClickPanTool::from_alias)
            .map(|tool| Rc::new(tool) as ModelRef)
            .collect();
        let toolbar = Toolbar::new(tools).with_id("toolbar").with_autohide(true);
        let panel: ModelRef = Rc::new(ToolbarPanel::new(Rc::new(toolbar)).with_id("toolbar_panel"));

        let plot = Plot::new().with_id("plot");
        plot.add_layout(Rc::new(annotation));
        plot.add_layout(Rc::clone(&panel));
        let plot: ModelRef = Rc::new(plot);

        let manager = ViewManager::new(Rc::new(default_registry(config)));
        let view = manager.build_view(Rc::clone(&plot), None).await?;
        let plot_view = view_as::<PlotView>(&view).ok_or_else(|| BuildError::Failed {
            model: plot.to_string(),
            reason: "expected a plot view".to_string(),
        })?;
        log::info!("Built {} views", manager.len());

        // The panel is nested in the plot, so it is a root of the page.
        let panel_view = manager.get_one(&panel)?;
        if let Some(panel_view) = view_as::<ToolbarPanelView>(&panel_view) {
            let tool_views = panel_view
                .toolbar_view()
                .map(|view| view.tool_views())
                .unwrap_or_default();
            for tool_view in tool_views {
                if let Some(tool_view) = view_as::<ClickPanToolView>(&tool_view) {
                    let tool = tool_view.tool();
                    log::info!(
                        "Tool {:?}: {} ({})",
                        tool.tool_name(),
                        tool.tooltip(),
                        tool.icon()
                    );
                }
            }
        }

        Ok(Self { manager, plot_view })
    }

    /// Get the page-level view manager.
    pub fn manager(&self) -> &Rc<ViewManager> {
        &self.manager
    }

    /// Get the plot view events are replayed against.
    pub fn plot_view(&self) -> &Rc<PlotView> {
        &self.plot_view
    }

    /// Replay the script's events with the pointer over the plot.
    pub fn replay(&self, script: &Script) -> Vec<Cursor> {
        self.plot_view.pointer_enter();
        let cursors: Vec<Cursor> = script
            .events
            .iter()
            .map(|event| {
                let cursor = self.plot_view.dispatch(event);
                log::info!("{:?} -> {}", event, cursor);
                cursor
            })
            .collect();
        self.plot_view.pointer_leave();

        if let Some(annotation) = self.plot_view.annotation_views().first() {
            log::info!("Box ended at {:?}", annotation.annotation().bounds());
        }
        cursors
    }

    /// Cursors [`Script::builtin`] produces.
    pub fn builtin_cursors() -> Vec<Cursor> {
        let (inside, outside) = (Cursor::Move, Cursor::Default);
        vec![inside, inside, outside, inside, inside, inside, inside]
    }
}
