//! plotview gesture replay driver
//!
//! Builds a small document (a plot with a box annotation and a toolbar of
//! click-pan tools), replays a pointer gesture script against it and reports
//! the cursor after every event.

pub mod demo;
pub mod script;

pub use demo::Demo;
pub use script::Script;

use clap::Parser;
use plotview_core::{BuildError, ConfigError, Cursor, InteractionConfig, ViewError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the driver.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Script error: {0}")]
    Script(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Build error: {0}")]
    Build(#[from] BuildError),
    #[error("View error: {0}")]
    View(#[from] ViewError),
}

/// Replay a gesture script against a demo plot and print the cursors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(name = "plotview", version)]
pub struct Args {
    /// Gesture script (JSON); the built-in script is used when absent
    pub script: Option<PathBuf>,

    /// Interaction config (JSON); defaults are used when absent
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Load the inputs named by `args`, build the demo and replay the script.
pub fn run(args: &Args) -> Result<Vec<Cursor>, AppError> {
    let config = match &args.config {
        Some(path) => InteractionConfig::load(path)?,
        None => InteractionConfig::default(),
    };
    let script = match &args.script {
        Some(path) => Script::load(path)?,
        None => Script::builtin(),
    };
    log::info!(
        "Replaying {} events (handle tolerance {}, {:?} bounds)",
        script.events.len(),
        config.handle_tolerance,
        config.bounds_policy
    );

    let demo = pollster::block_on(Demo::build(&script, config))?;
    Ok(demo.replay(&script))
}
