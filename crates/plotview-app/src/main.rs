//! Replay a gesture script and print the cursors it produces.

use clap::Parser;
use plotview_app::Args;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    log::info!("Starting plotview");

    match plotview_app::run(&args) {
        Ok(cursors) => {
            let names: Vec<&str> = cursors.iter().map(|cursor| cursor.as_str()).collect();
            println!("{}", names.join("\n"));
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
