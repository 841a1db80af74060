//! Application entry point for the letter playground.
//!
//! This binary parses the command line, sets up logging, loads the
//! simulation config and hands everything else to [`LetterView`].

mod measure;
mod viewer;

use anyhow::{Context, Result};
use clap::Parser;
use letterfall_core::config::Config;
use std::{
    fs,
    path::{Path, PathBuf},
};
use viewer::LetterView;

#[derive(Parser, Debug)]
#[command(about = "Letters that fall, stack and can be thrown around")]
struct Args {
    /// TOML file overriding simulation constants.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Loads the config file if one was given, otherwise the defaults.
fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Config::from_toml_str(&text).with_context(|| format!("loading {}", path.display()))
}

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if the config cannot be loaded or eframe fails to create the
///   native window or event loop.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .without_time()
        .init();

    let args = Args::parse();
    let cfg = load_config(args.config.as_deref())?;
    tracing::debug!(?cfg, "config loaded");

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Letterfall",
        options,
        Box::new(move |_cc| Ok(Box::new(LetterView::new(cfg)))),
    )
    .map_err(|err| anyhow::anyhow!("eframe failed: {err}"))
}
