//! Render graph viewer entry point

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use eframe::egui;
use rgv_data::ViewerConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod controller;
mod demo;

use app::RenderGraphViewerApp;

/// Inspect render graph compilation artifacts
#[derive(Parser, Debug)]
#[command(name = "rgv", version, about)]
struct Cli {
    /// Compilation artifact files to open
    artifacts: Vec<PathBuf>,

    /// Viewer configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Load the built-in demo artifacts
    #[arg(long, default_value_t = false)]
    demo: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ViewerConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ViewerConfig::default(),
    }
    .with_extra_artifacts(cli.artifacts);
    let demo = cli.demo;

    info!("Starting render graph viewer with {} artifact(s)", config.artifacts.len());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true),
        default_theme: eframe::Theme::Dark,
        ..Default::default()
    };

    eframe::run_native(
        "Render Graph Viewer",
        options,
        Box::new(move |cc| Box::new(RenderGraphViewerApp::new(cc, config, demo))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
