mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::Context;
use app::HofApp;
use clap::Parser;
use config::{Args, Command};
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    if let Some(Command::Stage { from }) = &args.command {
        let report = data::staging::stage_files(from, &args.data_dir)
            .with_context(|| format!("staging files from {}", from.display()))?;
        for name in &report.moved {
            println!("Moved {name}");
        }
        for name in &report.skipped {
            println!("Skipped {name} (already in {})", args.data_dir.display());
        }
        println!("Data files in {}:", args.data_dir.display());
        for file in &report.files {
            println!("  {}: {:.1} MB", file.name, file.size_mb);
        }
        return Ok(());
    }

    let load_config = args.load_config();
    log::info!(
        "Starting with data dir {} and metadata {}",
        load_config.data_dir.display(),
        load_config.metadata_path().display()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Hall of Fame Enhancers Analysis",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can fetch and render the imaging links.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(HofApp::new(load_config)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
