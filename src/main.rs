mod app;
mod color;
mod state;
mod ui;

use anyhow::{Context, Result, anyhow};
use app::BikeDashApp;
use bike_dash::config::Config;
use bike_dash::data::loader;
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env().context("reading configuration")?;
    log::info!("Loading dataset from {}", config.source.describe());

    // Without a dataset there is nothing to show; fail before opening a window.
    let dataset = loader::load(&config.source).map_err(|e| {
        log::error!("{e}");
        anyhow!(e)
    })?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Bike Sharing Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(BikeDashApp::new(dataset)))),
    )
    .map_err(|e| anyhow!("UI error: {e}"))
}
