mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use app::SalesDashboardApp;
use config::DashboardConfig;
use data::cache::DatasetCache;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    // An explicit config path may be given; otherwise dashboard.json is
    // looked up in the working directory.
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => DashboardConfig::load(&path)?,
        None => DashboardConfig::discover(Path::new("."))?,
    };

    let cache = DatasetCache::new(config.source_spec()?);
    let dataset = match cache.get_or_load() {
        Ok(dataset) => dataset,
        Err(e) => {
            log::error!("Failed to load {}: {e}", cache.source().path.display());
            return Err(e).with_context(|| format!("loading {}", cache.source().path.display()));
        }
    };
    let state = AppState::new(dataset, config.bar_color()?);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sales Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(SalesDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("running dashboard window: {e}"))
}
