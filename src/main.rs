mod app;
mod color;
mod ui;

use anyhow::{anyhow, Result};
use app::TitanicEdaApp;
use eframe::egui;
use titanic_eda::config::Config;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env()?;
    log::info!("Starting dashboard with {config:?}");

    let app = TitanicEdaApp::new(&config);
    let [width, height] = config.window_size;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Titanic Data Analytics Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow!("running the dashboard window: {e}"))
}
