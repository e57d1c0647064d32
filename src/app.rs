use eframe::egui;

use titanic_eda::config::Config;
use titanic_eda::load_file;
use titanic_eda::state::AppState;

use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// What the window shows: the dashboard, or only the reason it cannot start.
enum Screen {
    Dashboard(Box<AppState>),
    Fatal(String),
}

pub struct TitanicEdaApp {
    screen: Screen,
}

impl TitanicEdaApp {
    /// Load the dataset named by `config`. A load failure is kept as the single
    /// message to display; no dashboard is built from partial data.
    pub fn new(config: &Config) -> Self {
        let screen = match load_file(&config.data_path) {
            Ok(dataset) => Screen::Dashboard(Box::new(AppState::new(
                dataset,
                config.pipeline.clone(),
            ))),
            Err(e) => {
                log::error!("Failed to load {}: {e}", config.data_path.display());
                Screen::Fatal(e.to_string())
            }
        };
        Self { screen }
    }
}

impl eframe::App for TitanicEdaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = match &mut self.screen {
            Screen::Dashboard(state) => state,
            Screen::Fatal(message) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    panels::fatal_error(ui, message);
                });
                return;
            }
        };

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, state);
            });

        // ---- Central panel: preview and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::central_panel(ui, state);
        });
    }
}
