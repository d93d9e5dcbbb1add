use std::path::Path;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{charts, panels};

/// Path the dashboard looks for on startup, loaded automatically if present.
const DEFAULT_DATA_PATH: &str = "Chocolate Sales.csv";

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ChocoDashApp {
    pub state: AppState,
}

impl Default for ChocoDashApp {
    fn default() -> Self {
        let mut state = AppState::default();

        let default_path = Path::new(DEFAULT_DATA_PATH);
        if default_path.exists() {
            state.load_file(default_path);
        }

        Self { state }
    }
}

impl eframe::App for ChocoDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts::dashboard(ui, &self.state);
        });
    }
}
