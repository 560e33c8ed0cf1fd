use eframe::egui;

use crate::data::loader::LoadConfig;
use crate::state::AppState;
use crate::ui::{detail, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HofApp {
    pub state: AppState,
}

impl HofApp {
    /// Build the app and load the dataset once at startup.
    pub fn new(load_config: LoadConfig) -> Self {
        let mut state = AppState::new(load_config);
        state.reload();
        Self { state }
    }
}

impl eframe::App for HofApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: enhancer list / detail ----
        egui::CentralPanel::default().show(ctx, |ui| {
            detail::central_panel(ui, &mut self.state);
        });
    }
}
