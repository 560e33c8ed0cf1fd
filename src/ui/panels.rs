use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::FilterField;
use crate::state::AppState;
use crate::ui::ALL;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🔍 Filters & Selection");
    ui.label("Choose filters to focus your analysis");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // Apply at most one change per frame, after the widgets are drawn.
    let mut change: Option<(FilterField, Option<String>)> = None;
    let mut reset = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for field in FilterField::ALL {
                let current = state.selection.get(field);
                let mut picked = current.map(str::to_string);

                ui.strong(field.label());
                egui::ComboBox::from_id_salt(field.label())
                    .selected_text(current.unwrap_or(ALL))
                    .width(ui.available_width())
                    .show_ui(ui, |ui: &mut Ui| {
                        ui.selectable_value(&mut picked, None, ALL);
                        for option in state.options.for_field(field) {
                            ui.selectable_value(&mut picked, Some(option.clone()), option.as_str());
                        }
                    })
                    .response
                    .on_hover_text(field.help());
                ui.add_space(6.0);

                if picked.as_deref() != current {
                    change = Some((field, picked));
                }
            }

            ui.separator();
            if ui.button("Reset filters").clicked() {
                reset = true;
            }
        });

    if reset {
        state.reset_filters();
    } else if let Some((field, value)) = change {
        state.set_filter(field, value);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!("📁 {}", ds.source_dir.display()))
                .on_hover_text("Folder the data was loaded from");
            ui.separator();
        }

        if let Some(summary) = &state.summary {
            ui.label(format!(
                "{} enhancers, {} measurements, {} cell types, {} Hall of Fame visible",
                summary.total_enhancers,
                summary.total_measurements,
                summary.cell_types,
                state.view.len()
            ));
            ui.separator();
        }

        match &state.status_message {
            Some(msg) => {
                ui.label(RichText::new(format!("❌ {msg}")).color(Color32::RED));
            }
            None if state.dataset.is_some() => {
                ui.label(RichText::new("App is loaded!").color(Color32::DARK_GREEN));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open Hall of Fame data folder")
        .set_directory(&state.load_config.data_dir)
        .pick_folder();

    if let Some(dir) = folder {
        log::info!("Loading data folder {}", dir.display());
        state.load_from_dir(dir);
    }
}
