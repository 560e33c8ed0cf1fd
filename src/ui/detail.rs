use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::ColorMap;
use crate::data::filter::{peak_indices, FilterField, FilterSelection, FilteredView};
use crate::data::imaging::{select_imaging_record, ImagingPanel};
use crate::data::model::{EnhancerDataset, HofEnhancer, MetadataRecord};
use crate::data::summary::{format_thousands, summary_rows, NOT_AVAILABLE};
use crate::state::AppState;
use crate::ui::{plot, table};

const HEADER_FILL: Color32 = Color32::from_rgb(102, 126, 234);
const IMAGE_MAX_HEIGHT: f32 = 480.0;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the central panel: enhancer list or the selected enhancer.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Cheat Sheet for Enhancer Analysis");

    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| match &state.status_message {
            Some(msg) => {
                ui.label(RichText::new(format!("❌ {msg}")).color(Color32::RED));
            }
            None => {
                ui.heading("Open a data folder to start  (File → Open data folder…)");
            }
        });
        return;
    };

    let mut chosen: Option<String> = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if dataset.hof_enhancers.is_empty() {
                ui.colored_label(
                    Color32::RED,
                    "No Hall of Fame enhancers data available. Please check data files.",
                );
                return;
            }
            if state.view.is_empty() {
                ui.colored_label(
                    Color32::from_rgb(200, 140, 0),
                    "⚠ No enhancers match the selected filters. Please adjust your filter criteria.",
                );
                return;
            }

            match state.selection.enhancer.as_deref() {
                None => {
                    ui.label("📊 Select a specific enhancer from the sidebar (or click one below) to view detailed analysis");
                    ui.add_space(6.0);
                    ui.heading("Available Enhancers");
                    let rows = summary_rows(dataset, &state.view);
                    chosen = table::enhancer_table(ui, &rows);
                    ui.add_space(6.0);
                    ui.label(RichText::new(format!("Total enhancers: {}", state.view.len())).strong());
                }
                Some(enhancer_id) => enhancer_detail(
                    ui,
                    dataset,
                    &state.view,
                    &state.selection,
                    state.cell_colors.as_ref(),
                    enhancer_id,
                ),
            }
        });

    if let Some(enhancer_id) = chosen {
        state.set_filter(FilterField::Enhancer, Some(enhancer_id));
    }
}

// ---------------------------------------------------------------------------
// Enhancer detail
// ---------------------------------------------------------------------------

fn enhancer_detail(
    ui: &mut Ui,
    dataset: &EnhancerDataset,
    view: &FilteredView,
    selection: &FilterSelection,
    colors: Option<&ColorMap>,
    enhancer_id: &str,
) {
    let Some(enhancer) = view.enhancer(dataset, enhancer_id) else {
        ui.colored_label(Color32::RED, "Selected enhancer not found in the data.");
        return;
    };

    match view.metadata_for(dataset, enhancer_id).next() {
        Some(first) => {
            header(ui, enhancer, first);
            ui.add_space(8.0);
            match select_imaging_record(dataset, view, enhancer_id, selection) {
                Some(record) => imaging(ui, &ImagingPanel::from_record(record)),
                None => {
                    ui.label("No imaging metadata available for this enhancer.");
                }
            }
        }
        None => {
            ui.colored_label(Color32::from_rgb(200, 140, 0), "No metadata available for this enhancer.");
        }
    }

    ui.add_space(8.0);
    peaks(ui, dataset, selection, colors, enhancer_id);
}

fn header(ui: &mut Ui, enhancer: &HofEnhancer, first: &MetadataRecord) {
    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string());

    egui::Frame::group(ui.style())
        .fill(HEADER_FILL)
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(
                RichText::new(&enhancer.enhancer_id)
                    .size(24.0)
                    .strong()
                    .color(Color32::WHITE),
            );
            ui.label(
                RichText::new(format!(
                    "Location: {}:{}-{} ({} bp)",
                    enhancer.chr,
                    format_thousands(enhancer.start),
                    format_thousands(enhancer.end),
                    format_thousands(enhancer.length())
                ))
                .size(16.0)
                .color(Color32::WHITE),
            );
            ui.label(
                RichText::new(format!(
                    "Cargo: {} | Experiment: {} | Gene: {}",
                    text(&first.cargo),
                    text(&first.experiment),
                    text(&first.proximal_gene)
                ))
                .size(16.0)
                .color(Color32::WHITE),
            );
        });
}

fn imaging(ui: &mut Ui, panel: &ImagingPanel) {
    ui.heading("📸 Imaging Data");
    if panel.is_empty() {
        ui.label("No imaging data available for this enhancer.");
        return;
    }

    for section in &panel.sections {
        ui.add_space(4.0);
        ui.strong(section.kind.heading());
        for (i, url) in section.urls.iter().enumerate() {
            let label = section.kind.item_label(i);
            if section.kind.is_image() {
                ui.label(RichText::new(format!("{label}:")).strong());
                ui.add(
                    egui::Image::new(url.as_str())
                        .max_width(ui.available_width())
                        .max_height(IMAGE_MAX_HEIGHT),
                );
                ui.hyperlink_to("Open full size", url);
            } else {
                // Interactive viewers open in the browser.
                ui.hyperlink_to(format!("🧠 {label}"), url);
            }
        }
    }
}

fn peaks(
    ui: &mut Ui,
    dataset: &EnhancerDataset,
    selection: &FilterSelection,
    colors: Option<&ColorMap>,
    enhancer_id: &str,
) {
    if dataset.peak_indices(enhancer_id).is_empty() {
        ui.label("No peak accessibility data available for this enhancer.");
        return;
    }

    ui.heading("📊 Peak Accessibility Analysis");
    let cell_type = selection.cell_type.as_deref();
    let indices = peak_indices(dataset, enhancer_id, cell_type);

    match cell_type {
        Some(ct) if indices.is_empty() => {
            ui.label(format!("No accessibility data available for {ct} cell type."));
        }
        Some(ct) => plot::cell_type_view(ui, dataset, &indices, colors, ct),
        None => plot::peak_overview(ui, dataset, &indices, colors, enhancer_id),
    }
}
