use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::summary::SummaryRow;

const HEADERS: [&str; 8] = [
    "Enhancer",
    "Location",
    "Length (bp)",
    "Cargo",
    "Experiment",
    "Gene",
    "GC Delivered",
    "Experiments",
];

/// "Available Enhancers" table.  Returns the enhancer whose link was clicked.
pub fn enhancer_table(ui: &mut Ui, rows: &[SummaryRow]) -> Option<String> {
    let mut clicked = None;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(70.0), HEADERS.len())
        .header(22.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for row in rows {
                body.row(20.0, |mut table_row| {
                    table_row.col(|ui| {
                        if ui.link(row.enhancer.as_str()).clicked() {
                            clicked = Some(row.enhancer.clone());
                        }
                    });
                    let cells = [
                        row.location.clone(),
                        row.length.to_string(),
                        row.cargo.clone(),
                        row.experiment.clone(),
                        row.gene.clone(),
                        row.gc_delivered.clone(),
                        row.experiments.to_string(),
                    ];
                    for cell in cells {
                        table_row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                });
            }
        });

    clicked
}
