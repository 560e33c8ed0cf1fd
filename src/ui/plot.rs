use std::collections::BTreeMap;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::color::ColorMap;
use crate::data::model::{EnhancerDataset, PeakRecord};
use crate::data::summary::AccessibilityStats;

const PLOT_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Series preparation
// ---------------------------------------------------------------------------

/// Accessibility of one cell type along the enhancer.
#[derive(Debug, Clone, PartialEq)]
pub struct CellTypeTrack {
    pub cell_type: String,
    /// `[position, accessibility]`, sorted by position.
    pub points: Vec<[f64; 2]>,
    pub stats: AccessibilityStats,
}

/// Group peak rows by cell type, in the dataset's cell type order.
pub fn cell_type_tracks(dataset: &EnhancerDataset, indices: &[usize]) -> Vec<CellTypeTrack> {
    let mut grouped: BTreeMap<&str, Vec<&PeakRecord>> = BTreeMap::new();
    for &i in indices {
        let peak = &dataset.peaks[i];
        grouped.entry(peak.cell_type.as_str()).or_default().push(peak);
    }

    dataset
        .cell_types
        .iter()
        .filter_map(|ct| {
            let peaks = grouped.remove(ct.as_str())?;
            let mut points: Vec<[f64; 2]> = peaks
                .iter()
                .map(|p| [p.track_position() as f64, p.accessibility])
                .collect();
            points.sort_by(|a, b| a[0].total_cmp(&b[0]));
            Some(CellTypeTrack {
                cell_type: ct.clone(),
                points,
                stats: AccessibilityStats::from_peaks(peaks.into_iter()),
            })
        })
        .collect()
}

/// Tracks are worth drawing as lines only when some cell type has more than
/// one measurement along the enhancer.
pub fn has_positional_tracks(tracks: &[CellTypeTrack]) -> bool {
    tracks.iter().any(|t| t.points.len() > 1)
}

// ---------------------------------------------------------------------------
// Plots
// ---------------------------------------------------------------------------

fn color_of(colors: Option<&ColorMap>, cell_type: &str) -> Color32 {
    colors
        .map(|c| c.color_for(cell_type))
        .unwrap_or(Color32::LIGHT_BLUE)
}

/// All cell types: max accessibility bars, plus tracks when positions exist.
pub fn peak_overview(
    ui: &mut Ui,
    dataset: &EnhancerDataset,
    indices: &[usize],
    colors: Option<&ColorMap>,
    enhancer_id: &str,
) {
    let tracks = cell_type_tracks(dataset, indices);

    ui.label(format!("{enhancer_id}: peak accessibility across {} cell types", tracks.len()));
    Plot::new(("accessibility_bars", enhancer_id))
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label("Cell type (ordered)")
        .y_axis_label("Max accessibility")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, track) in tracks.iter().enumerate() {
                let color = color_of(colors, &track.cell_type);
                let bar = Bar::new(i as f64, track.stats.max)
                    .name(&track.cell_type)
                    .fill(color)
                    .width(0.8);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(&track.cell_type).color(color));
            }
        });

    if has_positional_tracks(&tracks) {
        ui.add_space(8.0);
        ui.label("Accessibility tracks");
        track_plot(ui, ("accessibility_tracks", enhancer_id), &tracks, colors);
    }
}

/// One cell type: its statistics and its track (or a single bar).
pub fn cell_type_view(
    ui: &mut Ui,
    dataset: &EnhancerDataset,
    indices: &[usize],
    colors: Option<&ColorMap>,
    cell_type: &str,
) {
    let tracks = cell_type_tracks(dataset, indices);
    let Some(track) = tracks.first() else {
        return;
    };

    ui.label(format!(
        "{cell_type}: {} measurements, mean accessibility {:.3}, max {:.3}",
        track.stats.count, track.stats.mean, track.stats.max
    ));

    if has_positional_tracks(&tracks) {
        track_plot(ui, ("cell_type_track", cell_type), &tracks, colors);
        return;
    }

    let color = color_of(colors, cell_type);
    Plot::new(("cell_type_bar", cell_type))
        .height(PLOT_HEIGHT)
        .y_axis_label("Accessibility")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let bar = Bar::new(0.0, track.stats.max).name(cell_type).fill(color);
            plot_ui.bar_chart(BarChart::new(vec![bar]).name(cell_type).color(color));
        });
}

fn track_plot(
    ui: &mut Ui,
    id: impl std::hash::Hash,
    tracks: &[CellTypeTrack],
    colors: Option<&ColorMap>,
) {
    Plot::new(id)
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label("Position (bp)")
        .y_axis_label("Accessibility")
        .allow_boxed_zoom(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for track in tracks {
                let points: PlotPoints = track.points.iter().copied().collect();
                let line = Line::new(points)
                    .name(&track.cell_type)
                    .color(color_of(colors, &track.cell_type))
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::data::fixtures::{peak, sample_dataset};

    #[test]
    fn tracks_follow_cell_type_order() {
        let ds = sample_dataset();
        let tracks = cell_type_tracks(&ds, ds.peak_indices("eA"));

        let names: Vec<_> = tracks.iter().map(|t| t.cell_type.as_str()).collect();
        assert_eq!(names, vec!["1 L2/3 IT", "2 L4 IT", "10 L5 ET"]);
        assert_eq!(tracks[1].stats.max, 0.9);
        assert!(!has_positional_tracks(&tracks));
    }

    #[test]
    fn points_are_sorted_by_position() {
        let at = |pos: i64, acc: f64| PeakRecord {
            position: Some(pos),
            ..peak("eA", "1 L2/3 IT", acc)
        };
        let peaks = vec![at(300, 0.3), at(100, 0.1), at(200, 0.2)];
        let ds = EnhancerDataset::new(peaks, Vec::new(), Vec::new(), PathBuf::from("."));

        let tracks = cell_type_tracks(&ds, &[0, 1, 2]);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].points, vec![[100.0, 0.1], [200.0, 0.2], [300.0, 0.3]]);
        assert_eq!(tracks[0].stats.count, 3);
        assert!(has_positional_tracks(&tracks));
    }
}
