//! Chart tabs built on `egui_plot`
//!
//! Each tab is a plain function over the loaded dataset. Records missing the
//! columns a chart needs are skipped by that chart only; the dataset itself
//! is never mutated.

use crate::data::Dataset;
use egui::Ui;
use egui_plot::{
    Bar, BarChart, Corner, Legend, Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon,
    Text,
};
use std::collections::BTreeMap;
use std::f64::consts::TAU;

/// Scatter plot of Street ID against Easting
pub fn scatter_tab(ui: &mut Ui, dataset: &Dataset) {
    let points: Vec<[f64; 2]> = dataset
        .records()
        .iter()
        .filter_map(|record| {
            let street_id = record.street_id? as f64;
            let easting = record.easting?;
            Some([street_id, easting])
        })
        .collect();

    if points.is_empty() {
        no_chart_data(ui, "Street ID and Easting columns");
        return;
    }

    Plot::new("scatter_plot")
        .x_axis_label("Street ID")
        .y_axis_label("Easting")
        .legend(Legend::default().position(Corner::RightTop))
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new("Street ID", PlotPoints::new(points))
                    .shape(MarkerShape::Circle)
                    .radius(2.0),
            );
        });
}

/// Bar chart of incident counts per ward
pub fn bar_tab(ui: &mut Ui, dataset: &Dataset) {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for record in dataset.records() {
        if let Some(ward) = record.ward_name.as_deref() {
            *counts.entry(ward).or_default() += 1;
        }
    }

    if counts.is_empty() {
        no_chart_data(ui, "a Ward Name column");
        return;
    }

    let labels: Vec<String> = counts.keys().map(|ward| (*ward).to_owned()).collect();
    let bars: Vec<Bar> = counts
        .values()
        .enumerate()
        .map(|(i, &count)| Bar::new(i as f64, count as f64).name(&labels[i]))
        .collect();

    let tick_labels = labels.clone();
    Plot::new("bar_chart")
        .y_axis_label("Incidents")
        .x_axis_formatter(move |mark, _range| {
            let index = mark.value.round();
            if (mark.value - index).abs() < 1e-3 && index >= 0.0 {
                tick_labels.get(index as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new("Incidents per ward", bars).width(0.7));
        });
}

/// Line plot of Easting over Epoch
pub fn line_tab(ui: &mut Ui, dataset: &Dataset) {
    let mut points: Vec<[f64; 2]> = dataset
        .records()
        .iter()
        .filter_map(|record| {
            let epoch = record.epoch? as f64;
            let easting = record.easting?;
            Some([epoch, easting])
        })
        .collect();

    if points.is_empty() {
        no_chart_data(ui, "Epoch and Easting columns");
        return;
    }

    points.sort_by(|a, b| a[0].total_cmp(&b[0]));

    Plot::new("line_plot")
        .x_axis_label("Epoch")
        .y_axis_label("Easting")
        .legend(Legend::default().position(Corner::RightTop))
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new("Easting", PlotPoints::new(points)));
        });
}

/// Pie chart of crime category shares
pub fn pie_tab(ui: &mut Ui, dataset: &Dataset) {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for record in dataset.records() {
        *counts.entry(record.category.as_str()).or_default() += 1;
    }

    let total: u64 = counts.values().sum();
    if total == 0 {
        no_chart_data(ui, "a Category column");
        return;
    }

    Plot::new("pie_chart")
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(egui_plot::PlotBounds::from_min_max(
                [-1.7, -1.5],
                [1.7, 1.5],
            ));

            let mut start_angle = 0.0_f64;
            for (slice_index, (category, &count)) in counts.iter().enumerate() {
                let fraction = count as f64 / total as f64;
                let end_angle = start_angle + fraction * TAU;

                plot_ui.polygon(
                    Polygon::new(*category, PlotPoints::new(wedge(start_angle, end_angle)))
                        .fill_color(slice_color(slice_index))
                        .stroke(egui::Stroke::new(1.0, egui::Color32::WHITE)),
                );

                let mid_angle = (start_angle + end_angle) / 2.0;
                let label = format!("{category} {:.1}%", fraction * 100.0);
                plot_ui.text(Text::new(
                    format!("{category}_label"),
                    PlotPoint::new(mid_angle.cos() * 1.25, mid_angle.sin() * 1.25),
                    label,
                ));

                start_angle = end_angle;
            }
        });
}

/// Unit-circle wedge between two angles, as polygon vertices
fn wedge(start_angle: f64, end_angle: f64) -> Vec<[f64; 2]> {
    let span = end_angle - start_angle;
    let steps = ((span / TAU) * 96.0).ceil().max(2.0) as usize;

    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for step in 0..=steps {
        let angle = start_angle + span * step as f64 / steps as f64;
        points.push([angle.cos(), angle.sin()]);
    }
    points
}

fn slice_color(slice_index: usize) -> egui::Color32 {
    let hue = (slice_index as f32 * 0.17) % 1.0;
    egui::ecolor::Hsva::new(hue, 0.65, 0.85, 1.0).into()
}

fn no_chart_data(ui: &mut Ui, needed: &str) {
    ui.add_space(24.0);
    ui.vertical_centered(|ui| {
        ui.label(format!("No records with {needed} to plot"));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wedge_starts_at_center() {
        let points = wedge(0.0, TAU / 4.0);
        assert_eq!(points[0], [0.0, 0.0]);
        assert!(points.len() >= 4);
    }

    #[test]
    fn test_wedge_endpoints_follow_angles() {
        let points = wedge(0.0, TAU / 2.0);

        let first = points[1];
        assert!((first[0] - 1.0).abs() < 1e-9 && first[1].abs() < 1e-9);

        let last = points[points.len() - 1];
        assert!((last[0] + 1.0).abs() < 1e-9 && last[1].abs() < 1e-9);
    }

    #[test]
    fn test_tiny_wedge_still_has_an_arc() {
        let points = wedge(0.0, 0.001);
        // Center plus at least the two arc endpoints.
        assert!(points.len() >= 3);
    }
}
