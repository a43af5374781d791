//! Crime Map tab
//!
//! Draws the calibrated background image across the unit square with one
//! marker per normalized record on top of it. Hovering close to a marker
//! shows the record's category in a tooltip.

use crate::app::state::AppState;
use crate::app::ui_panels;
use crate::data::{Dataset, NormalizedPoint, Result, nearest_within};
use egui::Ui;
use egui_plot::{MarkerShape, Plot, PlotImage, PlotPoint, PlotPoints, Points};
use std::path::{Path, PathBuf};

/// State of the map tab: the background texture and its load outcome
pub struct MapView {
    image_path: PathBuf,
    texture: Option<egui::TextureHandle>,
    image_error: Option<String>,
}

impl MapView {
    pub fn new(image_path: PathBuf) -> Self {
        Self {
            image_path,
            texture: None,
            image_error: None,
        }
    }

    /// Render the map tab
    pub fn ui(&mut self, ui: &mut Ui, state: &AppState) {
        self.ensure_texture(ui.ctx());

        if let Some(message) = &self.image_error {
            ui_panels::error_view(ui, message);
            return;
        }
        let (Some(texture), Some(dataset)) = (&self.texture, &state.dataset) else {
            return;
        };

        let markers: Vec<[f64; 2]> = state
            .map_points
            .iter()
            .map(|point| [point.x, point.y])
            .collect();
        let hover_radius_px = state.ui_settings.hover_radius_px as f64;

        let response = Plot::new("crime_map")
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .include_x(0.0)
            .include_x(1.0)
            .include_y(0.0)
            .include_y(1.0)
            .show(ui, |plot_ui| {
                plot_ui.image(PlotImage::new(
                    "map_background",
                    texture.id(),
                    PlotPoint::new(0.5, 0.5),
                    egui::vec2(1.0, 1.0),
                ));

                plot_ui.points(
                    Points::new("Incidents", PlotPoints::new(markers))
                        .shape(MarkerShape::Circle)
                        .radius(state.ui_settings.marker_radius)
                        .color(state.ui_settings.marker_color)
                        .filled(true),
                );

                // Explicit pointer-move hook: position in, optional tooltip out.
                let pointer = plot_ui.pointer_coordinate()?;
                let rect_width = plot_ui.response().rect.width() as f64;
                if rect_width <= 0.0 {
                    return None;
                }
                // Pixel tolerance converted with the current view scale, so
                // zooming keeps the pick radius constant on screen.
                let units_per_pixel = plot_ui.plot_bounds().width() / rect_width;
                let tolerance = hover_radius_px * units_per_pixel;

                pointer_tooltip(dataset, &state.map_points, (pointer.x, pointer.y), tolerance)
            });

        if let Some((_, category)) = response.inner {
            response.response.on_hover_ui_at_pointer(|ui| {
                ui.label(category);
            });
        }
    }

    fn ensure_texture(&mut self, ctx: &egui::Context) {
        if self.texture.is_some() || self.image_error.is_some() {
            return;
        }
        match load_map_texture(ctx, &self.image_path) {
            Ok(texture) => self.texture = Some(texture),
            Err(err) => {
                tracing::error!("Failed to load map image {}: {err}", self.image_path.display());
                self.image_error = Some(format!("Failed to load map: {err}"));
            }
        }
    }
}

/// Tooltip for the point under the pointer, if any is within tolerance.
///
/// Pointer and tolerance are in normalized display units. Returns the record
/// index and its category.
fn pointer_tooltip(
    dataset: &Dataset,
    points: &[NormalizedPoint],
    pointer: (f64, f64),
    tolerance: f64,
) -> Option<(usize, String)> {
    let hit = nearest_within(points, pointer, tolerance)?;
    let record_index = points[hit].record_index;
    let record = dataset.records().get(record_index)?;
    Some((record_index, record.category.clone()))
}

fn load_map_texture(ctx: &egui::Context, path: &Path) -> Result<egui::TextureHandle> {
    let image = image::ImageReader::open(path)?.with_guessed_format()?.decode()?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());

    Ok(ctx.load_texture("crime_map_background", color_image, egui::TextureOptions::LINEAR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MapCalibration, normalize_or_center};

    const SAMPLE_CSV: &str = "\
Category,Latitude,Longitude
Burglary,51.50,-0.12
Theft,51.52,-0.10
";

    fn fixture() -> (Dataset, Vec<NormalizedPoint>) {
        let dataset = Dataset::from_reader(SAMPLE_CSV.as_bytes(), 20).unwrap();
        let points = normalize_or_center(dataset.records(), MapCalibration::default());
        (dataset, points)
    }

    #[test]
    fn test_tooltip_for_point_under_pointer() {
        let (dataset, points) = fixture();

        // First record normalizes to (0.03, -0.01) under the default calibration.
        let tooltip = pointer_tooltip(&dataset, &points, (0.04, -0.01), 0.05);
        assert_eq!(tooltip, Some((0, "Burglary".to_owned())));

        let tooltip = pointer_tooltip(&dataset, &points, (1.07, 1.08), 0.05);
        assert_eq!(tooltip, Some((1, "Theft".to_owned())));
    }

    #[test]
    fn test_no_tooltip_outside_tolerance() {
        let (dataset, points) = fixture();
        assert_eq!(pointer_tooltip(&dataset, &points, (0.5, 0.5), 0.05), None);
    }

    #[test]
    fn test_no_tooltip_for_empty_point_set() {
        let (dataset, _) = fixture();
        assert_eq!(pointer_tooltip(&dataset, &[], (0.5, 0.5), 10.0), None);
    }
}
