//! Application state management
//!
//! This module manages the application state: the loaded dataset, the derived
//! map point set, and the UI settings adjustable at runtime.

use crate::app::settings::Settings;
use crate::data::{Dataset, DatasetSummary, MapCalibration, NormalizedPoint, normalize_or_center};
use egui::Color32;
use std::path::PathBuf;

/// Main application state
pub struct AppState {
    /// Loaded dataset, absent until a load succeeds
    pub dataset: Option<Dataset>,

    /// Path of the currently loaded CSV file
    pub dataset_path: Option<PathBuf>,

    /// Load failure shown in place of the data views
    pub load_error: Option<String>,

    /// Derived map points, recomputed on every dataset change
    pub map_points: Vec<NormalizedPoint>,

    /// Summary of the loaded dataset
    pub summary: Option<DatasetSummary>,

    /// Calibration applied when normalizing coordinates
    pub calibration: MapCalibration,

    /// Row cap for the preview tab
    pub preview_limit: usize,

    /// Current UI settings
    pub ui_settings: UiSettings,

    /// Header field picked in the dropdown
    pub selected_header: Option<String>,

    /// Show file picker dialog
    pub show_picker: bool,
}

/// UI-specific settings that can be adjusted at runtime
#[derive(Clone)]
pub struct UiSettings {
    /// Active tab in the central view
    pub active_tab: Tab,

    /// Map marker radius in pixels
    pub marker_radius: f32,

    /// Map marker color
    pub marker_color: Color32,

    /// Hover pick radius for the map tooltip, in pixels
    pub hover_radius_px: f32,

    /// Show the dataset summary section in the side panel
    pub show_summary: bool,
}

/// Tabs of the central view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Preview,
    Scatter,
    Bar,
    Line,
    Pie,
    Map,
}

impl Tab {
    pub fn all() -> &'static [Self] {
        &[
            Self::Preview,
            Self::Scatter,
            Self::Bar,
            Self::Line,
            Self::Pie,
            Self::Map,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Preview => "Data Preview",
            Self::Scatter => "Scatter Plot",
            Self::Bar => "Bar Chart",
            Self::Line => "Line Plot",
            Self::Pie => "Pie Chart",
            Self::Map => "Crime Map",
        }
    }

    pub fn from_title(title: &str) -> Option<Self> {
        Self::all().iter().copied().find(|tab| tab.title() == title)
    }
}

impl AppState {
    /// Create new application state from CLI settings and load the startup
    /// dataset
    pub fn new(settings: &Settings) -> Self {
        let ui_settings = UiSettings {
            active_tab: Tab::Preview,
            marker_radius: settings.marker_radius,
            marker_color: Color32::from_rgba_unmultiplied(220, 40, 40, 128),
            hover_radius_px: settings.hover_radius_px,
            show_summary: true,
        };

        let mut state = Self {
            dataset: None,
            dataset_path: None,
            load_error: None,
            map_points: Vec::new(),
            summary: None,
            calibration: settings.map_calibration(),
            preview_limit: settings.preview_rows,
            ui_settings,
            selected_header: None,
            show_picker: false,
        };
        state.load_dataset(settings.csv_file.clone());
        state
    }

    /// Load a CSV file, replacing the current dataset and recomputing the
    /// derived map points
    pub fn load_dataset(&mut self, path: PathBuf) {
        match Dataset::from_path(&path, self.preview_limit) {
            Ok(dataset) => {
                let summary = dataset.summary();
                tracing::info!(
                    "Number of valid entries: {}, latitude range: {} to {}, longitude range: {} to {}",
                    summary.num_entries,
                    summary.lat_range.0,
                    summary.lat_range.1,
                    summary.lon_range.0,
                    summary.lon_range.1,
                );

                self.map_points = normalize_or_center(dataset.records(), self.calibration);
                self.summary = Some(summary);
                self.dataset = Some(dataset);
                self.dataset_path = Some(path);
                self.load_error = None;
                self.selected_header = None;
            }
            Err(err) => {
                tracing::error!("Failed to load {}: {err}", path.display());
                self.load_error = Some(format!("Failed to load data: {err}"));
                self.dataset = None;
                self.dataset_path = Some(path);
                self.map_points.clear();
                self.summary = None;
                self.selected_header = None;
            }
        }
    }

    /// Record a header-field selection from the dropdown
    pub fn select_header(&mut self, name: String) {
        tracing::debug!("Selected header field: {name}");
        self.selected_header = Some(name);
    }

    /// Formatted entry count for the summary panel
    pub fn format_entries(&self) -> String {
        match &self.summary {
            Some(summary) => format_number_with_commas(summary.num_entries),
            None => "0".to_owned(),
        }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            active_tab: Tab::Preview,
            marker_radius: 2.5,
            marker_color: Color32::from_rgba_unmultiplied(220, 40, 40, 128),
            hover_radius_px: 8.0,
            show_summary: true,
        }
    }
}

/// Helper to format numbers with comma separators
fn format_number_with_commas(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_title_roundtrip() {
        for tab in Tab::all() {
            assert_eq!(Tab::from_title(tab.title()), Some(*tab));
        }
        assert_eq!(Tab::from_title("Nonsense"), None);
    }

    #[test]
    fn test_format_number_with_commas() {
        assert_eq!(format_number_with_commas(5), "5");
        assert_eq!(format_number_with_commas(1234), "1,234");
        assert_eq!(format_number_with_commas(1234567), "1,234,567");
    }
}
