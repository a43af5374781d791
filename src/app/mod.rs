//! Application module
//!
//! This module provides the main application structure: a side panel with
//! the dataset summary and a tabbed central view (table preview, four chart
//! tabs, and the crime map).

mod charts;
mod map_view;
pub mod settings;
mod state;
mod ui_panels;

use crate::app::map_view::MapView;
use crate::app::settings::Settings;
use crate::app::state::{AppState, Tab};
use eframe::egui;

/// Persisted settings (lightweight, no dataset contents)
#[derive(serde::Serialize, serde::Deserialize)]
struct PersistedSettings {
    active_tab: String,
    marker_radius: f32,
    hover_radius_px: f32,
    show_summary: bool,
}

/// Main application structure
pub struct CrimeDataViewerApp {
    /// Application state (dataset, derived points, UI settings)
    state: AppState,

    /// Map tab state (background texture)
    map_view: MapView,
}

impl CrimeDataViewerApp {
    pub fn new(settings: Settings, cc: &eframe::CreationContext<'_>) -> Self {
        let mut state = AppState::new(&settings);

        if let Some(storage) = cc.storage {
            Self::restore_persisted_settings(storage, &mut state);
        }

        Self {
            state,
            map_view: MapView::new(settings.map_image),
        }
    }

    /// Restore lightweight UI settings saved by a previous run
    fn restore_persisted_settings(storage: &dyn eframe::Storage, state: &mut AppState) {
        if let Some(json) = storage.get_string("persisted_settings")
            && !json.is_empty()
            && let Ok(persisted) = serde_json::from_str::<PersistedSettings>(&json)
        {
            if let Some(tab) = Tab::from_title(&persisted.active_tab) {
                state.ui_settings.active_tab = tab;
            }
            state.ui_settings.marker_radius = persisted.marker_radius;
            state.ui_settings.hover_radius_px = persisted.hover_radius_px;
            state.ui_settings.show_summary = persisted.show_summary;
            tracing::debug!("Restored UI settings");
        }
    }
}

impl eframe::App for CrimeDataViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle file picker
        ui_panels::show_file_picker(&mut self.state);

        egui::SidePanel::left("side_panel")
            .default_width(230.0)
            .show(ctx, |ui| {
                ui_panels::side_panel(ui, &mut self.state);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            // Tab strip
            ui.horizontal(|ui| {
                for tab in Tab::all() {
                    let selected = self.state.ui_settings.active_tab == *tab;
                    if ui.selectable_label(selected, tab.title()).clicked() {
                        self.state.ui_settings.active_tab = *tab;
                    }
                }
            });
            ui.separator();

            if let Some(error) = &self.state.load_error {
                ui_panels::error_view(ui, error);
                return;
            }
            let Some(dataset) = &self.state.dataset else {
                return;
            };

            match self.state.ui_settings.active_tab {
                Tab::Preview => ui_panels::preview_tab(ui, dataset),
                Tab::Scatter => charts::scatter_tab(ui, dataset),
                Tab::Bar => charts::bar_tab(ui, dataset),
                Tab::Line => charts::line_tab(ui, dataset),
                Tab::Pie => charts::pie_tab(ui, dataset),
                Tab::Map => self.map_view.ui(ui, &self.state),
            }
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let persisted = PersistedSettings {
            active_tab: self.state.ui_settings.active_tab.title().to_owned(),
            marker_radius: self.state.ui_settings.marker_radius,
            hover_radius_px: self.state.ui_settings.hover_radius_px,
            show_summary: self.state.ui_settings.show_summary,
        };

        if let Ok(json) = serde_json::to_string(&persisted) {
            storage.set_string("persisted_settings", json);
            tracing::debug!("Saved settings on exit");
        }
    }
}
