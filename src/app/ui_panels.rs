//! UI panels for the application
//!
//! This module provides the side panel, the data preview table, and the
//! error placeholder shown in place of a view that failed to load.

use crate::app::state::AppState;
use crate::data::Dataset;
use egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

/// Render the side panel: file controls, header dropdown, dataset summary
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Dataset");
    ui.separator();

    ui.horizontal(|ui| {
        if ui.button("📂 Open CSV…").clicked() {
            state.show_picker = true;
        }
    });

    if let Some(path) = &state.dataset_path {
        ui.label(
            RichText::new(format!(
                "File: {}",
                path.file_name().unwrap_or_default().to_string_lossy()
            ))
            .small(),
        );
    }

    ui.add_space(8.0);
    header_dropdown(ui, state);

    ui.add_space(8.0);
    ui.separator();

    if state.ui_settings.show_summary {
        summary_section(ui, state);
    }

    ui.separator();
    ui.collapsing("Display", |ui| {
        ui.horizontal(|ui| {
            ui.label("Marker Size:");
            ui.add(
                egui::Slider::new(&mut state.ui_settings.marker_radius, 0.5..=8.0)
                    .suffix(" px")
                    .step_by(0.5),
            );
        });

        ui.horizontal(|ui| {
            ui.label("Marker Color:");
            ui.color_edit_button_srgba(&mut state.ui_settings.marker_color);
        });

        ui.horizontal(|ui| {
            ui.label("Hover Radius:");
            ui.add(
                egui::Slider::new(&mut state.ui_settings.hover_radius_px, 2.0..=30.0)
                    .suffix(" px"),
            );
        });

        ui.checkbox(&mut state.ui_settings.show_summary, "Show Summary");
    });
}

/// Dropdown listing every CSV column header
fn header_dropdown(ui: &mut Ui, state: &mut AppState) {
    let headers: Vec<String> = match &state.dataset {
        Some(dataset) => dataset.headers().to_vec(),
        None => Vec::new(),
    };

    let selected_text = state
        .selected_header
        .clone()
        .unwrap_or_else(|| "Select Header Field".to_owned());

    let mut picked: Option<String> = None;
    egui::ComboBox::from_id_salt("header_dropdown")
        .width(200.0)
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            for header in &headers {
                let is_selected = state.selected_header.as_deref() == Some(header);
                if ui.selectable_label(is_selected, header).clicked() {
                    picked = Some(header.clone());
                }
            }
        });

    if let Some(name) = picked {
        state.select_header(name);
    }
}

/// Dataset summary: entry count, coordinate ranges, dropped rows
fn summary_section(ui: &mut Ui, state: &AppState) {
    ui.label(
        RichText::new("Summary")
            .strong()
            .color(ui.visuals().strong_text_color()),
    );
    ui.add_space(4.0);

    let Some(summary) = &state.summary else {
        ui.label(RichText::new("No dataset loaded").italics().weak());
        ui.add_space(8.0);
        return;
    };

    ui.horizontal(|ui| {
        ui.label("Entries:");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(state.format_entries()).strong());
        });
    });

    ui.label(format!(
        "Lat: {:.4}° to {:.4}°",
        summary.lat_range.0, summary.lat_range.1
    ));
    ui.label(format!(
        "Lon: {:.4}° to {:.4}°",
        summary.lon_range.0, summary.lon_range.1
    ));

    if let Some(dataset) = &state.dataset
        && dataset.skipped_rows() > 0
    {
        ui.label(
            RichText::new(format!(
                "⚠ {} rows dropped (missing coordinates)",
                dataset.skipped_rows()
            ))
            .small()
            .color(ui.visuals().warn_fg_color),
        );
    }

    ui.add_space(8.0);
}

/// Read-only table of the first rows of the dataset
pub fn preview_tab(ui: &mut Ui, dataset: &Dataset) {
    let headers = dataset.headers();
    let preview = dataset.preview();

    egui::ScrollArea::horizontal().show(ui, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .columns(Column::auto().at_least(60.0), headers.len())
            .header(20.0, |mut header| {
                for name in headers {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, preview.len(), |mut row| {
                    let values = &preview[row.index()];
                    for value in values {
                        row.col(|ui| {
                            ui.label(value);
                        });
                    }
                });
            });
    });
}

/// Error message shown in place of a view that failed to load
pub fn error_view(ui: &mut Ui, message: &str) {
    ui.add_space(24.0);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(message).color(Color32::RED));
    });
}

/// Open the native file picker when requested and load the picked CSV
pub fn show_file_picker(state: &mut AppState) {
    if state.show_picker {
        state.show_picker = false;

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .add_filter("All Files", &["*"])
            .pick_file()
        {
            state.load_dataset(path);
        }
    }
}
