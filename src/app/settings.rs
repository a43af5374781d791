use crate::data::MapCalibration;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Crime Data Viewer - A desktop application for exploring a crime-incident dataset through charts and a calibrated map overlay
pub struct Settings {
    /// CSV dataset to load on startup
    #[clap(short, long, value_name = "FILE", default_value = "data/On_Street_Crime_In_Camden.csv")]
    pub csv_file: PathBuf,

    /// Background image for the Crime Map tab
    #[clap(short, long, value_name = "FILE", default_value = "assets/camden_map.png")]
    pub map_image: PathBuf,

    /// Number of rows shown in the Data Preview tab
    #[clap(long, default_value = "20")]
    pub preview_rows: usize,

    /// Map marker radius in pixels
    #[clap(long, default_value = "2.5")]
    pub marker_radius: f32,

    /// Hover pick radius for the map tooltip, in pixels
    #[clap(long, default_value = "8.0")]
    pub hover_radius_px: f32,

    /// Horizontal scale of the map calibration (fitted to the bundled image)
    #[clap(long, default_value = "1.05", allow_hyphen_values = true)]
    pub map_x_scale: f64,

    /// Horizontal offset of the map calibration
    #[clap(long, default_value = "0.03", allow_hyphen_values = true)]
    pub map_x_offset: f64,

    /// Vertical scale of the map calibration
    #[clap(long, default_value = "-1.1", allow_hyphen_values = true)]
    pub map_y_scale: f64,

    /// Vertical offset of the map calibration
    #[clap(long, default_value = "1.01", allow_hyphen_values = true)]
    pub map_y_offset: f64,
}

impl Settings {
    pub fn map_calibration(&self) -> MapCalibration {
        MapCalibration {
            x_scale: self.map_x_scale,
            x_offset: self.map_x_offset,
            y_scale: self.map_y_scale,
            y_offset: self.map_y_offset,
        }
    }
}
