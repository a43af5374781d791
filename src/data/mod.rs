//! Crime Incident Data Module
//!
//! This module owns the dataset side of the viewer: loading the incident CSV,
//! the record model, and the two pieces of map logic built on top of it.
//!
//! # Overview
//!
//! - **[`Dataset`]**: immutable record set parsed from a CSV file, with rows
//!   lacking usable coordinates filtered out up front
//! - **[`normalize_or_center`]**: maps each record's (latitude, longitude)
//!   into unit-square display coordinates aligned to the background map image
//! - **[`nearest_within`]**: nearest-point lookup used for the map hover
//!   tooltip
//!
//! The normalized point set is derived state: it is recomputed whenever the
//! source record set changes and never persisted.
//!
//! # Usage Example
//!
//! ```rust
//! use crime_data_viewer::data::{
//!     CrimeRecord, MapCalibration, nearest_within, normalize_or_center,
//! };
//!
//! let records = vec![
//!     CrimeRecord::at(51.50, -0.12, "Burglary"),
//!     CrimeRecord::at(51.52, -0.10, "Theft"),
//! ];
//!
//! let points = normalize_or_center(&records, MapCalibration::default());
//! assert_eq!(points.len(), 2);
//!
//! // A pointer close to the first record's marker picks it up.
//! let hit = nearest_within(&points, (0.03, -0.01), 0.05);
//! assert_eq!(hit, Some(0));
//! ```

mod dataset;
mod hittest;
mod normalize;

// Public API exports
pub use dataset::{CrimeRecord, Dataset, DatasetSummary};
pub use hittest::nearest_within;
pub use normalize::{
    GeoBounds, MAP_CENTER, MapCalibration, NormalizedPoint, normalize_or_center, try_normalize,
};

/// Error types for the data module
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("row {0} has no usable coordinates")]
    MissingCoordinate(usize),

    #[error("no records with usable coordinates")]
    EmptyDataset,

    #[error("degenerate {axis} range")]
    DegenerateRange { axis: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, DataError>;
