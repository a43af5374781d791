//! Geographic-to-display coordinate mapping for the map overlay
//!
//! Records are projected into the unit square spanned by the background map
//! image: a min-max scaling over the dataset's coordinate ranges, followed by
//! an affine calibration that lines the points up with the image.

use crate::data::{CrimeRecord, DataError, Result};

/// Fallback position when the dataset's coordinate footprint collapses to a
/// single point and min-max scaling is undefined.
pub const MAP_CENTER: (f64, f64) = (0.5, 0.5);

/// Affine correction aligning min-max scaled coordinates with the background
/// image.
///
/// The defaults are empirically fitted to the bundled Camden borough map; a
/// different image needs different values, which is why they are parameters
/// (settable from the CLI) rather than constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapCalibration {
    pub x_scale: f64,
    pub x_offset: f64,
    pub y_scale: f64,
    pub y_offset: f64,
}

impl Default for MapCalibration {
    fn default() -> Self {
        Self {
            x_scale: 1.05,
            x_offset: 0.03,
            y_scale: -1.1,
            y_offset: 1.01,
        }
    }
}

/// Coordinate ranges over a record set
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl GeoBounds {
    /// Bounds over all records, or `None` for an empty set
    pub fn from_records(records: &[CrimeRecord]) -> Option<Self> {
        let mut bounds = GeoBounds {
            lat_min: f64::INFINITY,
            lat_max: f64::NEG_INFINITY,
            lon_min: f64::INFINITY,
            lon_max: f64::NEG_INFINITY,
        };

        for record in records {
            bounds.lat_min = bounds.lat_min.min(record.latitude);
            bounds.lat_max = bounds.lat_max.max(record.latitude);
            bounds.lon_min = bounds.lon_min.min(record.longitude);
            bounds.lon_max = bounds.lon_max.max(record.longitude);
        }

        if records.is_empty() { None } else { Some(bounds) }
    }

    #[inline]
    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    #[inline]
    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }
}

/// A record's coordinates mapped into unit-square display space.
///
/// `x` and `y` sit approximately in `[0, 1]`; the calibration offsets push
/// edge points slightly outside. `record_index` ties the point back to its
/// source record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
    pub record_index: usize,
}

/// Project every record into display space.
///
/// Pure function of its input. Fails with [`DataError::DegenerateRange`] when
/// all latitudes or all longitudes are identical, since min-max scaling would
/// divide by zero; an empty record set simply yields no points.
pub fn try_normalize(
    records: &[CrimeRecord],
    calibration: MapCalibration,
) -> Result<Vec<NormalizedPoint>> {
    let Some(bounds) = GeoBounds::from_records(records) else {
        return Ok(Vec::new());
    };

    if bounds.lat_span() == 0.0 {
        return Err(DataError::DegenerateRange { axis: "latitude" });
    }
    if bounds.lon_span() == 0.0 {
        return Err(DataError::DegenerateRange { axis: "longitude" });
    }

    let points = records
        .iter()
        .enumerate()
        .map(|(record_index, record)| {
            let x_raw = (record.longitude - bounds.lon_min) / bounds.lon_span();
            let y_raw = (record.latitude - bounds.lat_min) / bounds.lat_span();

            NormalizedPoint {
                x: x_raw * calibration.x_scale + calibration.x_offset,
                y: 1.0 - (y_raw * calibration.y_scale + calibration.y_offset),
                record_index,
            }
        })
        .collect();

    Ok(points)
}

/// Like [`try_normalize`], but recovers from a degenerate coordinate range by
/// placing every record at the map center.
pub fn normalize_or_center(
    records: &[CrimeRecord],
    calibration: MapCalibration,
) -> Vec<NormalizedPoint> {
    match try_normalize(records, calibration) {
        Ok(points) => points,
        Err(err) => {
            tracing::warn!("{err}; placing all {} points at the map center", records.len());
            records
                .iter()
                .enumerate()
                .map(|(record_index, _)| NormalizedPoint {
                    x: MAP_CENTER.0,
                    y: MAP_CENTER.1,
                    record_index,
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CrimeRecord;

    fn two_london_records() -> Vec<CrimeRecord> {
        vec![
            CrimeRecord::at(51.50, -0.12, "Burglary"),
            CrimeRecord::at(51.52, -0.10, "Theft"),
        ]
    }

    #[test]
    fn test_corner_records_map_exactly() {
        let points = try_normalize(&two_london_records(), MapCalibration::default()).unwrap();

        // South-west corner: x_raw = 0, y_raw = 0.
        assert!((points[0].x - 0.03).abs() < 1e-12);
        assert!((points[0].y - (-0.01)).abs() < 1e-12);

        // North-east corner: x_raw = 1, y_raw = 1.
        assert!((points[1].x - 1.08).abs() < 1e-12);
        assert!((points[1].y - 1.09).abs() < 1e-12);
    }

    #[test]
    fn test_record_index_follows_input_order() {
        let points = try_normalize(&two_london_records(), MapCalibration::default()).unwrap();
        assert_eq!(points[0].record_index, 0);
        assert_eq!(points[1].record_index, 1);
    }

    #[test]
    fn test_outputs_stay_within_calibrated_bounds() {
        let records: Vec<CrimeRecord> = (0..50)
            .map(|i| {
                CrimeRecord::at(
                    51.50 + 0.0004 * i as f64,
                    -0.12 + 0.0004 * ((i * 7) % 50) as f64,
                    "Theft",
                )
            })
            .collect();

        let points = try_normalize(&records, MapCalibration::default()).unwrap();
        assert_eq!(points.len(), records.len());

        for point in points {
            assert!(point.x >= 0.03 - 1e-12 && point.x <= 1.08 + 1e-12);
            assert!(point.y >= -0.01 - 1e-12 && point.y <= 1.09 + 1e-12);
        }
    }

    #[test]
    fn test_degenerate_range_is_an_error() {
        let records = vec![
            CrimeRecord::at(51.50, -0.12, "Burglary"),
            CrimeRecord::at(51.50, -0.12, "Theft"),
        ];

        let result = try_normalize(&records, MapCalibration::default());
        assert!(matches!(result, Err(DataError::DegenerateRange { .. })));
    }

    #[test]
    fn test_degenerate_range_recovers_to_center() {
        let records = vec![
            CrimeRecord::at(51.50, -0.12, "Burglary"),
            CrimeRecord::at(51.50, -0.12, "Theft"),
        ];

        let points = normalize_or_center(&records, MapCalibration::default());
        assert_eq!(points.len(), 2);
        for point in &points {
            assert_eq!((point.x, point.y), MAP_CENTER);
        }
        assert_eq!(points[1].record_index, 1);
    }

    #[test]
    fn test_single_record_recovers_to_center() {
        let records = vec![CrimeRecord::at(51.50, -0.12, "Burglary")];
        let points = normalize_or_center(&records, MapCalibration::default());
        assert_eq!((points[0].x, points[0].y), MAP_CENTER);
    }

    #[test]
    fn test_empty_set_yields_no_points() {
        let points = try_normalize(&[], MapCalibration::default()).unwrap();
        assert!(points.is_empty());
        assert!(normalize_or_center(&[], MapCalibration::default()).is_empty());
    }

    #[test]
    fn test_identity_calibration_spans_unit_square() {
        let identity = MapCalibration {
            x_scale: 1.0,
            x_offset: 0.0,
            y_scale: 1.0,
            y_offset: 0.0,
        };
        let points = try_normalize(&two_london_records(), identity).unwrap();

        assert!((points[0].x - 0.0).abs() < 1e-12);
        assert!((points[0].y - 1.0).abs() < 1e-12);
        assert!((points[1].x - 1.0).abs() < 1e-12);
        assert!((points[1].y - 0.0).abs() < 1e-12);
    }
}
