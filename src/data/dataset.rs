//! Dataset storage and CSV parsing

use crate::data::{DataError, Result};
use std::io::Read;
use std::path::Path;

/// Column headers the loader looks for. Coordinate and category columns are
/// required; the rest only feed individual chart tabs and may be absent.
const COL_LATITUDE: &str = "Latitude";
const COL_LONGITUDE: &str = "Longitude";
const COL_CATEGORY: &str = "Category";
const COL_STREET_ID: &str = "Street ID";
const COL_WARD_NAME: &str = "Ward Name";
const COL_EASTING: &str = "Easting";
const COL_NORTHING: &str = "Northing";
const COL_EPOCH: &str = "Epoch";

/// One crime incident with usable coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct CrimeRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub category: String,
    pub street_id: Option<u64>,
    pub ward_name: Option<String>,
    pub easting: Option<f64>,
    pub northing: Option<f64>,
    pub epoch: Option<i64>,
}

impl CrimeRecord {
    /// Minimal record with only the fields every view depends on.
    pub fn at(latitude: f64, longitude: f64, category: &str) -> Self {
        Self {
            latitude,
            longitude,
            category: category.to_owned(),
            street_id: None,
            ward_name: None,
            easting: None,
            northing: None,
            epoch: None,
        }
    }
}

/// Immutable incident dataset parsed from a CSV file.
///
/// Rows without parseable latitude and longitude are dropped during loading
/// (and counted), so every stored record carries valid coordinates.
#[derive(Clone, Debug)]
pub struct Dataset {
    headers: Vec<String>,
    records: Vec<CrimeRecord>,
    preview: Vec<Vec<String>>,
    skipped_rows: usize,
}

/// Headline numbers about a loaded dataset
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DatasetSummary {
    pub num_entries: usize,
    pub lat_range: (f64, f64),
    pub lon_range: (f64, f64),
}

/// Resolved header indices for the columns the viewer consumes
struct Columns {
    latitude: usize,
    longitude: usize,
    category: usize,
    street_id: Option<usize>,
    ward_name: Option<usize>,
    easting: Option<usize>,
    northing: Option<usize>,
    epoch: Option<usize>,
}

impl Columns {
    fn resolve(headers: &[String]) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.eq_ignore_ascii_case(name))
        };
        let require = |name: &str| find(name).ok_or_else(|| DataError::MissingColumn(name.to_owned()));

        Ok(Self {
            latitude: require(COL_LATITUDE)?,
            longitude: require(COL_LONGITUDE)?,
            category: require(COL_CATEGORY)?,
            street_id: find(COL_STREET_ID),
            ward_name: find(COL_WARD_NAME),
            easting: find(COL_EASTING),
            northing: find(COL_NORTHING),
            epoch: find(COL_EPOCH),
        })
    }
}

impl Dataset {
    /// Load a dataset from a CSV file on disk
    pub fn from_path(path: &Path, preview_limit: usize) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file), preview_limit)
    }

    /// Load a dataset from any CSV source
    pub fn from_reader<R: Read>(reader: R, preview_limit: usize) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|header| header.trim().to_owned())
            .collect();
        let columns = Columns::resolve(&headers)?;

        let mut records = Vec::new();
        let mut preview = Vec::new();
        let mut skipped_rows = 0usize;

        for (row_index, row) in csv_reader.records().enumerate() {
            let row = row?;
            match parse_record(&row, &columns, row_index) {
                Ok(record) => {
                    if preview.len() < preview_limit {
                        preview.push(raw_row(&row, headers.len()));
                    }
                    records.push(record);
                }
                // Rows without coordinates are filtered out here, never
                // propagated to the caller.
                Err(DataError::MissingCoordinate(row_index)) => {
                    tracing::debug!("Dropping row {row_index}: no usable coordinates");
                    skipped_rows += 1;
                }
                Err(other) => return Err(other),
            }
        }

        if records.is_empty() {
            return Err(DataError::EmptyDataset);
        }

        tracing::info!(
            "Loaded {} valid records ({} rows dropped for missing coordinates)",
            records.len(),
            skipped_rows
        );

        Ok(Self {
            headers,
            records,
            preview,
            skipped_rows,
        })
    }

    /// The CSV header row, in file order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All records with valid coordinates, in file order
    pub fn records(&self) -> &[CrimeRecord] {
        &self.records
    }

    /// Raw string values of the first rows, for the preview table
    pub fn preview(&self) -> &[Vec<String>] {
        &self.preview
    }

    /// Number of rows dropped for missing or unparseable coordinates
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Entry count and coordinate ranges over the valid records.
    ///
    /// The loader rejects datasets with no valid rows, so the ranges are
    /// always backed by at least one record.
    pub fn summary(&self) -> DatasetSummary {
        let mut lat_range = (f64::INFINITY, f64::NEG_INFINITY);
        let mut lon_range = (f64::INFINITY, f64::NEG_INFINITY);

        for record in &self.records {
            lat_range.0 = lat_range.0.min(record.latitude);
            lat_range.1 = lat_range.1.max(record.latitude);
            lon_range.0 = lon_range.0.min(record.longitude);
            lon_range.1 = lon_range.1.max(record.longitude);
        }

        DatasetSummary {
            num_entries: self.records.len(),
            lat_range,
            lon_range,
        }
    }
}

/// Non-empty, trimmed field value at an optional column index
fn field<'a>(row: &'a csv::StringRecord, index: Option<usize>) -> Option<&'a str> {
    let value = row.get(index?)?.trim();
    if value.is_empty() { None } else { Some(value) }
}

fn raw_row(row: &csv::StringRecord, width: usize) -> Vec<String> {
    (0..width)
        .map(|i| row.get(i).unwrap_or("").trim().to_owned())
        .collect()
}

fn parse_record(row: &csv::StringRecord, columns: &Columns, row_index: usize) -> Result<CrimeRecord> {
    // Coerce coordinates to numeric; anything unparseable counts as missing.
    let latitude = field(row, Some(columns.latitude)).and_then(|v| v.parse::<f64>().ok());
    let longitude = field(row, Some(columns.longitude)).and_then(|v| v.parse::<f64>().ok());

    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        return Err(DataError::MissingCoordinate(row_index));
    };

    Ok(CrimeRecord {
        latitude,
        longitude,
        category: field(row, Some(columns.category)).unwrap_or("Unknown").to_owned(),
        street_id: field(row, columns.street_id).and_then(|v| v.parse().ok()),
        ward_name: field(row, columns.ward_name).map(str::to_owned),
        easting: field(row, columns.easting).and_then(|v| v.parse().ok()),
        northing: field(row, columns.northing).and_then(|v| v.parse().ok()),
        epoch: field(row, columns.epoch).and_then(|v| v.parse().ok()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Category,Street ID,Ward Name,Easting,Northing,Epoch,Latitude,Longitude
Burglary,901,Holborn,529700,181800,1546300800,51.5,-0.12
Theft,902,Camden Town,529900,182100,1546387200,51.51,-0.13
Robbery,903,Kilburn,,,1546473600,,
";

    fn load(csv: &str) -> Result<Dataset> {
        Dataset::from_reader(csv.as_bytes(), 20)
    }

    #[test]
    fn test_load_valid_rows() {
        let dataset = load(SAMPLE_CSV).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.skipped_rows(), 1);
        assert_eq!(dataset.records()[0].category, "Burglary");
        assert_eq!(dataset.records()[0].street_id, Some(901));
        assert_eq!(dataset.records()[1].ward_name.as_deref(), Some("Camden Town"));
    }

    #[test]
    fn test_headers_preserved_in_file_order() {
        let dataset = load(SAMPLE_CSV).unwrap();
        assert_eq!(dataset.headers()[0], "Category");
        assert_eq!(dataset.headers()[6], "Latitude");
    }

    #[test]
    fn test_preview_holds_raw_strings() {
        let dataset = load(SAMPLE_CSV).unwrap();

        assert_eq!(dataset.preview().len(), 2);
        assert_eq!(dataset.preview()[0][0], "Burglary");
        assert_eq!(dataset.preview()[1][6], "51.51");
    }

    #[test]
    fn test_preview_respects_limit() {
        let dataset = Dataset::from_reader(SAMPLE_CSV.as_bytes(), 1).unwrap();
        assert_eq!(dataset.preview().len(), 1);
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_unparseable_coordinates_are_dropped() {
        let csv = "\
Category,Latitude,Longitude
Burglary,invalid,-0.12
Theft,51.51,-0.13
";
        let dataset = load(csv).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.skipped_rows(), 1);
    }

    #[test]
    fn test_missing_column_fails() {
        let csv = "Category,Latitude\nBurglary,51.5\n";
        let result = load(csv);
        assert!(matches!(result, Err(DataError::MissingColumn(name)) if name == "Longitude"));
    }

    #[test]
    fn test_no_valid_rows_fails() {
        let csv = "Category,Latitude,Longitude\nBurglary,,\n";
        assert!(matches!(load(csv), Err(DataError::EmptyDataset)));
    }

    #[test]
    fn test_summary_ranges() {
        let dataset = load(SAMPLE_CSV).unwrap();
        let summary = dataset.summary();

        assert_eq!(summary.num_entries, 2);
        assert_eq!(summary.lat_range, (51.5, 51.51));
        assert_eq!(summary.lon_range, (-0.13, -0.12));
    }
}
