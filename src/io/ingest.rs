//! CSV ingest and normalization.
//!
//! This module turns a national-emissions CSV into clean `(country, year, emissions)`
//! records that are safe to aggregate.
//!
//! Design goals:
//! - **Fixed column contract**: source columns are mapped onto canonical fields,
//!   and a missing column makes the whole table unavailable (not an empty table)
//! - **Row-level validation**: skip bad rows, but report what happened
//! - **Separation of concerns**: no reduction logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, info, warn};

use crate::domain::{ColumnMapping, EmissionRecord, is_european};
use crate::error::AppError;

/// Canonical column names, accepted when the mapped source name is absent.
const CANONICAL_COUNTRY: &str = "Country Name";
const CANONICAL_YEAR: &str = "Year";
const CANONICAL_EMISSIONS: &str = "Emissions";

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub country: Option<String>,
    pub message: String,
}

/// Ingest output: normalized records + row diagnostics.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Where the records came from (file path or a label for in-memory input).
    pub source: String,
    pub records: Vec<EmissionRecord>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    /// Rows dropped because the country is not on the European allow-list.
    pub rows_filtered: usize,
    pub rows_used: usize,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Column indices resolved against the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    country: usize,
    year: usize,
    emissions: usize,
}

/// Load and normalize an emissions CSV from disk.
///
/// A missing or unreadable file, or a header without the required columns, is
/// reported as `DataUnavailable`. A readable file with no usable rows is an
/// `Ok` dataset with no records.
pub fn load_emissions(path: &Path, columns: &ColumnMapping) -> Result<Dataset, AppError> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            AppError::data_unavailable(format!(
                "Data file not found: '{}'. Download the CO2 emissions by country CSV from \
                 https://www.kaggle.com/datasets/ulrikthygepedersen/co2-emissions-by-country \
                 and save it under that name.",
                path.display()
            ))
        } else {
            AppError::data_unavailable(format!("Failed to open CSV '{}': {e}", path.display()))
        }
    })?;

    read_emissions(file, columns, &path.display().to_string())
}

/// Normalize emissions CSV content from any reader.
pub fn read_emissions<R: Read>(reader: R, columns: &ColumnMapping, source: &str) -> Result<Dataset, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::data_unavailable(format!("Failed to read CSV headers from '{source}': {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    let index = resolve_columns(&header_map, columns).ok_or_else(|| {
        AppError::data_unavailable(format!(
            "Dataset column mismatch: '{source}' does not contain the expected columns `{}`, `{}` and `{}`.",
            columns.country, columns.year, columns.value
        ))
    })?;
    debug!(?index, source, "resolved emission columns");

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_filtered = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // Fallback when the reader has no position: header is line 1.
        let fallback_line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                let line = e.position().map_or(fallback_line, |p| p.line() as usize);
                row_errors.push(RowError {
                    line,
                    country: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        // Quoted fields may span lines, so ask the reader where the record starts.
        let line = record.position().map_or(fallback_line, |p| p.line() as usize);
        let country = field(&record, index.country).unwrap_or("");
        if !is_european(country) {
            rows_filtered += 1;
            continue;
        }

        match parse_row(&record, index, country) {
            Ok(r) => records.push(r),
            Err(message) => row_errors.push(RowError {
                line,
                country: Some(country.to_string()),
                message,
            }),
        }
    }

    let rows_used = records.len();
    if !row_errors.is_empty() {
        warn!(source, skipped = row_errors.len(), "skipped malformed emission rows");
    }
    info!(source, rows_read, rows_used, rows_filtered, "loaded emissions table");

    Ok(Dataset {
        source: source.to_string(),
        records,
        row_errors,
        rows_read,
        rows_filtered,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // First occurrence wins for duplicated headers.
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, the column lookup fails.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn resolve_columns(header_map: &HashMap<String, usize>, columns: &ColumnMapping) -> Option<ColumnIndex> {
    let lookup = |mapped: &str, canonical: &str| {
        header_map
            .get(&normalize_header_name(mapped))
            .or_else(|| header_map.get(&normalize_header_name(canonical)))
            .copied()
    };

    Some(ColumnIndex {
        country: lookup(&columns.country, CANONICAL_COUNTRY)?,
        year: lookup(&columns.year, CANONICAL_YEAR)?,
        emissions: lookup(&columns.value, CANONICAL_EMISSIONS)?,
    })
}

fn parse_row(record: &StringRecord, index: ColumnIndex, country: &str) -> Result<EmissionRecord, String> {
    let year = field(record, index.year)
        .and_then(parse_year)
        .ok_or_else(|| "Missing/invalid year.".to_string())?;

    let emissions = field(record, index.emissions)
        .and_then(parse_f64)
        .ok_or_else(|| "Missing/invalid emission value.".to_string())?;

    if emissions < 0.0 {
        return Err(format!("Negative emission value {emissions}."));
    }

    Ok(EmissionRecord::new(country, year, emissions))
}

fn field(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_year(s: &str) -> Option<i32> {
    if let Ok(y) = s.parse::<i32>() {
        return Some(y);
    }
    // Spreadsheet exports sometimes write years as floats ("2005.0").
    let v = parse_f64(s)?;
    if v.abs() > i32::MAX as f64 {
        return None;
    }
    Some(v.trunc() as i32)
}

fn parse_f64(s: &str) -> Option<f64> {
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn read(csv: &str) -> Result<Dataset, AppError> {
        read_emissions(csv.as_bytes(), &ColumnMapping::default(), "test")
    }

    #[test]
    fn reads_kaggle_layout() {
        let ds = read(
            "country_code,country_name,year,value\n\
             DEU,Germany,1990,1000.5\n\
             DEU,Germany,2019,700\n\
             FRA, France ,1990,400\n",
        )
        .unwrap();

        assert_eq!(ds.rows_read, 3);
        assert_eq!(ds.rows_used, 3);
        assert_eq!(ds.records[0], EmissionRecord::new("Germany", 1990, 1000.5));
        assert_eq!(ds.records[2].country, "France");
        assert!(ds.row_errors.is_empty());
    }

    #[test]
    fn drops_countries_outside_allow_list() {
        let ds = read(
            "country_name,year,value\n\
             Germany,1990,10\n\
             Canada,1990,10\n\
             World,1990,99\n",
        )
        .unwrap();
        assert_eq!(ds.rows_used, 1);
        assert_eq!(ds.rows_filtered, 2);
    }

    #[test]
    fn bad_rows_become_row_errors() {
        let ds = read(
            "country_name,year,value\n\
             Germany,abc,10\n\
             Germany,1990,\n\
             Germany,1991,-5\n\
             Germany,1992,n/a\n\
             Germany,1993,12\n",
        )
        .unwrap();
        assert_eq!(ds.rows_used, 1);
        assert_eq!(ds.row_errors.len(), 4);
        assert_eq!(ds.row_errors[0].line, 2);
        assert_eq!(ds.row_errors[0].country.as_deref(), Some("Germany"));
    }

    #[test]
    fn row_error_lines_follow_multiline_fields() {
        let ds = read(
            "country_name,year,value,note\n\
             Germany,1990,1,\"first\nsecond\"\n\
             Germany,abc,2,x\n",
        )
        .unwrap();
        assert_eq!(ds.rows_used, 1);
        assert_eq!(ds.row_errors.len(), 1);
        assert_eq!(ds.row_errors[0].line, 4);
    }

    #[test]
    fn float_years_are_truncated() {
        let ds = read("country_name,year,value\nSpain,2005.0,3\n").unwrap();
        assert_eq!(ds.records[0].year, 2005);
    }

    #[test]
    fn header_only_file_is_empty_but_present() {
        let ds = read("country_name,year,value\n").unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.rows_read, 0);
    }

    #[test]
    fn missing_column_is_unavailable() {
        let err = read("country_name,year,amount\nGermany,1990,1\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataUnavailable);
        assert!(err.message().contains("column mismatch"));
    }

    #[test]
    fn canonical_headers_and_bom_are_accepted() {
        let ds = read("\u{feff}Country Name,YEAR,Emissions\nItaly,2000,5\n").unwrap();
        assert_eq!(ds.records, vec![EmissionRecord::new("Italy", 2000, 5.0)]);
    }

    #[test]
    fn custom_mapping() {
        let columns = ColumnMapping {
            country: "geo".to_string(),
            year: "time".to_string(),
            value: "values".to_string(),
        };
        let ds = read_emissions("geo,time,values\nMalta,2010,2.5\n".as_bytes(), &columns, "eurostat").unwrap();
        assert_eq!(ds.records, vec![EmissionRecord::new("Malta", 2010, 2.5)]);
        assert_eq!(ds.source, "eurostat");
    }

    #[test]
    fn missing_file_is_unavailable() {
        let path = std::env::temp_dir().join("co2-fitness-definitely-missing.csv");
        let err = load_emissions(&path, &ColumnMapping::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataUnavailable);
        assert!(err.message().contains("not found"));
    }
}
