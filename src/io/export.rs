//! Export per-country reduction results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::path::Path;

use serde::Serialize;

use crate::domain::ReductionResult;
use crate::error::AppError;

const EXPORT_HEADER: [&str; 6] = [
    "country",
    "start_year",
    "end_year",
    "start_emissions",
    "end_emissions",
    "percentage_reduction",
];

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    country: &'a str,
    start_year: i32,
    end_year: i32,
    start_emissions: f64,
    end_emissions: f64,
    percentage_reduction: f64,
}

/// Write reduction results to a CSV file, one row per country.
pub fn write_reductions_csv(
    path: &Path,
    results: &[ReductionResult],
    start_year: i32,
    end_year: i32,
) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::io(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    // `serialize` only emits the header alongside the first row.
    if results.is_empty() {
        writer
            .write_record(EXPORT_HEADER)
            .map_err(|e| AppError::io(format!("Failed to write export CSV header: {e}")))?;
    }

    for r in results {
        writer
            .serialize(ExportRow {
                country: &r.country,
                start_year,
                end_year,
                start_emissions: r.start_emissions,
                end_emissions: r.end_emissions,
                percentage_reduction: r.percentage_reduction,
            })
            .map_err(|e| AppError::io(format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to flush export CSV '{}': {e}", path.display())))?;

    tracing::info!(path = %path.display(), rows = results.len(), "wrote reduction CSV");
    Ok(())
}
