//! Read/write reduction report JSON files.
//!
//! A report is the portable form of one reduction run: the source table, the
//! compared years and every per-country result. `co2 plot --report` re-renders
//! it without the original CSV.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ReductionResult;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionReport {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub start_year: i32,
    pub end_year: i32,
    pub reductions: Vec<ReductionResult>,
}

impl ReductionReport {
    pub fn new(source: impl Into<String>, start_year: i32, end_year: i32, reductions: Vec<ReductionResult>) -> Self {
        Self {
            tool: "co2".to_string(),
            generated_at: Utc::now(),
            source: source.into(),
            start_year,
            end_year,
            reductions,
        }
    }
}

/// Write a report JSON file.
pub fn write_report_json(path: &Path, report: &ReductionReport) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create report JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::io(format!("Failed to write report JSON: {e}")))?;

    tracing::info!(path = %path.display(), "wrote reduction report");
    Ok(())
}

/// Read a report JSON file.
pub fn read_report_json(path: &Path) -> Result<ReductionReport, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::data_unavailable(format!("Failed to open report JSON '{}': {e}", path.display()))
    })?;
    let report: ReductionReport = serde_json::from_reader(file)
        .map_err(|e| AppError::data_unavailable(format!("Invalid report JSON: {e}")))?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_survives_disk() {
        let path = std::env::temp_dir().join(format!("co2-fitness-{}-report.json", std::process::id()));
        let report = ReductionReport::new(
            "eu_co2_emissions.csv",
            1990,
            2019,
            vec![ReductionResult {
                country: "Sweden".to_string(),
                percentage_reduction: 30.0,
                start_emissions: 50.0,
                end_emissions: 35.0,
            }],
        );

        write_report_json(&path, &report).unwrap();
        let loaded = read_report_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, report);
    }

    #[test]
    fn malformed_report_is_rejected() {
        let path = std::env::temp_dir().join(format!("co2-fitness-{}-bad.json", std::process::id()));
        std::fs::write(&path, "{\"tool\": 1}").unwrap();
        let err = read_report_json(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(err.message().starts_with("Invalid report JSON"));
    }
}
