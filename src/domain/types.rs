//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the fitness check and the reduction calculation
//! - exported to CSV/JSON
//! - rendered by the CLI and the TUI without conversion

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// File name the dashboard looks for when no path is configured.
pub const DEFAULT_DATA_FILE: &str = "eu_co2_emissions.csv";

/// Number of countries in the "top reducers" snapshot.
pub const SNAPSHOT_TOP_N: usize = 5;

/// Number of countries in the reduction bar chart.
pub const BAR_CHART_TOP_N: usize = 15;

/// Vehicle category with a fixed emission threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VehicleCategory {
    Car,
    Truck,
    Motorcycle,
}

impl VehicleCategory {
    pub const ALL: [VehicleCategory; 3] = [
        VehicleCategory::Car,
        VehicleCategory::Truck,
        VehicleCategory::Motorcycle,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            VehicleCategory::Car => "Car",
            VehicleCategory::Truck => "Truck",
            VehicleCategory::Motorcycle => "Motorcycle",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&c| c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&c| c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl VehicleCategory {
    /// Exact, case-sensitive match on the display name (`"Car"`, `"Truck"`, `"Motorcycle"`).
    pub fn from_exact_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.display_name() == name)
    }
}

/// Lenient parse for user input; library lookups go through
/// [`VehicleCategory::from_exact_name`].
impl FromStr for VehicleCategory {
    type Err = AppError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.display_name().eq_ignore_ascii_case(name))
            .ok_or_else(|| AppError::invalid_category(name))
    }
}

/// Outcome of comparing one vehicle against its category threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessVerdict {
    pub category: VehicleCategory,
    /// Emission value that was checked (g/km).
    pub value: f64,
    /// Category limit (g/km).
    pub threshold: f64,
    pub is_fit: bool,
}

/// One row of the national emissions table, after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionRecord {
    pub country: String,
    pub year: i32,
    /// Emission value in the unit of the source file (kt for the Kaggle dataset).
    pub emissions: f64,
}

impl EmissionRecord {
    pub fn new(country: impl Into<String>, year: i32, emissions: f64) -> Self {
        Self {
            country: country.into(),
            year,
            emissions,
        }
    }
}

/// Percentage reduction for one country between two years.
///
/// Positive values mean emissions went down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionResult {
    pub country: String,
    pub percentage_reduction: f64,
    /// Aggregated start-year total the percentage is relative to.
    pub start_emissions: f64,
    pub end_emissions: f64,
}

/// Source column names mapped onto the canonical `(country, year, emissions)` fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub country: String,
    pub year: String,
    pub value: String,
}

impl Default for ColumnMapping {
    /// Column names of the Kaggle `co2_emissions_kt_by_country.csv` export.
    fn default() -> Self {
        Self {
            country: "country_name".to_string(),
            year: "year".to_string(),
            value: "value".to_string(),
        }
    }
}

/// Resolved configuration for a reduction run (CLI flags + environment).
#[derive(Debug, Clone)]
pub struct ReduceConfig {
    pub data_path: PathBuf,
    pub columns: ColumnMapping,
    /// `None` means "first year in the dataset".
    pub start_year: Option<i32>,
    /// `None` means "last year in the dataset".
    pub end_year: Option<i32>,
    pub top_n: usize,
    pub plot: bool,
    pub plot_width: usize,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

impl ReduceConfig {
    pub fn for_path(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            columns: ColumnMapping::default(),
            start_year: None,
            end_year: None,
            top_n: BAR_CHART_TOP_N,
            plot: true,
            plot_width: 60,
            export_csv: None,
            export_json: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!("car".parse::<VehicleCategory>().unwrap(), VehicleCategory::Car);
        assert_eq!(" TRUCK ".parse::<VehicleCategory>().unwrap(), VehicleCategory::Truck);
        assert_eq!(
            "Motorcycle".parse::<VehicleCategory>().unwrap(),
            VehicleCategory::Motorcycle
        );
    }

    #[test]
    fn exact_name_lookup_is_case_sensitive() {
        assert_eq!(VehicleCategory::from_exact_name("Truck"), Some(VehicleCategory::Truck));
        assert_eq!(VehicleCategory::from_exact_name("truck"), None);
        assert_eq!(VehicleCategory::from_exact_name(" Car"), None);
    }

    #[test]
    fn category_parse_rejects_unknown() {
        let err = "Spaceship".parse::<VehicleCategory>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCategory);
    }

    #[test]
    fn category_cycles_both_ways() {
        for c in VehicleCategory::ALL {
            assert_eq!(c.next().prev(), c);
        }
        assert_eq!(VehicleCategory::Motorcycle.next(), VehicleCategory::Car);
        assert_eq!(VehicleCategory::Car.prev(), VehicleCategory::Motorcycle);
    }
}
