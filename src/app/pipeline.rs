//! Shared "reduction pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! cached CSV load -> year selection -> reduction -> ranking
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use tracing::info;

use crate::domain::{ColumnMapping, ReduceConfig, ReductionResult, SNAPSHOT_TOP_N};
use crate::error::{AppError, ErrorKind};
use crate::io::{Dataset, DatasetCache};
use crate::reduction::{
    available_years, calculate_reduction, default_year_range, rank_top_reducers, validate_year_range,
};

/// All computed outputs of a single reduction run.
#[derive(Debug, Clone)]
pub struct ReductionRun {
    pub source: String,
    /// Distinct years in the dataset, ascending.
    pub years: Vec<i32>,
    pub start_year: i32,
    pub end_year: i32,
    /// Every country with a defined reduction.
    pub reductions: Vec<ReductionResult>,
    /// Top-N of `reductions`, largest reduction first.
    pub ranked: Vec<ReductionResult>,
}

/// What the "EU Emissions Snapshot" panel should show.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    Ready {
        start_year: i32,
        end_year: i32,
        top: Vec<ReductionResult>,
    },
    /// The table is missing or unusable; the message tells the user how to add it.
    Unavailable(String),
    /// Present, but with fewer than two distinct years.
    NotEnoughYears,
    /// No country has data for both years.
    NoOverlap { start_year: i32, end_year: i32 },
}

/// Load (through the cache) and run the reduction for `config`.
pub fn run_reduction(cache: &mut DatasetCache, config: &ReduceConfig) -> Result<ReductionRun, AppError> {
    let dataset = cache.get_or_load(&config.data_path, &config.columns)?;
    run_reduction_on(dataset, config.start_year, config.end_year, config.top_n)
}

/// Run the reduction over an already-loaded dataset.
///
/// Missing years default to the first/last year of the dataset. Explicit years
/// must exist in the dataset and be in increasing order.
pub fn run_reduction_on(
    dataset: &Dataset,
    start_year: Option<i32>,
    end_year: Option<i32>,
    top_n: usize,
) -> Result<ReductionRun, AppError> {
    let years = available_years(&dataset.records);
    let (start_year, end_year) = resolve_years(&years, start_year, end_year)?;

    let reductions = calculate_reduction(&dataset.records, start_year, end_year);
    let ranked = rank_top_reducers(&reductions, top_n);

    if reductions.is_empty() {
        info!(start_year, end_year, "no country has data for both years");
    } else {
        info!(start_year, end_year, countries = reductions.len(), "computed reductions");
    }

    Ok(ReductionRun {
        source: dataset.source.clone(),
        years,
        start_year,
        end_year,
        reductions,
        ranked,
    })
}

/// Top reducers between the first and last year of the table.
///
/// Never fails: every problem maps to a neutral panel state.
pub fn snapshot(cache: &mut DatasetCache, config: &ReduceConfig) -> Snapshot {
    let dataset = match cache.get_or_load(&config.data_path, &config.columns) {
        Ok(dataset) => dataset,
        Err(err) => return Snapshot::Unavailable(err.message().to_string()),
    };
    snapshot_of(dataset)
}

pub fn snapshot_of(dataset: &Dataset) -> Snapshot {
    if dataset.is_empty() {
        return Snapshot::Unavailable(format!(
            "'{}' has no usable European rows. Add the emissions CSV to see reduction leaders.",
            dataset.source
        ));
    }

    let years = available_years(&dataset.records);
    let Some((start_year, end_year)) = default_year_range(&years) else {
        return Snapshot::NotEnoughYears;
    };

    let reductions = calculate_reduction(&dataset.records, start_year, end_year);
    if reductions.is_empty() {
        return Snapshot::NoOverlap { start_year, end_year };
    }

    Snapshot::Ready {
        start_year,
        end_year,
        top: rank_top_reducers(&reductions, SNAPSHOT_TOP_N),
    }
}

/// Default config pointing the snapshot/TUI at `path`.
pub fn data_config(path: impl Into<std::path::PathBuf>, columns: ColumnMapping) -> ReduceConfig {
    let mut config = ReduceConfig::for_path(path);
    config.columns = columns;
    config
}

/// `true` when the error should be shown as an empty "add data" state.
pub fn is_missing_data(err: &AppError) -> bool {
    err.kind() == ErrorKind::DataUnavailable
}

fn resolve_years(years: &[i32], start: Option<i32>, end: Option<i32>) -> Result<(i32, i32), AppError> {
    let (start, end) = match (start, end, default_year_range(years)) {
        (Some(s), Some(e), _) => (s, e),
        (s, e, Some((first, last))) => (s.unwrap_or(first), e.unwrap_or(last)),
        (_, _, None) => {
            return Err(AppError::usage(
                "The dataset needs at least two different years of data to compare.",
            ));
        }
    };

    validate_year_range(start, end)?;

    for year in [start, end] {
        if !years.contains(&year) {
            let range = match (years.first(), years.last()) {
                (Some(first), Some(last)) => format!("{first}–{last}"),
                _ => "none".to_string(),
            };
            return Err(AppError::usage(format!(
                "Year {year} is not present in the dataset (available: {range})."
            )));
        }
    }

    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmissionRecord;

    fn dataset(records: Vec<EmissionRecord>) -> Dataset {
        let n = records.len();
        Dataset {
            source: "test.csv".to_string(),
            records,
            row_errors: Vec::new(),
            rows_read: n,
            rows_filtered: 0,
            rows_used: n,
        }
    }

    fn sample() -> Dataset {
        dataset(vec![
            EmissionRecord::new("Germany", 1990, 1000.0),
            EmissionRecord::new("Germany", 2000, 900.0),
            EmissionRecord::new("Germany", 2019, 700.0),
            EmissionRecord::new("France", 1990, 400.0),
            EmissionRecord::new("France", 2019, 300.0),
            EmissionRecord::new("Malta", 2000, 2.0),
            EmissionRecord::new("Malta", 2019, 1.0),
        ])
    }

    #[test]
    fn defaults_to_first_and_last_year() {
        let run = run_reduction_on(&sample(), None, None, 15).unwrap();
        assert_eq!((run.start_year, run.end_year), (1990, 2019));
        assert_eq!(run.years, vec![1990, 2000, 2019]);
        assert_eq!(run.reductions.len(), 2);
        assert_eq!(run.ranked[0].country, "Germany");
        assert_eq!(run.ranked[0].percentage_reduction, 30.0);
    }

    #[test]
    fn explicit_years_and_top_n() {
        let run = run_reduction_on(&sample(), Some(2000), None, 1).unwrap();
        assert_eq!((run.start_year, run.end_year), (2000, 2019));
        assert_eq!(run.reductions.len(), 2);
        assert_eq!(run.ranked.len(), 1);
        assert_eq!(run.ranked[0].country, "Malta");
    }

    #[test]
    fn rejects_reversed_or_unknown_years() {
        let err = run_reduction_on(&sample(), Some(2019), Some(1990), 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);

        let err = run_reduction_on(&sample(), Some(1995), Some(2019), 5).unwrap_err();
        assert!(err.message().contains("1995"));
    }

    #[test]
    fn single_year_dataset_cannot_default() {
        let ds = dataset(vec![EmissionRecord::new("Spain", 2000, 1.0)]);
        let err = run_reduction_on(&ds, None, None, 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert_eq!(snapshot_of(&ds), Snapshot::NotEnoughYears);
    }

    #[test]
    fn snapshot_states() {
        match snapshot_of(&sample()) {
            Snapshot::Ready { start_year, end_year, top } => {
                assert_eq!((start_year, end_year), (1990, 2019));
                assert_eq!(top.len(), 2);
                assert_eq!(top[0].country, "Germany");
            }
            other => panic!("unexpected snapshot: {other:?}"),
        }

        assert!(matches!(snapshot_of(&dataset(Vec::new())), Snapshot::Unavailable(_)));

        let disjoint = dataset(vec![
            EmissionRecord::new("Spain", 2000, 1.0),
            EmissionRecord::new("Italy", 2010, 1.0),
        ]);
        assert_eq!(
            snapshot_of(&disjoint),
            Snapshot::NoOverlap { start_year: 2000, end_year: 2010 }
        );
    }

    #[test]
    fn missing_file_snapshot_is_unavailable() {
        let path = std::env::temp_dir().join("co2-fitness-no-such-dataset.csv");
        let mut cache = DatasetCache::new();
        let config = data_config(path.clone(), ColumnMapping::default());

        assert!(matches!(snapshot(&mut cache, &config), Snapshot::Unavailable(_)));
        let err = run_reduction(&mut cache, &config).unwrap_err();
        assert!(is_missing_data(&err));
        assert_eq!(cache.loads(), 1);
    }
}
