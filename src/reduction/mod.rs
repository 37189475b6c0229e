//! Emissions reduction between two reference years.
//!
//! Everything here is a pure function over in-memory records: no I/O, no
//! caching, no hidden state. Re-running on the same inputs yields the same output.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{EmissionRecord, ReductionResult};
use crate::error::AppError;

/// Sum emissions per `(country, year)`.
///
/// Datasets may carry several rows for the same country-year (e.g. split by sector).
pub fn aggregate_by_country_year(records: &[EmissionRecord]) -> BTreeMap<(String, i32), f64> {
    let mut totals: BTreeMap<(String, i32), f64> = BTreeMap::new();
    for r in records {
        *totals.entry((r.country.clone(), r.year)).or_insert(0.0) += r.emissions;
    }
    totals
}

/// Percentage reduction `(start - end) / start * 100` for every country present
/// in both years.
///
/// Countries missing either year are skipped, and so are countries whose result
/// is not finite (zero start-year total). Output is ordered by country name, but
/// callers should not rely on any particular order.
pub fn calculate_reduction(records: &[EmissionRecord], start_year: i32, end_year: i32) -> Vec<ReductionResult> {
    let totals = aggregate_by_country_year(records);
    let countries: BTreeSet<&str> = totals.keys().map(|(c, _)| c.as_str()).collect();

    let mut out = Vec::new();
    for country in countries {
        let Some(&start) = totals.get(&(country.to_string(), start_year)) else {
            continue;
        };
        let Some(&end) = totals.get(&(country.to_string(), end_year)) else {
            continue;
        };

        let pct = (start - end) / start * 100.0;
        if !pct.is_finite() {
            continue;
        }

        out.push(ReductionResult {
            country: country.to_string(),
            percentage_reduction: pct,
            start_emissions: start,
            end_emissions: end,
        });
    }
    out
}

/// Sort by reduction (largest first) and keep the first `top_n`.
///
/// Equal percentages keep their input order.
pub fn rank_top_reducers(results: &[ReductionResult], top_n: usize) -> Vec<ReductionResult> {
    let mut sorted = results.to_vec();
    sorted.sort_by(|a, b| {
        b.percentage_reduction
            .partial_cmp(&a.percentage_reduction)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.truncate(top_n);
    sorted
}

/// Distinct years present in `records`, ascending.
pub fn available_years(records: &[EmissionRecord]) -> Vec<i32> {
    let years: BTreeSet<i32> = records.iter().map(|r| r.year).collect();
    years.into_iter().collect()
}

/// First and last year, or `None` when there is nothing to compare.
pub fn default_year_range(years: &[i32]) -> Option<(i32, i32)> {
    match (years.first(), years.last()) {
        (Some(&first), Some(&last)) if years.len() >= 2 && first < last => Some((first, last)),
        _ => None,
    }
}

/// Interactive callers require the start year to come strictly before the end year.
pub fn validate_year_range(start_year: i32, end_year: i32) -> Result<(), AppError> {
    if start_year >= end_year {
        return Err(AppError::usage(format!(
            "Start year must be before end year (got {start_year} → {end_year})."
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn rec(country: &str, year: i32, emissions: f64) -> EmissionRecord {
        EmissionRecord::new(country, year, emissions)
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(calculate_reduction(&[], 2000, 2010).is_empty());
        assert!(calculate_reduction(&[], 2010, 2010).is_empty());
    }

    #[test]
    fn zero_start_is_excluded() {
        let records = vec![
            rec("A", 2000, 100.0),
            rec("A", 2010, 50.0),
            rec("B", 2000, 0.0),
            rec("B", 2010, 10.0),
        ];
        let out = calculate_reduction(&records, 2000, 2010);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].country, "A");
        assert_eq!(out[0].percentage_reduction, 50.0);
    }

    #[test]
    fn missing_start_year_is_excluded() {
        let records = vec![rec("A", 2000, 100.0), rec("A", 2010, 80.0), rec("C", 2010, 30.0)];
        let out = calculate_reduction(&records, 2000, 2010);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].country, "A");
    }

    #[test]
    fn missing_end_year_is_excluded() {
        let records = vec![rec("A", 2000, 100.0), rec("D", 2000, 30.0), rec("A", 2010, 80.0)];
        let out = calculate_reduction(&records, 2000, 2010);
        assert_eq!(out.iter().map(|r| r.country.as_str()).collect::<Vec<_>>(), vec!["A"]);
    }

    #[test]
    fn rows_for_same_country_year_are_summed() {
        let records = vec![rec("A", 2000, 40.0), rec("A", 2000, 60.0), rec("A", 2010, 25.0)];
        let totals = aggregate_by_country_year(&records);
        assert_eq!(totals[&("A".to_string(), 2000)], 100.0);

        let out = calculate_reduction(&records, 2000, 2010);
        assert_eq!(out[0].start_emissions, 100.0);
        assert_eq!(out[0].percentage_reduction, 75.0);
    }

    #[test]
    fn increase_is_negative_reduction() {
        let records = vec![rec("A", 2000, 100.0), rec("A", 2010, 150.0)];
        let out = calculate_reduction(&records, 2000, 2010);
        assert_eq!(out[0].percentage_reduction, -50.0);
    }

    #[test]
    fn same_start_and_end_year_is_zero() {
        let records = vec![rec("A", 2000, 100.0), rec("B", 2000, 7.0), rec("Z", 2000, 0.0)];
        let out = calculate_reduction(&records, 2000, 2000);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.percentage_reduction == 0.0));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let records = vec![
            rec("B", 1990, 10.0),
            rec("A", 1990, 20.0),
            rec("B", 2020, 5.0),
            rec("A", 2020, 25.0),
        ];
        let first = calculate_reduction(&records, 1990, 2020);
        let second = calculate_reduction(&records, 1990, 2020);
        assert_eq!(first, second);
    }

    #[test]
    fn ranking_sorts_descending_and_truncates() {
        let records = vec![
            rec("A", 2000, 100.0),
            rec("A", 2010, 90.0),
            rec("B", 2000, 100.0),
            rec("B", 2010, 40.0),
            rec("C", 2000, 100.0),
            rec("C", 2010, 120.0),
        ];
        let results = calculate_reduction(&records, 2000, 2010);
        let top = rank_top_reducers(&results, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].country, "B");
        assert_eq!(top[1].country, "A");

        assert_eq!(rank_top_reducers(&results, 10).len(), 3);
        assert!(rank_top_reducers(&results, 0).is_empty());
    }

    #[test]
    fn year_helpers() {
        let records = vec![rec("A", 2010, 1.0), rec("A", 1990, 1.0), rec("B", 2010, 1.0)];
        let years = available_years(&records);
        assert_eq!(years, vec![1990, 2010]);
        assert_eq!(default_year_range(&years), Some((1990, 2010)));
        assert_eq!(default_year_range(&[2000]), None);
        assert_eq!(default_year_range(&[]), None);
    }

    #[test]
    fn year_range_validation() {
        assert!(validate_year_range(1990, 2000).is_ok());
        assert_eq!(validate_year_range(2000, 2000).unwrap_err().kind(), ErrorKind::Usage);
        assert_eq!(validate_year_range(2010, 2000).unwrap_err().kind(), ErrorKind::Usage);
    }
}
