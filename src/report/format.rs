//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the fitness/reduction code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::{FitnessVerdict, ReductionResult};
use crate::fitness::Methodology;
use crate::io::ingest::Dataset;

pub const TITLE: &str = "EU Vehicle Carbon Fitness Assessor";

/// Intro shown above the fitness check.
pub fn format_header() -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {TITLE} ===\n"));
    out.push_str("Assess whether a vehicle is 'fit for the road' against simplified EU\n");
    out.push_str("carbon emission standards. Pick a vehicle type, enter its CO2 emissions\n");
    out.push_str("in g/km, and see how it compares.\n");
    out
}

pub fn format_verdict(verdict: &FitnessVerdict) -> String {
    let (headline, relation, closing) = if verdict.is_fit {
        (
            "Result: FIT FOR THE ROAD",
            "at or below",
            "This vehicle meets the target emission levels.",
        )
    } else {
        (
            "Result: NOT FIT FOR THE ROAD",
            "above",
            "This vehicle exceeds the target emission levels.",
        )
    };

    format!(
        "{headline}\nYour {} (at {} g/km) is {relation} the simplified EU standard of {} g/km.\n{closing}\n",
        verdict.category,
        fmt_g_km(verdict.value),
        fmt_g_km(verdict.threshold),
    )
}

pub fn format_methodology(m: &Methodology) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", m.heading));
    out.push_str(&format!("- Primary metric: {}\n", m.metric));
    out.push_str(&format!("- EU methodology: {}\n", m.procedure));
    out.push_str(&format!("- How it works: {}\n", m.details));
    if let Some(note) = m.note {
        out.push_str(&format!("- Note: {note}\n"));
    }
    out
}

/// Top-N list shown in the "EU Emissions Snapshot".
pub fn format_snapshot(top: &[ReductionResult], start_year: i32, end_year: i32) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Top {} Reducers (change from {start_year} to {end_year})\n",
        top.len()
    ));
    for (i, r) in top.iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. {}: {:.1}% reduction\n",
            i + 1,
            r.country,
            r.percentage_reduction
        ));
    }
    out
}

/// Dataset diagnostics + compared years.
pub fn format_run_summary(dataset: &Dataset, start_year: i32, end_year: i32, n_results: usize) -> String {
    let mut out = String::new();
    out.push_str("=== co2 - Emission Reduction ===\n");
    out.push_str(&format!("Source: {}\n", dataset.source));
    out.push_str(&format!(
        "Rows: read={} | used={} | non-European={} | skipped={}\n",
        dataset.rows_read,
        dataset.rows_used,
        dataset.rows_filtered,
        dataset.row_errors.len()
    ));
    for e in dataset.row_errors.iter().take(5) {
        out.push_str(&format!(
            "  line {}{}: {}\n",
            e.line,
            e.country.as_deref().map(|c| format!(" ({c})")).unwrap_or_default(),
            e.message
        ));
    }
    if dataset.row_errors.len() > 5 {
        out.push_str(&format!("  ... {} more\n", dataset.row_errors.len() - 5));
    }
    out.push_str(&format!("Years: {start_year} → {end_year} | countries compared: {n_results}\n"));
    out
}

/// Ranked reduction table.
pub fn format_reduction_table(rows: &[ReductionResult]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>4} {:<24} {:>14} {:>14} {:>12}\n",
            "#", "country", "start", "end", "reduction"
        )
        .trim_end(),
    );
    out.push('\n');

    out.push_str(format!("{:->4} {:-<24} {:->14} {:->14} {:->12}\n", "", "", "", "", "").trim_end());
    out.push('\n');

    for (i, r) in rows.iter().enumerate() {
        out.push_str(
            format!(
                "{:>4} {:<24} {:>14.1} {:>14.1} {:>11.1}%\n",
                i + 1,
                truncate(&r.country, 24),
                r.start_emissions,
                r.end_emissions,
                r.percentage_reduction,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

pub fn format_disclaimer() -> String {
    let mut out = String::new();
    out.push_str("Disclaimer: this is a demonstration tool. The emission standards used are\n");
    out.push_str("simplified figures based on EU regulations (e.g. Euro 5/6, EU 2019/631).\n");
    out.push_str("Thresholds follow data published by the European Environment Agency (EEA)\n");
    out.push_str("and EU legislation.\n");
    out
}

/// Whole numbers without decimals, everything else with two.
fn fmt_g_km(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VehicleCategory;
    use crate::fitness::{check_fitness, methodology};

    fn result(country: &str, pct: f64) -> ReductionResult {
        ReductionResult {
            country: country.to_string(),
            percentage_reduction: pct,
            start_emissions: 100.0,
            end_emissions: 100.0 - pct,
        }
    }

    #[test]
    fn verdict_text() {
        let fit = format_verdict(&check_fitness(VehicleCategory::Car, 95.0));
        assert_eq!(
            fit,
            "Result: FIT FOR THE ROAD\n\
             Your Car (at 95 g/km) is at or below the simplified EU standard of 95 g/km.\n\
             This vehicle meets the target emission levels.\n"
        );

        let unfit = format_verdict(&check_fitness(VehicleCategory::Truck, 812.25));
        assert!(unfit.starts_with("Result: NOT FIT FOR THE ROAD\n"));
        assert!(unfit.contains("(at 812.25 g/km) is above"));
    }

    #[test]
    fn snapshot_lists_in_order() {
        let txt = format_snapshot(&[result("Sweden", 31.04), result("Malta", 12.0)], 1990, 2019);
        assert_eq!(
            txt,
            "Top 2 Reducers (change from 1990 to 2019)\n 1. Sweden: 31.0% reduction\n 2. Malta: 12.0% reduction\n"
        );
    }

    #[test]
    fn table_has_header_and_rows() {
        let txt = format_reduction_table(&[result("United Kingdom", 40.0)]);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("reduction"));
        assert!(lines[2].contains("United Kingdom"));
        assert!(lines[2].ends_with("40.0%"));
    }

    #[test]
    fn methodology_includes_note() {
        let txt = format_methodology(&methodology(VehicleCategory::Truck));
        assert!(txt.starts_with("Truck (Heavy-Duty Vehicle - HDV)\n"));
        assert!(txt.contains("- Note: "));
    }

    #[test]
    fn truncate_long_names() {
        assert_eq!(truncate("Bosnia and Herzegovina", 10), "Bosnia an.");
        assert_eq!(truncate("Malta", 10), "Malta");
    }
}
