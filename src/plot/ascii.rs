//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-width text), optimized for:
//! - quick visual checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot kinds:
//! - bar chart of the top reducers: `#` bars, `|` zero axis when some values are negative
//! - map-style listing: every country with its diverging band glyph

use crate::domain::ReductionResult;
use crate::plot::scale::ReductionBand;

const MAX_LABEL: usize = 24;

/// Horizontal bar chart, one row per result, in the given order.
pub fn render_bar_chart(rows: &[ReductionResult], width: usize) -> String {
    let width = width.max(10);
    let mut out = String::new();
    out.push_str(&format!("Top {} countries by emission reduction (%)\n", rows.len()));
    if rows.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }

    let (v_min, v_max) = value_range(rows);
    let has_negative = v_min < 0.0;
    let zero_col = map_col(0.0, v_min, v_max, width);
    let label_w = rows
        .iter()
        .map(|r| r.country.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_LABEL);

    for r in rows {
        let pos = map_col(r.percentage_reduction, v_min, v_max, width);
        let (lo, hi) = if pos >= zero_col { (zero_col, pos) } else { (pos, zero_col) };

        let cells: String = (0..width)
            .map(|col| {
                if col >= lo && col < hi {
                    '#'
                } else if has_negative && col == zero_col {
                    '|'
                } else {
                    ' '
                }
            })
            .collect();

        out.push_str(&format!(
            "{:<label_w$} {cells} {:>6.1}%\n",
            clip(&r.country, label_w),
            r.percentage_reduction
        ));
    }

    out
}

/// Map-style listing in alphabetical order with a band glyph per country.
pub fn render_reduction_map(rows: &[ReductionResult], start_year: i32, end_year: i32) -> String {
    let mut sorted: Vec<&ReductionResult> = rows.iter().collect();
    sorted.sort_by(|a, b| a.country.cmp(&b.country));

    let label_w = MAX_LABEL;
    let mut out = String::new();
    out.push_str(&format!("CO2 emission reduction ({start_year} vs {end_year})\n"));
    for r in sorted {
        let band = ReductionBand::classify(r.percentage_reduction);
        out.push_str(&format!(
            "{} {:<label_w$} {:>7.1}%\n",
            band.glyph(),
            clip(&r.country, label_w),
            r.percentage_reduction
        ));
    }

    let legend: Vec<String> = ReductionBand::ALL
        .iter()
        .map(|b| format!("{} {}", b.glyph().trim_end(), b.label()))
        .collect();
    out.push_str(&format!("Legend: {}\n", legend.join(" | ")));
    out
}

fn value_range(rows: &[ReductionResult]) -> (f64, f64) {
    let mut min = 0.0_f64;
    let mut max = 0.0_f64;
    for r in rows {
        min = min.min(r.percentage_reduction);
        max = max.max(r.percentage_reduction);
    }
    if max - min < 1e-12 {
        max = min + 1.0;
    }
    (min, max)
}

fn map_col(v: f64, v_min: f64, v_max: f64, width: usize) -> usize {
    let u = ((v - v_min) / (v_max - v_min)).clamp(0.0, 1.0);
    (u * width as f64).round() as usize
}

fn clip(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
