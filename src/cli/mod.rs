//! Command-line parsing for the carbon fitness dashboard.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! fitness/reduction code and from command dispatch (`crate::app`).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{BAR_CHART_TOP_N, ColumnMapping};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "co2", version, about = "EU Vehicle Carbon Fitness Assessor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check a vehicle's CO2 figure against its category threshold.
    Check(CheckArgs),
    /// Compute per-country emission reduction between two years.
    Reduce(ReduceArgs),
    /// Show the top 5 reducers between the first and last year of the dataset.
    Snapshot(DataArgs),
    /// Explain how each category's CO2 figure is measured in the EU.
    Methodology(MethodologyArgs),
    /// Re-render a previously exported report JSON.
    Plot(PlotArgs),
    /// Launch the interactive dashboard.
    ///
    /// This uses the same fitness check and reduction pipeline as the other
    /// subcommands, but renders results in a terminal UI using Ratatui.
    Tui(DataArgs),
}

#[derive(Debug, Args, Clone)]
pub struct CheckArgs {
    /// Vehicle category (Car, Truck, Motorcycle).
    pub category: String,

    /// Official CO2 emission value in g/km.
    #[arg(allow_negative_numbers = true)]
    pub value: f64,
}

/// Where the emissions table lives and how its columns are named.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// Emissions CSV (defaults to $CO2_DATA_PATH, then `eu_co2_emissions.csv`).
    #[arg(short = 'f', long = "file", value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// Source column holding the country name.
    #[arg(long, default_value = "country_name")]
    pub country_col: String,

    /// Source column holding the year.
    #[arg(long, default_value = "year")]
    pub year_col: String,

    /// Source column holding the emission value.
    #[arg(long, default_value = "value")]
    pub value_col: String,
}

impl DataArgs {
    pub fn columns(&self) -> ColumnMapping {
        ColumnMapping {
            country: self.country_col.clone(),
            year: self.year_col.clone(),
            value: self.value_col.clone(),
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct ReduceArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Start year (defaults to the first year in the dataset).
    #[arg(long)]
    pub start: Option<i32>,

    /// End year (defaults to the last year in the dataset).
    #[arg(long)]
    pub end: Option<i32>,

    /// Show the top-N reducers.
    #[arg(long, default_value_t = BAR_CHART_TOP_N)]
    pub top: usize,

    /// Disable the terminal bar chart and map.
    #[arg(long)]
    pub no_plot: bool,

    /// Bar chart width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Export every country's result to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the run as report JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct MethodologyArgs {
    /// Only show this category (Car, Truck, Motorcycle).
    pub category: Option<String>,
}

/// Options for plotting a saved report.
#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Report JSON file produced by `co2 reduce --export-json`.
    #[arg(long, value_name = "JSON")]
    pub report: PathBuf,

    /// Show the top-N reducers.
    #[arg(long, default_value_t = BAR_CHART_TOP_N)]
    pub top: usize,

    /// Bar chart width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,
}
