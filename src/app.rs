//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads settings and installs logging
//! - parses CLI arguments
//! - runs the fitness check or the reduction pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing::debug;

use crate::cli::{CheckArgs, Command, DataArgs, MethodologyArgs, PlotArgs, ReduceArgs};
use crate::config::Settings;
use crate::domain::{ReduceConfig, VehicleCategory};
use crate::error::AppError;
use crate::io::DatasetCache;
use crate::logging::LogTarget;

pub mod pipeline;

/// Entry point for the `co2` binary.
pub fn run() -> Result<(), AppError> {
    let settings = Settings::from_env();

    // We want `co2` and `co2 -f data.csv` to behave like `co2 tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    crate::logging::init(&settings.log_filter, log_target(&cli.command));
    debug!(?cli, "parsed command line");

    match cli.command {
        Command::Check(args) => handle_check(args),
        Command::Reduce(args) => handle_reduce(args, &settings),
        Command::Snapshot(args) => handle_snapshot(args, &settings),
        Command::Methodology(args) => handle_methodology(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => crate::tui::run(data_config_from_args(&args, &settings)),
    }
}

fn handle_check(args: CheckArgs) -> Result<(), AppError> {
    let category: VehicleCategory = args.category.parse()?;
    let value = crate::fitness::validate_emission_value(args.value)?;
    let verdict = crate::fitness::check_fitness(category, value);
    println!("{}", crate::report::format_verdict(&verdict));
    Ok(())
}

fn handle_reduce(args: ReduceArgs, settings: &Settings) -> Result<(), AppError> {
    let config = reduce_config_from_args(&args, settings);
    let mut cache = DatasetCache::new();
    let run = pipeline::run_reduction(&mut cache, &config)?;

    let dataset = cache.get_or_load(&config.data_path, &config.columns)?;
    println!(
        "{}",
        crate::report::format_run_summary(dataset, run.start_year, run.end_year, run.reductions.len())
    );

    if run.reductions.is_empty() {
        println!(
            "No data available for both {} and {}. Try a different year range.",
            run.start_year, run.end_year
        );
    } else {
        println!("{}", crate::report::format_reduction_table(&run.ranked));

        if config.plot {
            println!("{}", crate::plot::render_bar_chart(&run.ranked, config.plot_width));
            println!(
                "{}",
                crate::plot::render_reduction_map(&run.reductions, run.start_year, run.end_year)
            );
        }
    }

    // Optional exports.
    if let Some(path) = &config.export_csv {
        crate::io::write_reductions_csv(path, &run.reductions, run.start_year, run.end_year)?;
    }
    if let Some(path) = &config.export_json {
        let report = crate::io::ReductionReport::new(
            run.source.clone(),
            run.start_year,
            run.end_year,
            run.reductions.clone(),
        );
        crate::io::write_report_json(path, &report)?;
    }

    Ok(())
}

fn handle_snapshot(args: DataArgs, settings: &Settings) -> Result<(), AppError> {
    let config = data_config_from_args(&args, settings);
    let mut cache = DatasetCache::new();

    println!("EU Emissions Snapshot");
    match pipeline::snapshot(&mut cache, &config) {
        pipeline::Snapshot::Ready { start_year, end_year, top } => {
            print!("{}", crate::report::format_snapshot(&top, start_year, end_year));
        }
        pipeline::Snapshot::Unavailable(message) => println!("{message}"),
        pipeline::Snapshot::NotEnoughYears => {
            println!("Dataset needs more than one year of data to show reductions.");
        }
        pipeline::Snapshot::NoOverlap { start_year, end_year } => {
            println!("Could not calculate reductions between {start_year} and {end_year}.");
        }
    }
    Ok(())
}

fn handle_methodology(args: MethodologyArgs) -> Result<(), AppError> {
    println!("Vehicle carbon footprints in the EU are measured in grams of CO2 per kilometer");
    println!("(g/km), using standardized test procedures that vary by vehicle type.\n");

    let methodologies = match &args.category {
        Some(name) => vec![crate::fitness::methodology(name.parse()?)],
        None => crate::fitness::all_methodologies(),
    };
    for m in &methodologies {
        println!("{}", crate::report::format_methodology(m));
    }
    print!("{}", crate::report::format_disclaimer());
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let report = crate::io::read_report_json(&args.report)?;
    let ranked = crate::reduction::rank_top_reducers(&report.reductions, args.top);

    println!("Source: {} ({} vs {})", report.source, report.start_year, report.end_year);
    println!("{}", crate::plot::render_bar_chart(&ranked, args.width));
    println!(
        "{}",
        crate::plot::render_reduction_map(&report.reductions, report.start_year, report.end_year)
    );
    Ok(())
}

/// The dashboard draws over stderr, so its logs are dropped.
fn log_target(command: &Command) -> LogTarget {
    match command {
        Command::Tui(_) => LogTarget::Discard,
        _ => LogTarget::Stderr,
    }
}

pub fn data_config_from_args(args: &DataArgs, settings: &Settings) -> ReduceConfig {
    let path = args.file.clone().unwrap_or_else(|| settings.data_path.clone());
    pipeline::data_config(path, args.columns())
}

pub fn reduce_config_from_args(args: &ReduceArgs, settings: &Settings) -> ReduceConfig {
    let mut config = data_config_from_args(&args.data, settings);
    config.start_year = args.start;
    config.end_year = args.end;
    config.top_n = args.top;
    config.plot = !args.no_plot;
    config.plot_width = args.width;
    config.export_csv = args.export.clone();
    config.export_json = args.export_json.clone();
    config
}

/// Rewrite argv so `co2` defaults to `co2 tui`.
///
/// Rules:
/// - `co2`                      -> `co2 tui`
/// - `co2 -f data.csv ...`      -> `co2 tui -f data.csv ...`
/// - `co2 --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "check" | "reduce" | "snapshot" | "methodology" | "plot" | "tui"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_launches_tui() {
        assert_eq!(rewrite_args(argv(&["co2"])), argv(&["co2", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["co2", "-f", "x.csv"])),
            argv(&["co2", "tui", "-f", "x.csv"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(rewrite_args(argv(&["co2", "--help"])), argv(&["co2", "--help"]));
        assert_eq!(
            rewrite_args(argv(&["co2", "check", "Car", "90"])),
            argv(&["co2", "check", "Car", "90"])
        );
    }

    #[test]
    fn dashboard_logs_are_discarded() {
        let cli = crate::cli::Cli::parse_from(rewrite_args(argv(&["co2"])));
        assert_eq!(log_target(&cli.command), LogTarget::Discard);

        let cli = crate::cli::Cli::parse_from(["co2", "check", "Car", "90"]);
        assert_eq!(log_target(&cli.command), LogTarget::Stderr);
    }

    #[test]
    fn file_flag_overrides_settings() {
        let settings = Settings {
            data_path: PathBuf::from("env.csv"),
            log_filter: "warn".to_string(),
        };
        let cli = crate::cli::Cli::parse_from(["co2", "reduce", "--end", "2010", "--no-plot"]);
        let Command::Reduce(args) = cli.command else {
            panic!("expected reduce");
        };
        let config = reduce_config_from_args(&args, &settings);
        assert_eq!(config.data_path, PathBuf::from("env.csv"));
        assert_eq!(config.end_year, Some(2010));
        assert!(!config.plot);

        let cli = crate::cli::Cli::parse_from(["co2", "snapshot", "-f", "flag.csv"]);
        let Command::Snapshot(args) = cli.command else {
            panic!("expected snapshot");
        };
        assert_eq!(data_config_from_args(&args, &settings).data_path, PathBuf::from("flag.csv"));
    }
}
