//! `co2-fitness` library crate.
//!
//! The binary (`co2`) is a thin wrapper around this library so that:
//!
//! - the fitness check and reduction logic are testable without spawning processes
//! - the two entry points ([`fitness::check_fitness`], [`reduction::calculate_reduction`])
//!   can be reused behind any other front-end
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod fitness;
pub mod io;
pub mod logging;
pub mod plot;
pub mod reduction;
pub mod report;
pub mod tui;

pub use fitness::{check_fitness, check_fitness_by_name};
pub use reduction::calculate_reduction;
