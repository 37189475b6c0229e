//! Environment-backed settings.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the working directory. CLI flags override them.

use std::path::PathBuf;

use crate::domain::DEFAULT_DATA_FILE;

/// Default CSV path.
pub const ENV_DATA_PATH: &str = "CO2_DATA_PATH";
/// `tracing` filter directive (e.g. `info`, `co2_fitness=debug`).
pub const ENV_LOG: &str = "CO2_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_path: PathBuf,
    pub log_filter: String,
}

impl Settings {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            data_path: non_empty(ENV_DATA_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
            log_filter: non_empty(ENV_LOG).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}
