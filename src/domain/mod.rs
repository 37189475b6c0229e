//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - the vehicle categories and fitness verdicts (`VehicleCategory`, `FitnessVerdict`)
//! - normalized emission rows and reduction results (`EmissionRecord`, `ReductionResult`)
//! - run configuration (`ReduceConfig`, `ColumnMapping`)

pub mod countries;
pub mod types;

pub use countries::*;
pub use types::*;
