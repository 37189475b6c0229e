//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - load-once dataset cache (`cache`)
//! - reduction exports to CSV (`export`)
//! - report JSON read/write (`report`)

pub mod cache;
pub mod export;
pub mod ingest;
pub mod report;

pub use cache::*;
pub use export::*;
pub use ingest::*;
pub use report::*;
