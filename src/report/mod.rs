//! Reporting utilities: formatted terminal output for verdicts and reductions.

pub mod format;

pub use format::*;
