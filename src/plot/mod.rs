//! Terminal charts for reduction results.

pub mod ascii;
pub mod scale;

pub use ascii::*;
pub use scale::*;
