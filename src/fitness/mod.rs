//! Vehicle fitness check against simplified EU emission standards.
//!
//! Responsibilities:
//!
//! - hold the fixed per-category threshold table (`standards`)
//! - compare a vehicle's g/km figure against its category limit
//! - describe how each category's figure is measured (`methodology`)

pub mod methodology;
pub mod standards;

pub use methodology::*;
pub use standards::*;
