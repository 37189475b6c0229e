//! Emission thresholds and the fitness check.
//!
//! The thresholds are simplified, representative figures. Real EU standards are
//! based on fleet-wide averages or vehicle weight; trucks are really regulated in
//! g/t-km and are reduced to a g/km equivalent here.

use crate::domain::{FitnessVerdict, VehicleCategory};
use crate::error::AppError;

/// Threshold table in g/km, one entry per category.
pub const EU_STANDARDS_G_PER_KM: [(VehicleCategory, f64); 3] = [
    (VehicleCategory::Car, threshold_for(VehicleCategory::Car)),
    (VehicleCategory::Motorcycle, threshold_for(VehicleCategory::Motorcycle)),
    (VehicleCategory::Truck, threshold_for(VehicleCategory::Truck)),
];

/// Limit for `category` in g/km.
pub const fn threshold_for(category: VehicleCategory) -> f64 {
    match category {
        // 2021 fleet-wide target for new passenger cars (Regulation (EU) 2019/631).
        VehicleCategory::Car => 95.0,
        // Representative of Euro 5.
        VehicleCategory::Motorcycle => 100.0,
        VehicleCategory::Truck => 750.0,
    }
}

/// Compare `value_g_km` against the category limit. Equality counts as fit.
pub fn check_fitness(category: VehicleCategory, value_g_km: f64) -> FitnessVerdict {
    let threshold = threshold_for(category);
    FitnessVerdict {
        category,
        value: value_g_km,
        threshold,
        is_fit: value_g_km <= threshold,
    }
}

/// String-facing variant of [`check_fitness`].
///
/// Returns `(is_fit, threshold)`. Names must match a threshold key exactly;
/// anything else fails with `InvalidCategory`.
pub fn check_fitness_by_name(category: &str, value_g_km: f64) -> Result<(bool, f64), AppError> {
    let category =
        VehicleCategory::from_exact_name(category).ok_or_else(|| AppError::invalid_category(category))?;
    let verdict = check_fitness(category, value_g_km);
    Ok((verdict.is_fit, verdict.threshold))
}

/// Validate a user-entered emission figure before it reaches the check.
pub fn validate_emission_value(value: f64) -> Result<f64, AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::usage(format!(
            "Invalid carbon footprint {value}: must be a finite, non-negative g/km value."
        )));
    }
    Ok(value)
}
