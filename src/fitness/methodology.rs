//! How each category's official CO2 figure is measured in the EU.

use crate::domain::VehicleCategory;

/// Measurement methodology for one vehicle category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Methodology {
    pub category: VehicleCategory,
    pub heading: &'static str,
    pub metric: &'static str,
    pub procedure: &'static str,
    pub details: &'static str,
    pub note: Option<&'static str>,
}

pub fn methodology(category: VehicleCategory) -> Methodology {
    match category {
        VehicleCategory::Car => Methodology {
            category,
            heading: "Car (Passenger Vehicle)",
            metric: "g/km (grams of CO2 per kilometer)",
            procedure: "WLTP (Worldwide Harmonised Light Vehicle Test Procedure), mandatory for new cars since 2017",
            details: "A laboratory test simulating urban, suburban and highway driving. It gives a more \
                      realistic g/km figure than the older NEDC test; manufacturers report this value \
                      and it is used for taxation and regulation.",
            note: None,
        },
        VehicleCategory::Truck => Methodology {
            category,
            heading: "Truck (Heavy-Duty Vehicle - HDV)",
            metric: "g/t-km (grams of CO2 per tonne-kilometer), accounting for the weight of goods carried",
            procedure: "VECTO (Vehicle Energy Consumption Calculation Tool)",
            details: "Manufacturers simulate CO2 emissions and fuel consumption for each truck and \
                      trailer configuration from its components (engine, tires, aerodynamics), so \
                      vehicles built for different tasks can be compared fairly.",
            note: Some("This tool simplifies the truck figure to a g/km equivalent."),
        },
        VehicleCategory::Motorcycle => Methodology {
            category,
            heading: "Motorcycle",
            metric: "g/km (grams of CO2 per kilometer)",
            procedure: "Euro 5 type approval using WMTC (World Motorcycle Test Cycle)",
            details: "A standardized laboratory cycle simulating different riding phases to measure \
                      CO2, NOx and other pollutants, producing the official g/km figure.",
            note: None,
        },
    }
}

pub fn all_methodologies() -> Vec<Methodology> {
    VehicleCategory::ALL.into_iter().map(methodology).collect()
}
