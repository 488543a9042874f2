//! Equipment, energy, and infrastructure models (intake step 5)

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Storage facility values offered in the intake form. `"none"` means no
/// dedicated storage and is mutually exclusive with every other value.
pub const STORAGE_FACILITIES: &[&str] = &[
    "traditional_granary",
    "improved_granary",
    "warehouse",
    "cold_storage",
    "hermetic_bags",
    "crib",
    "none",
];

/// Transport modes offered in the intake form.
pub const TRANSPORT_MODES: &[&str] = &[
    "head_load",
    "bicycle",
    "motorcycle",
    "tricycle",
    "pickup",
    "truck",
    "animal_cart",
];

/// Power sources treated as fuel-burning when deriving fuel consumption for
/// the submission payload.
pub const FUEL_POWER_SOURCES: &[&str] = &["diesel", "petrol", "gasoline", "kerosene"];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum RoadType {
    Paved,
    Gravel,
    #[default]
    Dirt,
    Seasonal,
}

/// One piece of farm equipment; ordered list, positional removal.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EquipmentEntry {
    #[validate(length(min = 1, max = 120, message = "Equipment type is required"))]
    pub equipment_type: String,

    #[validate(length(min = 1, max = 60, message = "Power source is required"))]
    pub power_source: String,

    #[validate(range(max = 60, message = "Equipment age must be at most 60 years"))]
    pub age_years: u32,

    #[validate(range(
        min = 0.0,
        max = 8760.0,
        message = "Hours per year must be between 0 and 8,760"
    ))]
    pub hours_per_year: f64,

    /// Litres per hour; "Not known" coerces to absent.
    #[validate(range(min = 0.0, max = 500.0, message = "Fuel efficiency out of range"))]
    pub fuel_efficiency: Option<f64>,
}

/// One energy source used on the farm.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EnergySource {
    #[validate(length(min = 1, max = 60, message = "Energy type is required"))]
    pub energy_type: String,

    /// kWh or fuel-equivalent per month.
    #[validate(range(min = 0.0, message = "Monthly consumption cannot be negative"))]
    pub monthly_consumption: f64,

    #[validate(length(min = 1, max = 120, message = "Primary use is required"))]
    pub primary_use: String,

    #[validate(range(min = 0.0, message = "Cost cannot be negative"))]
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TransportAccess {
    pub road_type: RoadType,

    #[validate(range(
        min = 0.0,
        max = 2000.0,
        message = "Distance to market must be between 0 and 2,000 km"
    ))]
    pub distance_to_market_km: f64,

    /// At least one mode is required (cross-field refinement).
    pub transport_modes: Vec<String>,

    #[validate(range(min = 0.0, message = "Cost cannot be negative"))]
    pub monthly_cost: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Infrastructure {
    #[validate(range(min = 0.0, message = "Storage capacity cannot be negative"))]
    pub storage_capacity_kg: f64,

    /// Subset of [`STORAGE_FACILITIES`]; the `"none"` value excludes all
    /// others (cross-field refinement plus wizard toggle).
    pub storage_facilities: Vec<String>,

    #[validate]
    pub transport: TransportAccess,
}

/// Step 5 of the intake wizard.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EquipmentEnergySection {
    #[validate]
    pub equipment: Vec<EquipmentEntry>,

    #[validate]
    pub energy_sources: Vec<EnergySource>,

    #[validate]
    pub infrastructure: Infrastructure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_facilities_include_none() {
        assert!(STORAGE_FACILITIES.contains(&"none"));
        assert!(STORAGE_FACILITIES.contains(&"warehouse"));
    }

    #[test]
    fn test_equipment_serde_is_camel_case() {
        let entry = EquipmentEntry {
            equipment_type: "tractor".into(),
            power_source: "diesel".into(),
            age_years: 8,
            hours_per_year: 300.0,
            fuel_efficiency: Some(4.5),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"equipmentType\""));
        assert!(json.contains("\"hoursPerYear\":300.0"));
    }
}
