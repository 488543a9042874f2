//! Crop production models (intake step 2)

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::MonthSet;
use crate::validation::validate_month_set;

/// Food categories recognised by the assessment backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CropCategory {
    #[default]
    Cereals,
    Legumes,
    Vegetables,
    Fruits,
    Meat,
    Poultry,
    Fish,
    Dairy,
    Eggs,
    Oils,
    Nuts,
    Roots,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ProductionSystem {
    Intensive,
    Extensive,
    Smallholder,
    Agroforestry,
    Irrigated,
    #[default]
    Rainfed,
    Organic,
    Conventional,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CroppingPattern {
    #[default]
    Monoculture,
    Intercropping,
    RelayCropping,
    Agroforestry,
    CropRotation,
}

/// Season classification derived from planting months.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SeasonalFactor {
    WetSeason,
    DrySeason,
    #[default]
    YearRound,
}

/// Planting/harvesting calendar for one crop. The growing period and season
/// tags are derived whenever either month set changes.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct Seasonality {
    #[validate(custom = "validate_month_set")]
    pub planting_months: MonthSet,

    #[validate(custom = "validate_month_set")]
    pub harvesting_months: MonthSet,

    /// Derived: average planting to average harvesting, 30 days per month,
    /// wrapping across the calendar year.
    pub growing_period_days: u32,

    #[validate(range(min = 1, max = 4, message = "Crops per year must be between 1 and 4"))]
    pub crops_per_year: u8,

    /// Derived season tags for the submission payload.
    pub season_tags: Vec<SeasonalFactor>,
}

impl Default for Seasonality {
    fn default() -> Self {
        Self {
            planting_months: MonthSet::new(),
            harvesting_months: MonthSet::new(),
            growing_period_days: 120,
            crops_per_year: 1,
            season_tags: Vec::new(),
        }
    }
}

/// One crop record within the draft. Between 1 and 10 records per draft;
/// list order is the order the farmer entered them.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CropProduction {
    #[validate(length(min = 1, max = 120, message = "Crop name is required"))]
    pub name: String,

    pub category: CropCategory,

    pub variety: Option<String>,

    /// Hectares allocated to this crop.
    #[validate(range(
        min = 0.01,
        max = 10000.0,
        message = "Area allocated must be between 0.01 and 10,000 hectares"
    ))]
    pub area_allocated: f64,

    /// Derived: this crop's share of the total farm size, percent.
    pub area_share_percent: f64,

    /// Annual production in kilograms.
    #[validate(range(
        min = 0.1,
        max = 10000000.0,
        message = "Annual production must be a positive weight in kg"
    ))]
    pub annual_production: f64,

    pub production_system: ProductionSystem,

    pub cropping_pattern: CroppingPattern,

    #[validate]
    pub seasonality: Seasonality,

    /// Companion crops; meaningful only when the pattern is intercropping.
    pub intercropping_partners: Vec<String>,

    /// Crop order across seasons; meaningful only for crop rotation.
    pub rotation_sequence: Vec<String>,

    /// Derived: annual production divided by area allocated.
    pub yield_per_hectare: f64,

    #[validate(range(
        min = 0.0,
        max = 100.0,
        message = "Post-harvest loss must be between 0 and 100 percent"
    ))]
    pub post_harvest_loss_percent: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::month_set;

    #[test]
    fn test_seasonality_default_period() {
        let s = Seasonality::default();
        assert_eq!(s.growing_period_days, 120);
        assert_eq!(s.crops_per_year, 1);
    }

    #[test]
    fn test_crop_serde_is_camel_case() {
        let mut crop = CropProduction::default();
        crop.name = "Maize".into();
        crop.area_allocated = 1.5;
        crop.seasonality.planting_months = month_set(&[4, 5]);
        let json = serde_json::to_string(&crop).unwrap();
        assert!(json.contains("\"areaAllocated\":1.5"));
        assert!(json.contains("\"plantingMonths\":[4,5]"));
        assert!(json.contains("\"postHarvestLossPercent\":null"));
    }

    #[test]
    fn test_cropping_pattern_backend_spelling() {
        assert_eq!(
            serde_json::to_string(&CroppingPattern::RelayCropping).unwrap(),
            "\"RelayCropping\""
        );
        assert_eq!(
            serde_json::to_string(&CroppingPattern::CropRotation).unwrap(),
            "\"CropRotation\""
        );
    }
}
