//! Soil, fertilization, and water management models (intake step 3)

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::NONE_SENTINEL;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SoilType {
    Sandy,
    Clay,
    Loam,
    SandyLoam,
    ClayLoam,
    SiltLoam,
    Lateritic,
    Volcanic,
}

/// Soil management subsection. `compost_source` and the application rate are
/// only meaningful while `uses_compost` is true; the wizard resets both when
/// the flag is switched off.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct SoilManagement {
    pub soil_type: Option<SoilType>,

    /// Optional: "Not known" inputs coerce to absent before reaching here.
    #[validate(range(min = 3.0, max = 10.0, message = "Soil pH must be between 3.0 and 10.0"))]
    pub soil_ph: Option<f64>,

    #[validate(range(
        min = 0.0,
        max = 100.0,
        message = "Organic matter must be between 0 and 100 percent"
    ))]
    pub organic_matter_percent: Option<f64>,

    pub testing_frequency: Option<String>,

    pub conservation_practices: Vec<String>,

    pub uses_compost: bool,

    /// `"none"` sentinel while compost is unused.
    pub compost_source: String,

    /// kg per hectare per season, cleared when compost is switched off.
    #[validate(range(min = 0.0, max = 50000.0, message = "Compost rate out of range"))]
    pub compost_application_rate: Option<f64>,
}

impl Default for SoilManagement {
    fn default() -> Self {
        Self {
            soil_type: None,
            soil_ph: None,
            organic_matter_percent: None,
            testing_frequency: None,
            conservation_practices: Vec::new(),
            uses_compost: false,
            compost_source: NONE_SENTINEL.to_string(),
            compost_application_rate: None,
        }
    }
}

/// A single fertilizer application entry; the list is ordered and rows are
/// removed positionally.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FertilizerApplication {
    #[validate(length(min = 1, max = 120, message = "Fertilizer type is required"))]
    pub fertilizer_type: String,

    /// e.g. "15-15-15"
    pub npk_ratio: Option<String>,

    /// kg per hectare per season.
    #[validate(range(
        min = 0.0,
        max = 5000.0,
        message = "Application rate must be between 0 and 5,000 kg/ha"
    ))]
    pub application_rate: f64,

    #[validate(range(max = 20, message = "Applications per season must be at most 20"))]
    pub applications_per_season: u32,

    #[validate(range(min = 0.0, message = "Cost cannot be negative"))]
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Fertilization {
    pub uses_fertilizers: bool,

    /// Required non-empty when `uses_fertilizers` is true (cross-field
    /// refinement).
    #[validate]
    pub applications: Vec<FertilizerApplication>,

    pub soil_test_based: bool,

    pub follows_nutrient_plan: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct WaterManagement {
    /// At least one source is required (cross-field refinement keeps the
    /// message on this field).
    pub water_sources: Vec<String>,

    pub irrigation_system: Option<String>,

    pub conservation_practices: Vec<String>,
}

/// Step 3 of the intake wizard.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ManagementPracticesSection {
    #[validate]
    pub soil_management: SoilManagement,

    #[validate]
    pub fertilization: Fertilization,

    #[validate]
    pub water_management: WaterManagement,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_compost_source_is_none_sentinel() {
        let soil = SoilManagement::default();
        assert!(!soil.uses_compost);
        assert_eq!(soil.compost_source, NONE_SENTINEL);
        assert!(soil.compost_application_rate.is_none());
    }

    #[test]
    fn test_soil_type_backend_spelling() {
        assert_eq!(
            serde_json::to_string(&SoilType::SandyLoam).unwrap(),
            "\"SandyLoam\""
        );
    }
}
