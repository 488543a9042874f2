//! Farm profile models (intake step 1)

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Supported assessment countries. Variant spellings match the backend
/// contract exactly; `Global` is the backend fallback and is not offered
/// in the intake form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Country {
    #[default]
    Ghana,
    Nigeria,
    Global,
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Country::Ghana => write!(f, "Ghana"),
            Country::Nigeria => write!(f, "Nigeria"),
            Country::Global => write!(f, "Global"),
        }
    }
}

impl Country {
    pub fn currency_code(&self) -> &'static str {
        match self {
            Country::Ghana => "GHS",
            Country::Nigeria => "NGN",
            Country::Global => "USD",
        }
    }

    pub fn currency_symbol(&self) -> &'static str {
        match self {
            Country::Ghana => "GH₵",
            Country::Nigeria => "₦",
            Country::Global => "$",
        }
    }
}

/// Farm scale classification, derived from total farm size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum FarmType {
    #[default]
    Smallholder,
    SmallScale,
    MediumScale,
    Commercial,
    Cooperative,
    MixedLivestock,
}

impl FarmType {
    /// Classify a farm by its total size in hectares using the fixed intake
    /// thresholds: <2 ha smallholder, ≤5 small-scale, ≤20 medium-scale,
    /// larger commercial.
    pub fn for_size(total_farm_size_ha: f64) -> Self {
        if total_farm_size_ha < 2.0 {
            FarmType::Smallholder
        } else if total_farm_size_ha <= 5.0 {
            FarmType::SmallScale
        } else if total_farm_size_ha <= 20.0 {
            FarmType::MediumScale
        } else {
            FarmType::Commercial
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum FarmingSystem {
    #[default]
    Subsistence,
    SemiCommercial,
    Commercial,
    Organic,
    Agroecological,
    Conventional,
    IntegratedFarming,
}

/// Step 1 of the intake wizard: farmer and farm identity.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FarmProfileSection {
    #[validate(length(min = 1, max = 120, message = "Farmer name is required"))]
    pub farmer_name: String,

    #[validate(length(min = 1, max = 120, message = "Farm name is required"))]
    pub farm_name: String,

    pub country: Country,

    /// Region/state within the selected country. Membership in the
    /// country's closed set is checked by a cross-field refinement.
    #[validate(length(min = 1, message = "Region is required"))]
    pub region: String,

    /// Total farm size in hectares.
    #[validate(range(
        min = 0.1,
        max = 10000.0,
        message = "Farm size must be between 0.1 and 10,000 hectares"
    ))]
    pub total_farm_size: f64,

    /// Years of farming experience.
    #[validate(range(max = 80, message = "Farming experience must be at most 80 years"))]
    pub farming_experience: u32,

    /// Derived from `total_farm_size`; the wizard keeps it in sync.
    pub farm_type: FarmType,

    pub primary_farming_system: FarmingSystem,

    pub certifications: Vec<String>,

    pub participates_in_programs: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_farm_type_thresholds() {
        assert_eq!(FarmType::for_size(0.5), FarmType::Smallholder);
        assert_eq!(FarmType::for_size(1.99), FarmType::Smallholder);
        assert_eq!(FarmType::for_size(2.0), FarmType::SmallScale);
        assert_eq!(FarmType::for_size(5.0), FarmType::SmallScale);
        assert_eq!(FarmType::for_size(5.01), FarmType::MediumScale);
        assert_eq!(FarmType::for_size(20.0), FarmType::MediumScale);
        assert_eq!(FarmType::for_size(20.5), FarmType::Commercial);
    }

    #[test]
    fn test_country_serializes_as_backend_spelling() {
        assert_eq!(serde_json::to_string(&Country::Ghana).unwrap(), "\"Ghana\"");
        assert_eq!(
            serde_json::to_string(&Country::Nigeria).unwrap(),
            "\"Nigeria\""
        );
    }

    #[test]
    fn test_currency_mapping() {
        assert_eq!(Country::Ghana.currency_code(), "GHS");
        assert_eq!(Country::Nigeria.currency_symbol(), "₦");
    }
}
