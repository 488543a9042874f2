//! Draft to backend-request transformation
//!
//! [`build_submission`] is a pure function from a validated draft to the
//! request body the assessment API accepts. Most of the payload is
//! snake_case; the equipment block is camelCase because the calculation
//! engine deserializes it with renamed fields.

use serde::{Deserialize, Serialize};

use crate::calculators::seasonal_factor_for;
use crate::models::{
    AssessmentDraft, CropCategory, CroppingPattern, FarmType, FarmingSystem, ProductionSystem,
    SeasonalFactor, SoilType, FUEL_POWER_SOURCES,
};
use crate::types::NONE_SENTINEL;

/// One food item in the assessment request, built from a crop record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodItemPayload {
    pub id: String,
    pub name: String,
    pub quantity_kg: f64,
    pub category: CropCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_system: Option<ProductionSystem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasonal_factor: Option<SeasonalFactor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variety: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_allocated: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cropping_pattern: Option<CroppingPattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intercropping_partners: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_harvest_losses: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FarmProfilePayload {
    pub farmer_name: String,
    pub farm_name: String,
    pub total_farm_size: f64,
    pub farming_experience: u32,
    pub farm_type: FarmType,
    pub primary_farming_system: FarmingSystem,
    pub certifications: Vec<String>,
    pub participates_in_programs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilManagementPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil_type: Option<SoilType>,
    pub uses_compost: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compost_source: Option<String>,
    pub conservation_practices: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil_testing_frequency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FertilizerApplicationPayload {
    pub fertilizer_type: String,
    pub application_rate: f64,
    pub applications_per_season: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FertilizationPayload {
    pub uses_fertilizers: bool,
    pub fertilizer_applications: Vec<FertilizerApplicationPayload>,
    pub soil_test_based: bool,
    pub follows_nutrient_plan: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaterManagementPayload {
    pub water_source: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irrigation_system: Option<String>,
    pub water_conservation_practices: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PesticideApplicationPayload {
    pub pesticide_type: String,
    pub active_ingredient: String,
    pub application_rate: f64,
    pub applications_per_season: u32,
    pub target_pests: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PestManagementPayload {
    pub management_approach: String,
    pub uses_ipm: bool,
    pub pesticides: Vec<PesticideApplicationPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pest_monitoring_frequency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManagementPracticesPayload {
    pub soil_management: SoilManagementPayload,
    pub fertilization: FertilizationPayload,
    pub water_management: WaterManagementPayload,
    pub pest_management: PestManagementPayload,
}

/// Equipment block. The calculation engine expects camelCase here, unlike
/// the rest of the request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentEnergyPayload {
    pub equipment: Vec<FarmEquipmentPayload>,
    pub energy_sources: Vec<EnergyUsagePayload>,
    pub fuel_consumption: Vec<FuelUsagePayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FarmEquipmentPayload {
    pub equipment_type: String,
    pub power_source: String,
    pub age: u32,
    pub hours_per_year: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_efficiency: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnergyUsagePayload {
    pub energy_type: String,
    pub monthly_consumption: f64,
    pub primary_use: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FuelUsagePayload {
    pub fuel_type: String,
    pub monthly_consumption: f64,
    pub primary_use: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

/// The request body for `POST /assess` and `POST /assess/comprehensive`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssessmentRequest {
    pub company_name: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub foods: Vec<FoodItemPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farm_profile: Option<FarmProfilePayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_practices: Option<ManagementPracticesPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_energy: Option<EquipmentEnergyPayload>,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn build_foods(draft: &AssessmentDraft) -> Vec<FoodItemPayload> {
    let country = draft.farm_profile.country.to_string();
    draft
        .crops
        .iter()
        .enumerate()
        .map(|(index, crop)| FoodItemPayload {
            // Deterministic ids keep the transform reproducible for the
            // same draft.
            id: format!("food-{:02}", index + 1),
            name: crop.name.clone(),
            quantity_kg: crop.annual_production,
            category: crop.category,
            crop_type: non_empty(&crop.name.to_lowercase()),
            origin_country: Some(country.clone()),
            production_system: Some(crop.production_system),
            seasonal_factor: Some(seasonal_factor_for(&crop.seasonality.planting_months)),
            variety: crop.variety.as_deref().and_then(non_empty),
            area_allocated: Some(crop.area_allocated),
            cropping_pattern: Some(crop.cropping_pattern),
            intercropping_partners: if crop.intercropping_partners.is_empty() {
                None
            } else {
                Some(crop.intercropping_partners.clone())
            },
            post_harvest_losses: crop.post_harvest_loss_percent,
        })
        .collect()
}

fn build_management(draft: &AssessmentDraft) -> ManagementPracticesPayload {
    let m = &draft.management_practices;
    let p = &draft.pest_management;

    let compost_source = if m.soil_management.uses_compost {
        non_empty(&m.soil_management.compost_source).filter(|s| s != NONE_SENTINEL)
    } else {
        None
    };

    ManagementPracticesPayload {
        soil_management: SoilManagementPayload {
            soil_type: m.soil_management.soil_type,
            uses_compost: m.soil_management.uses_compost,
            compost_source,
            conservation_practices: m.soil_management.conservation_practices.clone(),
            soil_testing_frequency: m
                .soil_management
                .testing_frequency
                .as_deref()
                .and_then(non_empty),
        },
        fertilization: FertilizationPayload {
            uses_fertilizers: m.fertilization.uses_fertilizers,
            fertilizer_applications: m
                .fertilization
                .applications
                .iter()
                .map(|a| FertilizerApplicationPayload {
                    fertilizer_type: a.fertilizer_type.clone(),
                    application_rate: a.application_rate,
                    applications_per_season: a.applications_per_season,
                    cost: a.cost,
                })
                .collect(),
            soil_test_based: m.fertilization.soil_test_based,
            follows_nutrient_plan: m.fertilization.follows_nutrient_plan,
        },
        water_management: WaterManagementPayload {
            water_source: m.water_management.water_sources.clone(),
            irrigation_system: m
                .water_management
                .irrigation_system
                .as_deref()
                .and_then(non_empty),
            water_conservation_practices: m.water_management.conservation_practices.clone(),
        },
        pest_management: PestManagementPayload {
            management_approach: p.management_approach.clone(),
            uses_ipm: p.uses_ipm,
            pesticides: p
                .pesticide_applications
                .iter()
                .map(|a| PesticideApplicationPayload {
                    pesticide_type: a.pesticide_type.clone(),
                    active_ingredient: a.active_ingredient.clone(),
                    application_rate: a.application_rate,
                    applications_per_season: a.applications_per_season,
                    target_pests: a.target_pests.clone(),
                })
                .collect(),
            pest_monitoring_frequency: p.monitoring_frequency.as_deref().and_then(non_empty),
        },
    }
}

fn build_equipment(draft: &AssessmentDraft) -> Option<EquipmentEnergyPayload> {
    let section = &draft.equipment_energy;
    if section.equipment.is_empty() && section.energy_sources.is_empty() {
        return None;
    }

    let equipment: Vec<FarmEquipmentPayload> = section
        .equipment
        .iter()
        .map(|e| FarmEquipmentPayload {
            equipment_type: e.equipment_type.clone(),
            power_source: e.power_source.clone(),
            age: e.age_years,
            hours_per_year: e.hours_per_year,
            fuel_efficiency: e.fuel_efficiency,
        })
        .collect();

    let energy_sources: Vec<EnergyUsagePayload> = section
        .energy_sources
        .iter()
        .map(|e| EnergyUsagePayload {
            energy_type: e.energy_type.clone(),
            monthly_consumption: e.monthly_consumption,
            primary_use: e.primary_use.clone(),
            cost: e.cost,
        })
        .collect();

    // Fuel usage is derived, not entered: each fuel-burning machine
    // contributes its average monthly litres.
    let fuel_consumption: Vec<FuelUsagePayload> = section
        .equipment
        .iter()
        .filter_map(|e| {
            let source = e.power_source.to_lowercase();
            if !FUEL_POWER_SOURCES.contains(&source.as_str()) {
                return None;
            }
            let efficiency = e.fuel_efficiency?;
            Some(FuelUsagePayload {
                fuel_type: source,
                monthly_consumption: e.hours_per_year / 12.0 * efficiency,
                primary_use: e.equipment_type.clone(),
                cost: None,
            })
        })
        .collect();

    Some(EquipmentEnergyPayload {
        equipment,
        energy_sources,
        fuel_consumption,
    })
}

/// Transform a draft into the backend request. Pure and deterministic;
/// the draft is expected to have passed [`crate::validation::validate_draft`].
pub fn build_submission(draft: &AssessmentDraft) -> AssessmentRequest {
    let profile = &draft.farm_profile;
    let comprehensive = draft.is_comprehensive();

    let farm_profile = comprehensive.then(|| FarmProfilePayload {
        farmer_name: profile.farmer_name.clone(),
        farm_name: profile.farm_name.clone(),
        total_farm_size: profile.total_farm_size,
        farming_experience: profile.farming_experience,
        farm_type: profile.farm_type,
        primary_farming_system: profile.primary_farming_system,
        certifications: profile.certifications.clone(),
        participates_in_programs: profile.participates_in_programs.clone(),
    });

    let management_practices = comprehensive.then(|| build_management(draft));

    AssessmentRequest {
        company_name: if profile.farm_name.trim().is_empty() {
            profile.farmer_name.clone()
        } else {
            profile.farm_name.clone()
        },
        country: profile.country.to_string(),
        region: non_empty(&profile.region),
        foods: build_foods(draft),
        farm_profile,
        management_practices,
        equipment_energy: build_equipment(draft),
    }
}
