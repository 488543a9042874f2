//! The in-progress assessment draft

use serde::{Deserialize, Serialize};

use super::{
    AssessmentParameters, CropProduction, EquipmentEnergySection, FarmProfileSection,
    ManagementPracticesSection, PestManagementSection,
};

/// The record built across the six wizard steps. Created empty at wizard
/// start, mutated in place by the step handlers, and terminal once
/// transformed into a backend submission; a new assessment starts from a
/// fresh draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssessmentDraft {
    pub farm_profile: FarmProfileSection,
    pub crops: Vec<CropProduction>,
    pub management_practices: ManagementPracticesSection,
    pub pest_management: PestManagementSection,
    pub equipment_energy: EquipmentEnergySection,
    pub assessment_parameters: AssessmentParameters,
}

impl Default for AssessmentDraft {
    fn default() -> Self {
        Self {
            farm_profile: FarmProfileSection::default(),
            // The crop step always shows at least one (initially blank) row.
            crops: vec![CropProduction::default()],
            management_practices: ManagementPracticesSection::default(),
            pest_management: PestManagementSection::default(),
            equipment_energy: EquipmentEnergySection::default(),
            assessment_parameters: AssessmentParameters::default(),
        }
    }
}

impl AssessmentDraft {
    /// Hectares not yet allocated to any crop. Negative when the farmer has
    /// over-allocated, which is surfaced as a soft warning rather than a
    /// hard error.
    pub fn remaining_area(&self) -> f64 {
        let allocated: f64 = self.crops.iter().map(|c| c.area_allocated).sum();
        self.farm_profile.total_farm_size - allocated
    }

    /// Whether the draft carries management detail beyond the minimal
    /// simple-assessment shape.
    pub fn is_comprehensive(&self) -> bool {
        let m = &self.management_practices;
        m.fertilization.uses_fertilizers
            || m.soil_management.uses_compost
            || m.soil_management.soil_type.is_some()
            || !self.pest_management.pesticide_applications.is_empty()
            || !self.equipment_energy.equipment.is_empty()
    }
}
