//! Validation schema for the assessment draft
//!
//! Field-level bounds live on the models as `validator` derive rules;
//! cross-field rules are explicit refinement functions over whole sections.
//! Everything funnels into [`Violation`] values carrying a dotted/indexed
//! field path, so the wizard can keep a per-step error map keyed the same
//! way the form inputs are.

use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::models::{
    AssessmentDraft, AssessmentParameters, Country, CropProduction, CroppingPattern,
    EquipmentEnergySection, FarmProfileSection, FarmType, ManagementPracticesSection,
    PestManagementSection, STORAGE_FACILITIES,
};
use crate::types::{MonthSet, NONE_SENTINEL};

/// Maximum number of crop records per draft.
pub const MAX_CROPS: usize = 10;

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted path with list indices, e.g. `crops[2].seasonality.plantingMonths`.
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

// ============================================================================
// Region lists
// ============================================================================

/// The sixteen regions of Ghana.
pub const GHANA_REGIONS: &[&str] = &[
    "Ahafo",
    "Ashanti",
    "Bono",
    "Bono East",
    "Central",
    "Eastern",
    "Greater Accra",
    "North East",
    "Northern",
    "Oti",
    "Savannah",
    "Upper East",
    "Upper West",
    "Volta",
    "Western",
    "Western North",
];

/// The thirty-six Nigerian states plus the Federal Capital Territory.
pub const NIGERIA_STATES: &[&str] = &[
    "Abia",
    "Adamawa",
    "Akwa Ibom",
    "Anambra",
    "Bauchi",
    "Bayelsa",
    "Benue",
    "Borno",
    "Cross River",
    "Delta",
    "Ebonyi",
    "Edo",
    "Ekiti",
    "Enugu",
    "FCT Abuja",
    "Gombe",
    "Imo",
    "Jigawa",
    "Kaduna",
    "Kano",
    "Katsina",
    "Kebbi",
    "Kogi",
    "Kwara",
    "Lagos",
    "Nasarawa",
    "Niger",
    "Ogun",
    "Ondo",
    "Osun",
    "Oyo",
    "Plateau",
    "Rivers",
    "Sokoto",
    "Taraba",
    "Yobe",
    "Zamfara",
];

/// Regions selectable for a given country.
pub fn regions_for(country: Country) -> &'static [&'static str] {
    match country {
        Country::Ghana => GHANA_REGIONS,
        Country::Nigeria => NIGERIA_STATES,
        Country::Global => &[],
    }
}

// ============================================================================
// Field validators referenced from derive attributes
// ============================================================================

/// Month sets must be non-empty and contain only 1..=12.
pub fn validate_month_set(months: &MonthSet) -> Result<(), ValidationError> {
    if months.is_empty() {
        let mut err = ValidationError::new("months_empty");
        err.message = Some("Select at least one month".into());
        return Err(err);
    }
    if months.iter().any(|m| !(1..=12).contains(m)) {
        let mut err = ValidationError::new("month_out_of_range");
        err.message = Some("Months must be between 1 and 12".into());
        return Err(err);
    }
    Ok(())
}

// ============================================================================
// Error flattening
// ============================================================================

/// Flatten nested `validator` errors into dotted-path violations.
pub fn flatten_errors(prefix: &str, errors: &ValidationErrors) -> Vec<Violation> {
    let mut out = Vec::new();
    collect_errors(prefix, errors, &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn collect_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<Violation>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            (*field).to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", err.code));
                    out.push(Violation::new(path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_errors(&path, inner, out),
            ValidationErrorsKind::List(entries) => {
                for (index, inner) in entries {
                    collect_errors(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}

fn derive_violations<T: Validate>(prefix: &str, section: &T) -> Vec<Violation> {
    match section.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => flatten_errors(prefix, &errors),
    }
}

// ============================================================================
// Cross-field refinements
// ============================================================================

fn refine_farm_profile(profile: &FarmProfileSection, out: &mut Vec<Violation>) {
    if !profile.region.is_empty() {
        let regions = regions_for(profile.country);
        if !regions.iter().any(|r| r.eq_ignore_ascii_case(&profile.region)) {
            out.push(Violation::new(
                "farm_profile.region",
                format!("'{}' is not a region of {}", profile.region, profile.country),
            ));
        }
    }

    // Cooperative and mixed-livestock are explicit choices; the size-derived
    // types must agree with the entered farm size.
    let derived = FarmType::for_size(profile.total_farm_size);
    let is_size_derived = matches!(
        profile.farm_type,
        FarmType::Smallholder | FarmType::SmallScale | FarmType::MediumScale | FarmType::Commercial
    );
    if profile.total_farm_size > 0.0 && is_size_derived && profile.farm_type != derived {
        out.push(Violation::new(
            "farm_profile.farm_type",
            "Farm type does not match the entered farm size",
        ));
    }
}

fn refine_crop(index: usize, crop: &CropProduction, out: &mut Vec<Violation>) {
    let prefix = format!("crops[{index}]");
    match crop.cropping_pattern {
        CroppingPattern::Intercropping => {
            if crop.intercropping_partners.is_empty() {
                out.push(Violation::new(
                    format!("{prefix}.intercropping_partners"),
                    "List the companion crops for an intercropping pattern",
                ));
            }
        }
        CroppingPattern::CropRotation => {
            if crop.rotation_sequence.len() < 2 {
                out.push(Violation::new(
                    format!("{prefix}.rotation_sequence"),
                    "A rotation needs at least two crops in sequence",
                ));
            }
        }
        _ => {
            if !crop.intercropping_partners.is_empty() {
                out.push(Violation::new(
                    format!("{prefix}.intercropping_partners"),
                    "Partners are only valid for an intercropping pattern",
                ));
            }
            if !crop.rotation_sequence.is_empty() {
                out.push(Violation::new(
                    format!("{prefix}.rotation_sequence"),
                    "A rotation sequence is only valid for a crop rotation pattern",
                ));
            }
        }
    }
}

fn refine_management(section: &ManagementPracticesSection, out: &mut Vec<Violation>) {
    let soil = &section.soil_management;
    if soil.uses_compost
        && (soil.compost_source.is_empty() || soil.compost_source == NONE_SENTINEL)
    {
        out.push(Violation::new(
            "management_practices.soil_management.compost_source",
            "Compost source is required when compost is used",
        ));
    }

    if section.fertilization.uses_fertilizers && section.fertilization.applications.is_empty() {
        out.push(Violation::new(
            "management_practices.fertilization.applications",
            "Add at least one fertilizer application or switch fertilizer use off",
        ));
    }

    if section.water_management.water_sources.is_empty() {
        out.push(Violation::new(
            "management_practices.water_management.water_sources",
            "Select at least one water source",
        ));
    }
}

fn refine_equipment(section: &EquipmentEnergySection, out: &mut Vec<Violation>) {
    let infra = &section.infrastructure;

    for facility in &infra.storage_facilities {
        if !STORAGE_FACILITIES.contains(&facility.as_str()) {
            out.push(Violation::new(
                "equipment_energy.infrastructure.storage_facilities",
                format!("'{facility}' is not a recognised storage facility"),
            ));
        }
    }

    let has_none = infra
        .storage_facilities
        .iter()
        .any(|f| f == NONE_SENTINEL);
    if has_none && infra.storage_facilities.len() > 1 {
        out.push(Violation::new(
            "equipment_energy.infrastructure.storage_facilities",
            "'No dedicated storage' excludes every other storage facility",
        ));
    }

    if infra.transport.transport_modes.is_empty() {
        out.push(Violation::new(
            "equipment_energy.infrastructure.transport.transport_modes",
            "Select at least one transport mode",
        ));
    }
}

// ============================================================================
// Step-level validators
// ============================================================================

pub fn validate_farm_profile(profile: &FarmProfileSection) -> Vec<Violation> {
    let mut out = derive_violations("farm_profile", profile);
    refine_farm_profile(profile, &mut out);
    out
}

pub fn validate_crops(crops: &[CropProduction]) -> Vec<Violation> {
    let mut out = Vec::new();
    if crops.is_empty() {
        out.push(Violation::new("crops", "Add at least one crop"));
        return out;
    }
    if crops.len() > MAX_CROPS {
        out.push(Violation::new(
            "crops",
            format!("At most {MAX_CROPS} crops per assessment"),
        ));
    }
    for (index, crop) in crops.iter().enumerate() {
        out.extend(derive_violations(&format!("crops[{index}]"), crop));
        refine_crop(index, crop, &mut out);
    }
    out
}

pub fn validate_management(section: &ManagementPracticesSection) -> Vec<Violation> {
    let mut out = derive_violations("management_practices", section);
    refine_management(section, &mut out);
    out
}

pub fn validate_pest_management(section: &PestManagementSection) -> Vec<Violation> {
    derive_violations("pest_management", section)
}

pub fn validate_equipment_energy(section: &EquipmentEnergySection) -> Vec<Violation> {
    let mut out = derive_violations("equipment_energy", section);
    refine_equipment(section, &mut out);
    out
}

pub fn validate_parameters(parameters: &AssessmentParameters) -> Vec<Violation> {
    derive_violations("assessment_parameters", parameters)
}

/// Validate the whole draft; the composition of every step validator.
/// Soft warnings (total allocation) are NOT part of this set.
pub fn validate_draft(draft: &AssessmentDraft) -> Vec<Violation> {
    let mut out = Vec::new();
    out.extend(validate_farm_profile(&draft.farm_profile));
    out.extend(validate_crops(&draft.crops));
    out.extend(validate_management(&draft.management_practices));
    out.extend(validate_pest_management(&draft.pest_management));
    out.extend(validate_equipment_energy(&draft.equipment_energy));
    out.extend(validate_parameters(&draft.assessment_parameters));
    out
}
