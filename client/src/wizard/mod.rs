//! Six-step assessment intake wizard
//!
//! The wizard owns the draft and is the only writer to it. Edits go through
//! the `update_*` methods so derived fields are recomputed immediately, and
//! step changes go through [`AssessmentWizard::go_next`], which gates on the
//! current step's validators. Interested observers drain the event queue
//! with [`AssessmentWizard::take_events`].

use std::collections::{BTreeMap, VecDeque};

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use shared::calculators::{
    area_percentage, estimate_yield, growing_period_from_months, reference_yield,
    seasonal_factor_for, validate_total_allocation, yield_per_hectare,
};
use shared::models::{
    AssessmentDraft, AssessmentParameters, AssessmentResult, CropProduction, EnergySource,
    EquipmentEnergySection, EquipmentEntry, FarmProfileSection, FarmType, FertilizerApplication,
    ManagementPracticesSection, PestManagementSection, PesticideApplication,
};
use shared::submission::{build_submission, AssessmentRequest};
use shared::types::NONE_SENTINEL;
use shared::validation::{
    validate_crops, validate_draft, validate_equipment_energy, validate_farm_profile,
    validate_management, validate_parameters, validate_pest_management, Violation, MAX_CROPS,
};

use crate::api::AssessmentApiClient;
use crate::error::{AppError, AppResult};

/// The six intake steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    FarmProfile,
    Crops,
    Management,
    PestManagement,
    EquipmentEnergy,
    Review,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::FarmProfile,
        Step::Crops,
        Step::Management,
        Step::PestManagement,
        Step::EquipmentEnergy,
        Step::Review,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Option<Step> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(self) -> Option<Step> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::FarmProfile => "Farm Profile",
            Step::Crops => "Crop Production",
            Step::Management => "Management Practices",
            Step::PestManagement => "Pest Management",
            Step::EquipmentEnergy => "Equipment & Energy",
            Step::Review => "Review & Submit",
        }
    }
}

/// Events emitted by wizard operations, drained via `take_events`.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    StepChanged { from: Step, to: Step },
    ValidationFailed { step: Step, violation_count: usize },
    DerivedValuesUpdated { crop_index: usize },
    Warning(String),
    Submitted { assessment_id: String },
}

/// Snapshot shown on the review step.
#[derive(Debug, Clone)]
pub struct ReviewSummary {
    pub farm_name: String,
    pub country: String,
    pub region: String,
    pub crop_count: usize,
    pub total_area_allocated: f64,
    pub remaining_area: f64,
    pub comprehensive: bool,
    pub warnings: Vec<String>,
}

/// Owned wizard state: the draft, the current step, the per-field error
/// map for the current step, and the pending event queue.
pub struct AssessmentWizard {
    id: Uuid,
    draft: AssessmentDraft,
    step: Step,
    errors: BTreeMap<String, String>,
    events: VecDeque<WizardEvent>,
}

impl Default for AssessmentWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentWizard {
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        debug!(draft_id = %id, "starting new assessment draft");
        Self {
            id,
            draft: AssessmentDraft::default(),
            step: Step::FarmProfile,
            errors: BTreeMap::new(),
            events: VecDeque::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn draft(&self) -> &AssessmentDraft {
        &self.draft
    }

    pub fn current_step(&self) -> Step {
        self.step
    }

    /// Field errors from the most recent failed `go_next` or `submit`,
    /// keyed by field path.
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Drain all pending events in emission order.
    pub fn take_events(&mut self) -> Vec<WizardEvent> {
        self.events.drain(..).collect()
    }

    // ------------------------------------------------------------------
    // Section edits
    // ------------------------------------------------------------------

    /// Edit the farm profile. Keeps `farm_type` in sync with the farm size
    /// (unless an explicit non-size type was chosen) and refreshes every
    /// crop's area share, since shares depend on the total size.
    pub fn update_farm_profile(&mut self, edit: impl FnOnce(&mut FarmProfileSection)) {
        edit(&mut self.draft.farm_profile);
        let profile = &mut self.draft.farm_profile;
        if !matches!(
            profile.farm_type,
            FarmType::Cooperative | FarmType::MixedLivestock
        ) && profile.total_farm_size > 0.0
        {
            profile.farm_type = FarmType::for_size(profile.total_farm_size);
        }
        for index in 0..self.draft.crops.len() {
            self.refresh_crop_derived(index);
        }
        self.check_allocation();
    }

    /// Edit one crop record; derived fields are recomputed afterwards.
    /// Out-of-range indices are ignored.
    pub fn update_crop(&mut self, index: usize, edit: impl FnOnce(&mut CropProduction)) {
        if let Some(crop) = self.draft.crops.get_mut(index) {
            edit(crop);
            self.refresh_crop_derived(index);
            self.check_allocation();
        }
    }

    pub fn update_management(&mut self, edit: impl FnOnce(&mut ManagementPracticesSection)) {
        edit(&mut self.draft.management_practices);
    }

    pub fn update_pest_management(&mut self, edit: impl FnOnce(&mut PestManagementSection)) {
        edit(&mut self.draft.pest_management);
    }

    pub fn update_equipment_energy(&mut self, edit: impl FnOnce(&mut EquipmentEnergySection)) {
        edit(&mut self.draft.equipment_energy);
    }

    pub fn update_parameters(&mut self, edit: impl FnOnce(&mut AssessmentParameters)) {
        edit(&mut self.draft.assessment_parameters);
    }

    /// Escape hatch for edits spanning several sections, such as restoring
    /// a saved draft. Every crop's derived fields are refreshed afterwards.
    pub fn update(&mut self, edit: impl FnOnce(&mut AssessmentDraft)) {
        edit(&mut self.draft);
        let profile = &mut self.draft.farm_profile;
        if !matches!(
            profile.farm_type,
            FarmType::Cooperative | FarmType::MixedLivestock
        ) && profile.total_farm_size > 0.0
        {
            profile.farm_type = FarmType::for_size(profile.total_farm_size);
        }
        for index in 0..self.draft.crops.len() {
            self.refresh_crop_derived(index);
        }
        self.check_allocation();
    }

    // ------------------------------------------------------------------
    // List operations (positional, per the form's row model)
    // ------------------------------------------------------------------

    /// Append a blank crop row. Fails silently at the 10-crop cap and
    /// reports it as a warning event instead.
    pub fn add_crop(&mut self) -> Option<usize> {
        if self.draft.crops.len() >= MAX_CROPS {
            self.events.push_back(WizardEvent::Warning(format!(
                "At most {MAX_CROPS} crops per assessment"
            )));
            return None;
        }
        self.draft.crops.push(CropProduction::default());
        Some(self.draft.crops.len() - 1)
    }

    /// Remove a crop row by position. The last remaining row cannot be
    /// removed; the crop step always shows at least one.
    pub fn remove_crop(&mut self, index: usize) -> bool {
        if self.draft.crops.len() <= 1 || index >= self.draft.crops.len() {
            return false;
        }
        self.draft.crops.remove(index);
        self.check_allocation();
        true
    }

    pub fn add_fertilizer_application(&mut self) -> usize {
        let list = &mut self.draft.management_practices.fertilization.applications;
        list.push(FertilizerApplication::default());
        list.len() - 1
    }

    pub fn remove_fertilizer_application(&mut self, index: usize) -> bool {
        let list = &mut self.draft.management_practices.fertilization.applications;
        if index >= list.len() {
            return false;
        }
        list.remove(index);
        true
    }

    pub fn add_pesticide_application(&mut self) -> usize {
        let list = &mut self.draft.pest_management.pesticide_applications;
        list.push(PesticideApplication::default());
        list.len() - 1
    }

    pub fn remove_pesticide_application(&mut self, index: usize) -> bool {
        let list = &mut self.draft.pest_management.pesticide_applications;
        if index >= list.len() {
            return false;
        }
        list.remove(index);
        true
    }

    pub fn add_equipment(&mut self, entry: EquipmentEntry) -> usize {
        let list = &mut self.draft.equipment_energy.equipment;
        list.push(entry);
        list.len() - 1
    }

    pub fn remove_equipment(&mut self, index: usize) -> bool {
        let list = &mut self.draft.equipment_energy.equipment;
        if index >= list.len() {
            return false;
        }
        list.remove(index);
        true
    }

    pub fn add_energy_source(&mut self, source: EnergySource) -> usize {
        let list = &mut self.draft.equipment_energy.energy_sources;
        list.push(source);
        list.len() - 1
    }

    pub fn remove_energy_source(&mut self, index: usize) -> bool {
        let list = &mut self.draft.equipment_energy.energy_sources;
        if index >= list.len() {
            return false;
        }
        list.remove(index);
        true
    }

    // ------------------------------------------------------------------
    // Coupled toggles
    // ------------------------------------------------------------------

    /// Switch compost use. Turning it off resets the source to the `"none"`
    /// sentinel and clears the application rate.
    pub fn set_uses_compost(&mut self, uses_compost: bool) {
        let soil = &mut self.draft.management_practices.soil_management;
        soil.uses_compost = uses_compost;
        if !uses_compost {
            soil.compost_source = NONE_SENTINEL.to_string();
            soil.compost_application_rate = None;
        }
    }

    /// Toggle a storage facility selection. Selecting `"none"` clears the
    /// rest; selecting anything else drops `"none"`.
    pub fn toggle_storage_facility(&mut self, facility: &str) {
        let facilities = &mut self.draft.equipment_energy.infrastructure.storage_facilities;
        if let Some(position) = facilities.iter().position(|f| f == facility) {
            facilities.remove(position);
            return;
        }
        if facility == NONE_SENTINEL {
            facilities.clear();
        } else {
            facilities.retain(|f| f != NONE_SENTINEL);
        }
        facilities.push(facility.to_string());
    }

    // ------------------------------------------------------------------
    // Derived values
    // ------------------------------------------------------------------

    /// Recompute all derived fields on one crop: area share, growing period,
    /// season tags, and yield per hectare.
    pub fn refresh_crop_derived(&mut self, index: usize) {
        let total = self.draft.farm_profile.total_farm_size;
        let Some(crop) = self.draft.crops.get_mut(index) else {
            return;
        };

        crop.area_share_percent = area_percentage(crop.area_allocated, total);
        crop.seasonality.growing_period_days = growing_period_from_months(
            &crop.seasonality.planting_months,
            &crop.seasonality.harvesting_months,
        );
        crop.seasonality.season_tags =
            vec![seasonal_factor_for(&crop.seasonality.planting_months)];
        crop.yield_per_hectare =
            yield_per_hectare(crop.annual_production, crop.area_allocated).unwrap_or(0.0);

        self.events
            .push_back(WizardEvent::DerivedValuesUpdated { crop_index: index });
    }

    /// Suggested yield in kg/ha for a crop row, from the reference table.
    pub fn suggest_yield(&self, index: usize) -> Option<f64> {
        self.draft
            .crops
            .get(index)
            .map(|crop| reference_yield(&crop.name))
    }

    /// Fill a crop's annual production from the reference yield and its
    /// allocated area. No-op when the area is not yet entered.
    pub fn apply_yield_estimate(&mut self, index: usize) {
        let Some(crop) = self.draft.crops.get(index) else {
            return;
        };
        if crop.area_allocated <= 0.0 {
            return;
        }
        let estimated = estimate_yield(&crop.name, crop.area_allocated);
        self.update_crop(index, |c| c.annual_production = estimated);
    }

    fn check_allocation(&mut self) {
        if let Some(warning) =
            validate_total_allocation(&self.draft.farm_profile, &self.draft.crops)
        {
            self.events.push_back(WizardEvent::Warning(warning));
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    fn validate_step(&self, step: Step) -> Vec<Violation> {
        match step {
            Step::FarmProfile => validate_farm_profile(&self.draft.farm_profile),
            Step::Crops => validate_crops(&self.draft.crops),
            Step::Management => validate_management(&self.draft.management_practices),
            Step::PestManagement => validate_pest_management(&self.draft.pest_management),
            Step::EquipmentEnergy => validate_equipment_energy(&self.draft.equipment_energy),
            Step::Review => validate_parameters(&self.draft.assessment_parameters),
        }
    }

    /// Whether a step passes its validators right now. Does not mutate the
    /// error map; used for progress indicators.
    pub fn is_step_complete(&self, step: Step) -> bool {
        self.validate_step(step).is_empty()
    }

    /// Advance to the next step if the current one validates. Returns the
    /// new step, or `None` if validation failed or this is the last step.
    pub fn go_next(&mut self) -> Option<Step> {
        let violations = self.validate_step(self.step);
        if !violations.is_empty() {
            warn!(
                draft_id = %self.id,
                step = ?self.step,
                count = violations.len(),
                "step validation failed"
            );
            self.events.push_back(WizardEvent::ValidationFailed {
                step: self.step,
                violation_count: violations.len(),
            });
            self.errors = violations
                .into_iter()
                .map(|v| (v.field, v.message))
                .collect();
            return None;
        }

        let next = self.step.next()?;
        self.errors.clear();
        self.events.push_back(WizardEvent::StepChanged {
            from: self.step,
            to: next,
        });
        self.step = next;
        Some(next)
    }

    /// Go back one step. Never validates; edits are preserved.
    pub fn go_previous(&mut self) -> Option<Step> {
        let previous = self.step.previous()?;
        self.errors.clear();
        self.events.push_back(WizardEvent::StepChanged {
            from: self.step,
            to: previous,
        });
        self.step = previous;
        Some(previous)
    }

    // ------------------------------------------------------------------
    // Review & submit
    // ------------------------------------------------------------------

    pub fn review_summary(&self) -> ReviewSummary {
        let profile = &self.draft.farm_profile;
        let total_area_allocated: f64 =
            self.draft.crops.iter().map(|c| c.area_allocated).sum();
        let warnings = validate_total_allocation(profile, &self.draft.crops)
            .into_iter()
            .collect();

        ReviewSummary {
            farm_name: profile.farm_name.clone(),
            country: profile.country.to_string(),
            region: profile.region.clone(),
            crop_count: self.draft.crops.len(),
            total_area_allocated,
            remaining_area: self.draft.remaining_area(),
            comprehensive: self.draft.is_comprehensive(),
            warnings,
        }
    }

    /// Validate the whole draft and build the request body without touching
    /// the network. Violations land in the error map the same way a failed
    /// `go_next` reports them.
    pub fn prepare_submission(&mut self) -> AppResult<AssessmentRequest> {
        let violations = validate_draft(&self.draft);
        if !violations.is_empty() {
            let count = violations.len();
            warn!(draft_id = %self.id, count, "draft failed final validation");
            self.events.push_back(WizardEvent::ValidationFailed {
                step: self.step,
                violation_count: count,
            });
            self.errors = violations
                .into_iter()
                .map(|v| (v.field, v.message))
                .collect();
            return Err(AppError::DraftInvalid(count));
        }
        self.errors.clear();
        self.check_allocation();
        Ok(build_submission(&self.draft))
    }

    /// Validate the whole draft and submit it. Comprehensive drafts go to
    /// the comprehensive endpoint; minimal ones to the simple endpoint.
    #[instrument(skip(self, client), fields(draft_id = %self.id))]
    pub async fn submit(&mut self, client: &AssessmentApiClient) -> AppResult<AssessmentResult> {
        let request = self.prepare_submission()?;
        let comprehensive = self.draft.is_comprehensive();
        info!(
            company = %request.company_name,
            foods = request.foods.len(),
            comprehensive,
            "submitting assessment"
        );

        let result = if comprehensive {
            client.create_comprehensive_assessment(&request).await?
        } else {
            client.create_assessment(&request).await?
        };

        info!(assessment_id = %result.id, "assessment created");
        self.events.push_back(WizardEvent::Submitted {
            assessment_id: result.id.clone(),
        });
        Ok(result)
    }
}
