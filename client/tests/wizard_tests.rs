//! Wizard state machine tests
//!
//! Walks the six-step intake flow the way the form drives it: edits through
//! the update methods, navigation gated on validation, and events drained
//! after each operation.

use farm_lca_client::wizard::{AssessmentWizard, Step, WizardEvent};
use shared::models::{Country, CropCategory, FarmType, FertilizerApplication, SeasonalFactor};
use shared::types::month_set;

/// Fill the farm profile step with a valid Ghanaian smallholding.
fn fill_farm_profile(wizard: &mut AssessmentWizard) {
    wizard.update_farm_profile(|profile| {
        profile.farmer_name = "Ama Mensah".to_string();
        profile.farm_name = "Mensah Family Farm".to_string();
        profile.country = Country::Ghana;
        profile.region = "Ashanti".to_string();
        profile.total_farm_size = 2.5;
        profile.farming_experience = 12;
    });
}

/// Fill the first crop row with a valid maize record.
fn fill_first_crop(wizard: &mut AssessmentWizard) {
    wizard.update_crop(0, |crop| {
        crop.name = "Maize".to_string();
        crop.category = CropCategory::Cereals;
        crop.area_allocated = 1.5;
        crop.annual_production = 2700.0;
        crop.seasonality.planting_months = month_set(&[4, 5]);
        crop.seasonality.harvesting_months = month_set(&[8, 9]);
    });
}

#[test]
fn test_new_wizard_starts_at_farm_profile() {
    let wizard = AssessmentWizard::new();
    assert_eq!(wizard.current_step(), Step::FarmProfile);
    assert_eq!(wizard.draft().crops.len(), 1);
    assert!(wizard.errors().is_empty());
}

#[test]
fn test_go_next_blocks_on_invalid_step() {
    let mut wizard = AssessmentWizard::new();
    assert_eq!(wizard.go_next(), None);
    assert_eq!(wizard.current_step(), Step::FarmProfile);
    assert!(!wizard.errors().is_empty());
    assert!(wizard.errors().keys().any(|k| k.contains("farmer_name")));

    let events = wizard.take_events();
    assert!(events.iter().any(|e| matches!(
        e,
        WizardEvent::ValidationFailed {
            step: Step::FarmProfile,
            ..
        }
    )));
}

#[test]
fn test_go_next_advances_and_clears_errors() {
    let mut wizard = AssessmentWizard::new();
    assert_eq!(wizard.go_next(), None);
    fill_farm_profile(&mut wizard);
    assert_eq!(wizard.go_next(), Some(Step::Crops));
    assert!(wizard.errors().is_empty());

    let events = wizard.take_events();
    assert!(events.contains(&WizardEvent::StepChanged {
        from: Step::FarmProfile,
        to: Step::Crops,
    }));
}

#[test]
fn test_go_previous_never_validates() {
    let mut wizard = AssessmentWizard::new();
    fill_farm_profile(&mut wizard);
    wizard.go_next();
    // Break the profile, then go back; no validation runs.
    wizard.update_farm_profile(|p| p.farmer_name.clear());
    assert_eq!(wizard.go_previous(), Some(Step::FarmProfile));
    assert!(wizard.errors().is_empty());
}

#[test]
fn test_farm_type_tracks_size() {
    let mut wizard = AssessmentWizard::new();
    fill_farm_profile(&mut wizard);
    assert_eq!(wizard.draft().farm_profile.farm_type, FarmType::SmallScale);

    wizard.update_farm_profile(|p| p.total_farm_size = 50.0);
    assert_eq!(wizard.draft().farm_profile.farm_type, FarmType::Commercial);

    // An explicit cooperative choice is left alone.
    wizard.update_farm_profile(|p| p.farm_type = FarmType::Cooperative);
    wizard.update_farm_profile(|p| p.total_farm_size = 1.0);
    assert_eq!(wizard.draft().farm_profile.farm_type, FarmType::Cooperative);
}

#[test]
fn test_crop_edits_refresh_derived_values() {
    let mut wizard = AssessmentWizard::new();
    fill_farm_profile(&mut wizard);
    fill_first_crop(&mut wizard);

    let crop = &wizard.draft().crops[0];
    assert_eq!(crop.area_share_percent, 60.0);
    assert_eq!(crop.seasonality.growing_period_days, 120);
    assert_eq!(crop.seasonality.season_tags, vec![SeasonalFactor::WetSeason]);
    assert_eq!(crop.yield_per_hectare, 1800.0);

    let events = wizard.take_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, WizardEvent::DerivedValuesUpdated { crop_index: 0 })));
}

#[test]
fn test_crop_list_limits() {
    let mut wizard = AssessmentWizard::new();
    // The last crop row cannot be removed.
    assert!(!wizard.remove_crop(0));

    for _ in 0..9 {
        assert!(wizard.add_crop().is_some());
    }
    assert_eq!(wizard.draft().crops.len(), 10);
    assert!(wizard.add_crop().is_none());
    let events = wizard.take_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, WizardEvent::Warning(msg) if msg.contains("10"))));

    assert!(wizard.remove_crop(5));
    assert_eq!(wizard.draft().crops.len(), 9);
}

#[test]
fn test_over_allocation_emits_warning() {
    let mut wizard = AssessmentWizard::new();
    fill_farm_profile(&mut wizard);
    fill_first_crop(&mut wizard);
    wizard.take_events();

    wizard.add_crop();
    wizard.update_crop(1, |crop| {
        crop.name = "Cassava".to_string();
        crop.area_allocated = 1.5;
        crop.annual_production = 15000.0;
    });

    let events = wizard.take_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, WizardEvent::Warning(msg) if msg.contains("exceeds total farm size"))));
}

#[test]
fn test_yield_estimate_application() {
    let mut wizard = AssessmentWizard::new();
    fill_farm_profile(&mut wizard);
    wizard.update_crop(0, |crop| {
        crop.name = "Maize".to_string();
        crop.area_allocated = 2.0;
    });

    assert_eq!(wizard.suggest_yield(0), Some(1800.0));
    wizard.apply_yield_estimate(0);
    assert_eq!(wizard.draft().crops[0].annual_production, 3600.0);
    assert_eq!(wizard.draft().crops[0].yield_per_hectare, 1800.0);
}

#[test]
fn test_compost_toggle_resets_source() {
    let mut wizard = AssessmentWizard::new();
    wizard.set_uses_compost(true);
    wizard.update_management(|m| {
        m.soil_management.compost_source = "farm_yard_manure".to_string();
        m.soil_management.compost_application_rate = Some(500.0);
    });

    wizard.set_uses_compost(false);
    let soil = &wizard.draft().management_practices.soil_management;
    assert_eq!(soil.compost_source, "none");
    assert!(soil.compost_application_rate.is_none());
}

#[test]
fn test_storage_facility_none_is_exclusive() {
    let mut wizard = AssessmentWizard::new();
    wizard.toggle_storage_facility("warehouse");
    wizard.toggle_storage_facility("crib");
    assert_eq!(
        wizard.draft().equipment_energy.infrastructure.storage_facilities,
        vec!["warehouse", "crib"]
    );

    wizard.toggle_storage_facility("none");
    assert_eq!(
        wizard.draft().equipment_energy.infrastructure.storage_facilities,
        vec!["none"]
    );

    wizard.toggle_storage_facility("warehouse");
    assert_eq!(
        wizard.draft().equipment_energy.infrastructure.storage_facilities,
        vec!["warehouse"]
    );

    // Toggling a selected facility deselects it.
    wizard.toggle_storage_facility("warehouse");
    assert!(wizard
        .draft()
        .equipment_energy
        .infrastructure
        .storage_facilities
        .is_empty());
}

#[test]
fn test_full_walk_to_review() {
    let mut wizard = AssessmentWizard::new();
    fill_farm_profile(&mut wizard);
    assert_eq!(wizard.go_next(), Some(Step::Crops));

    fill_first_crop(&mut wizard);
    assert_eq!(wizard.go_next(), Some(Step::Management));

    // Water sources are required before leaving the management step.
    assert_eq!(wizard.go_next(), None);
    assert!(wizard
        .errors()
        .keys()
        .any(|k| k.contains("water_sources")));
    wizard.update_management(|m| {
        m.water_management.water_sources = vec!["rainfall".to_string()];
    });
    assert_eq!(wizard.go_next(), Some(Step::PestManagement));
    assert_eq!(wizard.go_next(), Some(Step::EquipmentEnergy));

    // Transport modes are required before leaving the equipment step.
    assert_eq!(wizard.go_next(), None);
    wizard.update_equipment_energy(|e| {
        e.infrastructure.transport.transport_modes = vec!["truck".to_string()];
    });
    assert_eq!(wizard.go_next(), Some(Step::Review));

    let summary = wizard.review_summary();
    assert_eq!(summary.farm_name, "Mensah Family Farm");
    assert_eq!(summary.country, "Ghana");
    assert_eq!(summary.crop_count, 1);
    assert!((summary.total_area_allocated - 1.5).abs() < 1e-9);
    assert!((summary.remaining_area - 1.0).abs() < 1e-9);
    assert!(summary.warnings.is_empty());
    assert!(!summary.comprehensive);

    // Review is the last step.
    assert_eq!(wizard.go_next(), None);
}

#[test]
fn test_comprehensive_flag_follows_management_detail() {
    let mut wizard = AssessmentWizard::new();
    fill_farm_profile(&mut wizard);
    fill_first_crop(&mut wizard);
    assert!(!wizard.review_summary().comprehensive);

    wizard.update_management(|m| {
        m.fertilization.uses_fertilizers = true;
        m.fertilization.applications.push(FertilizerApplication {
            fertilizer_type: "NPK 15-15-15".to_string(),
            npk_ratio: Some("15-15-15".to_string()),
            application_rate: 250.0,
            applications_per_season: 2,
            cost: None,
        });
    });
    assert!(wizard.review_summary().comprehensive);
}
