//! WebAssembly module for the Farm LCA intake client
//!
//! Provides client-side computation for:
//! - Derived crop values (area share, growing period, yield suggestions)
//! - Offline draft validation
//! - Draft to submission-request transformation

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::calculators::*;
pub use shared::models::*;
pub use shared::types::*;

use shared::submission::build_submission;
use shared::validation::{validate_draft, Violation};

/// Reference yield in kg/ha for a crop name.
#[wasm_bindgen]
pub fn suggest_yield(crop_name: &str) -> f64 {
    reference_yield(crop_name)
}

/// Suggested annual production in kg for a crop over an area.
#[wasm_bindgen]
pub fn suggest_production(crop_name: &str, area_ha: f64) -> f64 {
    estimate_yield(crop_name, area_ha)
}

/// Percentage of the farm one crop occupies.
#[wasm_bindgen]
pub fn crop_area_percentage(area_allocated: f64, total_farm_size: f64) -> f64 {
    area_percentage(area_allocated, total_farm_size)
}

/// Growing period in days from planting/harvesting month arrays.
#[wasm_bindgen]
pub fn growing_period_days(planting: &[u8], harvesting: &[u8]) -> u32 {
    growing_period_from_months(&month_set(planting), &month_set(harvesting))
}

/// Season classification ("WetSeason", "DrySeason", "YearRound") for a
/// planting month array.
#[wasm_bindgen]
pub fn season_for_months(planting: &[u8]) -> String {
    match seasonal_factor_for(&month_set(planting)) {
        SeasonalFactor::WetSeason => "WetSeason".to_string(),
        SeasonalFactor::DrySeason => "DrySeason".to_string(),
        SeasonalFactor::YearRound => "YearRound".to_string(),
    }
}

/// Parse an optional numeric input. Empty strings and "Not known" read as
/// absent; anything else must be a finite number.
#[wasm_bindgen]
pub fn parse_optional_number(raw: &str) -> Result<Option<f64>, JsValue> {
    coerce_optional_number(raw).map_err(JsValue::from_str)
}

/// Farm type name for a farm size in hectares.
#[wasm_bindgen]
pub fn farm_type_for_size(total_farm_size: f64) -> String {
    format!("{:?}", FarmType::for_size(total_farm_size))
}

fn violations_to_js(violations: &[Violation]) -> Result<JsValue, JsValue> {
    let entries: Vec<serde_json::Value> = violations
        .iter()
        .map(|v| {
            serde_json::json!({
                "field": v.field,
                "message": v.message,
            })
        })
        .collect();
    let json = serde_json::to_string(&entries)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))?;
    Ok(JsValue::from_str(&json))
}

/// Validate a draft JSON document. Returns a JSON array of
/// `{field, message}` violations; empty when the draft is valid.
#[wasm_bindgen]
pub fn validate_draft_json(draft_json: &str) -> Result<JsValue, JsValue> {
    let draft: AssessmentDraft = serde_json::from_str(draft_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid draft JSON: {}", e)))?;
    violations_to_js(&validate_draft(&draft))
}

/// Transform a draft JSON document into the backend request body.
/// Fails when the draft does not parse or does not validate.
#[wasm_bindgen]
pub fn build_submission_json(draft_json: &str) -> Result<String, JsValue> {
    let draft: AssessmentDraft = serde_json::from_str(draft_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid draft JSON: {}", e)))?;

    let violations = validate_draft(&draft);
    if !violations.is_empty() {
        return Err(JsValue::from_str(&format!(
            "Draft has {} validation issue(s)",
            violations.len()
        )));
    }

    serde_json::to_string(&build_submission(&draft))
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Soft over-allocation check. Returns the warning message or an empty
/// string when allocation is within the farm size.
#[wasm_bindgen]
pub fn allocation_warning(draft_json: &str) -> Result<String, JsValue> {
    let draft: AssessmentDraft = serde_json::from_str(draft_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid draft JSON: {}", e)))?;
    Ok(validate_total_allocation(&draft.farm_profile, &draft.crops).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_yield_matches_reference_table() {
        assert_eq!(suggest_yield("maize"), 1800.0);
        assert_eq!(suggest_yield("unknown crop"), 1000.0);
        assert_eq!(suggest_production("maize", 2.0), 3600.0);
    }

    #[test]
    fn test_growing_period_days() {
        assert_eq!(growing_period_days(&[4, 5], &[8, 9]), 120);
        assert_eq!(growing_period_days(&[], &[8]), 120);
    }

    #[test]
    fn test_season_for_months() {
        assert_eq!(season_for_months(&[5]), "WetSeason");
        assert_eq!(season_for_months(&[12]), "DrySeason");
        assert_eq!(season_for_months(&[]), "YearRound");
    }

    #[test]
    fn test_farm_type_for_size() {
        assert_eq!(farm_type_for_size(1.0), "Smallholder");
        assert_eq!(farm_type_for_size(30.0), "Commercial");
    }

    #[test]
    fn test_crop_area_percentage() {
        assert_eq!(crop_area_percentage(1.0, 4.0), 25.0);
        assert_eq!(crop_area_percentage(1.0, 0.0), 0.0);
    }
}
