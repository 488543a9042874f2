//! Derived-value calculators used by the intake wizard
//!
//! Pure functions over draft fields. The wizard calls these after every
//! relevant edit so the derived fields on screen never go stale.

use crate::models::{CropProduction, FarmProfileSection, SeasonalFactor};
use crate::types::{round2, MonthSet};

/// Reference yields in kg per hectare for common West African crops,
/// keyed by lowercased crop name. Averages of regional statistics, used
/// only as suggestions the farmer can overwrite.
pub const REFERENCE_YIELDS: &[(&str, f64)] = &[
    ("maize", 1800.0),
    ("rice", 2700.0),
    ("cassava", 14000.0),
    ("yam", 8000.0),
    ("plantain", 10000.0),
    ("cocoa", 450.0),
    ("sorghum", 1100.0),
    ("millet", 900.0),
    ("groundnut", 1300.0),
    ("cowpea", 800.0),
    ("soybean", 1000.0),
    ("tomato", 7500.0),
    ("pepper", 5000.0),
    ("okra", 4000.0),
    ("cashew", 550.0),
];

/// Fallback when a crop name has no reference entry.
pub const DEFAULT_YIELD_KG_PER_HA: f64 = 1000.0;

/// Default growing period when month sets are empty.
pub const DEFAULT_GROWING_PERIOD_DAYS: u32 = 120;

/// Reference yield in kg/ha for a crop name. Lookup is case-insensitive
/// and ignores surrounding whitespace; unknown crops get the generic
/// smallholder default.
pub fn reference_yield(crop_name: &str) -> f64 {
    let needle = crop_name.trim().to_lowercase();
    REFERENCE_YIELDS
        .iter()
        .find(|(name, _)| *name == needle)
        .map(|(_, value)| *value)
        .unwrap_or(DEFAULT_YIELD_KG_PER_HA)
}

/// Estimated annual production in kg for a crop over an area: reference
/// yield times hectares. A pre-fill suggestion only, never applied without
/// an explicit request.
pub fn estimate_yield(crop_name: &str, area_ha: f64) -> f64 {
    reference_yield(crop_name) * area_ha.max(0.0)
}

/// Share of the farm a crop occupies, as a percentage rounded to two
/// decimals. A zero or non-positive total yields 0 rather than dividing.
pub fn area_percentage(area_allocated: f64, total_farm_size: f64) -> f64 {
    if total_farm_size <= 0.0 {
        return 0.0;
    }
    round2(area_allocated / total_farm_size * 100.0)
}

/// Growing period in days derived from planting and harvesting month sets.
///
/// Uses the average month of each set; a non-positive gap is wrapped into
/// the next year. Result is clamped to 1..=360 days, with a 120-day default
/// when either set is empty.
pub fn growing_period_from_months(planting: &MonthSet, harvesting: &MonthSet) -> u32 {
    if planting.is_empty() || harvesting.is_empty() {
        return DEFAULT_GROWING_PERIOD_DAYS;
    }
    let avg = |months: &MonthSet| -> f64 {
        months.iter().map(|&m| f64::from(m)).sum::<f64>() / months.len() as f64
    };
    let mut gap = avg(harvesting) - avg(planting);
    if gap <= 0.0 {
        gap += 12.0;
    }
    let days = (gap * 30.0).round() as i64;
    days.clamp(1, 360) as u32
}

/// Seasonal factor for a planting month set, against the April..=October
/// wet window: wet-season when every planting month falls inside it,
/// dry-season when none do, year-round for mixed or empty sets.
pub fn seasonal_factor_for(planting: &MonthSet) -> SeasonalFactor {
    if planting.is_empty() {
        return SeasonalFactor::YearRound;
    }
    let in_wet = |m: &u8| (4..=10).contains(m);
    if planting.iter().all(in_wet) {
        SeasonalFactor::WetSeason
    } else if !planting.iter().any(in_wet) {
        SeasonalFactor::DrySeason
    } else {
        SeasonalFactor::YearRound
    }
}

/// Soft check that crop areas do not exceed the farm. Over-allocation is a
/// warning, not a hard failure, since intercropped fields legitimately
/// double-count area.
pub fn validate_total_allocation(
    profile: &FarmProfileSection,
    crops: &[CropProduction],
) -> Option<String> {
    let allocated: f64 = crops.iter().map(|c| c.area_allocated).sum();
    if allocated > profile.total_farm_size && profile.total_farm_size > 0.0 {
        Some(format!(
            "Allocated area ({:.2} ha) exceeds total farm size ({:.2} ha); \
             double-check unless fields are intercropped",
            allocated, profile.total_farm_size
        ))
    } else {
        None
    }
}

/// Yield in kg/ha implied by entered production and area; `None` when the
/// area is not yet filled in.
pub fn yield_per_hectare(annual_production: f64, area_allocated: f64) -> Option<f64> {
    if area_allocated <= 0.0 {
        return None;
    }
    Some(round2(annual_production / area_allocated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::month_set;

    #[test]
    fn test_reference_yield_known_crops() {
        assert_eq!(reference_yield("Maize"), 1800.0);
        assert_eq!(reference_yield("  cassava "), 14000.0);
        assert_eq!(reference_yield("COCOA"), 450.0);
    }

    #[test]
    fn test_reference_yield_unknown_falls_back() {
        assert_eq!(reference_yield("dragonfruit"), DEFAULT_YIELD_KG_PER_HA);
        assert_eq!(reference_yield(""), DEFAULT_YIELD_KG_PER_HA);
    }

    #[test]
    fn test_estimate_yield_scales_with_area() {
        assert_eq!(estimate_yield("maize", 2.0), 3600.0);
        assert_eq!(estimate_yield("maize", 0.0), 0.0);
        assert_eq!(estimate_yield("maize", -1.0), 0.0);
    }

    #[test]
    fn test_area_percentage() {
        assert_eq!(area_percentage(1.0, 4.0), 25.0);
        assert_eq!(area_percentage(1.0, 3.0), 33.33);
        assert_eq!(area_percentage(2.0, 0.0), 0.0);
    }

    #[test]
    fn test_growing_period_simple_gap() {
        // Plant April/May (avg 4.5), harvest August/September (avg 8.5).
        let days = growing_period_from_months(&month_set(&[4, 5]), &month_set(&[8, 9]));
        assert_eq!(days, 120);
    }

    #[test]
    fn test_growing_period_wraps_year_boundary() {
        // Plant November, harvest February: gap -9 wraps to 3 months.
        let days = growing_period_from_months(&month_set(&[11]), &month_set(&[2]));
        assert_eq!(days, 90);
    }

    #[test]
    fn test_growing_period_same_month_wraps_full_year() {
        let days = growing_period_from_months(&month_set(&[6]), &month_set(&[6]));
        assert_eq!(days, 360);
    }

    #[test]
    fn test_growing_period_defaults_on_empty() {
        let empty = MonthSet::new();
        assert_eq!(
            growing_period_from_months(&empty, &month_set(&[8])),
            DEFAULT_GROWING_PERIOD_DAYS
        );
        assert_eq!(
            growing_period_from_months(&month_set(&[4]), &empty),
            DEFAULT_GROWING_PERIOD_DAYS
        );
    }

    #[test]
    fn test_seasonal_factor_windows() {
        assert_eq!(
            seasonal_factor_for(&month_set(&[5, 6])),
            SeasonalFactor::WetSeason
        );
        assert_eq!(
            seasonal_factor_for(&month_set(&[12, 1])),
            SeasonalFactor::DrySeason
        );
        // March planting straddles the window boundary.
        assert_eq!(
            seasonal_factor_for(&month_set(&[3, 5])),
            SeasonalFactor::YearRound
        );
        assert_eq!(
            seasonal_factor_for(&MonthSet::new()),
            SeasonalFactor::YearRound
        );
    }

    #[test]
    fn test_allocation_warning_only_when_exceeded() {
        let mut profile = FarmProfileSection::default();
        profile.total_farm_size = 2.5;

        let mut crop_a = CropProduction::default();
        crop_a.area_allocated = 1.5;
        let mut crop_b = CropProduction::default();
        crop_b.area_allocated = 1.5;

        let warning = validate_total_allocation(&profile, &[crop_a.clone(), crop_b]);
        assert!(warning.is_some());
        assert!(warning.unwrap().contains("3.00 ha"));

        assert!(validate_total_allocation(&profile, &[crop_a]).is_none());
    }

    #[test]
    fn test_yield_per_hectare() {
        assert_eq!(yield_per_hectare(1800.0, 1.0), Some(1800.0));
        assert_eq!(yield_per_hectare(1000.0, 3.0), Some(333.33));
        assert_eq!(yield_per_hectare(1000.0, 0.0), None);
    }
}
