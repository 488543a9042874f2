//! Property tests for the derived-value calculators
//!
//! The wizard recomputes these after every edit, so they must hold over the
//! whole input range, not just the happy path.

use proptest::prelude::*;

use shared::calculators::{
    area_percentage, estimate_yield, growing_period_from_months, reference_yield,
    validate_total_allocation,
};
use shared::models::{CropProduction, FarmProfileSection};
use shared::types::month_set;

// ============================================================================
// Area percentage: bounded and total
// ============================================================================
// For any allocation A and farm size F > 0, the share is (A / F) * 100
// rounded to two decimals; a non-positive F always yields zero.

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn area_percentage_is_nonnegative_and_finite(
        area in 0.0f64..10000.0,
        total in 0.0f64..10000.0,
    ) {
        let share = area_percentage(area, total);
        prop_assert!(share.is_finite());
        prop_assert!(share >= 0.0);
    }

    #[test]
    fn area_percentage_at_most_100_when_within_farm(
        total in 0.1f64..10000.0,
        fraction in 0.0f64..=1.0,
    ) {
        let area = total * fraction;
        let share = area_percentage(area, total);
        // Two-decimal rounding can push an exact 100 no higher.
        prop_assert!(share <= 100.0 + 1e-9, "share {} for {}/{}", share, area, total);
    }

    #[test]
    fn area_percentage_zero_for_empty_farm(area in 0.0f64..10000.0) {
        prop_assert_eq!(area_percentage(area, 0.0), 0.0);
        prop_assert_eq!(area_percentage(area, -1.0), 0.0);
    }
}

// ============================================================================
// Growing period: bounded and order-insensitive
// ============================================================================
// For any non-empty month sets the derived period lies in [1, 360] days,
// and depends only on set membership, never on entry order.

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn growing_period_within_bounds(
        planting in proptest::collection::vec(1u8..=12, 1..6),
        harvesting in proptest::collection::vec(1u8..=12, 1..6),
    ) {
        let days = growing_period_from_months(&month_set(&planting), &month_set(&harvesting));
        prop_assert!((1..=360).contains(&days), "period {} days", days);
    }

    #[test]
    fn growing_period_ignores_entry_order(
        mut planting in proptest::collection::vec(1u8..=12, 1..6),
        mut harvesting in proptest::collection::vec(1u8..=12, 1..6),
    ) {
        let forward = growing_period_from_months(&month_set(&planting), &month_set(&harvesting));
        planting.reverse();
        harvesting.reverse();
        let reversed = growing_period_from_months(&month_set(&planting), &month_set(&harvesting));
        prop_assert_eq!(forward, reversed);
    }
}

// ============================================================================
// Allocation warning: raised exactly when allocations exceed the farm
// ============================================================================

fn profile_with_size(total: f64) -> FarmProfileSection {
    let mut profile = FarmProfileSection::default();
    profile.total_farm_size = total;
    profile
}

fn crop_with_area(area: f64) -> CropProduction {
    let mut crop = CropProduction::default();
    crop.area_allocated = area;
    crop
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn allocation_warning_iff_exceeded(
        total in 0.1f64..1000.0,
        areas in proptest::collection::vec(0.01f64..500.0, 1..5),
    ) {
        let profile = profile_with_size(total);
        let crops: Vec<CropProduction> = areas.iter().copied().map(crop_with_area).collect();
        let allocated: f64 = areas.iter().sum();

        let warning = validate_total_allocation(&profile, &crops);
        prop_assert_eq!(warning.is_some(), allocated > total);
    }
}

// ============================================================================
// Yield estimates: always positive
// ============================================================================

proptest! {
    #[test]
    fn reference_yield_always_positive(name in "\\PC{0,40}") {
        prop_assert!(reference_yield(&name) > 0.0);
    }

    #[test]
    fn estimate_yield_scales_linearly(name in "\\PC{0,40}", area in 0.0f64..1000.0) {
        let estimate = estimate_yield(&name, area);
        prop_assert!((estimate - reference_yield(&name) * area).abs() < 1e-6);
    }
}
