//! Common value types and input coercion helpers

use std::collections::BTreeSet;

/// A set of calendar months, 1 (January) through 12 (December).
///
/// Stored as an ordered set so that derived values depend only on
/// membership, never on entry order.
pub type MonthSet = BTreeSet<u8>;

/// Sentinel accepted by optional numeric inputs when the farmer does not
/// know the value.
pub const NOT_KNOWN: &str = "Not known";

/// Sentinel for "no value selected" in optional choice fields
/// (compost source, storage facility).
pub const NONE_SENTINEL: &str = "none";

/// Coerce a raw optional numeric input to an absent value instead of a
/// validation failure. Empty strings and the "Not known" sentinel are
/// treated as absent; anything else must parse as a finite number.
pub fn coerce_optional_number(raw: &str) -> Result<Option<f64>, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NOT_KNOWN) {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err("Expected a number or \"Not known\""),
    }
}

/// Round to two decimal places, the precision used for percentages and
/// hectare shares throughout the intake form.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Build a month set from a slice, silently dropping out-of-range entries.
/// Validation reports out-of-range months separately; this keeps the
/// derived calculations total.
pub fn month_set(months: &[u8]) -> MonthSet {
    months
        .iter()
        .copied()
        .filter(|m| (1..=12).contains(m))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_optional_number() {
        assert_eq!(coerce_optional_number(""), Ok(None));
        assert_eq!(coerce_optional_number("   "), Ok(None));
        assert_eq!(coerce_optional_number("Not known"), Ok(None));
        assert_eq!(coerce_optional_number("not known"), Ok(None));
        assert_eq!(coerce_optional_number("6.5"), Ok(Some(6.5)));
        assert_eq!(coerce_optional_number(" 12 "), Ok(Some(12.0)));
        assert!(coerce_optional_number("abc").is_err());
        assert!(coerce_optional_number("NaN").is_err());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(66.666666), 66.67);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_month_set_filters_invalid() {
        let set = month_set(&[3, 4, 0, 13, 4]);
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![3, 4]);
    }
}
