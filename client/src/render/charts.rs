//! Chart data preparation for assessment results
//!
//! Impact values arrive in wildly different units and magnitudes, so the
//! bar chart normalizes against the largest absolute value and reports a
//! 0-100 score per category alongside the raw value.

use std::collections::HashMap;

use shared::models::{DataQuality, ImpactEntry};

/// Visual significance band for a normalized impact score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Significance {
    High,
    Medium,
    Low,
}

impl Significance {
    /// High at 70+ of the normalized scale, medium at 30+.
    pub fn for_score(score: f64) -> Self {
        if score >= 70.0 {
            Significance::High
        } else if score >= 30.0 {
            Significance::Medium
        } else {
            Significance::Low
        }
    }
}

/// One bar in the impact chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactDatum {
    pub name: String,
    pub raw_value: f64,
    pub unit: String,
    /// 0-100 relative to the largest absolute impact in the set.
    pub score: f64,
    pub significance: Significance,
}

/// Keys the backend uses for the climate category, in preference order.
const CLIMATE_KEYS: &[&str] = &[
    "climate_change",
    "ClimateChange",
    "Climate Change",
    "global_warming",
    "Global Warming Potential",
    "gwp",
];

/// Turn a snake_case impact key into a display label.
pub fn display_name(key: &str) -> String {
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a map of impacts into sorted chart data.
///
/// Zero and non-finite values are dropped, scores are scaled against the
/// largest absolute value, and only the top 8 categories are kept so the
/// chart stays readable.
pub fn normalize_impact_data(impacts: &HashMap<String, ImpactEntry>) -> Vec<ImpactDatum> {
    let mut values: Vec<(String, f64, String)> = impacts
        .iter()
        .filter_map(|(key, entry)| {
            let value = entry.value();
            if value == 0.0 || !value.is_finite() {
                return None;
            }
            Some((key.clone(), value, entry.unit().to_string()))
        })
        .collect();

    let max_abs = values
        .iter()
        .map(|(_, v, _)| v.abs())
        .fold(0.0_f64, f64::max);
    if max_abs == 0.0 {
        return Vec::new();
    }

    values.sort_by(|a, b| b.1.abs().partial_cmp(&a.1.abs()).unwrap_or(std::cmp::Ordering::Equal));
    values.truncate(8);

    values
        .into_iter()
        .map(|(key, raw_value, unit)| {
            let score = raw_value.abs() / max_abs * 100.0;
            ImpactDatum {
                name: display_name(&key),
                raw_value,
                unit,
                score,
                significance: Significance::for_score(score),
            }
        })
        .collect()
}

/// Per-food climate impact series for the breakdown chart. Food names are
/// sorted so the series is stable across renders.
pub fn breakdown_series(
    breakdown: &HashMap<String, HashMap<String, ImpactEntry>>,
) -> Vec<(String, f64)> {
    let mut series: Vec<(String, f64)> = breakdown
        .iter()
        .filter_map(|(food, impacts)| {
            let climate = CLIMATE_KEYS
                .iter()
                .find_map(|key| impacts.get(*key))
                .or_else(|| impacts.values().next())?;
            Some((food.clone(), climate.value()))
        })
        .collect();
    series.sort_by(|a, b| a.0.cmp(&b.0));
    series
}

/// Quality label for a 0-100 representativeness score: excellent at 80+,
/// good at 60+.
pub fn quality_label(score: f64) -> &'static str {
    if score >= 80.0 {
        "Excellent"
    } else if score >= 60.0 {
        "Good"
    } else {
        "Needs Improvement"
    }
}

/// Data quality gauge rows: (dimension, 0-100 score, label).
pub fn data_quality_series(quality: &DataQuality) -> Vec<(&'static str, f64, &'static str)> {
    let completeness = quality.completeness_score * 100.0;
    let temporal = quality.temporal_representativeness * 100.0;
    let geographical = quality.geographical_representativeness * 100.0;
    let technological = quality.technological_representativeness * 100.0;
    vec![
        ("Completeness", completeness, quality_label(completeness)),
        ("Temporal", temporal, quality_label(temporal)),
        ("Geographical", geographical, quality_label(geographical)),
        ("Technological", technological, quality_label(technological)),
    ]
}
