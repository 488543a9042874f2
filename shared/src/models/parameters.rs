//! Assessment parameter models (review step)

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SystemBoundary {
    #[default]
    CradleToGate,
    CradleToGrave,
    GateToGate,
    FarmToFork,
}

/// Assessment framing collected on the review step. The backend request does
/// not carry these fields; they steer endpoint choice and local display.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct AssessmentParameters {
    #[validate(length(min = 1, message = "Functional unit is required"))]
    pub functional_unit: String,

    pub system_boundary: SystemBoundary,

    #[validate(range(
        min = 1,
        max = 5,
        message = "Assessment period must be between 1 and 5 years"
    ))]
    pub assessment_period_years: u8,

    pub include_sensitivity_analysis: bool,

    pub include_comparative_analysis: bool,

    pub include_benchmarking: bool,
}

impl Default for AssessmentParameters {
    fn default() -> Self {
        Self {
            functional_unit: "1 kg of product".to_string(),
            system_boundary: SystemBoundary::CradleToGate,
            assessment_period_years: 1,
            include_sensitivity_analysis: false,
            include_comparative_analysis: false,
            include_benchmarking: false,
        }
    }
}
