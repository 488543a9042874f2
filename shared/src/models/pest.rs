//! Pest management models (intake step 4)

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One pesticide application; every field except the brand must be supplied
/// for the record to count as complete.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PesticideApplication {
    #[validate(length(min = 1, max = 120, message = "Pesticide type is required"))]
    pub pesticide_type: String,

    #[validate(length(min = 1, max = 120, message = "Active ingredient is required"))]
    pub active_ingredient: String,

    pub brand: Option<String>,

    /// Litres or kg per hectare per application.
    #[validate(range(
        min = 0.001,
        max = 1000.0,
        message = "Application rate must be positive"
    ))]
    pub application_rate: f64,

    #[validate(range(max = 20, message = "Applications per season must be at most 20"))]
    pub applications_per_season: u32,

    pub target_pests: Vec<String>,
}

/// Step 4 of the intake wizard.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct PestManagementSection {
    #[validate(length(min = 1, message = "Management approach is required"))]
    pub management_approach: String,

    pub monitoring_frequency: Option<String>,

    pub uses_ipm: bool,

    #[validate]
    pub pesticide_applications: Vec<PesticideApplication>,

    pub common_pests: Vec<String>,

    pub common_diseases: Vec<String>,

    pub biological_controls: Vec<String>,
}

impl Default for PestManagementSection {
    fn default() -> Self {
        Self {
            management_approach: "IntegratedIPM".to_string(),
            monitoring_frequency: None,
            uses_ipm: false,
            pesticide_applications: Vec::new(),
            common_pests: Vec::new(),
            common_diseases: Vec::new(),
            biological_controls: Vec::new(),
        }
    }
}
