//! Read-only view models for backend responses
//!
//! The backend serves both simple and comprehensive assessments, so impact
//! entries arrive either as bare numbers or as structured objects; the
//! untagged enums below absorb both shapes.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One midpoint or endpoint impact as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ImpactEntry {
    Detailed {
        value: f64,
        #[serde(default)]
        unit: String,
        #[serde(default)]
        uncertainty_range: Option<(f64, f64)>,
        #[serde(default)]
        data_quality_score: Option<f64>,
        #[serde(default)]
        contributing_sources: Vec<String>,
    },
    Scalar(f64),
}

impl ImpactEntry {
    pub fn value(&self) -> f64 {
        match self {
            ImpactEntry::Detailed { value, .. } => *value,
            ImpactEntry::Scalar(v) => *v,
        }
    }

    pub fn unit(&self) -> &str {
        match self {
            ImpactEntry::Detailed { unit, .. } => unit,
            ImpactEntry::Scalar(_) => "",
        }
    }
}

/// Aggregated single score, scalar for simple assessments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SingleScore {
    Detailed {
        value: f64,
        #[serde(default)]
        unit: String,
        #[serde(default)]
        uncertainty_range: Option<(f64, f64)>,
        #[serde(default)]
        weighting_factors: HashMap<String, f64>,
        #[serde(default)]
        methodology: String,
    },
    Scalar(f64),
}

impl SingleScore {
    pub fn value(&self) -> f64 {
        match self {
            SingleScore::Detailed { value, .. } => *value,
            SingleScore::Scalar(v) => *v,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DataQuality {
    #[serde(default)]
    pub overall_confidence: String,
    #[serde(default)]
    pub regional_adaptation: bool,
    #[serde(default)]
    pub completeness_score: f64,
    #[serde(default)]
    pub temporal_representativeness: f64,
    #[serde(default)]
    pub geographical_representativeness: f64,
    #[serde(default)]
    pub technological_representativeness: f64,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub potential_impact_reduction: HashMap<String, f64>,
    #[serde(default)]
    pub implementation_difficulty: String,
    #[serde(default)]
    pub cost_category: String,
    #[serde(default)]
    pub priority: String,
}

/// A completed assessment, owned by the backend and held here as view state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub id: String,
    pub company_name: String,
    pub country: String,
    pub assessment_date: DateTime<Utc>,
    #[serde(default)]
    pub midpoint_impacts: HashMap<String, ImpactEntry>,
    #[serde(default)]
    pub endpoint_impacts: HashMap<String, ImpactEntry>,
    pub single_score: SingleScore,
    #[serde(default)]
    pub data_quality: Option<DataQuality>,
    #[serde(default)]
    pub breakdown_by_food: HashMap<String, HashMap<String, ImpactEntry>>,
    #[serde(default)]
    pub sensitivity_analysis: Option<serde_json::Value>,
    #[serde(default)]
    pub comparative_analysis: Option<serde_json::Value>,
    #[serde(default)]
    pub management_analysis: Option<serde_json::Value>,
    #[serde(default)]
    pub benchmarking: Option<serde_json::Value>,
    #[serde(default)]
    pub recommendations: Option<Vec<Recommendation>>,
}

/// Summary row from `GET /assessments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentSummary {
    pub id: String,
    pub company_name: String,
    pub country: String,
    pub assessment_date: DateTime<Utc>,
    #[serde(default)]
    pub is_comprehensive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentList {
    pub assessments: Vec<AssessmentSummary>,
    pub total: u64,
}

// ============================================================================
// Reports
// ============================================================================

/// Report flavours supported by the report service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Comprehensive,
    Executive,
    FarmerFriendly,
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportType::Comprehensive => write!(f, "comprehensive"),
            ReportType::Executive => write!(f, "executive"),
            ReportType::FarmerFriendly => write!(f, "farmer_friendly"),
        }
    }
}

impl std::str::FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comprehensive" => Ok(ReportType::Comprehensive),
            "executive" => Ok(ReportType::Executive),
            "farmer_friendly" | "farmer-friendly" => Ok(ReportType::FarmerFriendly),
            other => Err(format!(
                "Unknown report type '{other}'; expected comprehensive, executive, or farmer_friendly"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReportMetadata {
    #[serde(default)]
    pub model_used: Option<String>,
    #[serde(default)]
    pub generation_timestamp: Option<String>,
    #[serde(default)]
    pub iso14044_compliant: Option<bool>,
    #[serde(default)]
    pub data_quality_level: Option<String>,
    #[serde(default)]
    pub validation_warnings: Vec<String>,
    #[serde(default)]
    pub section_count: Option<u32>,
}

/// A generated report: section-key to markdown text, plus metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub report_id: String,
    pub report_type: String,
    #[serde(default)]
    pub assessment_id: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub generated_at: String,
    #[serde(default)]
    pub sections: BTreeMap<String, String>,
    #[serde(default)]
    pub metadata: Option<ReportMetadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportGenerationResponse {
    pub report_id: String,
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub report_data: Option<Report>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportListEntry {
    pub report_id: String,
    pub report_type: String,
    pub generated_at: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportList {
    pub assessment_id: String,
    pub reports: Vec<ReportListEntry>,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownExport {
    pub report_id: String,
    pub format: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportServiceHealth {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub ai_enabled: bool,
    #[serde(default)]
    pub reports_generated: u64,
    #[serde(default)]
    pub supported_types: Vec<String>,
}

// ============================================================================
// Reference lookups
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryList {
    pub countries: Vec<String>,
    #[serde(rename = "default", default)]
    pub default_country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryList {
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactCategories {
    pub midpoint: Vec<String>,
    pub endpoint: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmTypeOptions {
    pub farm_types: Vec<String>,
    pub farming_systems: Vec<String>,
    pub production_systems: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagementOptions {
    pub soil_types: Vec<String>,
    pub cropping_patterns: Vec<String>,
    pub seasonal_factors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impact_entry_accepts_both_shapes() {
        let scalar: ImpactEntry = serde_json::from_str("2.5").unwrap();
        assert_eq!(scalar.value(), 2.5);
        assert_eq!(scalar.unit(), "");

        let detailed: ImpactEntry =
            serde_json::from_str(r#"{"value": 3.1, "unit": "kg CO2-eq"}"#).unwrap();
        assert_eq!(detailed.value(), 3.1);
        assert_eq!(detailed.unit(), "kg CO2-eq");
    }

    #[test]
    fn test_single_score_accepts_both_shapes() {
        let scalar: SingleScore = serde_json::from_str("42.0").unwrap();
        assert_eq!(scalar.value(), 42.0);

        let detailed: SingleScore = serde_json::from_str(
            r#"{"value": 7.2, "unit": "pt", "weighting_factors": {}, "methodology": "AfricanPriorities"}"#,
        )
        .unwrap();
        assert_eq!(detailed.value(), 7.2);
    }

    #[test]
    fn test_report_type_round_trip() {
        assert_eq!(
            "farmer_friendly".parse::<ReportType>().unwrap(),
            ReportType::FarmerFriendly
        );
        assert_eq!(ReportType::Executive.to_string(), "executive");
        assert_eq!(
            serde_json::to_string(&ReportType::FarmerFriendly).unwrap(),
            "\"farmer_friendly\""
        );
    }
}
