//! HTTP client for the assessment and report services
//!
//! Thin typed wrapper over the backend REST API. Every non-2xx response is
//! normalized through [`normalize_error_body`] so callers always see the
//! backend's own `detail` message when one exists.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use shared::models::{
    AssessmentList, AssessmentResult, CategoryList, CountryList, FarmTypeOptions, HealthStatus,
    ImpactCategories, ManagementOptions, MarkdownExport, Report, ReportGenerationResponse,
    ReportList, ReportServiceHealth, ReportType,
};
use shared::submission::AssessmentRequest;

use crate::error::{normalize_error_body, AppError, AppResult};

/// Assessment API client
#[derive(Clone)]
pub struct AssessmentApiClient {
    client: Client,
    base_url: String,
}

impl AssessmentApiClient {
    /// Create a new client against the given backend base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn check(&self, response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let status_text = status.canonical_reason().unwrap_or("").to_string();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Api(normalize_error_body(
            status.as_u16(),
            &status_text,
            &body,
        )))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        debug!(path, "GET");
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        let response = self.check(response).await?;
        Ok(response.json().await?)
    }

    // ------------------------------------------------------------------
    // Assessments
    // ------------------------------------------------------------------

    /// Submit a simple assessment request.
    pub async fn create_assessment(
        &self,
        request: &AssessmentRequest,
    ) -> AppResult<AssessmentResult> {
        self.post_assessment("/assess", request).await
    }

    /// Submit a comprehensive assessment request. The backend rejects this
    /// endpoint unless both the farm profile and management practices
    /// blocks are present.
    pub async fn create_comprehensive_assessment(
        &self,
        request: &AssessmentRequest,
    ) -> AppResult<AssessmentResult> {
        self.post_assessment("/assess/comprehensive", request).await
    }

    async fn post_assessment(
        &self,
        path: &str,
        request: &AssessmentRequest,
    ) -> AppResult<AssessmentResult> {
        debug!(path, company = %request.company_name, foods = request.foods.len(), "POST");
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(request)
            .send()
            .await?;
        let response = self.check(response).await?;
        Ok(response.json().await?)
    }

    /// Fetch a stored assessment by id.
    pub async fn get_assessment(&self, id: &str) -> AppResult<AssessmentResult> {
        self.get_json(&format!("/assess/{id}")).await
    }

    /// List all stored assessments.
    pub async fn list_assessments(&self) -> AppResult<AssessmentList> {
        self.get_json("/assessments").await
    }

    // ------------------------------------------------------------------
    // Reference lookups
    // ------------------------------------------------------------------

    pub async fn food_categories(&self) -> AppResult<CategoryList> {
        self.get_json("/food-categories").await
    }

    pub async fn countries(&self) -> AppResult<CountryList> {
        self.get_json("/countries").await
    }

    pub async fn impact_categories(&self) -> AppResult<ImpactCategories> {
        self.get_json("/impact-categories").await
    }

    pub async fn farm_types(&self) -> AppResult<FarmTypeOptions> {
        self.get_json("/farm-types").await
    }

    pub async fn management_options(&self) -> AppResult<ManagementOptions> {
        self.get_json("/management-options").await
    }

    pub async fn health(&self) -> AppResult<HealthStatus> {
        self.get_json("/health").await
    }

    // ------------------------------------------------------------------
    // Reports
    // ------------------------------------------------------------------

    /// Ask the report service to generate a report for an assessment.
    pub async fn generate_report(
        &self,
        assessment_id: &str,
        report_type: ReportType,
    ) -> AppResult<ReportGenerationResponse> {
        debug!(assessment_id, %report_type, "POST /reports/generate");
        let body = serde_json::json!({
            "assessment_id": assessment_id,
            "report_type": report_type,
        });
        let response = self
            .client
            .post(format!("{}/reports/generate", self.base_url))
            .json(&body)
            .send()
            .await?;
        let response = self.check(response).await?;
        Ok(response.json().await?)
    }

    /// Fetch a generated report by id.
    pub async fn get_report(&self, report_id: &str) -> AppResult<Report> {
        self.get_json(&format!("/reports/report/{report_id}")).await
    }

    /// List reports generated for an assessment.
    pub async fn list_reports(&self, assessment_id: &str) -> AppResult<ReportList> {
        self.get_json(&format!("/reports/assessment/{assessment_id}/reports"))
            .await
    }

    /// Export a report as a single markdown document.
    pub async fn export_markdown(&self, report_id: &str) -> AppResult<MarkdownExport> {
        self.get_json(&format!("/reports/report/{report_id}/export/markdown"))
            .await
    }

    /// Export the raw report JSON.
    pub async fn export_json(&self, report_id: &str) -> AppResult<serde_json::Value> {
        self.get_json(&format!("/reports/report/{report_id}/export/json"))
            .await
    }

    /// Download the rendered PDF. Returns the raw bytes; the caller decides
    /// where to write them.
    pub async fn download_pdf(&self, report_id: &str) -> AppResult<Vec<u8>> {
        let path = format!("/reports/report/{report_id}/download/pdf");
        debug!(path, "GET (binary)");
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        let response = self.check(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub async fn report_service_health(&self) -> AppResult<ReportServiceHealth> {
        self.get_json("/reports/health").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_keeps_base_url() {
        let client = AssessmentApiClient::new("http://localhost:8000");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
