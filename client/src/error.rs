//! Error handling for the Farm LCA client
//!
//! API failures are normalized into readable messages: the backend wraps
//! everything in a JSON `detail` field, which may be a plain string or a
//! list of per-field validation entries.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Api(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Draft is not ready to submit: {0} validation issue(s)")]
    DraftInvalid(usize),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for client operations
pub type AppResult<T> = Result<T, AppError>;

/// Extract a readable message from a non-2xx response body.
///
/// Handles the three shapes the backend produces: a string `detail`, a
/// list of validation entries with `msg` fields, and anything else, which
/// is passed through as serialized JSON. A body that is not JSON at all
/// falls back to the status line.
pub fn normalize_error_body(status: u16, status_text: &str, body: &str) -> String {
    let parsed: Result<serde_json::Value, _> = serde_json::from_str(body);
    let fallback = format!("API Error: {} {}", status, status_text);

    let value = match parsed {
        Ok(value) => value,
        Err(_) => return fallback,
    };

    match value.get("detail") {
        Some(serde_json::Value::String(detail)) => detail.clone(),
        Some(serde_json::Value::Array(entries)) => {
            let messages: Vec<String> = entries
                .iter()
                .map(|entry| {
                    entry
                        .get("msg")
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                        .unwrap_or_else(|| entry.to_string())
                })
                .collect();
            if messages.is_empty() {
                fallback
            } else {
                messages.join("; ")
            }
        }
        Some(other) => other.to_string(),
        None => {
            if value.is_null() {
                fallback
            } else {
                value.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_detail_passes_through() {
        let body = r#"{"detail": "Assessment failed: invalid country"}"#;
        assert_eq!(
            normalize_error_body(500, "Internal Server Error", body),
            "Assessment failed: invalid country"
        );
    }

    #[test]
    fn test_validation_list_joins_messages() {
        let body = r#"{"detail": [
            {"loc": ["body", "company_name"], "msg": "field required", "type": "missing"},
            {"loc": ["body", "foods"], "msg": "ensure this value has at least 1 items", "type": "too_short"}
        ]}"#;
        let message = normalize_error_body(422, "Unprocessable Entity", body);
        assert!(message.contains("field required"));
        assert!(message.contains("at least 1 items"));
        assert!(message.contains("; "));
    }

    #[test]
    fn test_non_json_body_falls_back_to_status() {
        assert_eq!(
            normalize_error_body(502, "Bad Gateway", "<html>upstream error</html>"),
            "API Error: 502 Bad Gateway"
        );
    }

    #[test]
    fn test_unknown_json_shape_is_serialized() {
        let body = r#"{"error": {"code": 13}}"#;
        let message = normalize_error_body(500, "Internal Server Error", body);
        assert!(message.contains("\"code\":13"));
    }
}
