use serde::{Deserialize, Serialize};
use crate::models::domain::{AggregationResult, Listing, ProviderFailure};

/// Payload of a successful job search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchJobsData {
    pub jobs: Vec<Listing>,
    pub count: usize,
    #[serde(rename = "searchQuery")]
    pub search_query: String,
    pub keywords: Vec<String>,
    pub location: String,
    #[serde(rename = "isFallback")]
    pub is_fallback: bool,
}

/// Response for the job search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchJobsResponse {
    pub success: bool,
    pub data: SearchJobsData,
    /// Provider failures, only populated in diagnostic mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ProviderFailure>>,
}

impl SearchJobsResponse {
    pub fn from_result(result: AggregationResult, diagnostics: bool) -> Self {
        let errors = if diagnostics && !result.provider_errors.is_empty() {
            Some(result.provider_errors)
        } else {
            None
        };

        let location = if result.location.is_empty() {
            "Not specified".to_string()
        } else {
            result.location
        };

        Self {
            success: true,
            data: SearchJobsData {
                count: result.listings.len(),
                jobs: result.listings,
                search_query: result.search_query,
                keywords: result.keywords,
                location,
                is_fallback: result.is_fallback,
            },
            errors,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub providers: Vec<String>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
