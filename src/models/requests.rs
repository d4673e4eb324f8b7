use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::core::aggregator::MIN_DESCRIPTION_LEN;

pub const DESCRIPTION_TOO_SHORT: &str =
    "Job description is required and must be at least 10 characters";

/// Request to search jobs matching a job description
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchJobsRequest {
    #[validate(custom(function = "validate_job_description"))]
    #[serde(alias = "job_description", rename = "jobDescription", default)]
    pub job_description: String,
    /// Non-string values are ignored
    #[serde(default)]
    pub location: Option<serde_json::Value>,
    /// Accepts a number, a numeric string, or nothing
    #[serde(default)]
    pub limit: Option<serde_json::Value>,
}

impl SearchJobsRequest {
    pub fn location(&self) -> Option<&str> {
        self.location.as_ref().and_then(serde_json::Value::as_str)
    }
}

fn validate_job_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().chars().count() < MIN_DESCRIPTION_LEN {
        let mut err = ValidationError::new("description_too_short");
        err.message = Some(Cow::Borrowed(DESCRIPTION_TOO_SHORT));
        return Err(err);
    }
    Ok(())
}
