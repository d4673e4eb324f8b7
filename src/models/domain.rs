use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a listing came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingSource {
    Adzuna,
    #[serde(rename = "Google Jobs")]
    GoogleJobs,
    Remotive,
    /// Synthesized by the fallback generator
    Suggested,
}

impl ListingSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingSource::Adzuna => "Adzuna",
            ListingSource::GoogleJobs => "Google Jobs",
            ListingSource::Remotive => "Remotive",
            ListingSource::Suggested => "Suggested",
        }
    }
}

impl std::fmt::Display for ListingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Salary band; only present when the upstream reported at least one bound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Salary {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub currency: String,
}

impl Salary {
    /// Build a salary only when at least one bound is known
    pub fn from_bounds(min: Option<f64>, max: Option<f64>, currency: impl Into<String>) -> Option<Self> {
        if min.is_none() && max.is_none() {
            return None;
        }
        Some(Self {
            min,
            max,
            currency: currency.into(),
        })
    }
}

/// A single job posting in the normalized shape shared by every provider
/// and by the fallback generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub salary: Option<Salary>,
    #[serde(rename = "postedAt")]
    pub posted_at: DateTime<Utc>,
    pub source: ListingSource,
    #[serde(rename = "isSuggested", default)]
    pub is_suggested: bool,
}

/// Keywords and optional title derived from one job description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedTerms {
    pub keywords: Vec<String>,
    #[serde(rename = "inferredTitle")]
    pub inferred_title: Option<String>,
}

/// Result of invoking a single provider for one request
#[derive(Debug, Clone)]
pub struct ProviderOutcome {
    pub provider_name: String,
    pub listings: Vec<Listing>,
    pub error: Option<String>,
}

impl ProviderOutcome {
    pub fn success(provider_name: impl Into<String>, listings: Vec<Listing>) -> Self {
        Self {
            provider_name: provider_name.into(),
            listings,
            error: None,
        }
    }

    pub fn failure(provider_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            provider_name: provider_name.into(),
            listings: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// Diagnostic entry for a provider that failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderFailure {
    pub source: String,
    pub error: String,
}

/// Everything the aggregation engine returns for one request
#[derive(Debug, Clone, Serialize)]
pub struct AggregationResult {
    pub listings: Vec<Listing>,
    #[serde(rename = "searchQuery")]
    pub search_query: String,
    pub keywords: Vec<String>,
    pub location: String,
    #[serde(rename = "isFallback")]
    pub is_fallback: bool,
    #[serde(rename = "providerErrors")]
    pub provider_errors: Vec<ProviderFailure>,
}
