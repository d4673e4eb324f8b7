use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::models::{Listing, ListingSource, Salary};
use crate::services::provider::{
    listing_location, non_empty, normalize_url, parse_posted_at, search_page_url, JobProvider,
    ProviderError, DEFAULT_SEARCH_LOCATION, NO_DESCRIPTION, UNKNOWN_COMPANY, UNTITLED_POSITION,
};

pub const ADZUNA_BASE_URL: &str = "https://api.adzuna.com";

#[derive(Debug, Deserialize)]
struct AdzunaResponse {
    #[serde(default)]
    results: Option<Vec<AdzunaJob>>,
}

#[derive(Debug, Deserialize)]
struct AdzunaJob {
    title: Option<String>,
    company: Option<AdzunaName>,
    location: Option<AdzunaName>,
    description: Option<String>,
    redirect_url: Option<String>,
    url: Option<String>,
    salary_min: Option<f64>,
    salary_max: Option<f64>,
    currency: Option<String>,
    created: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AdzunaName {
    display_name: Option<String>,
}

/// Adzuna job search API client
pub struct AdzunaProvider {
    base_url: String,
    app_id: String,
    app_key: String,
    country: String,
    client: Client,
}

impl AdzunaProvider {
    /// Create a new Adzuna client; both credentials are required
    pub fn new(
        base_url: String,
        app_id: Option<String>,
        app_key: Option<String>,
        country: String,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let (Some(app_id), Some(app_key)) = (non_empty(app_id), non_empty(app_key)) else {
            return Err(ProviderError::Misconfigured(
                "Adzuna API credentials not configured".to_string(),
            ));
        };

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Misconfigured(e.to_string()))?;

        Ok(Self {
            base_url,
            app_id,
            app_key,
            country,
            client,
        })
    }

    fn to_listing(job: AdzunaJob, query: &str, location: &str) -> Listing {
        let url = normalize_url(
            [job.redirect_url.as_deref(), job.url.as_deref()],
            || search_page_url("https://www.adzuna.com/search?q=", query),
        );

        // Adzuna reports 0 for unknown bounds
        let min = job.salary_min.filter(|v| *v > 0.0);
        let max = job.salary_max.filter(|v| *v > 0.0);
        let currency = non_empty(job.currency).unwrap_or_else(|| "USD".to_string());

        Listing {
            title: non_empty(job.title).unwrap_or_else(|| UNTITLED_POSITION.to_string()),
            company: non_empty(job.company.and_then(|c| c.display_name))
                .unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
            location: listing_location(job.location.and_then(|l| l.display_name), location),
            description: non_empty(job.description).unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            url,
            salary: Salary::from_bounds(min, max, currency),
            posted_at: parse_posted_at(job.created.as_deref(), Utc::now()),
            source: ListingSource::Adzuna,
            is_suggested: false,
        }
    }
}

#[async_trait]
impl JobProvider for AdzunaProvider {
    fn name(&self) -> &'static str {
        "Adzuna"
    }

    async fn search(
        &self,
        query: &str,
        location: &str,
        limit: usize,
    ) -> Result<Vec<Listing>, ProviderError> {
        if query.trim().is_empty() {
            return Err(ProviderError::InvalidQuery);
        }

        let url = format!(
            "{}/v1/api/jobs/{}/search/1",
            self.base_url.trim_end_matches('/'),
            self.country
        );
        let search_location = if location.is_empty() { DEFAULT_SEARCH_LOCATION } else { location };
        let limit = limit.to_string();

        tracing::debug!("Querying Adzuna for '{}' in '{}'", query, search_location);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("app_id", self.app_id.as_str()),
                ("app_key", self.app_key.as_str()),
                ("results_per_page", limit.as_str()),
                ("what", query),
                ("where", search_location),
                ("content-type", "application/json"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Http(response.status()));
        }

        let body: AdzunaResponse = response.json().await?;

        Ok(body
            .results
            .unwrap_or_default()
            .into_iter()
            .map(|job| Self::to_listing(job, query, location))
            .collect())
    }
}
