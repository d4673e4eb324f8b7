use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::models::{Listing, ListingSource, Salary};
use crate::services::provider::{
    listing_location, non_empty, normalize_url, parse_posted_at, parse_salary_text,
    search_page_url, JobProvider, ProviderError, NO_DESCRIPTION, UNKNOWN_COMPANY,
    UNTITLED_POSITION,
};

pub const REMOTIVE_BASE_URL: &str = "https://remotive.com";

#[derive(Debug, Deserialize)]
struct RemotiveResponse {
    #[serde(default)]
    jobs: Option<Vec<RemotiveJob>>,
}

#[derive(Debug, Deserialize)]
struct RemotiveJob {
    title: Option<String>,
    company_name: Option<String>,
    candidate_required_location: Option<String>,
    description: Option<String>,
    url: Option<String>,
    salary: Option<String>,
    publication_date: Option<String>,
}

/// Remotive public remote-jobs API. Needs no credentials, so it only runs
/// when explicitly enabled.
pub struct RemotiveProvider {
    base_url: String,
    client: Client,
}

impl RemotiveProvider {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Misconfigured(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    fn to_listing(job: RemotiveJob, query: &str, location: &str) -> Listing {
        let url = normalize_url([job.url.as_deref()], || {
            search_page_url("https://remotive.com/remote-jobs?search=", query)
        });

        let salary = non_empty(job.salary).and_then(|text| {
            let (min, max) = parse_salary_text(&text);
            Salary::from_bounds(min, max, "USD")
        });

        Listing {
            title: non_empty(job.title).unwrap_or_else(|| UNTITLED_POSITION.to_string()),
            company: non_empty(job.company_name).unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
            location: listing_location(job.candidate_required_location, location),
            description: non_empty(job.description).unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            url,
            salary,
            posted_at: parse_posted_at(job.publication_date.as_deref(), Utc::now()),
            source: ListingSource::Remotive,
            is_suggested: false,
        }
    }
}

#[async_trait]
impl JobProvider for RemotiveProvider {
    fn name(&self) -> &'static str {
        "Remotive"
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

        let url = format!("{}/api/remote-jobs", self.base_url.trim_end_matches('/'));
        let limit_param = limit.to_string();

        tracing::debug!("Querying Remotive for '{}'", query);

        let response = self
            .client
            .get(&url)
            .query(&[("search", query), ("limit", limit_param.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Http(response.status()));
        }

        let body: RemotiveResponse = response.json().await?;

        // The limit parameter is advisory upstream
        Ok(body
            .jobs
            .unwrap_or_default()
            .into_iter()
            .take(limit)
            .map(|job| Self::to_listing(job, query, location))
            .collect())
    }
}
