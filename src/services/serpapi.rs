use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::models::{Listing, ListingSource, Salary};
use crate::services::provider::{
    listing_location, non_empty, normalize_url, parse_posted_at, parse_salary_text,
    search_page_url, JobProvider, ProviderError, DEFAULT_SEARCH_LOCATION, NO_DESCRIPTION,
    UNKNOWN_COMPANY, UNTITLED_POSITION,
};

pub const SERPAPI_BASE_URL: &str = "https://serpapi.com";

#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    jobs_results: Option<Vec<SerpJob>>,
}

#[derive(Debug, Deserialize)]
struct SerpJob {
    title: Option<String>,
    company_name: Option<String>,
    location: Option<String>,
    description: Option<String>,
    apply_options: Option<Vec<SerpLink>>,
    related_links: Option<Vec<SerpLink>>,
    share_link: Option<String>,
    detected_extensions: Option<SerpExtensions>,
}

#[derive(Debug, Deserialize)]
struct SerpLink {
    link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SerpExtensions {
    salary: Option<String>,
    posted_at: Option<String>,
}

fn first_link(links: Option<&[SerpLink]>) -> Option<&str> {
    links?.first()?.link.as_deref()
}

/// Google Jobs results through SerpAPI
pub struct SerpApiProvider {
    base_url: String,
    api_key: String,
    client: Client,
}

impl SerpApiProvider {
    pub fn new(base_url: String, api_key: Option<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let api_key = non_empty(api_key)
            .ok_or_else(|| ProviderError::Misconfigured("SerpAPI key not configured".to_string()))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Misconfigured(e.to_string()))?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    fn to_listing(job: SerpJob, query: &str, location: &str) -> Listing {
        let url = normalize_url(
            [
                first_link(job.apply_options.as_deref()),
                first_link(job.related_links.as_deref()),
                job.share_link.as_deref(),
            ],
            || search_page_url("https://www.google.com/search?q=", &format!("{} jobs", query)),
        );

        let (salary_text, posted_text) = match job.detected_extensions {
            Some(ext) => (ext.salary, ext.posted_at),
            None => (None, None),
        };
        let salary = salary_text.and_then(|text| {
            let (min, max) = parse_salary_text(&text);
            Salary::from_bounds(min, max, "USD")
        });

        Listing {
            title: non_empty(job.title).unwrap_or_else(|| UNTITLED_POSITION.to_string()),
            company: non_empty(job.company_name).unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
            location: listing_location(job.location, location),
            description: non_empty(job.description).unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            url,
            salary,
            posted_at: parse_posted_at(posted_text.as_deref(), Utc::now()),
            source: ListingSource::GoogleJobs,
            is_suggested: false,
        }
    }
}

#[async_trait]
impl JobProvider for SerpApiProvider {
    fn name(&self) -> &'static str {
        "SerpAPI"
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

        let url = format!("{}/search.json", self.base_url.trim_end_matches('/'));
        let search_location = if location.is_empty() { DEFAULT_SEARCH_LOCATION } else { location };
        let limit = limit.to_string();

        tracing::debug!("Querying SerpAPI for '{}' in '{}'", query, search_location);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("engine", "google_jobs"),
                ("q", query),
                ("location", search_location),
                ("api_key", self.api_key.as_str()),
                ("num", limit.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Http(response.status()));
        }

        let body: SerpResponse = response.json().await?;

        Ok(body
            .jobs_results
            .unwrap_or_default()
            .into_iter()
            .map(|job| Self::to_listing(job, query, location))
            .collect())
    }
}
