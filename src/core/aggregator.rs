use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::core::dedup::dedupe;
use crate::core::fallback::FallbackGenerator;
use crate::core::keywords::{build_search_query, extract_terms};
use crate::models::{AggregationResult, ProviderFailure, ProviderOutcome};
use crate::services::provider::{JobProvider, ProviderError};

/// Shortest accepted description, counted after trimming
pub const MIN_DESCRIPTION_LEN: usize = 10;

pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 50;

/// Keywords echoed back to the caller
pub const RESPONSE_KEYWORDS: usize = 10;

/// Reasons a search is rejected before any provider is called
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("{0}")]
    Validation(String),

    #[error("Could not extract meaningful keywords from job description")]
    EmptyExtraction,
}

/// A validated search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub description: String,
    pub location: String,
    pub limit: usize,
}

impl SearchQuery {
    pub fn new(description: &str, location: Option<&str>, limit: Option<&Value>) -> Result<Self, SearchError> {
        let description = description.trim();
        if description.chars().count() < MIN_DESCRIPTION_LEN {
            return Err(SearchError::Validation(format!(
                "Job description is required and must be at least {} characters",
                MIN_DESCRIPTION_LEN
            )));
        }

        Ok(Self {
            description: description.to_string(),
            location: location.map(str::trim).unwrap_or_default().to_string(),
            limit: sanitize_limit(limit),
        })
    }
}

/// Clamp a caller-supplied limit to [1, 50].
///
/// Numbers are truncated, strings are read up to the first non-digit, and
/// zero, absent or unparsable values become the default of 10.
pub fn sanitize_limit(raw: Option<&Value>) -> usize {
    let parsed = match raw {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => leading_integer(s),
        _ => None,
    };

    match parsed {
        None | Some(0) => DEFAULT_LIMIT,
        Some(n) => n.clamp(1, MAX_LIMIT as i64) as usize,
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());

    // Saturate oversized input; it is clamped afterwards anyway
    let value = digits[..end]
        .parse::<i64>()
        .ok()
        .or_else(|| (end > 0).then_some(i64::MAX))?;
    Some(sign * value)
}

/// Fans one search out to every configured provider and merges the results.
///
/// Provider failures never fail the search; they are recorded and the
/// fallback generator fills in when nothing real came back.
pub struct JobAggregator {
    providers: Vec<Arc<dyn JobProvider>>,
    fallback: FallbackGenerator,
    provider_timeout: Duration,
}

impl JobAggregator {
    pub fn new(
        providers: Vec<Arc<dyn JobProvider>>,
        fallback: FallbackGenerator,
        provider_timeout: Duration,
    ) -> Self {
        Self {
            providers,
            fallback,
            provider_timeout,
        }
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub async fn aggregate(&self, query: &SearchQuery) -> Result<AggregationResult, SearchError> {
        let terms = extract_terms(&query.description);
        if terms.keywords.is_empty() {
            return Err(SearchError::EmptyExtraction);
        }

        let search_query = build_search_query(&terms);

        tracing::info!(
            "Searching {} provider(s) for '{}' (location: '{}', limit: {})",
            self.providers.len(),
            search_query,
            query.location,
            query.limit
        );

        // Join, not race: every provider gets its full timeout
        let outcomes = join_all(self.providers.iter().map(|provider| {
            self.run_provider(provider.as_ref(), &search_query, &query.location, query.limit)
        }))
        .await;

        let mut provider_errors = Vec::new();
        let mut listings = Vec::new();
        for outcome in outcomes {
            if let Some(error) = outcome.error {
                provider_errors.push(ProviderFailure {
                    source: outcome.provider_name,
                    error,
                });
            }
            listings.extend(outcome.listings);
        }

        if listings.is_empty() {
            tracing::info!("No provider results for '{}', using fallback suggestions", search_query);
            listings = self.fallback.generate(
                &terms.keywords,
                &query.description,
                &query.location,
                query.limit,
            );
        }

        let mut listings = dedupe(listings);
        listings.truncate(query.limit);

        let is_fallback = listings.first().is_some_and(|l| l.is_suggested);

        let mut keywords = terms.keywords;
        keywords.truncate(RESPONSE_KEYWORDS);

        Ok(AggregationResult {
            listings,
            search_query,
            keywords,
            location: query.location.clone(),
            is_fallback,
            provider_errors,
        })
    }

    async fn run_provider(
        &self,
        provider: &dyn JobProvider,
        search_query: &str,
        location: &str,
        limit: usize,
    ) -> ProviderOutcome {
        let name = provider.name();
        let result = tokio::time::timeout(
            self.provider_timeout,
            provider.search(search_query, location, limit),
        )
        .await
        .unwrap_or(Err(ProviderError::Timeout));

        match result {
            Ok(listings) => {
                tracing::debug!("{} returned {} listings", name, listings.len());
                ProviderOutcome::success(name, listings)
            }
            Err(e) => {
                tracing::warn!("{} search failed: {}", name, e);
                ProviderOutcome::failure(name, e.to_string())
            }
        }
    }
}
