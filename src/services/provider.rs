use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use regex::Regex;
use reqwest::{StatusCode, Url};
use std::sync::OnceLock;
use thiserror::Error;

use crate::models::Listing;

pub const UNTITLED_POSITION: &str = "Untitled Position";
pub const UNKNOWN_COMPANY: &str = "Unknown Company";
pub const REMOTE: &str = "Remote";
pub const NO_DESCRIPTION: &str = "No description available";

/// Location sent upstream when the caller gave none
pub const DEFAULT_SEARCH_LOCATION: &str = "United States";

/// Errors a job provider can report for one search call
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(StatusCode),

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("not configured: {0}")]
    Misconfigured(String),

    #[error("invalid search query")]
    InvalidQuery,
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_decode() {
            ProviderError::InvalidResponse(err.to_string())
        } else if let Some(status) = err.status() {
            ProviderError::Http(status)
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

/// A job-search backend translated into the common listing shape
#[async_trait]
pub trait JobProvider: Send + Sync {
    /// Name used in logs and diagnostics
    fn name(&self) -> &'static str;

    async fn search(
        &self,
        query: &str,
        location: &str,
        limit: usize,
    ) -> Result<Vec<Listing>, ProviderError>;
}

/// Use the upstream link when it is an absolute http(s) URL, otherwise the
/// provider's own search page.
pub fn normalize_url<'a, I>(candidates: I, fallback: impl FnOnce() -> String) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|link| !link.is_empty())
        .filter(|link| is_absolute_http(link))
        .map(str::to_string)
        .unwrap_or_else(fallback)
}

pub fn is_absolute_http(link: &str) -> bool {
    Url::parse(link)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

/// `{prefix}{encoded terms}`, e.g. a search-engine results page
pub fn search_page_url(prefix: &str, terms: &str) -> String {
    format!("{}{}", prefix, urlencoding::encode(terms))
}

/// Treat empty or whitespace-only upstream strings as missing
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Resolve the listing location: upstream, then the query, then "Remote"
pub fn listing_location(upstream: Option<String>, query_location: &str) -> String {
    non_empty(upstream)
        .or_else(|| non_empty(Some(query_location.to_string())))
        .unwrap_or_else(|| REMOTE.to_string())
}

/// Pull salary bounds out of free text such as "$80K–$120K a year".
///
/// A single figure is used for both bounds.
pub fn parse_salary_text(text: &str) -> (Option<f64>, Option<f64>) {
    static AMOUNT: OnceLock<Regex> = OnceLock::new();
    let amount = AMOUNT.get_or_init(|| {
        Regex::new(r"(\d[\d,]*(?:\.\d+)?)\s*([kK])?").expect("salary pattern must compile")
    });

    let figures: Vec<f64> = amount
        .captures_iter(text)
        .filter_map(|caps| {
            let value: f64 = caps[1].replace(',', "").parse().ok()?;
            let multiplier = if caps.get(2).is_some() { 1_000.0 } else { 1.0 };
            Some(value * multiplier)
        })
        .filter(|value| *value > 0.0)
        .collect();

    match figures.as_slice() {
        [] => (None, None),
        [only] => (Some(*only), Some(*only)),
        [first, second, ..] => (Some(first.min(*second)), Some(first.max(*second))),
    }
}

/// Parse an upstream timestamp: RFC 3339, a bare date, or relative text such
/// as "3 days ago". Unknown formats resolve to `now`.
pub fn parse_posted_at(value: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
    static RELATIVE: OnceLock<Regex> = OnceLock::new();

    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return now;
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return ts.with_timezone(&Utc);
    }
    // Remotive omits the offset
    if let Ok(ts) = chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return ts.and_utc();
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(ts) = date.and_hms_opt(0, 0, 0) {
            return ts.and_utc();
        }
    }

    let relative = RELATIVE.get_or_init(|| {
        Regex::new(r"(?i)(\d+)\+?\s*(minute|hour|day|week|month)s?\s+ago")
            .expect("relative date pattern must compile")
    });
    if let Some(caps) = relative.captures(value) {
        let amount: i64 = caps[1].parse().unwrap_or(0);
        let age = match caps[2].to_lowercase().as_str() {
            "minute" => TimeDelta::try_minutes(amount),
            "hour" => TimeDelta::try_hours(amount),
            "day" => TimeDelta::try_days(amount),
            "week" => TimeDelta::try_weeks(amount),
            _ => amount.checked_mul(30).and_then(TimeDelta::try_days),
        };
        // Ages outside chrono's range are treated as unknown
        return age
            .and_then(|age| now.checked_sub_signed(age))
            .unwrap_or(now);
    }

    now
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_normalize_url_keeps_absolute_links() {
        let url = normalize_url([None, Some("https://jobs.example/1")], || "fallback".into());
        assert_eq!(url, "https://jobs.example/1");
    }

    #[test]
    fn test_normalize_url_rejects_relative_and_empty() {
        let fallback = || search_page_url("https://www.adzuna.com/search?q=", "rust dev");
        assert_eq!(
            normalize_url([Some("/jobs/1")], fallback),
            "https://www.adzuna.com/search?q=rust%20dev"
        );
        assert_eq!(normalize_url([Some("  ")], fallback), fallback());
        assert_eq!(normalize_url([Some("ftp://jobs.example")], fallback), fallback());
        assert_eq!(normalize_url(std::iter::empty::<Option<&str>>(), fallback), fallback());
    }

    #[test]
    fn test_listing_location_defaults() {
        assert_eq!(listing_location(Some("Paris".into()), "Berlin"), "Paris");
        assert_eq!(listing_location(Some("".into()), "Berlin"), "Berlin");
        assert_eq!(listing_location(None, ""), REMOTE);
    }

    #[test]
    fn test_parse_salary_text() {
        assert_eq!(parse_salary_text("$100,000"), (Some(100_000.0), Some(100_000.0)));
        assert_eq!(parse_salary_text("$120K–$80K a year"), (Some(80_000.0), Some(120_000.0)));
        assert_eq!(parse_salary_text("competitive"), (None, None));
    }

    #[test]
    fn test_parse_posted_at_formats() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        let ts = parse_posted_at(Some("2024-01-01T10:00:00Z"), now);
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());

        let ts = parse_posted_at(Some("2024-01-01"), now);
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

        let ts = parse_posted_at(Some("2 days ago"), now);
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 6, 13, 12, 0, 0).unwrap());

        assert_eq!(parse_posted_at(Some("yesterday-ish"), now), now);
        assert_eq!(parse_posted_at(None, now), now);
    }

    #[test]
    fn test_parse_posted_at_out_of_range_age_resolves_to_now() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        assert_eq!(parse_posted_at(Some("100000000 days ago"), now), now);
        assert_eq!(parse_posted_at(Some("999999999999 weeks ago"), now), now);
        assert_eq!(parse_posted_at(Some("999999999999999999 months ago"), now), now);
        // Too many digits for an i64
        assert_eq!(parse_posted_at(Some("99999999999999999999999 hours ago"), now), now);

        let ts = parse_posted_at(Some("3 months ago"), now);
        assert_eq!(ts, now - TimeDelta::days(90));
    }
}
