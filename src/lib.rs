//! Job Scout - job-search aggregation service
//!
//! Turns a free-text job description into a search query, fans it out to the
//! configured job providers concurrently, and merges the results into one
//! deduplicated list, falling back to synthetic suggestions when no provider
//! returns anything.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{JobAggregator, SearchError, SearchQuery, FallbackGenerator, extract_keywords, extract_title};
pub use models::{AggregationResult, Listing, ListingSource, SearchJobsRequest, SearchJobsResponse};
pub use services::{JobProvider, ProviderError, build_providers};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let keywords = extract_keywords("Kubernetes operators written in Rust for Kubernetes");
        assert_eq!(keywords[0], "kubernetes");
    }
}
