// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{AggregationResult, ExtractedTerms, Listing, ListingSource, ProviderFailure, ProviderOutcome, Salary};
pub use requests::SearchJobsRequest;
pub use responses::{ErrorResponse, HealthResponse, SearchJobsData, SearchJobsResponse};
