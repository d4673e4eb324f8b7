// Core aggregation pipeline
pub mod aggregator;
pub mod dedup;
pub mod fallback;
pub mod keywords;

pub use aggregator::{sanitize_limit, JobAggregator, SearchError, SearchQuery};
pub use dedup::dedupe;
pub use fallback::FallbackGenerator;
pub use keywords::{build_search_query, extract_keywords, extract_terms, extract_title};
