// Service exports
pub mod adzuna;
pub mod provider;
pub mod registry;
pub mod remotive;
pub mod serpapi;

pub use adzuna::AdzunaProvider;
pub use provider::{JobProvider, ProviderError};
pub use registry::build_providers;
pub use remotive::RemotiveProvider;
pub use serpapi::SerpApiProvider;
