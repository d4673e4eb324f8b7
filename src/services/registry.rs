use std::sync::Arc;
use std::time::Duration;

use crate::config::ProvidersSettings;
use crate::services::adzuna::AdzunaProvider;
use crate::services::provider::{JobProvider, ProviderError};
use crate::services::remotive::RemotiveProvider;
use crate::services::serpapi::SerpApiProvider;

/// Build every enabled provider whose credentials are present.
///
/// Providers that cannot be constructed are skipped here so they are never
/// invoked at search time.
pub fn build_providers(settings: &ProvidersSettings, timeout: Duration) -> Vec<Arc<dyn JobProvider>> {
    let mut providers: Vec<Arc<dyn JobProvider>> = Vec::new();

    if settings.adzuna.enabled {
        let adzuna = &settings.adzuna;
        register(
            &mut providers,
            "Adzuna",
            AdzunaProvider::new(
                adzuna.base_url.clone(),
                adzuna.app_id.clone(),
                adzuna.app_key.clone(),
                adzuna.country.clone(),
                timeout,
            ),
        );
    }

    if settings.serpapi.enabled {
        let serpapi = &settings.serpapi;
        register(
            &mut providers,
            "SerpAPI",
            SerpApiProvider::new(serpapi.base_url.clone(), serpapi.api_key.clone(), timeout),
        );
    }

    if settings.remotive.enabled {
        register(
            &mut providers,
            "Remotive",
            RemotiveProvider::new(settings.remotive.base_url.clone(), timeout),
        );
    }

    providers
}

fn register<P>(providers: &mut Vec<Arc<dyn JobProvider>>, name: &str, built: Result<P, ProviderError>)
where
    P: JobProvider + 'static,
{
    match built {
        Ok(provider) => {
            tracing::info!("{} provider enabled", name);
            providers.push(Arc::new(provider));
        }
        Err(ProviderError::Misconfigured(reason)) => {
            tracing::info!("{} provider disabled: {}", name, reason);
        }
        Err(e) => {
            tracing::warn!("{} provider could not be created: {}", name, e);
        }
    }
}
