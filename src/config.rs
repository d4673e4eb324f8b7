use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::services::adzuna::ADZUNA_BASE_URL;
use crate::services::remotive::REMOTIVE_BASE_URL;
use crate::services::serpapi::SERPAPI_BASE_URL;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub providers: ProvidersSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
    /// Empty means any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            allowed_origins: Vec::new(),
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3000 }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,
    /// Include provider errors in search responses
    #[serde(default)]
    pub diagnostics: bool,
    /// Fixed seed for fallback salaries and dates
    pub fallback_seed: Option<u64>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            provider_timeout_secs: default_provider_timeout_secs(),
            diagnostics: false,
            fallback_seed: None,
        }
    }
}

fn default_provider_timeout_secs() -> u64 { 10 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProvidersSettings {
    #[serde(default)]
    pub adzuna: AdzunaSettings,
    #[serde(default)]
    pub serpapi: SerpApiSettings,
    #[serde(default)]
    pub remotive: RemotiveSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdzunaSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub app_id: Option<String>,
    pub app_key: Option<String>,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_adzuna_url")]
    pub base_url: String,
}

impl Default for AdzunaSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            app_id: None,
            app_key: None,
            country: default_country(),
            base_url: default_adzuna_url(),
        }
    }
}

fn default_country() -> String { "us".to_string() }
fn default_adzuna_url() -> String { ADZUNA_BASE_URL.to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct SerpApiSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub api_key: Option<String>,
    #[serde(default = "default_serpapi_url")]
    pub base_url: String,
}

impl Default for SerpApiSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            base_url: default_serpapi_url(),
        }
    }
}

fn default_serpapi_url() -> String { SERPAPI_BASE_URL.to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct RemotiveSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_remotive_url")]
    pub base_url: String,
}

impl Default for RemotiveSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default_remotive_url(),
        }
    }
}

fn default_remotive_url() -> String { REMOTIVE_BASE_URL.to_string() }

fn default_true() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with JOBSCOUT_)
    /// 5. Provider credential variables (ADZUNA_APP_ID, SERP_API_KEY, ...)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., JOBSCOUT__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("JOBSCOUT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_credential_vars(settings, |name| std::env::var(name).ok())?;

        settings.try_deserialize()
    }

}

/// Provider credentials are conventionally exported under their own names
const CREDENTIAL_VARS: &[(&str, &str)] = &[
    ("ADZUNA_APP_ID", "providers.adzuna.app_id"),
    ("ADZUNA_APP_KEY", "providers.adzuna.app_key"),
    ("ADZUNA_COUNTRY", "providers.adzuna.country"),
    ("SERP_API_KEY", "providers.serpapi.api_key"),
];

fn apply_credential_vars<F>(settings: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = Config::builder().add_source(settings);

    for (var, key) in CREDENTIAL_VARS {
        if let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) {
            builder = builder.set_override(*key, value)?;
        }
    }

    builder.build()
}
