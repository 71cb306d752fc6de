use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "prescription-verifier";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_KNOWLEDGE_BASE_PATH: &str = "datasets/drug_data.json";
pub const DEFAULT_ENRICHMENT_TIMEOUT_SECS: u64 = 10;

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "prescription_verifier=info,tower_http=info"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Credentials and endpoint for the optional enrichment provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentConfig {
    pub api_key: String,
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            url: String::new(),
            timeout_secs: DEFAULT_ENRICHMENT_TIMEOUT_SECS,
        }
    }
}

impl EnrichmentConfig {
    /// Both key and endpoint must be present for the provider to be used.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.url.trim().is_empty()
    }
}

/// Process configuration. Built once in `main` and passed down explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub knowledge_base_path: PathBuf,
    pub enrichment: EnrichmentConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            knowledge_base_path: PathBuf::from(DEFAULT_KNOWLEDGE_BASE_PATH),
            enrichment: EnrichmentConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup. Unset keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("API_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "API_PORT",
                value: raw,
            })?,
            None => defaults.port,
        };

        let timeout_secs = match lookup("ENRICHMENT_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "ENRICHMENT_TIMEOUT_SECS",
                value: raw,
            })?,
            None => DEFAULT_ENRICHMENT_TIMEOUT_SECS,
        };

        Ok(Self {
            host: lookup("API_HOST").unwrap_or(defaults.host),
            port,
            knowledge_base_path: lookup("DRUG_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.knowledge_base_path),
            enrichment: EnrichmentConfig {
                api_key: lookup("ENRICHMENT_API_KEY").unwrap_or_default(),
                url: lookup("ENRICHMENT_URL").unwrap_or_default(),
                timeout_secs,
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
