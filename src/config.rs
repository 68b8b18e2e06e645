// Process-wide configuration, loaded once at startup and passed down explicitly

use crate::offers::PriceSelection;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing API key: set API_KEY in the environment or the .env file")]
    MissingApiKey,

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

// Provider client configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_host: String,
    pub locale: String,
    pub currency: String,
    pub eapid: u32,
    pub site_id: u64,
    pub timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://hotels4.p.rapidapi.com".to_string(),
            api_key: String::new(),
            api_host: "hotels4.p.rapidapi.com".to_string(),
            locale: "en_US".to_string(),
            currency: "USD".to_string(),
            eapid: 1,
            site_id: 300000001,
            timeout_ms: 30000,
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub max_concurrent_fetches: usize,
    pub price_selection: PriceSelection,
    pub bind_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            max_concurrent_fetches: 4,
            price_selection: PriceSelection::FirstListed,
            bind_addr: "127.0.0.1:5000".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads `env_file` into the process environment (if present), then reads
    /// the configuration from it. Values already set in the environment win.
    pub fn load(env_file: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let env_file = env_file.as_ref();
        match dotenv::from_path(env_file) {
            Ok(()) => info!("Loaded environment from {}", env_file.display()),
            Err(e) => warn!("Could not load {}: {}", env_file.display(), e),
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup, falling back to
    /// defaults for everything except the API key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();
        let provider_defaults = defaults.provider;

        let provider = ProviderConfig {
            base_url: lookup("PROVIDER_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(provider_defaults.base_url),
            api_key: lookup("API_KEY").unwrap_or_default(),
            api_host: lookup("PROVIDER_HOST").unwrap_or(provider_defaults.api_host),
            locale: lookup("PROVIDER_LOCALE").unwrap_or(provider_defaults.locale),
            currency: lookup("PROVIDER_CURRENCY").unwrap_or(provider_defaults.currency),
            eapid: parse_or(&lookup, "PROVIDER_EAPID", provider_defaults.eapid)?,
            site_id: parse_or(&lookup, "PROVIDER_SITE_ID", provider_defaults.site_id)?,
            timeout_ms: parse_or(&lookup, "REQUEST_TIMEOUT_MS", provider_defaults.timeout_ms)?,
        };

        let max_concurrent_fetches = parse_or(
            &lookup,
            "MAX_CONCURRENT_FETCHES",
            defaults.max_concurrent_fetches,
        )?;
        if max_concurrent_fetches == 0 {
            return Err(ConfigError::InvalidValue {
                key: "MAX_CONCURRENT_FETCHES".to_string(),
                value: "0".to_string(),
            });
        }

        Ok(Self {
            provider,
            max_concurrent_fetches,
            price_selection: parse_or(&lookup, "OFFER_PRICE_SELECTION", defaults.price_selection)?,
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
        })
    }

    /// Rejects a configuration the provider would refuse anyway.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value,
            }),
        None => Ok(default),
    }
}
