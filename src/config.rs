use std::time::Duration;

use clap::Parser;
use reqwest::Url;

use crate::app_system::AppSettings;
use crate::clients::http_client::DEFAULT_BASE_URL;
use crate::error::ConfigError;

/// Command line arguments, each with an environment fallback.
#[derive(Parser, Debug, Clone)]
#[command(name = "delivery_client")]
#[command(about = "Terminal client for the food delivery API")]
#[command(version)]
pub struct Config {
    /// Base URL of the delivery API
    #[arg(long, env = "DELIVERY_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Page opened at startup, e.g. `/cardapio.html?category=pizza`
    #[arg(long, env = "DELIVERY_PAGE", default_value = "/")]
    pub page: String,

    /// Quiet period before a search runs
    #[arg(long, env = "DELIVERY_SEARCH_DEBOUNCE_MS", default_value_t = 500)]
    pub search_debounce_ms: u64,

    /// Show demonstration dishes when the API cannot serve the home page
    #[arg(long, env = "DELIVERY_DEMO_FALLBACK")]
    pub demo_fallback: bool,

    #[arg(long, env = "DELIVERY_DEMO_DELAY_MS", default_value_t = 2000)]
    pub demo_delay_ms: u64,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api_url).map_err(|e| ConfigError::InvalidApiUrl {
            url: self.api_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidApiUrl {
                url: self.api_url.clone(),
                reason: format!("unsupported scheme {}", url.scheme()),
            });
        }
        if self.search_debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce);
        }
        Ok(())
    }

    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            search_debounce: Duration::from_millis(self.search_debounce_ms),
            demo_fallback: self.demo_fallback,
            demo_delay: Duration::from_millis(self.demo_delay_ms),
            ..AppSettings::default()
        }
    }
}
