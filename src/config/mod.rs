#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_endpoint, validate_marker_style, validate_required_text, validate_timeout, Validate,
};
use serde::{Deserialize, Serialize};

pub const GEOCODER_API_KEY_ENV: &str = "PHARMACY_GEOCODER_API_KEY";
pub const SEARCH_API_KEY_ENV: &str = "PHARMACY_SEARCH_API_KEY";
pub const STATIC_MAPS_API_KEY_ENV: &str = "PHARMACY_STATIC_MAPS_API_KEY";

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocoderSettings {
    pub endpoint: String,
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    pub endpoint: String,
    pub api_key: String,
    pub text: String,
    pub lang: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticMapSettings {
    pub endpoint: String,
    pub api_key: String,
    pub origin_style: String,
    pub place_style: String,
}

/// Fully resolved settings handed to each component at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub timeout_seconds: u64,
    pub geocoder: GeocoderSettings,
    pub search: SearchSettings,
    pub static_map: StaticMapSettings,
    pub viewer: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            geocoder: GeocoderSettings {
                endpoint: "http://geocode-maps.yandex.ru/1.x/".to_string(),
                api_key: String::new(),
            },
            search: SearchSettings {
                endpoint: "https://search-maps.yandex.ru/v1/".to_string(),
                api_key: String::new(),
                text: "аптека".to_string(),
                lang: "ru_RU".to_string(),
            },
            static_map: StaticMapSettings {
                endpoint: "https://static-maps.yandex.ru/1.x".to_string(),
                api_key: String::new(),
                origin_style: "pm2rdl".to_string(),
                place_style: "pm2grl".to_string(),
            },
            viewer: None,
        }
    }
}

impl Settings {
    /// Overrides API keys from the environment through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(GEOCODER_API_KEY_ENV) {
            self.geocoder.api_key = key;
        }
        if let Some(key) = non_empty(SEARCH_API_KEY_ENV) {
            self.search.api_key = key;
        }
        if let Some(key) = non_empty(STATIC_MAPS_API_KEY_ENV) {
            self.static_map.api_key = key;
        }
    }

    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout_seconds))
            .build()
            .map_err(|e| crate::utils::error::LocatorError::ConfigError {
                message: format!("failed to build HTTP client: {}", e),
            })
    }

    /// Services reject requests without a key; that surfaces later as a request failure.
    pub fn warn_missing_keys(&self) {
        for (service, key) in [
            ("geocoder", &self.geocoder.api_key),
            ("search", &self.search.api_key),
            ("static_map", &self.static_map.api_key),
        ] {
            if key.trim().is_empty() {
                tracing::warn!("No API key configured for {}", service);
            }
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_timeout(self.timeout_seconds)?;
        validate_endpoint("geocoder", &self.geocoder.endpoint)?;
        validate_endpoint("search", &self.search.endpoint)?;
        validate_endpoint("static_map", &self.static_map.endpoint)?;
        validate_required_text("search.text", &self.search.text)?;
        validate_required_text("search.lang", &self.search.lang)?;
        validate_marker_style("static_map.origin_style", &self.static_map.origin_style)?;
        validate_marker_style("static_map.place_style", &self.static_map.place_style)?;
        if let Some(viewer) = &self.viewer {
            validate_required_text("display.viewer", viewer)?;
        }
        Ok(())
    }
}
