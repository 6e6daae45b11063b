use crate::config::Settings;
use crate::utils::error::{LocatorError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk configuration. Every section and key is optional and only
/// overrides what it names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub http: Option<HttpConfig>,
    pub geocoder: Option<ServiceConfig>,
    pub search: Option<SearchConfig>,
    pub static_map: Option<StaticMapConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub text: Option<String>,
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticMapConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub origin_style: Option<String>,
    pub place_style: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    pub viewer: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| LocatorError::ConfigError {
            message: format!(
                "cannot read config file '{}': {}",
                path.as_ref().display(),
                e
            ),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LocatorError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LocatorError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(timeout) = self.http.as_ref().and_then(|h| h.timeout_seconds) {
            settings.timeout_seconds = timeout;
        }

        if let Some(geocoder) = &self.geocoder {
            overwrite(&mut settings.geocoder.endpoint, &geocoder.endpoint);
            overwrite(&mut settings.geocoder.api_key, &geocoder.api_key);
        }

        if let Some(search) = &self.search {
            overwrite(&mut settings.search.endpoint, &search.endpoint);
            overwrite(&mut settings.search.api_key, &search.api_key);
            overwrite(&mut settings.search.text, &search.text);
            overwrite(&mut settings.search.lang, &search.lang);
        }

        if let Some(static_map) = &self.static_map {
            overwrite(&mut settings.static_map.endpoint, &static_map.endpoint);
            overwrite(&mut settings.static_map.api_key, &static_map.api_key);
            overwrite(&mut settings.static_map.origin_style, &static_map.origin_style);
            overwrite(&mut settings.static_map.place_style, &static_map.place_style);
        }

        if let Some(viewer) = self.display.as_ref().and_then(|d| d.viewer.clone()) {
            settings.viewer = Some(viewer);
        }
    }
}

fn overwrite(target: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}
