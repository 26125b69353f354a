//! Environment overrides for the registry client

use std::collections::BTreeMap;

use buildpack_core::error::BuildpackError;
use tracing::debug;

use crate::settings::RegistryConfig;
use crate::ConfigResult;

/// Overrides the registry base URL
pub const REGISTRY_URL_ENV: &str = "HEROKU_BUILDPACK_REGISTRY_URL";

/// JSON object of extra headers sent with every request
pub const HEADERS_ENV: &str = "HEROKU_HEADERS";

/// Resolves a [`RegistryConfig`] from environment variables
pub struct ConfigLoader<F> {
    lookup: F,
}

impl ConfigLoader<fn(&str) -> Option<String>> {
    /// Loader backed by the process environment
    pub fn from_env() -> Self {
        Self {
            lookup: |key| std::env::var(key).ok(),
        }
    }
}

impl<F> ConfigLoader<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Loader backed by an arbitrary lookup function
    pub fn from_lookup(lookup: F) -> Self {
        Self { lookup }
    }

    /// Apply environment overrides on top of the defaults
    pub fn load(&self) -> ConfigResult<RegistryConfig> {
        self.load_onto(RegistryConfig::default())
    }

    /// Apply environment overrides on top of `base`
    pub fn load_onto(&self, base: RegistryConfig) -> ConfigResult<RegistryConfig> {
        let mut config = base;

        if let Some(url) = (self.lookup)(REGISTRY_URL_ENV) {
            config.base_url = parse_base_url(&url)?;
            debug!(base_url = %config.base_url, "registry URL overridden from environment");
        }

        if let Some(raw) = (self.lookup)(HEADERS_ENV) {
            if !raw.trim().is_empty() {
                for (name, value) in parse_headers(&raw)? {
                    config.extra_headers.insert(name, value);
                }
                debug!(count = config.extra_headers.len(), "extra headers loaded from environment");
            }
        }

        Ok(config)
    }
}

/// Validate a base URL override and strip trailing slashes
fn parse_base_url(raw: &str) -> ConfigResult<String> {
    let trimmed = raw.trim();
    let parsed = url::Url::parse(trimmed).map_err(|e| BuildpackError::Config {
        field: REGISTRY_URL_ENV.to_string(),
        reason: format!("Invalid URL '{}': {}", trimmed, e),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.trim_end_matches('/').to_string()),
        scheme => Err(BuildpackError::Config {
            field: REGISTRY_URL_ENV.to_string(),
            reason: format!("Unsupported URL scheme '{}'", scheme),
        }),
    }
}

/// Parse the extra headers JSON object
fn parse_headers(raw: &str) -> ConfigResult<BTreeMap<String, String>> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| BuildpackError::Config {
        field: HEADERS_ENV.to_string(),
        reason: format!("Invalid JSON: {}", e),
    })?;

    let object = value.as_object().ok_or_else(|| BuildpackError::Config {
        field: HEADERS_ENV.to_string(),
        reason: "Expected a JSON object of header names to values".to_string(),
    })?;

    let mut headers = BTreeMap::new();
    for (name, value) in object {
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            _ => {
                return Err(BuildpackError::Config {
                    field: HEADERS_ENV.to_string(),
                    reason: format!("Header '{}' must be a string", name),
                })
            }
        };
        headers.insert(name.clone(), value);
    }

    Ok(headers)
}
