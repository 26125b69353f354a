//! Resolved client settings

use std::collections::BTreeMap;
use std::time::Duration;

/// Production registry endpoint
pub const DEFAULT_REGISTRY_URL: &str = "https://buildpack-registry.heroku.com";

/// Budget for awaiting an asynchronous revision outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// Number of revision fetches before giving up
    pub max_attempts: u32,
    /// Delay between fetches
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: 60,
            interval: Duration::from_millis(2000),
        }
    }
}

/// Settings a registry client is constructed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Base URL without a trailing slash
    pub base_url: String,
    /// Static headers added to every request
    pub extra_headers: BTreeMap<String, String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// User agent sent with every request
    pub user_agent: String,
    /// Release polling budget
    pub poll: PollConfig,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REGISTRY_URL.to_string(),
            extra_headers: BTreeMap::new(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("buildpack-registry/", env!("CARGO_PKG_VERSION")).to_string(),
            poll: PollConfig::default(),
        }
    }
}

impl RegistryConfig {
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.extra_headers = headers;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(name.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }
}
