//! HTTP transport for the registry API
//!
//! Issues GET and POST requests against the configured base URL with the
//! registry's content negotiation headers. Responses are read eagerly so
//! both the status and the raw body text are available to callers.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use buildpack_config::RegistryConfig;
use buildpack_core::error::{BuildpackError, BuildpackResult, ResponseError};

/// Versioned media type of the buildpack registry API
pub const REGISTRY_MEDIA_TYPE: &str = "application/vnd.heroku+json; version=3.buildpack-registry";

/// Header carrying a one-time second factor code
pub const TWO_FACTOR_HEADER: &str = "Heroku-Two-Factor-Code";

/// Per-request authentication options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderOptions {
    /// Bearer token for authentication
    pub token: Option<String>,
    /// Second factor code for buildpacks with two-factor authentication
    pub second_factor: Option<String>,
}

impl HeaderOptions {
    /// Options carrying a bearer token and an optional second factor
    pub fn authenticated(token: &str, second_factor: Option<&str>) -> Self {
        Self {
            token: Some(token.to_string()),
            second_factor: second_factor.map(str::to_string),
        }
    }
}

/// A fully read registry response
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    path: String,
    body: String,
}

impl Response {
    pub(crate) fn new(status: StatusCode, path: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            path: path.into(),
            body: body.into(),
        }
    }

    /// Numeric status code
    pub fn status(&self) -> u16 {
        self.status.as_u16()
    }

    /// Whether the registry answered 200
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Request path this response belongs to
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw body text
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> BuildpackResult<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            BuildpackError::decode(self.path.clone(), format!("Malformed JSON body: {}", e), e)
        })
    }

    /// Convert into the error carried by a non-200 response
    pub fn into_error(self) -> ResponseError {
        ResponseError::new(self.status.as_u16(), self.path, self.body)
    }

    /// 200 decodes the body, any other status becomes a [`ResponseError`]
    pub fn into_result<T: DeserializeOwned>(self) -> BuildpackResult<T> {
        if self.is_ok() {
            self.json()
        } else {
            Err(self.into_error().into())
        }
    }
}

/// HTTP transport bound to one registry base URL
#[derive(Debug, Clone)]
pub struct Transport {
    /// Underlying HTTP client with connection pooling
    client: Client,
    /// Base registry URL
    base_url: String,
    /// Static headers from configuration
    extra_headers: HeaderMap,
}

impl Transport {
    /// Build a transport from resolved configuration
    pub fn new(config: &RegistryConfig) -> BuildpackResult<Self> {
        let client = ClientBuilder::new()
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(config.timeout)
            .gzip(true)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| BuildpackError::network(format!("Failed to create HTTP client: {}", e), e))?;

        let mut extra_headers = HeaderMap::new();
        for (name, value) in &config.extra_headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| BuildpackError::Config {
                field: "extra_headers".to_string(),
                reason: format!("Invalid header name '{}': {}", name, e),
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| BuildpackError::Config {
                field: "extra_headers".to_string(),
                reason: format!("Invalid value for header '{}': {}", name, e),
            })?;
            extra_headers.insert(header_name, header_value);
        }

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            extra_headers,
        })
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Headers for one request: content negotiation, authentication, then
    /// configured extras
    pub fn headers(&self, options: &HeaderOptions) -> BuildpackResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(REGISTRY_MEDIA_TYPE));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = &options.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| BuildpackError::Config {
                field: "token".to_string(),
                reason: format!("Invalid auth token: {}", e),
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        if let Some(code) = options.second_factor.as_deref().filter(|code| !code.is_empty()) {
            let value = HeaderValue::from_str(code).map_err(|e| BuildpackError::Config {
                field: "second_factor".to_string(),
                reason: format!("Invalid second factor: {}", e),
            })?;
            headers.insert(TWO_FACTOR_HEADER, value);
        }

        for (name, value) in &self.extra_headers {
            headers.insert(name.clone(), value.clone());
        }

        Ok(headers)
    }

    /// GET `path` with the default headers
    pub async fn get(&self, path: &str) -> BuildpackResult<Response> {
        let headers = self.headers(&HeaderOptions::default())?;
        let request = self.client.get(self.url(path)).headers(headers);
        self.execute(path, request).await
    }

    /// POST `path` with an optional JSON body
    pub async fn post(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
        options: &HeaderOptions,
    ) -> BuildpackResult<Response> {
        let headers = self.headers(options)?;
        let mut request = self.client.post(self.url(path)).headers(headers);
        if let Some(body) = body {
            request = request.body(body.to_string());
        }
        self.execute(path, request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(&self, path: &str, request: reqwest::RequestBuilder) -> BuildpackResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| BuildpackError::network(format!("Request to {} failed: {}", path, e), e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BuildpackError::network(format!("Failed to read response from {}: {}", path, e), e))?;

        debug!(path = %path, status = status.as_u16(), "registry response");

        Ok(Response::new(status, path, body))
    }
}
