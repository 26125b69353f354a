//! Error types and result aliases for registry operations.
//!
//! Expected failures (a malformed slug, a non-200 registry response) are
//! modelled as dedicated variants so callers can match on them. Transport
//! and decoding faults carry their underlying source.

use thiserror::Error;

use crate::types::BUILDPACK_FORMATTING_MESSAGE;

/// A non-200 response from the registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{status} {path}: {description}")]
pub struct ResponseError {
    /// HTTP status code returned by the registry
    pub status: u16,
    /// Request path that was attempted
    pub path: String,
    /// Raw response body text
    pub description: String,
}

impl ResponseError {
    pub fn new(status: u16, path: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            status,
            path: path.into(),
            description: description.into(),
        }
    }
}

/// Unified error type for all registry client operations
#[derive(Error, Debug)]
pub enum BuildpackError {
    // Validation errors
    #[error("{}", BUILDPACK_FORMATTING_MESSAGE)]
    InvalidSlug { slug: String },

    // Remote errors
    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Failed to decode {path}: {message}")]
    Decode {
        path: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Config errors
    #[error("Configuration field '{field}' is invalid: {reason}")]
    Config { field: String, reason: String },
}

/// Result type alias for registry operations
pub type BuildpackResult<T> = Result<T, BuildpackError>;

impl BuildpackError {
    /// Create a network error from any error type
    pub fn network<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create a decode error for the given request path
    pub fn decode<E>(path: impl Into<String>, message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Decode {
            path: path.into(),
            message,
            source: Some(Box::new(source)),
        }
    }

    /// The registry response behind this error, if it was a remote error
    pub fn response(&self) -> Option<&ResponseError> {
        match self {
            BuildpackError::Response(err) => Some(err),
            _ => None,
        }
    }

    /// HTTP status of a remote error
    pub fn status(&self) -> Option<u16> {
        self.response().map(|err| err.status)
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(self, BuildpackError::Network { .. })
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            BuildpackError::Response(err) => match err.status {
                401 => Some("Check that your API token is valid and not expired"),
                403 => Some("Make sure you have access to this buildpack and supplied a second factor if required"),
                404 => Some("Check the buildpack name spelling or try searching the registry"),
                _ => None,
            },
            BuildpackError::Network { .. } => Some("Check your internet connection and try again"),
            BuildpackError::Config { .. } => {
                Some("Check HEROKU_BUILDPACK_REGISTRY_URL and HEROKU_HEADERS in your environment")
            },
            _ => None,
        }
    }
}
