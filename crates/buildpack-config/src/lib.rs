//! Configuration for the buildpack registry client
//!
//! This crate resolves the registry base URL, extra request headers and the
//! release polling budget from the process environment. Resolution happens
//! once, when a client is constructed.

pub mod env;
pub mod settings;

// Re-export main types
pub use env::{ConfigLoader, HEADERS_ENV, REGISTRY_URL_ENV};
pub use settings::{PollConfig, RegistryConfig, DEFAULT_REGISTRY_URL};

use buildpack_core::error::BuildpackError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, BuildpackError>;
