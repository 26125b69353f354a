//! Buildpack registry client
//!
//! This crate talks to the Heroku buildpack registry: it validates buildpack
//! slugs, publishes, rolls back and archives buildpacks, searches and reads
//! their metadata, and waits for asynchronous revision builds to settle.

pub mod api;
pub mod client;
pub mod transport;

// Re-export main types
pub use api::{Action, SearchQuery};
pub use client::{PollState, RegistryClient, ReleaseOutcome};
pub use transport::{HeaderOptions, Response, Transport, REGISTRY_MEDIA_TYPE, TWO_FACTOR_HEADER};

pub use buildpack_config::{PollConfig, RegistryConfig};
pub use buildpack_core::error::{BuildpackError, BuildpackResult, ResponseError};
pub use buildpack_core::types::{
    is_valid_slug, validate_slug, Buildpack, Category, InfoData, Readme, Revision, RevisionStatus,
    Slug, Source, Support,
};
