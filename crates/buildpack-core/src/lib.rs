//! # buildpack-core
//!
//! Core types and utilities shared across the buildpack registry crates.
//!
//! This crate provides:
//! - Buildpack, Revision and Readme types as returned by the registry
//! - Slug validation for `namespace/name` identifiers
//! - BuildpackError enum for unified error handling
//! - Encoding helpers for request paths and readme content
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Registry data types (Buildpack, Revision, InfoData, etc.)
//! - `error`: Error types and result aliases
//! - `utils`: Encoding and decoding helpers

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{BuildpackError, BuildpackResult, ResponseError};
pub use types::{
    is_valid_slug, validate_slug, Buildpack, Category, InfoData, Logo, LogoImage, Readme,
    Revision, RevisionStatus, Slug, Source, Support, BUILDPACK_FORMATTING_MESSAGE,
};
