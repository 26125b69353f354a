//! Data types exchanged with the buildpack registry.
//!
//! This module provides the fundamental types used by the client:
//! - Buildpack metadata with its support and source descriptors
//! - Revisions and their publication status
//! - Readme content and the aggregated info summary
//! - Slug parsing and validation

pub mod buildpack;
pub mod info;
pub mod lenient;
pub mod readme;
pub mod revision;
pub mod slug;

// Re-export all public types
pub use buildpack::{Buildpack, Category, Logo, LogoImage, Source, Support};
pub use info::InfoData;
pub use readme::Readme;
pub use revision::{Revision, RevisionStatus};
pub use slug::{is_valid_slug, validate_slug, Slug, BUILDPACK_FORMATTING_MESSAGE};
