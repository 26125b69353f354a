//! Buildpack slug parsing.
//!
//! A slug identifies a buildpack as `namespace/name`. The namespace is any
//! non-empty string without `/`; the name must start with an ASCII letter or
//! digit and may continue with letters, digits, `_` and `-`.

use std::fmt;
use std::str::FromStr;

use crate::error::{BuildpackError, BuildpackResult};

/// User-facing guidance shown when a slug is malformed
pub const BUILDPACK_FORMATTING_MESSAGE: &str = "To specify a buildpack, please format it like the following: namespace/name (e.g. heroku/ruby). Also names can only contain letters, numbers, '_', and '-'.";

/// A well-formed `namespace/name` identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug {
    pub namespace: String,
    pub name: String,
}

impl Slug {
    /// Parse a slug, rejecting malformed input with the formatting message
    pub fn parse(input: &str) -> BuildpackResult<Self> {
        let mut parts = input.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(namespace), Some(name), None)
                if !namespace.is_empty() && is_valid_name(name) =>
            {
                Ok(Self {
                    namespace: namespace.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(BuildpackError::InvalidSlug {
                slug: input.to_string(),
            }),
        }
    }
}

impl FromStr for Slug {
    type Err = BuildpackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Check a buildpack slug without allocating an error
pub fn is_valid_slug(input: &str) -> bool {
    validate_slug(input).is_ok()
}

/// Validate a buildpack slug before any remote call is made
pub fn validate_slug(input: &str) -> BuildpackResult<Slug> {
    Slug::parse(input)
}

/// `^[a-z0-9][a-z0-9_-]*$`, case-insensitive
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        }
        _ => false,
    }
}
