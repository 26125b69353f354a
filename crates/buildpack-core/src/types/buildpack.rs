//! Buildpack metadata types.
//!
//! Mirrors the buildpack resource served by the registry, including the
//! method-tagged support descriptor and the type-tagged source descriptor.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient::{lenient, lenient_or_default, null_as_default};

/// Buildpack resource as returned by the registry.
///
/// Only `namespace` and `name` are relied on; every other field tolerates
/// `null`, absence or an unexpected shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buildpack {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub two_factor_authentication: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub blob_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub source: Source,
    #[serde(default, deserialize_with = "lenient")]
    pub support: Option<Support>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub namespace: String,
    #[serde(default, deserialize_with = "lenient")]
    pub logo: Option<Logo>,
}

impl Buildpack {
    /// The `namespace/name` slug of this buildpack
    pub fn slug(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }
}

/// Registry category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Languages,
    Tools,
    Packages,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Languages => "languages",
            Category::Tools => "tools",
            Category::Packages => "packages",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the buildpack's code lives
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SourceDescriptor", into = "SourceDescriptor")]
pub enum Source {
    Github { owner: String, repo: String },
    /// Source types this client does not know about, or an incomplete
    /// GitHub descriptor
    #[default]
    Other,
}

impl Source {
    /// Repository URL for GitHub sources
    pub fn github_url(&self) -> Option<String> {
        match self {
            Source::Github { owner, repo } => Some(format!("https://github.com/{}/{}", owner, repo)),
            Source::Other => None,
        }
    }
}

/// Wire shape of [`Source`]
#[derive(Debug, Default, Serialize, Deserialize)]
struct SourceDescriptor {
    #[serde(rename = "type", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    repo: Option<String>,
}

impl From<SourceDescriptor> for Source {
    fn from(raw: SourceDescriptor) -> Self {
        match (raw.kind.as_deref(), raw.owner, raw.repo) {
            (Some("github"), Some(owner), Some(repo)) => Source::Github { owner, repo },
            _ => Source::Other,
        }
    }
}

impl From<Source> for SourceDescriptor {
    fn from(source: Source) -> Self {
        match source {
            Source::Github { owner, repo } => SourceDescriptor {
                kind: Some("github".to_string()),
                owner: Some(owner),
                repo: Some(repo),
            },
            Source::Other => SourceDescriptor::default(),
        }
    }
}

/// How the author supports the buildpack, discriminated by method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SupportDescriptor", into = "SupportDescriptor")]
pub enum Support {
    Github { address: Option<String> },
    Email { address: Option<String> },
    Website { address: Option<String> },
    Unsupported { address: Option<String> },
    /// A method this client does not know about
    Other { method: String, address: Option<String> },
}

impl Support {
    /// The declared method name
    pub fn method(&self) -> &str {
        match self {
            Support::Github { .. } => "github",
            Support::Email { .. } => "email",
            Support::Website { .. } => "website",
            Support::Unsupported { .. } => "unsupported",
            Support::Other { method, .. } => method,
        }
    }

    /// The raw declared address, if any
    pub fn address(&self) -> Option<&str> {
        match self {
            Support::Github { address }
            | Support::Email { address }
            | Support::Website { address }
            | Support::Unsupported { address }
            | Support::Other { address, .. } => address.as_deref(),
        }
    }
}

/// Wire shape of [`Support`]
#[derive(Debug, Serialize, Deserialize)]
struct SupportDescriptor {
    #[serde(default, deserialize_with = "lenient_or_default")]
    method: String,
    #[serde(default, deserialize_with = "lenient")]
    address: Option<String>,
}

impl From<SupportDescriptor> for Support {
    fn from(raw: SupportDescriptor) -> Self {
        let address = raw.address;
        match raw.method.as_str() {
            "github" => Support::Github { address },
            "email" => Support::Email { address },
            "website" => Support::Website { address },
            "unsupported" => Support::Unsupported { address },
            _ => Support::Other {
                method: raw.method,
                address,
            },
        }
    }
}

impl From<Support> for SupportDescriptor {
    fn from(support: Support) -> Self {
        let method = support.method().to_string();
        let address = support.address().map(str::to_string);
        SupportDescriptor { method, address }
    }
}

/// Logo variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logo {
    pub small: LogoImage,
    pub medium: LogoImage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
}
