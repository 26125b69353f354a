//! Revision types.
//!
//! A revision is one published version of a buildpack. Revisions are created
//! `pending` and settle to `published` or `failed` on the server.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publication state of a revision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevisionStatus {
    Pending,
    Published,
    #[default]
    Failed,
}

impl RevisionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevisionStatus::Pending => "pending",
            RevisionStatus::Published => "published",
            RevisionStatus::Failed => "failed",
        }
    }

    /// Whether the server is done processing the revision
    pub fn is_settled(&self) -> bool {
        !matches!(self, RevisionStatus::Pending)
    }
}

impl fmt::Display for RevisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Revision resource as returned by the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    pub id: String,
    pub buildpack_id: String,
    #[serde(default)]
    pub published_by_email: Option<String>,
    #[serde(default)]
    pub published_by_id: Option<String>,
    /// Git ref the revision was built from
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
    #[serde(default)]
    pub tarball: Option<String>,
    pub status: RevisionStatus,
    #[serde(default)]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub release: u64,
    #[serde(default)]
    pub checksum: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
}

impl Revision {
    /// Pick the current revision: highest release number wins.
    ///
    /// When two revisions share a release number the later one in `revisions`
    /// is taken. Release numbers are unique at the registry, so callers should
    /// not depend on this.
    pub fn current(revisions: &[Revision]) -> Option<&Revision> {
        revisions.iter().fold(None, |best: Option<&Revision>, rev| match best {
            Some(b) if b.release > rev.release => Some(b),
            _ => Some(rev),
        })
    }
}
