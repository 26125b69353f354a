//! Readme content as served by the registry.

use serde::{Deserialize, Serialize};

use crate::error::BuildpackResult;
use crate::utils::decode_content;

/// Readme body with its declared encoding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readme {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub sha: Option<String>,
}

impl Readme {
    /// Decode the content with its declared encoding.
    ///
    /// Returns `Ok(None)` when there is no content. A missing encoding is
    /// treated as UTF-8.
    pub fn decode(&self) -> BuildpackResult<Option<String>> {
        match self.content.as_deref() {
            Some(content) if !content.is_empty() => {
                let encoding = self.encoding.as_deref().unwrap_or("utf8");
                decode_content(content, encoding).map(Some)
            }
            _ => Ok(None),
        }
    }
}
