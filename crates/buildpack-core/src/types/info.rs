//! Aggregated buildpack summary.

use serde::{Deserialize, Serialize};

use super::Category;

/// Human-oriented summary assembled from a buildpack, its current revision
/// and its readme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoData {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
}
