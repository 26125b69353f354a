//! Buildpack info aggregation
//!
//! Merges the buildpack resource, its current revision and its readme into
//! a single [`InfoData`]. The three reads run in order and the first failure
//! aborts the whole operation.

use serde::Deserialize;
use tracing::debug;

use buildpack_core::error::BuildpackResult;
use buildpack_core::types::lenient::{lenient, lenient_or_default};
use buildpack_core::types::{Category, InfoData, Readme, Revision, Source, Support};

use super::RegistryClient;
use crate::api;

const UNSUPPORTED_SUPPORT: &str = "Unsupported by author";

/// Fields of the buildpack resource the summary is built from
#[derive(Debug, Deserialize)]
struct BuildpackSummary {
    #[serde(default)]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    category: Option<Category>,
    #[serde(default, deserialize_with = "lenient")]
    support: Option<Support>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    source: Source,
}

impl RegistryClient {
    /// Aggregate description, category, license, support, source and readme
    pub async fn info(&self, buildpack: &str) -> BuildpackResult<InfoData> {
        let path = api::buildpack_path(buildpack);
        let summary: BuildpackSummary = self.transport.get(&path).await?.into_result()?;

        let revisions = self.list_versions(buildpack).await?;
        let license = Revision::current(&revisions).and_then(|rev| rev.license.clone());

        let path = api::readme_path(buildpack);
        let readme: Readme = self.transport.get(&path).await?.into_result()?;

        debug!(buildpack = %buildpack, revisions = revisions.len(), "aggregating buildpack info");

        Ok(InfoData {
            description: summary.description.unwrap_or_default(),
            category: summary.category,
            license,
            support: summary
                .support
                .as_ref()
                .and_then(|support| resolve_support(support, &summary.source)),
            source: summary.source.github_url(),
            readme: readme.decode()?.map(|text| format!("\n{}", text)),
        })
    }
}

/// Human-readable support contact for a buildpack
fn resolve_support(support: &Support, source: &Source) -> Option<String> {
    match support {
        Support::Email { address } => address
            .as_deref()
            .map(|addr| addr.strip_prefix("mailto:").unwrap_or(addr).to_string()),
        Support::Github { address } => source
            .github_url()
            .map(|url| format!("{}/issues", url))
            .or_else(|| address.clone()),
        Support::Unsupported { .. } => Some(UNSUPPORTED_SUPPORT.to_string()),
        Support::Website { address } | Support::Other { address, .. } => address.clone(),
    }
}
