//! Registry client operations
//!
//! Every operation issues its request through the [`Transport`] and
//! normalizes the outcome: 200 decodes the body, any other status becomes a
//! [`BuildpackError::Response`] carrying the status, path and body text.

use serde::Deserialize;
use tracing::debug;

use buildpack_config::{ConfigLoader, PollConfig, RegistryConfig};
use buildpack_core::error::BuildpackResult;
use buildpack_core::types::lenient::lenient_or_default;
use buildpack_core::types::{Buildpack, Revision};

use crate::api::{self, Action, SearchQuery};
use crate::transport::{HeaderOptions, Response, Transport};

mod info;
mod release;

pub use release::{PollState, ReleaseOutcome};

/// Only the field the two-factor check reads
#[derive(Debug, Deserialize)]
struct TwoFactorFlag {
    #[serde(default, deserialize_with = "lenient_or_default")]
    two_factor_authentication: bool,
}

/// Client for the buildpack registry
#[derive(Debug, Clone)]
pub struct RegistryClient {
    /// HTTP transport bound to the configured base URL
    transport: Transport,
    /// Release polling budget
    poll: PollConfig,
}

impl RegistryClient {
    /// Create a client configured from the process environment
    pub fn new() -> BuildpackResult<Self> {
        Self::with_config(ConfigLoader::from_env().load()?)
    }

    /// Create a client from explicit configuration
    pub fn with_config(config: RegistryConfig) -> BuildpackResult<Self> {
        let transport = Transport::new(&config)?;
        debug!(base_url = %transport.base_url(), "registry client created");

        Ok(Self {
            transport,
            poll: config.poll,
        })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Whether publishing to `buildpack` requires a second factor
    pub async fn requires_two_factor(&self, buildpack: &str) -> BuildpackResult<bool> {
        let path = api::buildpack_path(buildpack);
        let flag: TwoFactorFlag = self.transport.get(&path).await?.into_result()?;
        Ok(flag.two_factor_authentication)
    }

    /// Publish a new revision built from `git_ref`
    pub async fn publish(
        &self,
        buildpack: &str,
        git_ref: &str,
        token: &str,
        second_factor: Option<&str>,
    ) -> BuildpackResult<Revision> {
        let path = api::revisions_path(buildpack);
        let options = HeaderOptions::authenticated(token, second_factor);
        debug!(buildpack = %buildpack, git_ref = %git_ref, "publishing revision");

        self.transport
            .post(&path, Some(api::publish_body(git_ref)), &options)
            .await?
            .into_result()
    }

    /// Roll back to the previous release, creating a new revision
    pub async fn rollback(
        &self,
        buildpack: &str,
        token: &str,
        second_factor: Option<&str>,
    ) -> BuildpackResult<Revision> {
        self.action(buildpack, Action::Rollback, token, second_factor).await
    }

    /// Archive a buildpack
    pub async fn archive(
        &self,
        buildpack: &str,
        token: &str,
        second_factor: Option<&str>,
    ) -> BuildpackResult<Buildpack> {
        self.action(buildpack, Action::Archive, token, second_factor).await
    }

    async fn action<T>(
        &self,
        buildpack: &str,
        action: Action,
        token: &str,
        second_factor: Option<&str>,
    ) -> BuildpackResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let path = api::action_path(buildpack, action);
        let options = HeaderOptions::authenticated(token, second_factor);
        debug!(buildpack = %buildpack, action = action.as_str(), "running buildpack action");

        self.transport.post(&path, None, &options).await?.into_result()
    }

    /// Search buildpacks by comma-separated namespaces, names and a
    /// description fragment
    pub async fn search(
        &self,
        namespace: Option<&str>,
        name: Option<&str>,
        description: Option<&str>,
    ) -> BuildpackResult<Vec<Buildpack>> {
        let path = SearchQuery::new(namespace, name, description).path();
        self.transport.get(&path).await?.into_result()
    }

    /// Fetch a single revision
    pub async fn revision_info(&self, buildpack: &str, revision_id: &str) -> BuildpackResult<Revision> {
        let path = api::revision_path(buildpack, revision_id);
        self.transport.get(&path).await?.into_result()
    }

    /// All revisions of a buildpack, in the order the registry returns them
    pub async fn list_versions(&self, buildpack: &str) -> BuildpackResult<Vec<Revision>> {
        let path = api::revisions_path(buildpack);
        self.transport.get(&path).await?.into_result()
    }

    /// Raw response for the buildpack resource; only the status is meaningful
    pub async fn buildpack_exists(&self, buildpack: &str) -> BuildpackResult<Response> {
        self.transport.get(&api::buildpack_path(buildpack)).await
    }
}
