//! Request paths and bodies of the buildpack registry API

use buildpack_core::utils::encode_component;

/// `/buildpacks/{buildpack}`
pub fn buildpack_path(buildpack: &str) -> String {
    format!("/buildpacks/{}", encode_component(buildpack))
}

/// `/buildpacks/{buildpack}/revisions`
pub fn revisions_path(buildpack: &str) -> String {
    format!("{}/revisions", buildpack_path(buildpack))
}

/// `/buildpacks/{buildpack}/revisions/{revision_id}`
pub fn revision_path(buildpack: &str, revision_id: &str) -> String {
    format!("{}/{}", revisions_path(buildpack), encode_component(revision_id))
}

/// `/buildpacks/{buildpack}/readme`
pub fn readme_path(buildpack: &str) -> String {
    format!("{}/readme", buildpack_path(buildpack))
}

/// `/buildpacks/{buildpack}/actions/{action}`
pub fn action_path(buildpack: &str, action: Action) -> String {
    format!("{}/actions/{}", buildpack_path(buildpack), action.as_str())
}

/// Authenticated buildpack actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Rollback,
    Archive,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Rollback => "rollback",
            Action::Archive => "archive",
        }
    }
}

/// Body of a publish request
pub fn publish_body(git_ref: &str) -> serde_json::Value {
    serde_json::json!({ "ref": git_ref })
}

/// Filters for the buildpack search endpoint.
///
/// `namespace` and `name` are comma-separated lists; each token becomes an
/// `in[field][]` filter. `description` becomes a single `like[description]`
/// filter. Empty inputs are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchQuery<'a> {
    pub namespace: Option<&'a str>,
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
}

impl<'a> SearchQuery<'a> {
    pub fn new(namespace: Option<&'a str>, name: Option<&'a str>, description: Option<&'a str>) -> Self {
        Self {
            namespace,
            name,
            description,
        }
    }

    /// Query parameters in request order
    pub fn params(&self) -> Vec<String> {
        let mut params = Vec::new();

        if let Some(namespace) = self.namespace.filter(|s| !s.is_empty()) {
            params.extend(namespace.split(',').map(|token| format!("in[namespace][]={}", token)));
        }
        if let Some(name) = self.name.filter(|s| !s.is_empty()) {
            params.extend(name.split(',').map(|token| format!("in[name][]={}", token)));
        }
        if let Some(description) = self.description.filter(|s| !s.is_empty()) {
            params.push(format!("like[description]={}", encode_component(description)));
        }

        params
    }

    /// `?a&b...`, or an empty string when no filters are set
    pub fn to_query_string(&self) -> String {
        let params = self.params();
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }

    /// Full search path including the query string
    pub fn path(&self) -> String {
        format!("/buildpacks{}", self.to_query_string())
    }
}
