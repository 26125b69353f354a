//! Integration tests for RegistryClient.
//!
//! Uses wiremock for HTTP mocking. Covers info aggregation (support/source
//! resolution, current revision selection, readme decoding, short-circuit on
//! failure) and the release wait loop.

use std::time::Duration;

use buildpack_registry::{
    BuildpackError, Category, PollConfig, RegistryClient, RegistryConfig, RevisionStatus,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BUILDPACK_PATH: &str = "/buildpacks/heroku%2Fruby";
const REVISIONS_PATH: &str = "/buildpacks/heroku%2Fruby/revisions";
const README_PATH: &str = "/buildpacks/heroku%2Fruby/readme";
const REVISION_PATH: &str = "/buildpacks/heroku%2Fruby/revisions/rev-1";

fn create_test_client(mock_server: &MockServer) -> RegistryClient {
    let config = RegistryConfig::default()
        .with_url(mock_server.uri())
        .with_poll(PollConfig {
            max_attempts: 60,
            interval: Duration::from_millis(1),
        });
    RegistryClient::with_config(config).expect("failed to create client")
}

fn buildpack_body(support: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "id": "c8d4a4b8-3e0a-4c57-9f0b-d1f1b7f9a001",
        "name": "ruby",
        "created_at": "2018-06-07T15:40:22.436Z",
        "updated_at": "2018-06-08T10:12:01.000Z",
        "description": "Ruby language support",
        "category": "languages",
        "two_factor_authentication": false,
        "blob_url": "https://example.com/blob",
        "source": { "type": "github", "owner": "o", "repo": "r" },
        "support": support,
        "namespace": "heroku",
        "logo": {
            "small": { "url": "https://example.com/s.png", "width": 32, "height": 32 },
            "medium": { "url": "https://example.com/m.png", "width": 64, "height": 64 }
        }
    })
}

fn revision_body(id: &str, release: u64, status: &str, license: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "buildpack_id": "c8d4a4b8-3e0a-4c57-9f0b-d1f1b7f9a001",
        "ref": "master",
        "status": status,
        "created_at": "2018-06-07T15:40:22Z",
        "updated_at": "2018-06-07T15:40:22Z",
        "release": release,
        "checksum": "sha256:abc123",
        "license": license
    })
}

async fn mount_get(mock_server: &MockServer, route: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(template)
        .mount(mock_server)
        .await;
}

async fn mount_info(mock_server: &MockServer, support: serde_json::Value) {
    mount_get(
        mock_server,
        BUILDPACK_PATH,
        ResponseTemplate::new(200).set_body_json(buildpack_body(support)),
    )
    .await;
    mount_get(
        mock_server,
        REVISIONS_PATH,
        ResponseTemplate::new(200).set_body_json(serde_json::json!([
            revision_body("rev-3", 3, "published", "Apache-2.0"),
            revision_body("rev-12", 12, "published", "MIT"),
            revision_body("rev-7", 7, "published", "BSD-3-Clause"),
        ])),
    )
    .await;
    mount_get(
        mock_server,
        README_PATH,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": "IyBSdWJ5\n",
            "encoding": "base64",
            "sha": "deadbeef"
        })),
    )
    .await;
}

#[tokio::test]
async fn test_info_email_support() {
    let mock_server = MockServer::start().await;
    mount_info(
        &mock_server,
        serde_json::json!({ "method": "email", "address": "mailto:foo@example.com" }),
    )
    .await;

    let client = create_test_client(&mock_server);
    let info = client.info("heroku/ruby").await.expect("info failed");

    assert_eq!(info.description, "Ruby language support");
    assert_eq!(info.category, Some(Category::Languages));
    assert_eq!(info.license.as_deref(), Some("MIT"));
    assert_eq!(info.support.as_deref(), Some("foo@example.com"));
    assert_eq!(info.source.as_deref(), Some("https://github.com/o/r"));
    assert_eq!(info.readme.as_deref(), Some("\n# Ruby"));
}

#[tokio::test]
async fn test_info_github_support() {
    let mock_server = MockServer::start().await;
    mount_info(&mock_server, serde_json::json!({ "method": "github", "address": null })).await;

    let client = create_test_client(&mock_server);
    let info = client.info("heroku/ruby").await.expect("info failed");

    assert_eq!(info.support.as_deref(), Some("https://github.com/o/r/issues"));
    assert_eq!(info.source.as_deref(), Some("https://github.com/o/r"));
}

#[tokio::test]
async fn test_info_unsupported() {
    let mock_server = MockServer::start().await;
    mount_info(&mock_server, serde_json::json!({ "method": "unsupported", "address": null })).await;

    let client = create_test_client(&mock_server);
    let info = client.info("heroku/ruby").await.expect("info failed");

    assert_eq!(info.support.as_deref(), Some("Unsupported by author"));
}

#[tokio::test]
async fn test_info_website_support() {
    let mock_server = MockServer::start().await;
    mount_info(
        &mock_server,
        serde_json::json!({ "method": "website", "address": "https://example.com/help" }),
    )
    .await;

    let client = create_test_client(&mock_server);
    let info = client.info("heroku/ruby").await.expect("info failed");

    assert_eq!(info.support.as_deref(), Some("https://example.com/help"));
}

#[tokio::test]
async fn test_info_unknown_support_method_passes_address() {
    let mock_server = MockServer::start().await;
    mount_info(&mock_server, serde_json::json!({ "method": "slack", "address": "#help" })).await;

    let client = create_test_client(&mock_server);
    let info = client.info("heroku/ruby").await.expect("info failed");

    assert_eq!(info.support.as_deref(), Some("#help"));
    assert_eq!(info.license.as_deref(), Some("MIT"));
}

#[tokio::test]
async fn test_info_null_description_and_support() {
    let mock_server = MockServer::start().await;

    let mut body = buildpack_body(serde_json::Value::Null);
    body["description"] = serde_json::Value::Null;
    mount_get(&mock_server, BUILDPACK_PATH, ResponseTemplate::new(200).set_body_json(body)).await;
    mount_get(
        &mock_server,
        REVISIONS_PATH,
        ResponseTemplate::new(200).set_body_json(serde_json::json!([revision_body("rev-1", 1, "published", "MIT")])),
    )
    .await;
    mount_get(&mock_server, README_PATH, ResponseTemplate::new(200).set_body_json(serde_json::json!({}))).await;

    let client = create_test_client(&mock_server);
    let info = client.info("heroku/ruby").await.expect("info failed");

    assert_eq!(info.description, "");
    assert!(info.support.is_none());
    assert_eq!(info.source.as_deref(), Some("https://github.com/o/r"));
}

#[tokio::test]
async fn test_info_without_readme_content() {
    let mock_server = MockServer::start().await;

    mount_get(
        &mock_server,
        BUILDPACK_PATH,
        ResponseTemplate::new(200)
            .set_body_json(buildpack_body(serde_json::json!({ "method": "github", "address": null }))),
    )
    .await;
    mount_get(
        &mock_server,
        REVISIONS_PATH,
        ResponseTemplate::new(200).set_body_json(serde_json::json!([revision_body("rev-1", 1, "published", "MIT")])),
    )
    .await;
    mount_get(&mock_server, README_PATH, ResponseTemplate::new(200).set_body_json(serde_json::json!({}))).await;

    let client = create_test_client(&mock_server);
    let info = client.info("heroku/ruby").await.expect("info failed");

    assert!(info.readme.is_none());
    assert_eq!(info.license.as_deref(), Some("MIT"));
}

#[tokio::test]
async fn test_info_buildpack_not_found_short_circuits() {
    let mock_server = MockServer::start().await;

    mount_get(&mock_server, BUILDPACK_PATH, ResponseTemplate::new(404).set_body_string("no such buildpack")).await;
    Mock::given(method("GET"))
        .and(path(REVISIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(README_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.info("heroku/ruby").await.unwrap_err();
    let response = err.response().expect("expected a response error");

    assert_eq!(response.status, 404);
    assert_eq!(response.path, BUILDPACK_PATH);
    assert_eq!(response.description, "no such buildpack");
}

#[tokio::test]
async fn test_info_revision_failure_propagates() {
    let mock_server = MockServer::start().await;

    mount_get(
        &mock_server,
        BUILDPACK_PATH,
        ResponseTemplate::new(200)
            .set_body_json(buildpack_body(serde_json::json!({ "method": "github", "address": null }))),
    )
    .await;
    mount_get(&mock_server, REVISIONS_PATH, ResponseTemplate::new(503).set_body_string("unavailable")).await;
    Mock::given(method("GET"))
        .and(path(README_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.info("heroku/ruby").await.unwrap_err();
    let response = err.response().expect("expected a response error");

    assert_eq!(response.status, 503);
    assert_eq!(response.path, REVISIONS_PATH);
    assert_eq!(response.description, "unavailable");
}

#[tokio::test]
async fn test_info_readme_failure_propagates() {
    let mock_server = MockServer::start().await;

    mount_get(
        &mock_server,
        BUILDPACK_PATH,
        ResponseTemplate::new(200)
            .set_body_json(buildpack_body(serde_json::json!({ "method": "github", "address": null }))),
    )
    .await;
    mount_get(
        &mock_server,
        REVISIONS_PATH,
        ResponseTemplate::new(200).set_body_json(serde_json::json!([revision_body("rev-1", 1, "published", "MIT")])),
    )
    .await;
    mount_get(&mock_server, README_PATH, ResponseTemplate::new(404).set_body_string("no readme")).await;

    let client = create_test_client(&mock_server);
    let err = client.info("heroku/ruby").await.unwrap_err();

    match err {
        BuildpackError::Response(response) => {
            assert_eq!(response.status, 404);
            assert_eq!(response.path, README_PATH);
            assert_eq!(response.description, "no readme");
        }
        other => panic!("Expected Response error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_wait_for_release_settles_on_third_attempt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(REVISION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(revision_body("rev-1", 4, "pending", "MIT")))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(REVISION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(revision_body("rev-1", 4, "published", "MIT")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let outcome = client.wait_for_release_outcome("heroku/ruby", "rev-1").await;

    assert_eq!(outcome.status, RevisionStatus::Published);
    assert_eq!(outcome.attempts, 3);
    assert!(!outcome.timed_out);
}

#[tokio::test]
async fn test_wait_for_release_reports_failed_build() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(REVISION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(revision_body("rev-1", 4, "failed", "MIT")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let status = client.wait_for_release("heroku/ruby", "rev-1").await;
    assert_eq!(status, RevisionStatus::Failed);
}

#[tokio::test]
async fn test_wait_for_release_times_out_while_pending() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(REVISION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(revision_body("rev-1", 4, "pending", "MIT")))
        .expect(60)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let outcome = client.wait_for_release_outcome("heroku/ruby", "rev-1").await;

    assert_eq!(outcome.status, RevisionStatus::Pending);
    assert_eq!(outcome.attempts, 60);
    assert!(outcome.timed_out);
}

#[tokio::test]
async fn test_wait_for_release_never_fetched_defaults_to_failed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(REVISION_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(60)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let outcome = client.wait_for_release_outcome("heroku/ruby", "rev-1").await;

    assert_eq!(outcome.status, RevisionStatus::Failed);
    assert_eq!(outcome.attempts, 60);
    assert!(outcome.timed_out);
}

#[tokio::test]
async fn test_wait_for_release_skips_transient_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(REVISION_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(REVISION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(revision_body("rev-1", 4, "published", "MIT")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let outcome = client.wait_for_release_outcome("heroku/ruby", "rev-1").await;

    assert_eq!(outcome.status, RevisionStatus::Published);
    assert_eq!(outcome.attempts, 2);
}
