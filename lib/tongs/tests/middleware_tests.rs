//! Middleware tests against a wiremock server.

use assert2::{check, let_assert};
use tongs::{HttpClientExt, HyperClient, middleware::MiddlewareExt, parsers};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, header_exists, method, path},
};

#[tokio::test(flavor = "multi_thread")]
async fn test_basic_auth_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/secret"))
        .and(header("Authorization", "Basic dXNlcjpzZWNyZXQ="))
        .respond_with(ResponseTemplate::new(200).set_body_raw("granted", "text/plain"))
        .mount(&mock_server)
        .await;

    let base = mock_server.uri();
    let text = tokio::task::spawn_blocking(move || {
        let client = HyperClient::new()
            .expect("client")
            .with_basic_auth("user", "secret");
        let mut text = String::new();
        client
            .get(&base, "secret", &[], &[], &mut [parsers::text(&mut text)])
            .expect("get");
        text
    })
    .await
    .expect("blocking task");

    check!(text == "granted");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_basic_auth_replaces_caller_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/secret"))
        .and(header("Authorization", "Basic dXNlcjpzZWNyZXQ="))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let base = mock_server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let client = HyperClient::new()
            .expect("client")
            .with_basic_auth("user", "secret");
        client.get(
            &base,
            "secret",
            &[],
            &[("authorization", "Bearer stale")],
            &mut [parsers::discard()],
        )
    })
    .await
    .expect("blocking task");

    check!(result.is_ok());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_logging_passthrough() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_raw("gone", "text/plain"))
        .mount(&mock_server)
        .await;

    let base = mock_server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let client = HyperClient::new()
            .expect("client")
            .with_basic_auth("user", "secret")
            .with_debug_logging();
        client.get(&base, "missing", &[], &[], &mut [parsers::discard()])
    })
    .await
    .expect("blocking task");

    let_assert!(Err(err) = result);
    check!(err.status_code() == 404);
    insta::assert_snapshot!(err.to_string(), @"GET /missing: HTTP 404, text/plain response: gone");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_default_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ua"))
        .and(header(
            "User-Agent",
            concat!("tongs/", env!("CARGO_PKG_VERSION")),
        ))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let base = mock_server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let client = HyperClient::new().expect("client").with_logging();
        client.get(&base, "ua", &[], &[], &mut [parsers::discard()])
    })
    .await
    .expect("blocking task");

    check!(result.is_ok());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_caller_user_agent_wins() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ua"))
        .and(header("User-Agent", "custom/1.0"))
        .and(header_exists("Accept"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let base = mock_server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let client = HyperClient::builder()
            .user_agent("ignored/0.0")
            .build()
            .expect("client");
        client.get(
            &base,
            "ua",
            &[],
            &[("user-agent", "custom/1.0"), ("Accept", "*/*")],
            &mut [parsers::discard()],
        )
    })
    .await
    .expect("blocking task");

    check!(result.is_ok());
}
