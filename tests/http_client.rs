//
//  bitly-cli
//  tests/http_client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The HTTP transport against a local mock server.

use mockito::Matcher;
use serde_json::json;

use bitly_cli::api::bitlinks::ShortenRequest;
use bitly_cli::api::common::{MetricsQuery, TimeUnit};
use bitly_cli::api::groups::{BitlinksQuery, Toggle};
use bitly_cli::api::{ApiError, BitlyClient};

fn client(server: &mockito::Server) -> BitlyClient {
    BitlyClient::with_base_url(&format!("{}/v4/", server.url()), "test-token").unwrap()
}

#[tokio::test]
async fn test_get_sends_bearer_token_under_base_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v4/groups/G123")
        .match_header("authorization", "Bearer test-token")
        .match_header("user-agent", Matcher::Regex(r"^bitly/".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"guid": "G123", "organization_guid": "O456", "is_active": true}"#)
        .create_async()
        .await;

    let group = client(&server).groups().get("G123").await.unwrap();
    assert_eq!(group.guid, "G123");
    assert!(group.is_active);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v4/shorten")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "long_url": "https://example.com/launch",
            "group_guid": "G123"
        })))
        .with_status(201)
        .with_body(r#"{"id": "bit.ly/3xYz", "link": "https://bit.ly/3xYz", "long_url": "https://example.com/launch"}"#)
        .create_async()
        .await;

    let request = ShortenRequest::new("https://example.com/launch").group_guid("G123");
    let link = client(&server).bitlinks().shorten(&request).await.unwrap();
    assert_eq!(link.link, "https://bit.ly/3xYz");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_query_pairs_reach_the_server() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v4/groups/G123/bitlinks")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("size".into(), "0".into()),
            Matcher::UrlEncoded("archived".into(), "both".into()),
            Matcher::Regex("tags=launch&tags=q\\+3".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"links": [], "pagination": {"total": 0}}"#)
        .create_async()
        .await;

    let query = BitlinksQuery::new()
        .size(0)
        .archived(Toggle::Both)
        .tag("launch")
        .tag("q 3");
    let page = client(&server).groups().bitlinks("G123", &query).await.unwrap();
    assert!(page.links.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_bitlink_metrics_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v4/bitlinks/bit.ly/3xYz/clicks/summary")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("unit".into(), "day".into()),
            Matcher::UrlEncoded("units".into(), "-1".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"total_clicks": 42, "units": -1, "unit": "day"}"#)
        .create_async()
        .await;

    let window = MetricsQuery::new().unit(TimeUnit::Day).units(-1);
    let summary = client(&server)
        .bitlinks()
        .clicks_summary("https://bit.ly/3xYz", &window)
        .await
        .unwrap();
    assert_eq!(summary.total_clicks, 42);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_becomes_remote_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v4/user")
        .with_status(403)
        .with_body(r#"{"message": "FORBIDDEN", "description": "You are not authorized to access this resource."}"#)
        .create_async()
        .await;

    let err = client(&server).users().current().await.unwrap_err();
    assert!(err.is_auth_error());
    match err {
        ApiError::Remote { status, envelope } => {
            assert_eq!(status, 403);
            assert_eq!(envelope.message, "FORBIDDEN");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_error_body_is_kept() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v4/bsds")
        .with_status(502)
        .with_body("Bad Gateway\n")
        .create_async()
        .await;

    let err = client(&server).bsds().list().await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert!(err.to_string().contains("Bad Gateway"));
}

#[tokio::test]
async fn test_malformed_success_body_is_a_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v4/organizations")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let err = client(&server).organizations().list().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    let client = BitlyClient::with_base_url("http://127.0.0.1:1/v4/", "test-token").unwrap();
    let err = client.users().current().await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
    let source = std::error::Error::source(&err).unwrap();
    assert!(source.downcast_ref::<reqwest::Error>().is_some());
}
