use std::time::Duration;

use pretty_assertions::assert_eq;
use previewer_engine::{
    ApiSettings, EntryRecord, FailureKind, HistoryPageRecord, PreviewApi, ReqwestPreviewApi,
    WireId,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestPreviewApi {
    api_with(server, ApiSettings::default())
}

fn api_with(server: &MockServer, settings: ApiSettings) -> ReqwestPreviewApi {
    previewer_logging::initialize_for_tests();
    ReqwestPreviewApi::new(ApiSettings {
        base_url: format!("{}/api", server.uri()),
        ..settings
    })
    .expect("client")
}

#[tokio::test]
async fn submit_posts_url_and_decodes_entry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/submit"))
        .and(body_json(json!({ "url": "https://example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "url": "https://example.com/",
            "image_url": "https://example.com/og.png",
            "status": "success"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let entry = api_for(&server)
        .submit_url("https://example.com")
        .await
        .expect("submit ok");

    assert_eq!(
        entry,
        EntryRecord {
            id: WireId::Number(42),
            url: "https://example.com/".to_string(),
            image_url: Some("https://example.com/og.png".to_string()),
            status: Some("success".to_string()),
        }
    );
}

#[tokio::test]
async fn first_history_page_omits_cursor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .and(query_param("limit", "10"))
        .and(query_param_is_missing("cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "id": 12, "url": "https://b.example.com/", "image_url": null, "status": "pending" },
                { "id": 11, "url": "https://a.example.com/", "image_url": "https://a.example.com/i.png", "status": "success" }
            ],
            "next_cursor": 10
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = api_for(&server)
        .get_history(None, 10)
        .await
        .expect("history ok");

    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].id, WireId::Number(12));
    assert_eq!(page.results[0].image_url, None);
    assert_eq!(page.next_cursor, Some(WireId::Number(10)));
}

#[tokio::test]
async fn later_history_page_sends_cursor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .and(query_param("limit", "5"))
        .and(query_param("cursor", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [],
            "next_cursor": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = api_for(&server)
        .get_history(Some("10"), 5)
        .await
        .expect("history ok");

    assert_eq!(
        page,
        HistoryPageRecord {
            results: Vec::new(),
            next_cursor: None,
        }
    );
}

#[tokio::test]
async fn string_ids_and_cursors_are_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "id": "a1", "url": "https://x.example.com/" }],
            "next_cursor": "opaque-token"
        })))
        .mount(&server)
        .await;

    let page = api_for(&server).get_history(None, 10).await.expect("ok");

    assert_eq!(page.results[0].id, WireId::Text("a1".to_string()));
    assert_eq!(page.results[0].status, None);
    assert_eq!(
        page.next_cursor.map(WireId::into_token),
        Some("opaque-token".to_string())
    );
}

#[tokio::test]
async fn server_error_is_reported_as_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/submit"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .submit_url("https://example.com")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn malformed_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("{\"results\": 3}", "application/json"),
        )
        .mount(&server)
        .await;

    let err = api_for(&server).get_history(None, 10).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn html_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .mount(&server)
        .await;

    let err = api_for(&server).get_history(None, 10).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "text/html".to_string()
        }
    );
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("{\"results\": [], \"next_cursor\": null}", "application/json"),
        )
        .mount(&server)
        .await;

    let settings = ApiSettings {
        max_bytes: 8,
        ..ApiSettings::default()
    };
    let err = api_with(&server, settings)
        .get_history(None, 10)
        .await
        .unwrap_err();
    assert!(matches!(err.kind, FailureKind::TooLarge { max_bytes: 8, .. }));
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/submit"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "id": 1, "url": "https://example.com/" })),
        )
        .mount(&server)
        .await;

    let settings = ApiSettings {
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::default()
    };
    let err = api_with(&server, settings)
        .submit_url("https://example.com")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}
