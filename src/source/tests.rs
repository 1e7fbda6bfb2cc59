//! Tests for page sources

use super::*;
use crate::types::Item;
use pretty_assertions::assert_eq;
use std::io::Write;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// StaticSource Tests
// ============================================================================

#[tokio::test]
async fn test_static_source_threads_tokens() {
    let source = StaticSource::new(vec![
        vec![Item::new(1, "A")],
        vec![Item::new(2, "B")],
    ]);
    assert_eq!(source.page_count(), 2);

    let first = source.fetch_page(&PageToken::from(0u64)).await.unwrap();
    assert_eq!(first.items, vec![Item::new(1, "A")]);
    assert_eq!(first.next_token, Some(PageToken::from(1u64)));

    let second = source.fetch_page(&PageToken::from(1u64)).await.unwrap();
    assert_eq!(second.items, vec![Item::new(2, "B")]);
    assert!(second.is_last());
}

#[tokio::test]
async fn test_static_source_out_of_range() {
    let source = StaticSource::new(vec![vec![Item::new(1, "A")]]);
    let err = source.fetch_page(&PageToken::from(5u64)).await.unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

#[tokio::test]
async fn test_static_source_invalid_token() {
    let source = StaticSource::new(vec![vec![Item::new(1, "A")]]);
    let err = source
        .fetch_page(&PageToken::new("not-a-number"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("invalid page token"));
}

#[tokio::test]
async fn test_static_source_synthetic_ids() {
    let source = StaticSource::synthetic(3, 2);
    let page = source.fetch_page(&PageToken::from(2u64)).await.unwrap();
    let ids: Vec<u64> = page.items.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![4, 5]);
    assert_eq!(page.items[0].name, "Item 4");
    assert!(page.is_last());
}

// ============================================================================
// HttpSource Tests
// ============================================================================

fn items_body(ids: &[u64], next: Option<u64>) -> serde_json::Value {
    let items: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| serde_json::json!({"id": id, "name": format!("Item {id}")}))
        .collect();
    serde_json::json!({"items": items, "next_page": next})
}

#[tokio::test]
async fn test_http_source_fetches_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items_body(&[1, 2], Some(1))))
        .mount(&mock_server)
        .await;

    let config = HttpSourceConfig::builder()
        .base_url(mock_server.uri())
        .path("/items")
        .build();
    let source = HttpSource::new(config).unwrap();

    let page = source.fetch_page(&PageToken::from(0u64)).await.unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0], Item::new(1, "Item 1"));
    assert_eq!(page.next_token, Some(PageToken::from(1u64)));
}

#[tokio::test]
async fn test_http_source_last_page_has_no_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items_body(&[9], None)))
        .mount(&mock_server)
        .await;

    let config = HttpSourceConfig::builder()
        .base_url(mock_server.uri())
        .path("/items")
        .build();
    let source = HttpSource::new(config).unwrap();

    let page = source.fetch_page(&PageToken::from(3u64)).await.unwrap();
    assert!(page.is_last());
}

#[tokio::test]
async fn test_http_source_sends_params_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/feed"))
        .and(query_param("cursor", "abc"))
        .and(query_param("limit", "25"))
        .and(header("x-api-key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items_body(&[], None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpSourceConfig::builder()
        .base_url(mock_server.uri())
        .path("/v2/feed")
        .token_param("cursor")
        .param("limit", "25")
        .header("x-api-key", "secret")
        .build();
    let source = HttpSource::new(config).unwrap();

    let page = source.fetch_page(&PageToken::new("abc")).await.unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_http_source_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let config = HttpSourceConfig::builder()
        .base_url(mock_server.uri())
        .path("/items")
        .build();
    let source = HttpSource::new(config).unwrap();

    let err = source.fetch_page(&PageToken::from(0u64)).await.unwrap_err();
    match err {
        crate::error::Error::HttpStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_source_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let config = HttpSourceConfig::builder()
        .base_url(mock_server.uri())
        .path("/items")
        .build();
    let source = HttpSource::new(config).unwrap();

    let err = source.fetch_page(&PageToken::from(0u64)).await.unwrap_err();
    assert!(matches!(err, crate::error::Error::Decode { .. }));
}

#[tokio::test]
async fn test_http_source_items_path_missing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"rows": []})),
        )
        .mount(&mock_server)
        .await;

    let config = HttpSourceConfig::builder()
        .base_url(mock_server.uri())
        .path("/items")
        .build();
    let source = HttpSource::new(config).unwrap();

    let err = source.fetch_page(&PageToken::from(0u64)).await.unwrap_err();
    assert!(err.to_string().contains("items not found"));
}

#[tokio::test]
async fn test_http_source_nested_paths() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({
        "data": {
            "entries": [{"id": 7, "name": "Item 7"}],
            "paging": {"next": "t2"}
        }
    });
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let config = HttpSourceConfig::builder()
        .base_url(mock_server.uri())
        .path("/feed")
        .items_path("data.entries")
        .next_token_path("data.paging.next")
        .build();
    let source = HttpSource::new(config).unwrap();

    let page = source.fetch_page(&PageToken::new("t1")).await.unwrap();
    assert_eq!(page.items, vec![Item::new(7, "Item 7")]);
    assert_eq!(page.next_token, Some(PageToken::new("t2")));
}

// ============================================================================
// SourceDefinition Tests
// ============================================================================

const MINIMAL_YAML: &str = "
name: demo
base_url: http://localhost:4600
path: /items
";

#[test]
fn test_definition_defaults() {
    let definition = SourceDefinition::from_yaml(MINIMAL_YAML).unwrap();
    assert_eq!(definition.name, "demo");
    assert_eq!(definition.token_param, "page");
    assert_eq!(definition.start_token, "0");
    assert_eq!(definition.items_path, "items");
    assert_eq!(definition.next_token_path, "next_page");
    assert_eq!(definition.timeout_secs, 30);
    assert_eq!(definition.start_token(), PageToken::from(0u64));
}

#[test]
fn test_definition_full() {
    let yaml = "
name: api-feed
base_url: https://api.example.com
path: /v2/feed
token_param: cursor
start_token: first
items_path: data.entries
next_token_path: data.paging.next
params:
  limit: '25'
headers:
  x-api-key: secret
timeout_secs: 10
";
    let definition = SourceDefinition::from_yaml(yaml).unwrap();
    assert_eq!(definition.params.get("limit"), Some(&"25".to_string()));
    assert_eq!(
        definition.headers.get("x-api-key"),
        Some(&"secret".to_string())
    );
    assert_eq!(definition.start_token(), PageToken::new("first"));
    definition.build().unwrap();
}

#[test]
fn test_definition_rejects_empty_base_url() {
    let yaml = "
name: demo
base_url: ''
path: /items
";
    let err = SourceDefinition::from_yaml(yaml).unwrap_err();
    assert!(err.to_string().contains("base_url"));
}

#[test]
fn test_definition_rejects_bad_url() {
    let yaml = "
name: demo
base_url: 'not a url'
path: /items
";
    assert!(SourceDefinition::from_yaml(yaml).is_err());
}

#[test]
fn test_definition_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(MINIMAL_YAML.as_bytes()).unwrap();

    let definition = SourceDefinition::from_file(file.path()).unwrap();
    assert_eq!(definition.name, "demo");
}

#[test]
fn test_definition_file_not_found() {
    let err = SourceDefinition::from_file("/nonexistent/source.yaml").unwrap_err();
    assert!(matches!(err, crate::error::Error::FileNotFound { .. }));
}
