//! Integration test: HTTP surface over an in-memory store.
//!
//! Drives the axum router directly with `oneshot`, no socket involved.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use nodegraph::http::build_router;
use nodegraph::{Edge, GraphService, GraphStore, MemoryStore, Node};
use serde_json::Value;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn app_with(store: Arc<MemoryStore>) -> Router {
    build_router(GraphService::new(store))
}

async fn send(app: &Router, method: &str, uri: &str, body: &str) -> (StatusCode, String, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_then_list_scenario() {
    let app = app_with(Arc::new(MemoryStore::new()));

    let (status, content_type, body) =
        send(&app, "POST", "/nodes", r#"{"title":"A","content":"hello"}"#).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(content_type, "application/json");
    assert_eq!(body, r#"{"id":1,"title":"A","content":"hello"}"#);

    let (status, _, body) = send(&app, "GET", "/nodes", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"nodes":[{"id":1,"title":"A","content":"hello"}],"edges":[]}"#);
}

#[tokio::test]
async fn created_ids_are_positive_and_fresh() {
    let app = app_with(Arc::new(MemoryStore::new()));
    let mut seen = Vec::new();

    for i in 0..10 {
        let payload = format!(r#"{{"title":"t{}","content":"c{}"}}"#, i, i);
        let (status, _, body) = send(&app, "POST", "/nodes", &payload).await;
        assert_eq!(status, StatusCode::CREATED);

        let node: Node = serde_json::from_str(&body).unwrap();
        assert!(node.id > 0);
        assert!(!seen.contains(&node.id), "id {} reused", node.id);
        seen.push(node.id);
    }
}

#[tokio::test]
async fn list_contains_every_created_node() {
    let store = Arc::new(MemoryStore::with_edges([
        Edge { source_id: 1, target_id: 2 },
        Edge { source_id: 2, target_id: 1 },
    ]));
    let app = app_with(store);

    let mut created = Vec::new();
    for (title, content) in [("A", "alpha"), ("B", "beta"), ("C", "gamma")] {
        let payload = serde_json::json!({ "title": title, "content": content }).to_string();
        let (_, _, body) = send(&app, "POST", "/nodes", &payload).await;
        created.push(serde_json::from_str::<Node>(&body).unwrap());
    }

    let (status, _, body) = send(&app, "GET", "/nodes", "").await;
    assert_eq!(status, StatusCode::OK);

    let graph: Value = serde_json::from_str(&body).unwrap();
    let nodes: Vec<Node> = serde_json::from_value(graph["nodes"].clone()).unwrap();
    let edges: Vec<Edge> = serde_json::from_value(graph["edges"].clone()).unwrap();

    assert!(nodes.len() >= created.len());
    for node in &created {
        assert!(nodes.contains(node), "missing {:?}", node);
    }
    assert_eq!(edges.len(), 2);
}

#[tokio::test]
async fn invalid_payloads_are_rejected_without_insert() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store.clone());

    for payload in [
        r#"{"title":"","content":"hello"}"#,
        r#"{"title":"A","content":""}"#,
        r#"{"content":"hello"}"#,
        r#"{"title":"A"}"#,
        r#"{}"#,
    ] {
        let (status, content_type, body) = send(&app, "POST", "/nodes", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
        assert!(content_type.starts_with("text/plain"));
        assert_eq!(body, "Title and Content cannot be empty");
    }

    assert_eq!(store.node_count(), 0);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store.clone());

    for payload in ["", "{", "[1,2]", r#"{"title":5,"content":"x"}"#, "title=A"] {
        let (status, _, body) = send(&app, "POST", "/nodes", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {:?}", payload);
        assert!(!body.is_empty());
    }

    assert_eq!(store.node_count(), 0);
}

#[tokio::test]
async fn health_is_fixed_even_when_storage_is_down() {
    let store = Arc::new(MemoryStore::new());
    store.close().await;
    let app = app_with(store);

    let (status, content_type, body) = send(&app, "GET", "/health", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");
    assert_eq!(body, r#"{"status":"ok"}"#);

    let (status, _, body) = send(&app, "GET", "/nodes", "").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Store has been closed");

    let (status, _, _) = send(&app, "POST", "/nodes", r#"{"title":"A","content":"b"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn unknown_routes_are_not_found() {
    let app = app_with(Arc::new(MemoryStore::new()));

    for (method, uri) in [
        ("GET", "/"),
        ("GET", "/nodes/1"),
        ("GET", "/edges"),
        ("DELETE", "/nodes"),
        ("PUT", "/nodes"),
        ("POST", "/health"),
        ("PATCH", "/health"),
        ("HEAD", "/nodes"),
        ("HEAD", "/health"),
    ] {
        let (status, _, _) = send(&app, method, uri, "").await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
    }
}

#[tokio::test]
async fn not_found_body_is_plain_text() {
    let app = app_with(Arc::new(MemoryStore::new()));

    let (status, content_type, body) = send(&app, "DELETE", "/nodes", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(body, "Not found");
}

#[tokio::test]
async fn head_does_not_read_storage() {
    // A closed store would turn a graph read into 500
    let store = Arc::new(MemoryStore::new());
    store.close().await;
    let app = app_with(store);

    let (status, _, _) = send(&app, "HEAD", "/nodes", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn large_node_is_accepted() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store.clone());

    // Past axum's 2 MiB default body limit
    let content = "x".repeat(3 * 1024 * 1024);
    let payload = serde_json::json!({ "title": "A", "content": content }).to_string();

    let (status, _, body) = send(&app, "POST", "/nodes", &payload).await;
    assert_eq!(status, StatusCode::CREATED);

    let node: Node = serde_json::from_str(&body).unwrap();
    assert_eq!(node.content.len(), content.len());
    assert_eq!(store.node_count(), 1);
}

#[tokio::test]
async fn query_string_does_not_filter() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store);

    send(&app, "POST", "/nodes", r#"{"title":"A","content":"a"}"#).await;
    send(&app, "POST", "/nodes", r#"{"title":"B","content":"b"}"#).await;

    let (status, _, body) = send(&app, "GET", "/nodes?limit=1", "").await;
    assert_eq!(status, StatusCode::OK);
    let graph: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(graph["nodes"].as_array().unwrap().len(), 2);
}
