mod common;

use axum::http::StatusCode;
use std::sync::Arc;
use tinyurl::infrastructure::store::MemoryMappingStore;

use common::{PAGE_CODE, PAGE_URL};

#[tokio::test]
async fn test_resolve_redirects_with_see_other() {
    let store = Arc::new(MemoryMappingStore::new());
    common::seed(store.as_ref(), PAGE_CODE, PAGE_URL).await;
    let server = common::make_server(store);

    let response = server.get(&format!("/{PAGE_CODE}")).await;

    response.assert_status(StatusCode::SEE_OTHER);
    response.assert_header("location", PAGE_URL);
}

#[tokio::test]
async fn test_resolve_unknown_code() {
    let server = common::make_server(Arc::new(MemoryMappingStore::new()));

    let response = server.get("/zzzzzzz").await;

    response.assert_status_not_found();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(body["error"]["details"]["code"], "zzzzzzz");
}

#[tokio::test]
async fn test_resolve_malformed_paths_skip_store() {
    let store = Arc::new(common::CountingStore::default());
    let server = common::make_server(store.clone());

    for path in ["/", "/a/b", "/abc/"] {
        let response = server.get(path).await;

        response.assert_status_not_found();
        assert_eq!(
            response.json::<serde_json::Value>()["error"]["code"],
            "malformed_code",
            "path {path}"
        );
    }

    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_resolve_wrong_method() {
    let store = Arc::new(common::CountingStore::default());
    let server = common::make_server(store.clone());

    let response = server.post(&format!("/{PAGE_CODE}")).await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    response.assert_header("allow", "GET");
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_resolve_store_failure_is_contained() {
    let server = common::make_server(Arc::new(common::UnavailableStore));

    let first = server.get(&format!("/{PAGE_CODE}")).await;
    let second = server.get(&format!("/{PAGE_CODE}")).await;

    first.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    second.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        second.json::<serde_json::Value>()["error"]["code"],
        "store_unavailable"
    );
}

#[tokio::test]
async fn test_resolve_does_not_shadow_routes() {
    let server = common::make_server(Arc::new(MemoryMappingStore::new()));

    server.get("/health").await.assert_status_ok();
}
