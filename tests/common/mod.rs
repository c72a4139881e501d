#![allow(dead_code)]

pub mod fake_redis;

use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tinyurl::application::services::{CollisionPolicy, MappingService};
use tinyurl::domain::entities::Code;
use tinyurl::domain::repositories::{MappingStore, PutOutcome, StoreError, StoreResult};
use tinyurl::infrastructure::store::MemoryMappingStore;
use tinyurl::routes::app_router;
use tinyurl::state::AppState;
use tinyurl::utils::code_generator::CodeGenerator;

pub const PAGE_URL: &str = "https://example.com/page";
/// First 7 hex chars of sha1("https://example.com/page").
pub const PAGE_CODE: &str = "bf705e8";
/// First 7 hex chars of sha1("https://example.com/page\x001").
pub const PAGE_CODE_REHASHED: &str = "e6a8d53";

pub fn create_test_service(
    store: Arc<dyn MappingStore>,
    policy: CollisionPolicy,
) -> Arc<MappingService> {
    Arc::new(MappingService::new(
        store,
        CodeGenerator::default(),
        policy,
        8,
    ))
}

pub fn create_test_state(store: Arc<dyn MappingStore>, base_url: Option<&str>) -> AppState {
    AppState::new(
        create_test_service(store, CollisionPolicy::Rehash),
        base_url.map(str::to_string),
    )
}

pub fn make_server(store: Arc<dyn MappingStore>) -> TestServer {
    TestServer::new(app_router(create_test_state(store, None))).unwrap()
}

pub fn make_server_with(state: AppState) -> TestServer {
    TestServer::new(app_router(state)).unwrap()
}

pub async fn seed(store: &dyn MappingStore, code: &str, target: &str) {
    store.put(&Code::new(code), target).await.unwrap();
}

/// Memory store that counts every call made to it.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryMappingStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl MappingStore for CountingStore {
    async fn put(&self, code: &Code, target: &str) -> StoreResult<()> {
        self.hit();
        self.inner.put(code, target).await
    }

    async fn get(&self, code: &Code) -> StoreResult<String> {
        self.hit();
        self.inner.get(code).await
    }

    async fn try_put_if_absent_or_same(
        &self,
        code: &Code,
        target: &str,
    ) -> StoreResult<PutOutcome> {
        self.hit();
        self.inner.try_put_if_absent_or_same(code, target).await
    }

    async fn ping(&self) -> StoreResult<()> {
        self.hit();
        self.inner.ping().await
    }
}

/// Store whose every operation fails as if Redis were down.
pub struct UnavailableStore;

#[async_trait]
impl MappingStore for UnavailableStore {
    async fn put(&self, _code: &Code, _target: &str) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn get(&self, _code: &Code) -> StoreResult<String> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn try_put_if_absent_or_same(
        &self,
        _code: &Code,
        _target: &str,
    ) -> StoreResult<PutOutcome> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn ping(&self) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}
