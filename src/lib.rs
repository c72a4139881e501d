//! # tinyurl
//!
//! A URL shortener that derives fixed-length codes from a content hash and
//! keeps code → URL mappings in Redis.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Code and mapping entities, the store trait
//! - **Application Layer** ([`application`]) - Create/resolve orchestration and collision policy
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis gateway with a bounded pool, in-memory store
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs and middleware
//!
//! ## How codes are made
//!
//! A code is the first `N` hex characters (default 7) of the SHA-1 digest of
//! the submitted URL. The store claims the code atomically; if it already
//! belongs to a different URL the service tries salted candidates (or
//! rejects, depending on [`application::services::CollisionPolicy`]).
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"
//! cargo run
//!
//! curl -X POST localhost:8000/add -H 'content-type: application/json' \
//!      -d '{"Url": "https://example.com/page"}'
//! curl -i localhost:8000/bf705e8
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{CollisionPolicy, MappingService};
    pub use crate::domain::entities::{Code, UrlMapping};
    pub use crate::domain::repositories::{MappingStore, PutOutcome, StoreError};
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::{MemoryMappingStore, RedisMappingStore, RedisPool};
    pub use crate::state::AppState;
    pub use crate::utils::code_generator::{CodeGenerator, DigestAlgorithm};
}
