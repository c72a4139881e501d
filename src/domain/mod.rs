//! Domain layer containing the mapping model and the store contract.
//!
//! Nothing in here knows about Redis or HTTP. The store trait is implemented by
//! the infrastructure layer and consumed by [`crate::application::services`].
//!
//! # Architecture
//!
//! - [`entities`] - [`entities::Code`] and [`entities::UrlMapping`]
//! - [`repositories`] - [`repositories::MappingStore`] and its outcome/error types

pub mod entities;
pub mod repositories;
