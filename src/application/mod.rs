//! Application layer services.
//!
//! [`services::MappingService`] runs the create and resolve flows on top of a
//! [`crate::domain::repositories::MappingStore`].

pub mod services;
