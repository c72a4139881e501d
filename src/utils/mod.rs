//! Helpers shared by the service and the HTTP layer.
//!
//! - [`code_generator`] - Hash-derived short code candidates
//! - [`path`] - Short code extraction from a request path

pub mod code_generator;
pub mod path;
