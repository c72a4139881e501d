//! Core domain entities.
//!
//! - [`Code`] - A short identifier that keys a stored URL
//! - [`UrlMapping`] - A code together with the target it resolves to

pub mod code;
pub mod mapping;

pub use code::Code;
pub use mapping::UrlMapping;
