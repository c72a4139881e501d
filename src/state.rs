use std::sync::Arc;

use crate::application::services::MappingService;
use crate::domain::entities::Code;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub mapping_service: Arc<MappingService>,
    /// Public prefix for short URLs, without trailing slash.
    pub base_url: Option<String>,
}

impl AppState {
    pub fn new(mapping_service: Arc<MappingService>, base_url: Option<String>) -> Self {
        Self {
            mapping_service,
            base_url,
        }
    }

    /// Full short URL for `code`, when a base URL is configured.
    pub fn short_url(&self, code: &Code) -> Option<String> {
        self.base_url
            .as_deref()
            .map(|base| format!("{}/{}", base.trim_end_matches('/'), code))
    }
}
