//! Shared state handed to every handler

use crate::config::ApiConfig;
use crate::core::mapping::PropertyMappingService;
use crate::storage::CompanyRepository;
use std::sync::Arc;

/// Everything a request needs, cheap to clone per request
///
/// The mapping registry is built once at startup and never mutated, so it
/// is shared without a lock.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
    pub repository: Arc<dyn CompanyRepository>,
    pub mappings: Arc<PropertyMappingService>,
}

impl AppState {
    pub fn new(
        config: ApiConfig,
        repository: Arc<dyn CompanyRepository>,
        mappings: PropertyMappingService,
    ) -> Self {
        Self {
            config: Arc::new(config),
            repository,
            mappings: Arc::new(mappings),
        }
    }
}
