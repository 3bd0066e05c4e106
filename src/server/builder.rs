//! ServerBuilder for fluent API to build the HTTP server

use super::host::AppState;
use super::router::build_routes;
use crate::config::ApiConfig;
use crate::models::property_mappings;
use crate::storage::{CompanyRepository, InMemoryCompanyRepository};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the API server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(ApiConfig::from_yaml_file("config/routine.yaml")?)
///     .with_repository(InMemoryCompanyRepository::seeded())
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: ApiConfig,
    repository: Option<Arc<dyn CompanyRepository>>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
            repository: None,
        }
    }

    pub fn with_config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the repository; an empty in-memory one is used otherwise
    pub fn with_repository(mut self, repository: impl CompanyRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    pub fn with_shared_repository(mut self, repository: Arc<dyn CompanyRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Validate the configuration, register the property mappings and
    /// assemble the state shared by every handler
    pub fn build_state(self) -> Result<AppState> {
        self.config.validate()?;
        let mappings = property_mappings()?;
        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemoryCompanyRepository::new()));

        Ok(AppState::new(self.config, repository, mappings))
    }

    /// Build the router with all routes
    pub fn build(self) -> Result<Router> {
        let state = self.build_state()?;
        Ok(build_routes(state)?)
    }

    /// Bind to the configured address and serve until Ctrl+C or SIGTERM
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind_address();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_defaults() {
        assert!(ServerBuilder::new().build().is_ok());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = ApiConfig::default();
        config.paging.default_page_size = 50;
        let result = ServerBuilder::new().with_config(config).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_state_uses_given_repository() {
        let state = ServerBuilder::new()
            .with_repository(InMemoryCompanyRepository::seeded())
            .build_state()
            .unwrap();
        assert_eq!(state.config.paging.max_page_size, 20);
    }
}
