//! Routine API server
//!
//! Usage: `routine-server [config.yaml]`. The path may also be given in
//! `ROUTINE_CONFIG`; without either, `config/routine.yaml` is read when it
//! exists and built-in defaults are used otherwise.

use anyhow::{Context, Result};
use routine::config::ApiConfig;
use routine::server::ServerBuilder;
use routine::storage::InMemoryCompanyRepository;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "config/routine.yaml";

fn load_config() -> Result<ApiConfig> {
    let explicit = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("ROUTINE_CONFIG").ok())
        .map(PathBuf::from);

    match explicit {
        Some(path) => ApiConfig::from_yaml_file(&path)
            .with_context(|| format!("loading config from {}", path.display())),
        None if PathBuf::from(DEFAULT_CONFIG_PATH).exists() => {
            Ok(ApiConfig::from_yaml_file(DEFAULT_CONFIG_PATH)?)
        }
        None => Ok(ApiConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        address = %config.server.bind_address(),
        default_page_size = config.paging.default_page_size,
        max_page_size = config.paging.max_page_size,
        "starting routine API"
    );

    ServerBuilder::new()
        .with_config(config)
        .with_repository(InMemoryCompanyRepository::seeded())
        .serve()
        .await
}
