use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use rentai_application::AppServices;
use rentai_infrastructure::{ConfigService, FileStorage};
use rentai_interaction::default_transport;
use tracing_subscriber::EnvFilter;

use crate::presenter::{CliNavigator, CliNotifier};

const DEFAULT_LOG_FILTER: &str = "rentai=info";

/// Logs go to stderr so command output stays pipeable.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn build_services(config_path: Option<PathBuf>) -> Result<AppServices> {
    let config_service = match config_path {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new_default().context("Failed to locate the configuration directory")?,
    };
    let config = config_service.load().with_context(|| {
        format!(
            "Failed to load configuration from {}",
            config_service.config_path().display()
        )
    })?;

    let storage_file = ConfigService::storage_file(&config)?;
    tracing::debug!("[Bootstrap] Storage at {}", storage_file.display());
    let storage = Arc::new(FileStorage::with_path(storage_file));

    let transport = default_transport(&config);
    Ok(AppServices::new(
        config,
        storage,
        transport,
        Arc::new(CliNavigator),
        Arc::new(CliNotifier),
    ))
}
