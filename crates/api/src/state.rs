use std::sync::Arc;

use meilgate_core::error::CoreError;
use meilgate_meili::api::{MeiliApi, MeiliApiError};

use crate::config::AppConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded at startup.
    pub config: Arc<AppConfig>,
    /// Client for the remote search engine (pooled connections).
    pub meili: Arc<MeiliApi>,
}

impl AppState {
    /// Build state from configuration, creating the engine client.
    pub fn new(config: AppConfig) -> Result<Self, MeiliApiError> {
        let meili = MeiliApi::new(
            &config.server.address,
            config.server.api_key.clone(),
            config.engine_timeout(),
        )?;
        Ok(Self {
            config: Arc::new(config),
            meili: Arc::new(meili),
        })
    }

    /// The configured index, or [`CoreError::IndexNotConfigured`] when blank.
    pub fn index_uid(&self) -> Result<&str, CoreError> {
        let uid = self.config.search.index_uid.trim();
        if uid.is_empty() {
            Err(CoreError::IndexNotConfigured)
        } else {
            Ok(uid)
        }
    }
}
