//! Shared handler state.

use std::sync::Arc;

use crate::backend::AdminClient;
use crate::config::AdminConfig;

/// Everything handlers share: the config and the management client.
///
/// Clones are an `Arc` bump, so axum can hand one to every request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    backend: AdminClient,
}

impl AppState {
    /// Build the state, wiring the management client from the config.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let backend = AdminClient::new(&config.backend);

        Self {
            inner: Arc::new(AppStateInner { config, backend }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn backend(&self) -> &AdminClient {
        &self.inner.backend
    }
}
