//! Shared handler state.

use std::sync::Arc;

use crate::backend::BakeryClient;
use crate::config::StorefrontConfig;

/// Everything handlers share: the config and the backend client.
///
/// Clones are an `Arc` bump, so axum can hand one to every request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    backend: BakeryClient,
}

impl AppState {
    /// Build the state, wiring the backend client from the config.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let backend = BakeryClient::new(&config.backend);

        Self {
            inner: Arc::new(AppStateInner { config, backend }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn backend(&self) -> &BakeryClient {
        &self.inner.backend
    }
}
