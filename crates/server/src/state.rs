//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::meli::MeliClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; carries the configuration, database pool,
/// and marketplace client. Mutable state lives in the session store and
/// the database, never here.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    meli: MeliClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let meli = MeliClient::new(&config.meli);

        Self {
            inner: Arc::new(AppStateInner { config, pool, meli }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the Mercado Livre API client.
    #[must_use]
    pub fn meli(&self) -> &MeliClient {
        &self.inner.meli
    }
}
