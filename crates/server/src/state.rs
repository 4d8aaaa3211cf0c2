//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::store::{GuestStore, PgGuestStore};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; hands out the guest store, the connection
/// pool, and the configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    guests: Arc<dyn GuestStore>,
}

impl AppState {
    /// Create application state backed by `PostgreSQL`.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let guests = Arc::new(PgGuestStore::new(pool.clone()));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                guests,
            }),
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

    /// Get a reference to the guest store.
    #[must_use]
    pub fn guests(&self) -> &dyn GuestStore {
        self.inner.guests.as_ref()
    }
}
