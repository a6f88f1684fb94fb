//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::claude::ClaudeClient;
use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    claude: Option<ClaudeClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The Claude client is only constructed when an API key is configured;
    /// without it the DripBot endpoints report an upstream failure.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let claude = config.claude.as_ref().map(ClaudeClient::new);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                claude,
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

    /// Get the Claude client, if one is configured.
    #[must_use]
    pub fn claude(&self) -> Option<&ClaudeClient> {
        self.inner.claude.as_ref()
    }
}
