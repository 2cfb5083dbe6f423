//! Database connector.
//!
//! Owns the lifecycle of the single process-wide connection pool. The
//! connector is constructed in `main` and the resulting `PgPool` is handed to
//! each service, so nothing reaches for a global.

use std::sync::RwLock;
use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::core::config::DatabaseConfig;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Database connection is not established (state: {0})")]
    NotConnected(ConnectionStatus),
}

/// Observable lifecycle of the connector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Uninitialized,
    Connecting,
    Connected,
    Failed,
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ConnectionStatus::Uninitialized => "uninitialized",
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Failed => "failed",
        };
        f.write_str(label)
    }
}

enum ConnectionState {
    Uninitialized,
    Connecting,
    Connected(PgPool),
    Failed,
}

impl ConnectionState {
    fn status(&self) -> ConnectionStatus {
        match self {
            ConnectionState::Uninitialized => ConnectionStatus::Uninitialized,
            ConnectionState::Connecting => ConnectionStatus::Connecting,
            ConnectionState::Connected(_) => ConnectionStatus::Connected,
            ConnectionState::Failed => ConnectionStatus::Failed,
        }
    }
}

pub struct DatabaseConnector {
    config: DatabaseConfig,
    state: RwLock<ConnectionState>,
    // Serializes connect() so concurrent callers initialize at most once
    init_lock: Mutex<()>,
}

impl DatabaseConnector {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            state: RwLock::new(ConnectionState::Uninitialized),
            init_lock: Mutex::new(()),
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.read_state(|state| state.status())
    }

    /// Establish the pool, or return the existing one if already connected.
    ///
    /// There is no retry: a failure leaves the connector in `Failed` and the
    /// caller is expected to abort startup.
    pub async fn connect(&self) -> Result<PgPool, DatabaseError> {
        let _guard = self.init_lock.lock().await;

        if let Ok(pool) = self.pool() {
            return Ok(pool);
        }

        self.set_state(ConnectionState::Connecting);
        tracing::info!("Connecting to database at {}", self.config.redacted_url());

        match create_pool(&self.config).await {
            Ok(pool) => {
                self.set_state(ConnectionState::Connected(pool.clone()));
                tracing::info!(
                    "Database connection pool created (max_connections={})",
                    self.config.max_connections
                );
                Ok(pool)
            }
            Err(e) => {
                self.set_state(ConnectionState::Failed);
                tracing::error!("Database connection failed: {:?}", e);
                Err(DatabaseError::Connection(e))
            }
        }
    }

    /// The connected pool, if the connector reached `Connected`
    pub fn pool(&self) -> Result<PgPool, DatabaseError> {
        self.read_state(|state| match state {
            ConnectionState::Connected(pool) => Ok(pool.clone()),
            other => Err(DatabaseError::NotConnected(other.status())),
        })
    }

    fn read_state<R>(&self, f: impl FnOnce(&ConnectionState) -> R) -> R {
        match self.state.read() {
            Ok(state) => f(&*state),
            Err(poisoned) => {
                let state = poisoned.into_inner();
                f(&*state)
            }
        }
    }

    fn set_state(&self, next: ConnectionState) {
        match self.state.write() {
            Ok(mut state) => *state = next,
            Err(poisoned) => {
                let mut state = poisoned.into_inner();
                *state = next;
            }
        }
    }
}

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
}
