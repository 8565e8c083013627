//! bb8 pool of `diesel-async` PostgreSQL connections for the user directory.
//!
//! Only the URL and the pool size are configurable. One connection is kept
//! warm and a checkout gives up after [`CHECKOUT_TIMEOUT`].

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use tracing::{debug, warn};

/// How long a directory call waits for a free connection.
pub const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_MAX_SIZE: u32 = 10;
const MIN_IDLE: u32 = 1;

/// Pool failures, mapped to `UserDirectoryError::Connection` by the adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection could be borrowed in time.
    #[error("no database connection available: {message}")]
    Checkout { message: String },

    /// The pool could not be opened.
    #[error("could not open the database pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Build a [`PoolError::Checkout`].
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Build a [`PoolError::Build`].
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Where the users table lives and how many connections may reach it.
///
/// # Examples
///
/// ```
/// use carvalue::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://localhost/carvalue").with_max_size(4);
/// assert_eq!(config.max_size(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
}

impl PoolConfig {
    /// Ten connections to `database_url`.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    /// Cap the pool at `max_size` connections. Zero is raised to one.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        if max_size == 0 {
            warn!("db_max_connections of 0 raised to 1");
        }
        self.max_size = max_size.max(1);
        self
    }

    /// Connection cap.
    #[must_use]
    pub const fn max_size(&self) -> u32 {
        self.max_size
    }

    fn min_idle(&self) -> u32 {
        MIN_IDLE.min(self.max_size)
    }
}

/// Shared handle to the connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Open the pool and its warm connection.
    ///
    /// # Errors
    ///
    /// [`PoolError::Build`] when the URL is rejected or the server is
    /// unreachable.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        debug!(max_size = config.max_size, "opening user directory pool");
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);
        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(Some(config.min_idle()))
            .connection_timeout(CHECKOUT_TIMEOUT)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;
        Ok(Self { inner })
    }

    /// Borrow a connection for one directory call.
    ///
    /// # Errors
    ///
    /// [`PoolError::Checkout`] when none frees up within [`CHECKOUT_TIMEOUT`].
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}
