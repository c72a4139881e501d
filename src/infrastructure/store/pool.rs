//! Redis connection pool.
//!
//! Pooling itself is bb8's: at most `max_size` connections exist, idle ones
//! older than `idle_timeout` are reaped, and a connection reported broken by
//! [`RedisConnectionManager::has_broken`] is closed instead of being reused.
//! This module adds the Redis manager and the per-operation deadline.

use bb8::{ManageConnection, Pool, PooledConnection, RunError};
use redis::{Client, RedisError, RedisResult, aio::MultiplexedConnection};
use std::io;
use std::time::Duration;
use tokio::time::{Instant, error::Elapsed, timeout, timeout_at};
use tracing::debug;

use crate::domain::repositories::{StoreError, StoreResult};

/// Pool sizing and timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    /// Maximum open connections.
    pub max_size: u32,
    /// Idle connections older than this are closed.
    pub idle_timeout: Duration,
    /// Bound on one whole store operation: checkout, dial and command.
    pub timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_size: 10,
            idle_timeout: Duration::from_secs(240),
            timeout: Duration::from_secs(2),
        }
    }
}

/// Why a pooled command did not produce a value.
#[derive(Debug)]
pub enum CommandFailure {
    /// The operation deadline passed while the command was in flight.
    TimedOut,
    /// The transport failed (refused, dropped, I/O).
    Connection(RedisError),
    /// The server answered with an error.
    Rejected(RedisError),
}

impl CommandFailure {
    /// Sorts the outcome of a command raced against a deadline.
    pub fn classify<T>(outcome: Result<RedisResult<T>, Elapsed>) -> Result<T, Self> {
        match outcome {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) if is_connectivity_error(&e) => Err(Self::Connection(e)),
            Ok(Err(e)) => Err(Self::Rejected(e)),
            Err(_) => Err(Self::TimedOut),
        }
    }

    /// Whether the connection may hold a half-read reply or a dead socket.
    pub fn breaks_connection(&self) -> bool {
        matches!(self, Self::TimedOut | Self::Connection(_))
    }
}

impl std::fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TimedOut => f.write_str("command timed out"),
            Self::Connection(e) => write!(f, "connection error: {e}"),
            Self::Rejected(e) => write!(f, "server error: {e}"),
        }
    }
}

fn is_connectivity_error(e: &RedisError) -> bool {
    e.is_io_error() || e.is_connection_refusal() || e.is_connection_dropped() || e.is_timeout()
}

/// A multiplexed connection plus the flag bb8 checks when it comes back.
pub struct RedisConnection {
    conn: MultiplexedConnection,
    broken: bool,
}

impl RedisConnection {
    pub fn connection(&mut self) -> &mut MultiplexedConnection {
        &mut self.conn
    }

    pub fn is_broken(&self) -> bool {
        self.broken
    }

    /// Classifies a command outcome, marking the connection broken on
    /// timeouts and transport errors so the pool closes it.
    pub fn settle<T>(
        &mut self,
        outcome: Result<RedisResult<T>, Elapsed>,
    ) -> Result<T, CommandFailure> {
        let result = CommandFailure::classify(outcome);
        if let Err(failure) = &result
            && failure.breaks_connection()
        {
            debug!(error = %failure, "Discarding Redis connection");
            self.broken = true;
        }
        result
    }
}

/// bb8 manager opening multiplexed Redis connections.
pub struct RedisConnectionManager {
    client: Client,
    connect_timeout: Duration,
}

impl RedisConnectionManager {
    pub fn new(client: Client, connect_timeout: Duration) -> Self {
        Self {
            client,
            connect_timeout,
        }
    }
}

impl ManageConnection for RedisConnectionManager {
    type Connection = RedisConnection;
    type Error = RedisError;

    async fn connect(&self) -> Result<Self::Connection, Self::Error> {
        let conn = timeout(
            self.connect_timeout,
            self.client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| {
            RedisError::from(io::Error::new(
                io::ErrorKind::TimedOut,
                "timed out connecting to Redis",
            ))
        })??;

        debug!("Opened Redis connection");
        Ok(RedisConnection {
            conn,
            broken: false,
        })
    }

    async fn is_valid(&self, conn: &mut Self::Connection) -> Result<(), Self::Error> {
        redis::cmd("PING").query_async::<()>(&mut conn.conn).await
    }

    fn has_broken(&self, conn: &mut Self::Connection) -> bool {
        conn.broken
    }
}

/// Pool of Redis connections, constructed once at startup and shared by handle.
#[derive(Clone)]
pub struct RedisPool {
    inner: Pool<RedisConnectionManager>,
    settings: PoolSettings,
}

impl RedisPool {
    /// Creates a pool for `redis_url`. No connection is opened until first use.
    ///
    /// Must be called inside a Tokio runtime; bb8 spawns its idle reaper here.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the URL cannot be parsed.
    pub fn new(redis_url: &str, settings: PoolSettings) -> StoreResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| StoreError::Unavailable(format!("invalid Redis URL: {e}")))?;

        let inner = Pool::builder()
            .max_size(settings.max_size.max(1))
            .idle_timeout(Some(settings.idle_timeout))
            .connection_timeout(settings.timeout)
            .test_on_check_out(false)
            .retry_connection(false)
            .build_unchecked(RedisConnectionManager::new(client, settings.timeout));

        Ok(Self { inner, settings })
    }

    pub fn settings(&self) -> PoolSettings {
        self.settings
    }

    /// Open connections, checked out or idle.
    pub fn connections(&self) -> u32 {
        self.inner.state().connections
    }

    /// Connections waiting in the pool.
    pub fn idle_count(&self) -> u32 {
        self.inner.state().idle_connections
    }

    /// Deadline for an operation starting now.
    pub fn deadline(&self) -> Instant {
        Instant::now() + self.settings.timeout
    }

    /// Checks out a connection, giving up at `deadline`.
    ///
    /// The connection goes back to the pool when the returned guard drops,
    /// unless it was marked broken.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if no connection is ready by the
    /// deadline or a new one cannot be established.
    pub async fn get(
        &self,
        deadline: Instant,
    ) -> StoreResult<PooledConnection<'_, RedisConnectionManager>> {
        match timeout_at(deadline, self.inner.get()).await {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(RunError::User(e))) => Err(StoreError::Unavailable(format!(
                "failed to connect to Redis: {e}"
            ))),
            Ok(Err(RunError::TimedOut)) | Err(_) => Err(StoreError::Unavailable(
                "timed out waiting for a Redis connection".into(),
            )),
        }
    }
}
