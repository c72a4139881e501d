//! Redis-backed mapping store.

use async_trait::async_trait;
use redis::{AsyncCommands, RedisResult, Script};
use tokio::time::{error::Elapsed, timeout_at};
use tracing::{debug, warn};

use super::pool::{CommandFailure, RedisPool};
use crate::domain::entities::Code;
use crate::domain::repositories::{MappingStore, PutOutcome, StoreError, StoreResult};

/// Claims `KEYS[1]` for `ARGV[1]` in one atomic step.
///
/// Replies 0 when the key was free and has been set, 1 when it already holds
/// the same value, 2 when it holds a different value (left untouched).
const CLAIM_SCRIPT: &str = r"
local current = redis.call('GET', KEYS[1])
if not current then
    redis.call('SET', KEYS[1], ARGV[1])
    return 0
end
if current == ARGV[1] then
    return 1
end
return 2
";

/// Mapping store on a shared Redis instance.
///
/// Keys are `key_prefix + code`, values are the raw target URLs. Each call
/// checks out one pooled connection, issues one command (or the claim
/// script), and gives the connection back. Checkout and command share one
/// deadline of [`PoolSettings::timeout`](super::PoolSettings::timeout).
pub struct RedisMappingStore {
    pool: RedisPool,
    key_prefix: String,
    claim: Script,
}

impl RedisMappingStore {
    pub fn new(pool: RedisPool, key_prefix: impl Into<String>) -> Self {
        Self {
            pool,
            key_prefix: key_prefix.into(),
            claim: Script::new(CLAIM_SCRIPT),
        }
    }

    pub fn pool(&self) -> &RedisPool {
        &self.pool
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, code: &Code) -> String {
        format!("{}{}", self.key_prefix, code)
    }
}

#[async_trait]
impl MappingStore for RedisMappingStore {
    async fn put(&self, code: &Code, target: &str) -> StoreResult<()> {
        let key = self.build_key(code);
        let deadline = self.pool.deadline();
        let mut conn = self.pool.get(deadline).await?;

        let outcome = timeout_at(deadline, conn.connection().set::<_, _, ()>(&key, target)).await;
        conn.settle(outcome).map_err(|failure| {
            warn!(code = %code, url = %target, error = %failure, "Redis SET failed");
            write_error(failure)
        })?;

        debug!(code = %code, "Redis SET");
        Ok(())
    }

    async fn get(&self, code: &Code) -> StoreResult<String> {
        let key = self.build_key(code);
        let deadline = self.pool.deadline();
        let mut conn = self.pool.get(deadline).await?;

        let outcome = timeout_at(deadline, conn.connection().get::<_, Option<String>>(&key)).await;
        let value = conn.settle(outcome).map_err(|failure| {
            warn!(code = %code, error = %failure, "Redis GET failed");
            read_error(failure)
        })?;

        match value {
            Some(target) => {
                debug!(code = %code, "Redis GET hit");
                Ok(target)
            }
            None => {
                debug!(code = %code, "Redis GET miss");
                Err(StoreError::NotFound {
                    code: code.to_string(),
                })
            }
        }
    }

    async fn try_put_if_absent_or_same(
        &self,
        code: &Code,
        target: &str,
    ) -> StoreResult<PutOutcome> {
        let key = self.build_key(code);
        let deadline = self.pool.deadline();
        let mut conn = self.pool.get(deadline).await?;

        let outcome: Result<RedisResult<i64>, Elapsed> = timeout_at(
            deadline,
            self.claim.key(&key).arg(target).invoke_async(conn.connection()),
        )
        .await;
        let reply = conn.settle(outcome).map_err(|failure| {
            warn!(code = %code, url = %target, error = %failure, "Redis claim script failed");
            write_error(failure)
        })?;

        match reply {
            0 => Ok(PutOutcome::Created),
            1 => Ok(PutOutcome::AlreadyPresentSame),
            2 => Ok(PutOutcome::Collision),
            other => Err(StoreError::WriteFailed(format!(
                "unexpected claim script reply {other}"
            ))),
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        let deadline = self.pool.deadline();
        let mut conn = self.pool.get(deadline).await?;

        let outcome = timeout_at(deadline, conn.connection().ping::<()>()).await;
        conn.settle(outcome).map_err(|failure| {
            warn!(error = %failure, "Redis PING failed");
            read_error(failure)
        })
    }
}

fn write_error(failure: CommandFailure) -> StoreError {
    match failure {
        CommandFailure::Rejected(e) => StoreError::WriteFailed(e.to_string()),
        other => StoreError::Unavailable(other.to_string()),
    }
}

fn read_error(failure: CommandFailure) -> StoreError {
    match failure {
        CommandFailure::Rejected(e) => StoreError::ReadFailed(e.to_string()),
        other => StoreError::Unavailable(other.to_string()),
    }
}
