//! Create and resolve orchestration.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{Code, UrlMapping};
use crate::domain::repositories::{MappingStore, PutOutcome, StoreError};
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;

/// What create does when a candidate code is bound to a different URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Move on to the next salted candidate, up to the attempt limit.
    #[default]
    Rehash,
    /// Fail the request with [`AppError::Collision`].
    Reject,
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rehash" => Ok(Self::Rehash),
            "reject" => Ok(Self::Reject),
            other => Err(format!(
                "unknown collision policy '{other}', expected 'rehash' or 'reject'"
            )),
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rehash => f.write_str("rehash"),
            Self::Reject => f.write_str("reject"),
        }
    }
}

/// Service for creating and resolving short codes.
///
/// Holds no per-request state. Uniqueness is arbitrated by the store's atomic
/// claim, so concurrent creates need no coordination here.
pub struct MappingService {
    store: Arc<dyn MappingStore>,
    generator: CodeGenerator,
    policy: CollisionPolicy,
    max_attempts: u32,
}

impl MappingService {
    /// Creates a new mapping service.
    ///
    /// `max_attempts` bounds the candidates tried under
    /// [`CollisionPolicy::Rehash`]; values below 1 are treated as 1.
    pub fn new(
        store: Arc<dyn MappingStore>,
        generator: CodeGenerator,
        policy: CollisionPolicy,
        max_attempts: u32,
    ) -> Self {
        Self {
            store,
            generator,
            policy,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Returns the code for `target`, storing the mapping if it is new.
    ///
    /// # Flow
    ///
    /// 1. Derive candidate `k` (starting at 0) from the target
    /// 2. Atomically claim it in the store
    /// 3. `Created` or `AlreadyPresentSame` ends the flow with that code
    /// 4. `Collision` either fails (reject) or moves to candidate `k + 1` (rehash)
    ///
    /// Submitting the same target again walks the same candidate sequence and
    /// stops at the same code, so create is idempotent.
    ///
    /// # Errors
    ///
    /// - [`AppError::MalformedInput`] if `target` is empty
    /// - [`AppError::Collision`] under the reject policy
    /// - [`AppError::CodeSpaceExhausted`] when every rehash attempt collides
    /// - [`AppError::Store`] for store failures; nothing is written in that case
    pub async fn create(&self, target: &str) -> Result<UrlMapping, AppError> {
        if target.is_empty() {
            return Err(AppError::malformed_input(
                "URL must not be empty",
                json!({ "field": "Url" }),
            ));
        }

        let attempts = match self.policy {
            CollisionPolicy::Rehash => self.max_attempts,
            CollisionPolicy::Reject => 1,
        };

        for attempt in 0..attempts {
            let code = self.generator.candidate(target, attempt);

            match self.store.try_put_if_absent_or_same(&code, target).await? {
                PutOutcome::Created => {
                    info!(code = %code, url = %target, attempt, "Mapping created");
                    return Ok(UrlMapping::new(code, target));
                }
                PutOutcome::AlreadyPresentSame => {
                    debug!(code = %code, url = %target, "Mapping already present");
                    return Ok(UrlMapping::new(code, target));
                }
                PutOutcome::Collision => {
                    warn!(code = %code, url = %target, attempt, "Code bound to a different URL");
                    if self.policy == CollisionPolicy::Reject {
                        return Err(AppError::Collision {
                            code: code.into_inner(),
                        });
                    }
                }
            }
        }

        warn!(url = %target, attempts, "No free code left for URL");
        Err(AppError::CodeSpaceExhausted { attempts })
    }

    /// Looks up the target URL for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] wrapping [`StoreError::NotFound`] for unknown
    /// codes and the transport error otherwise.
    pub async fn resolve(&self, code: &Code) -> Result<String, AppError> {
        let target = self.store.get(code).await?;
        debug!(code = %code, url = %target, "Mapping resolved");
        Ok(target)
    }

    /// Pings the store.
    pub async fn check_store(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }

    pub fn generator(&self) -> &CodeGenerator {
        &self.generator
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }
}
