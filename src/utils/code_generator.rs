//! Deterministic short code derivation.
//!
//! A code is the first `N` characters of the lowercase hex digest of the
//! target URL. Truncation makes distinct URLs share a prefix now and then
//! (`16^N` codes in total), so the generator exposes a numbered sequence of
//! candidates per URL and leaves arbitration to the caller.

use crate::domain::entities::Code;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Shortest code length accepted by [`CodeGenerator::new`].
pub const MIN_CODE_LENGTH: usize = 4;

/// Digest used to derive codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestAlgorithm {
    /// 160-bit SHA-1, 40 hex characters.
    #[default]
    Sha1,
    /// 256-bit SHA-256, 64 hex characters.
    Sha256,
}

impl DigestAlgorithm {
    /// Length of the full hex-encoded digest.
    pub fn hex_len(self) -> usize {
        match self {
            Self::Sha1 => 40,
            Self::Sha256 => 64,
        }
    }

    fn hex_digest(self, parts: &[&[u8]]) -> String {
        match self {
            Self::Sha1 => {
                let mut hasher = Sha1::new();
                for part in parts {
                    hasher.update(part);
                }
                hex::encode(hasher.finalize())
            }
            Self::Sha256 => {
                let mut hasher = Sha256::new();
                for part in parts {
                    hasher.update(part);
                }
                hex::encode(hasher.finalize())
            }
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            other => Err(format!("unknown digest '{other}', expected 'sha1' or 'sha256'")),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha1 => f.write_str("sha1"),
            Self::Sha256 => f.write_str("sha256"),
        }
    }
}

/// Errors raised when building a [`CodeGenerator`].
#[derive(Debug, thiserror::Error)]
pub enum CodeGenError {
    #[error("code length must be between {min} and {max} for {digest}, got {got}")]
    InvalidLength {
        min: usize,
        max: usize,
        got: usize,
        digest: DigestAlgorithm,
    },
}

/// Derives fixed-length hex codes from URLs.
#[derive(Debug, Clone, Copy)]
pub struct CodeGenerator {
    length: usize,
    digest: DigestAlgorithm,
}

impl CodeGenerator {
    /// Creates a generator emitting `length` hex characters per code.
    ///
    /// # Errors
    ///
    /// Returns [`CodeGenError::InvalidLength`] if `length` is below
    /// [`MIN_CODE_LENGTH`] or longer than the digest's hex form.
    pub fn new(length: usize, digest: DigestAlgorithm) -> Result<Self, CodeGenError> {
        let max = digest.hex_len();
        if !(MIN_CODE_LENGTH..=max).contains(&length) {
            return Err(CodeGenError::InvalidLength {
                min: MIN_CODE_LENGTH,
                max,
                got: length,
                digest,
            });
        }
        Ok(Self { length, digest })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn digest(&self) -> DigestAlgorithm {
        self.digest
    }

    /// Returns the primary code for `target`: the truncated digest of its bytes.
    pub fn generate(&self, target: &str) -> Code {
        self.candidate(target, 0)
    }

    /// Returns the `attempt`-th candidate code for `target`.
    ///
    /// Attempt 0 hashes the URL bytes alone. Later attempts hash
    /// `url || 0x00 || attempt` in decimal. A NUL byte never occurs in a URL,
    /// so salted inputs cannot be confused with another raw URL.
    pub fn candidate(&self, target: &str, attempt: u32) -> Code {
        let hex = if attempt == 0 {
            self.digest.hex_digest(&[target.as_bytes()])
        } else {
            let salt = attempt.to_string();
            self.digest
                .hex_digest(&[target.as_bytes(), b"\0", salt.as_bytes()])
        };
        Code::new(&hex[..self.length])
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self {
            length: 7,
            digest: DigestAlgorithm::Sha1,
        }
    }
}
