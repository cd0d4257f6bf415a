//! `PasswordHasher` backed by bcrypt.
//!
//! bcrypt is CPU bound, so both operations run on the blocking pool. Input is
//! never truncated: hashing rejects passwords over [`MAX_PASSWORD_BYTES`] and
//! verification reports them as a mismatch.

use async_trait::async_trait;

use crate::domain::{MAX_PASSWORD_BYTES, PasswordHash};
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// bcrypt hasher with a configurable work factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl BcryptPasswordHasher {
    /// Use `cost` rounds, clamped to bcrypt's supported range.
    pub fn with_cost(cost: u32) -> Self {
        Self {
            cost: cost.clamp(4, 31),
        }
    }
}

async fn run_blocking<T, F>(work: F) -> Result<T, PasswordHasherError>
where
    F: FnOnce() -> Result<T, bcrypt::BcryptError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| PasswordHasherError::hashing(err.to_string()))?
        .map_err(|err| PasswordHasherError::hashing(err.to_string()))
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        let cost = self.cost;
        let encoded = run_blocking(move || bcrypt::non_truncating_hash(password.as_str(), cost)).await?;
        Ok(PasswordHash::new(encoded))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }
        let password = zeroize::Zeroizing::new(password.to_owned());
        let encoded = hash.as_str().to_owned();
        run_blocking(move || bcrypt::non_truncating_verify(password.as_str(), &encoded)).await
    }
}
