//! Opaque bearer-token issuing and validation.
//!
//! Tokens are random strings stored server-side with an expiry; nothing is
//! encoded in the value itself. Each user has at most one live token -- a
//! new login overwrites the previous one. `chrono::Utc` is the single clock
//! source for both expiry writes and expiry checks.

use chrono::{Duration, Utc};
use rand::RngCore;
use sqlx::PgPool;
use todohub_core::types::DbId;
use todohub_db::repositories::TokenRepo;

/// Random bytes per token value; hex-encoded to twice as many characters.
pub const TOKEN_VALUE_BYTES: usize = 32;

/// Ceiling for regeneration after a token-value unique violation.
const MAX_COLLISION_RETRIES: u32 = 5;

/// Default token lifetime in minutes.
const DEFAULT_TTL_MINS: i64 = 5;

/// Configuration for bearer-token issuing.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Token lifetime in minutes (default: 5).
    pub ttl_mins: i64,
}

impl TokenConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var          | Required | Default |
    /// |------------------|----------|---------|
    /// | `TOKEN_TTL_MINS` | no       | `5`     |
    pub fn from_env() -> Self {
        let ttl_mins: i64 = std::env::var("TOKEN_TTL_MINS")
            .unwrap_or_else(|_| DEFAULT_TTL_MINS.to_string())
            .parse()
            .expect("TOKEN_TTL_MINS must be a valid i64");

        Self { ttl_mins }
    }

    /// The configured lifetime as a [`Duration`].
    pub fn ttl(&self) -> Duration {
        Duration::minutes(self.ttl_mins)
    }
}

/// Failures of token validation and issuing.
///
/// `Invalid` and `Expired` are kept distinct so callers (and tests) can tell
/// an unknown token from a stale one, even though both map to 401 at the
/// HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("unknown token")]
    Invalid,

    #[error("token expired")]
    Expired,

    #[error("token generation collided {0} times in a row")]
    RetriesExhausted(u32),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Generate a fresh token value: 32 CSPRNG bytes, lowercase hex.
pub fn generate_token_value() -> String {
    let mut bytes = [0u8; TOKEN_VALUE_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Issue a token for the given user, overwriting any previous one.
///
/// The value space is large enough that collisions with another user's live
/// token are astronomically rare, but the store still enforces uniqueness;
/// on that specific violation the value is regenerated, up to a small
/// ceiling. Collisions are logged at WARN level without the value itself.
pub async fn issue_token(
    pool: &PgPool,
    user_id: DbId,
    config: &TokenConfig,
) -> Result<String, TokenError> {
    for attempt in 1..=MAX_COLLISION_RETRIES {
        let value = generate_token_value();
        let expires_at = Utc::now() + config.ttl();

        match TokenRepo::upsert(pool, user_id, &value, expires_at).await {
            Ok(token) => return Ok(token.value),
            Err(err) if TokenRepo::is_value_collision(&err) => {
                tracing::warn!(user_id, attempt, "token value collision, regenerating");
            }
            Err(err) => return Err(err.into()),
        }
    }
    Err(TokenError::RetriesExhausted(MAX_COLLISION_RETRIES))
}

/// Resolve a token value to the owning user id.
///
/// An unknown value fails with [`TokenError::Invalid`]; a known value past
/// its expiry fails with [`TokenError::Expired`]. Expired rows are left in
/// place -- the next login overwrites them.
pub async fn validate_token(pool: &PgPool, value: &str) -> Result<DbId, TokenError> {
    let token = TokenRepo::find_by_value(pool, value)
        .await?
        .ok_or(TokenError::Invalid)?;

    if token.expires_at <= Utc::now() {
        return Err(TokenError::Expired);
    }

    Ok(token.user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_value_shape() {
        let value = generate_token_value();
        assert_eq!(value.len(), TOKEN_VALUE_BYTES * 2);
        assert!(
            value.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()),
            "token must be lowercase hex"
        );
    }

    #[test]
    fn test_token_values_are_unique() {
        let a = generate_token_value();
        let b = generate_token_value();
        assert_ne!(a, b);
    }

    #[test]
    fn test_default_ttl_is_five_minutes() {
        let config = TokenConfig { ttl_mins: 5 };
        assert_eq!(config.ttl(), Duration::minutes(5));
    }
}
