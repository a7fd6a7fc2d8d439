//! Repository for the `auth_tokens` table.

use sqlx::PgPool;
use todohub_core::types::{DbId, Timestamp};

use crate::models::token::AuthToken;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, value, expires_at, created_at";

/// Provides persistence for bearer tokens.
pub struct TokenRepo;

impl TokenRepo {
    /// Insert or replace the token for a user.
    ///
    /// Keyed on `uq_auth_tokens_user_id`, so a second login overwrites the
    /// previous token (single active session, last write wins). A collision
    /// on `uq_auth_tokens_value` -- another user's live token has the same
    /// value -- surfaces as a database error; use
    /// [`Self::is_value_collision`] to detect it and regenerate.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        value: &str,
        expires_at: Timestamp,
    ) -> Result<AuthToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO auth_tokens (user_id, value, expires_at)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_auth_tokens_user_id
             DO UPDATE SET value = EXCLUDED.value, expires_at = EXCLUDED.expires_at
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuthToken>(&query)
            .bind(user_id)
            .bind(value)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a token row by its value.
    ///
    /// Expiry is NOT checked here; the caller compares `expires_at` against
    /// its own clock so issue and validation share a timestamp source.
    pub async fn find_by_value(
        pool: &PgPool,
        value: &str,
    ) -> Result<Option<AuthToken>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM auth_tokens WHERE value = $1");
        sqlx::query_as::<_, AuthToken>(&query)
            .bind(value)
            .fetch_optional(pool)
            .await
    }

    /// Whether an error is a unique violation of the token value constraint,
    /// i.e. a random-value collision the caller should retry.
    pub fn is_value_collision(err: &sqlx::Error) -> bool {
        match err {
            sqlx::Error::Database(db_err) => {
                db_err.code().as_deref() == Some("23505")
                    && db_err.constraint() == Some("uq_auth_tokens_value")
            }
            _ => false,
        }
    }
}
