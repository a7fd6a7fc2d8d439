//! Repository for the `todo_shares` table.

use sqlx::PgPool;
use todohub_core::types::DbId;

use crate::models::share::TodoShare;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, todo_id, user_id, created_at";

/// Provides persistence for share grants.
pub struct ShareRepo;

impl ShareRepo {
    /// Insert a share grant, returning the created row.
    pub async fn create(
        pool: &PgPool,
        todo_id: DbId,
        user_id: DbId,
    ) -> Result<TodoShare, sqlx::Error> {
        let query = format!(
            "INSERT INTO todo_shares (todo_id, user_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TodoShare>(&query)
            .bind(todo_id)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// List the ids of all users a todo is shared with.
    pub async fn user_ids_for_todo(pool: &PgPool, todo_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> =
            sqlx::query_as("SELECT user_id FROM todo_shares WHERE todo_id = $1")
                .bind(todo_id)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Delete the grant(s) linking a todo to a user, returning the last
    /// deleted row.
    ///
    /// Returns `None` if no such grant exists. Duplicate grants are all
    /// removed in one call.
    pub async fn delete(
        pool: &PgPool,
        todo_id: DbId,
        user_id: DbId,
    ) -> Result<Option<TodoShare>, sqlx::Error> {
        let query = format!(
            "DELETE FROM todo_shares
             WHERE todo_id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        let mut deleted: Vec<TodoShare> = sqlx::query_as(&query)
            .bind(todo_id)
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Ok(deleted.pop())
    }
}
