//! Repository for the `todos` table.

use sqlx::PgPool;
use todohub_core::types::DbId;

use crate::models::todo::{CreateTodo, Todo, TodoUpdate};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, text, owner_id, is_done, created_at";

/// Provides CRUD operations for todos.
pub struct TodoRepo;

impl TodoRepo {
    /// Insert a new todo, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTodo) -> Result<Todo, sqlx::Error> {
        let query = format!(
            "INSERT INTO todos (title, text, owner_id, is_done)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(&input.title)
            .bind(&input.text)
            .bind(input.owner_id)
            .bind(input.is_done)
            .fetch_one(pool)
            .await
    }

    /// Find a todo by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos WHERE id = $1");
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List todos visible to a user.
    ///
    /// Without `include_shared`, only todos the user owns. With it, owned
    /// todos plus those shared with the user, deduplicated (a todo shared
    /// twice still appears once).
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        include_shared: bool,
    ) -> Result<Vec<Todo>, sqlx::Error> {
        if include_shared {
            let query = "SELECT DISTINCT t.id, t.title, t.text, t.owner_id, t.is_done, t.created_at
                 FROM todos t
                 LEFT JOIN todo_shares s ON t.id = s.todo_id
                 WHERE t.owner_id = $1 OR s.user_id = $1
                 ORDER BY t.id";
            sqlx::query_as::<_, Todo>(query)
                .bind(user_id)
                .fetch_all(pool)
                .await
        } else {
            let query = format!("SELECT {COLUMNS} FROM todos WHERE owner_id = $1 ORDER BY id");
            sqlx::query_as::<_, Todo>(&query)
                .bind(user_id)
                .fetch_all(pool)
                .await
        }
    }

    /// Apply a partial update. Only non-`None` fields in `input` are
    /// applied; an all-`None` update returns the row unchanged.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &TodoUpdate,
    ) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!(
            "UPDATE todos SET
                title = COALESCE($2, title),
                text = COALESCE($3, text),
                is_done = COALESCE($4, is_done)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.text)
            .bind(input.is_done)
            .fetch_optional(pool)
            .await
    }

    /// Delete a todo, returning the deleted row.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!("DELETE FROM todos WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
