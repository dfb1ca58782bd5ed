/// Task model and database operations
///
/// Tasks are the core entity of Taskboard. The board is global: there is
/// no ownership column, and every authenticated session sees the same
/// list.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     title VARCHAR(100) NOT NULL,
///     description VARCHAR(200),
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Tasks are created by the add operation and destroyed by delete; no
/// operation mutates one in place. `completed` exists in the schema with
/// its default but nothing currently flips it to true.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Task row on the shared board
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Storage-generated identifier
    pub id: i64,

    /// Task title (non-empty; enforced by the handler, not trimmed)
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Completion flag, defaults to false
    pub completed: bool,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,
}

impl Task {
    /// Inserts a new task and returns the stored row
    ///
    /// `completed` is left to its storage default (false).
    pub async fn create(pool: &PgPool, data: NewTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description)
            VALUES ($1, $2)
            RETURNING id, title, description, completed, created_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists every task on the board in insertion order
    ///
    /// The full list is materialized before rendering; there is no
    /// pagination.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, completed, created_at
            FROM tasks
            ORDER BY id ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, completed, created_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task by ID
    ///
    /// Returns true if a row was deleted, false if no task had that ID.
    /// Callers translate false into their not-found handling.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts tasks on the board
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_struct() {
        let new_task = NewTask {
            title: "Buy milk".to_string(),
            description: None,
        };

        assert_eq!(new_task.title, "Buy milk");
        assert!(new_task.description.is_none());
    }

    #[test]
    fn test_new_task_with_description() {
        let new_task = NewTask {
            title: "Buy milk".to_string(),
            description: Some("Two liters".to_string()),
        };

        assert_eq!(new_task.description.as_deref(), Some("Two liters"));
    }

    // Integration tests for database operations are in tests/task_store_tests.rs
}
