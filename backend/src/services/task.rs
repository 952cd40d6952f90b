//! Personal task list service; every query is scoped to the owner

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{CreateTask, Task, UpdateTask, DEFAULT_TASK_COLOR};
use crate::services::ensure;
use shared::validate_hex_color;

const TASK_COLUMNS: &str = "id, user_id, description, completed, priority, color, created_at";

#[derive(Clone)]
pub struct TaskService {
    db: PgPool,
}

impl TaskService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Tasks of `user_id`, newest first
    pub async fn list(&self, user_id: Uuid) -> AppResult<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
            TASK_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(tasks)
    }

    pub async fn create(&self, user_id: Uuid, input: CreateTask) -> AppResult<Task> {
        input.validate()?;
        let color = input.color.unwrap_or_else(|| DEFAULT_TASK_COLOR.to_string());
        ensure("color", validate_hex_color(&color))?;

        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            INSERT INTO tasks (user_id, description, priority, color)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            TASK_COLUMNS
        ))
        .bind(user_id)
        .bind(&input.description)
        .bind(input.priority.unwrap_or_default())
        .bind(&color)
        .fetch_one(&self.db)
        .await?;

        Ok(task)
    }

    pub async fn update(&self, user_id: Uuid, task_id: Uuid, input: UpdateTask) -> AppResult<Task> {
        input.validate()?;
        if let Some(color) = &input.color {
            ensure("color", validate_hex_color(color))?;
        }

        sqlx::query_as::<_, Task>(&format!(
            r#"
            UPDATE tasks
            SET description = COALESCE($3, description),
                completed = COALESCE($4, completed),
                priority = COALESCE($5, priority),
                color = COALESCE($6, color)
            WHERE id = $1 AND user_id = $2
            RETURNING {}
            "#,
            TASK_COLUMNS
        ))
        .bind(task_id)
        .bind(user_id)
        .bind(&input.description)
        .bind(input.completed)
        .bind(input.priority)
        .bind(&input.color)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Task".to_string()))
    }

    pub async fn delete(&self, user_id: Uuid, task_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(task_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Task".to_string()));
        }
        Ok(())
    }
}
