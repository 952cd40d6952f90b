//! Personal to-do list models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

pub const DEFAULT_TASK_COLOR: &str = "#3b82f6";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "task_priority"))]
pub enum TaskPriority {
    #[serde(rename = "alta")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "alta"))]
    High,
    #[default]
    #[serde(rename = "media")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "media"))]
    Medium,
    #[serde(rename = "baja")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "baja"))]
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub completed: bool,
    pub priority: TaskPriority,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateTask {
    #[validate(length(min = 1, max = 500, message = "Task description is required"))]
    pub description: String,
    pub priority: Option<TaskPriority>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateTask {
    #[validate(length(min = 1, max = 500, message = "Task description cannot be empty"))]
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<TaskPriority>,
    pub color: Option<String>,
}
