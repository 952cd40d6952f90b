//! Task list handlers; each user sees only their own tasks

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::AppJson;
use crate::middleware::CurrentUser;
use crate::models::{CreateTask, Task, UpdateTask};
use crate::services::TaskService;
use crate::AppState;

pub async fn list_tasks(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<Vec<Task>>> {
    let service = TaskService::new(state.db.clone());
    Ok(Json(service.list(user.user_id).await?))
}

pub async fn create_task(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(input): AppJson<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let service = TaskService::new(state.db.clone());
    let task = service.create(user.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(task_id): Path<Uuid>,
    AppJson(input): AppJson<UpdateTask>,
) -> AppResult<Json<Task>> {
    let service = TaskService::new(state.db.clone());
    Ok(Json(service.update(user.user_id, task_id, input).await?))
}

pub async fn delete_task(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(task_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = TaskService::new(state.db.clone());
    service.delete(user.user_id, task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
