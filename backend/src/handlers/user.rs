//! User administration handlers (admin only)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::AppJson;
use crate::middleware::CurrentUser;
use crate::models::{CreateUser, UpdateUser, User};
use crate::services::UserService;
use crate::AppState;

pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let service = UserService::new(state.db.clone());
    Ok(Json(service.list().await?))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<User>> {
    let service = UserService::new(state.db.clone());
    Ok(Json(service.get(user_id).await?))
}

pub async fn create_user(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let service = UserService::new(state.db.clone());
    let user = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    AppJson(input): AppJson<UpdateUser>,
) -> AppResult<Json<User>> {
    let service = UserService::new(state.db.clone());
    Ok(Json(service.update(user_id, input).await?))
}

pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(admin): CurrentUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = UserService::new(state.db.clone());
    service.delete(user_id, admin.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
