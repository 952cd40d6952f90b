//! Category handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::AppJson;
use crate::models::{Category, CreateCategory, UpdateCategory};
use crate::services::CategoryService;
use crate::AppState;

/// `?active=true|false` filter shared by catalog lists
#[derive(Debug, Default, Deserialize)]
pub struct ActiveQuery {
    pub active: Option<bool>,
}

pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<ActiveQuery>,
) -> AppResult<Json<Vec<Category>>> {
    let service = CategoryService::new(state.db.clone());
    Ok(Json(service.list(query.active).await?))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> AppResult<Json<Category>> {
    let service = CategoryService::new(state.db.clone());
    Ok(Json(service.get(category_id).await?))
}

pub async fn create_category(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let service = CategoryService::new(state.db.clone());
    let category = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
    AppJson(input): AppJson<UpdateCategory>,
) -> AppResult<Json<Category>> {
    let service = CategoryService::new(state.db.clone());
    Ok(Json(service.update(category_id, input).await?))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = CategoryService::new(state.db.clone());
    service.delete(category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
