//! Movement journal handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::AppJson;
use crate::middleware::CurrentUser;
use crate::models::{CreateMovement, Movement, MovementFilter};
use crate::services::MovementService;
use crate::AppState;
use shared::{MovementStats, TopSellingProduct, TrendBucket};

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    pub days: Option<u32>,
}

pub async fn list_movements(
    State(state): State<AppState>,
    Query(filter): Query<MovementFilter>,
) -> AppResult<Json<Vec<Movement>>> {
    let service = MovementService::new(state.db.clone());
    let movements = service
        .list(&filter, state.config.movements.recent_limit)
        .await?;
    Ok(Json(movements))
}

pub async fn get_recent_movements(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<Vec<Movement>>> {
    let service = MovementService::new(state.db.clone());
    let limit = query.limit.unwrap_or(state.config.movements.recent_limit);
    Ok(Json(service.recent(limit).await?))
}

pub async fn get_movement_stats(State(state): State<AppState>) -> AppResult<Json<MovementStats>> {
    let service = MovementService::new(state.db.clone());
    Ok(Json(service.stats().await?))
}

pub async fn get_top_selling(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<Vec<TopSellingProduct>>> {
    let service = MovementService::new(state.db.clone());
    let limit = query
        .limit
        .unwrap_or(state.config.movements.top_selling_limit);
    Ok(Json(service.top_selling(limit).await?))
}

pub async fn get_movement_trend(
    State(state): State<AppState>,
    Query(query): Query<TrendQuery>,
) -> AppResult<Json<Vec<TrendBucket>>> {
    let service = MovementService::new(state.db.clone());
    let days = query
        .days
        .unwrap_or(state.config.movements.trend_window_days);
    Ok(Json(service.trend(days).await?))
}

pub async fn get_movements_by_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Vec<Movement>>> {
    let service = MovementService::new(state.db.clone());
    Ok(Json(service.by_product(product_id).await?))
}

pub async fn get_movement(
    State(state): State<AppState>,
    Path(movement_id): Path<Uuid>,
) -> AppResult<Json<Movement>> {
    let service = MovementService::new(state.db.clone());
    Ok(Json(service.get(movement_id).await?))
}

/// Apply a movement, attributed to the caller unless the body names a user
pub async fn create_movement(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(input): AppJson<CreateMovement>,
) -> AppResult<(StatusCode, Json<Movement>)> {
    let service = MovementService::new(state.db.clone());
    let movement = service.apply(input, &user.username).await?;
    Ok((StatusCode::CREATED, Json(movement)))
}
