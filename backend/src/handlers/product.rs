//! Product handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::AppJson;
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::services::ProductService;
use crate::AppState;
use shared::{CategoryBreakdown, ProductStats};

pub async fn list_products(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.db.clone());
    Ok(Json(service.list(&filter).await?))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db.clone());
    Ok(Json(service.get(product_id).await?))
}

pub async fn get_product_stats(State(state): State<AppState>) -> AppResult<Json<ProductStats>> {
    let service = ProductService::new(state.db.clone());
    Ok(Json(service.stats().await?))
}

pub async fn get_category_breakdown(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CategoryBreakdown>>> {
    let service = ProductService::new(state.db.clone());
    Ok(Json(service.breakdown().await?))
}

pub async fn get_low_stock_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.db.clone());
    Ok(Json(service.low_stock().await?))
}

pub async fn create_product(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateProduct>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let service = ProductService::new(state.db.clone());
    let product = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    AppJson(input): AppJson<UpdateProduct>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db.clone());
    Ok(Json(service.update(product_id, input).await?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = ProductService::new(state.db.clone());
    service.delete(product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
