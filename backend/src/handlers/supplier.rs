//! Supplier handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::{ActiveQuery, AppJson};
use crate::models::{CreateSupplier, Supplier, UpdateSupplier};
use crate::services::SupplierService;
use crate::AppState;

pub async fn list_suppliers(
    State(state): State<AppState>,
    Query(query): Query<ActiveQuery>,
) -> AppResult<Json<Vec<Supplier>>> {
    let service = SupplierService::new(state.db.clone());
    Ok(Json(service.list(query.active).await?))
}

pub async fn get_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db.clone());
    Ok(Json(service.get(supplier_id).await?))
}

pub async fn create_supplier(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateSupplier>,
) -> AppResult<(StatusCode, Json<Supplier>)> {
    let service = SupplierService::new(state.db.clone());
    let supplier = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

pub async fn update_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
    AppJson(input): AppJson<UpdateSupplier>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db.clone());
    Ok(Json(service.update(supplier_id, input).await?))
}

pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = SupplierService::new(state.db.clone());
    service.delete(supplier_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
