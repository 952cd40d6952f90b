//! Product ledger models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::{double_option, ProductSortField, SortOrder};

/// Stock status of a product
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "product_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Inactive,
    #[serde(rename = "low-stock")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "low-stock"))]
    LowStock,
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatus::Active => write!(f, "active"),
            ProductStatus::Inactive => write!(f, "inactive"),
            ProductStatus::LowStock => write!(f, "low-stock"),
        }
    }
}

/// A product with its current quantity on hand
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    /// Joined from the referenced category
    pub category_name: String,
    pub stock: i32,
    pub price: Decimal,
    pub min_stock: i32,
    pub max_stock: i32,
    pub supplier_id: Option<Uuid>,
    /// Joined from the referenced supplier
    pub supplier_name: Option<String>,
    pub sku: String,
    pub description: Option<String>,
    pub status: ProductStatus,
    /// Manual activation flag; `false` marks the product inactive
    pub is_active: bool,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Inventory value held for this product (stock × price)
    pub fn value(&self) -> Decimal {
        Decimal::from(self.stock) * self.price
    }
}

/// Input for creating a product
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200, message = "Product name is required"))]
    pub name: String,
    pub category_id: Uuid,
    #[serde(default)]
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,
    pub price: Decimal,
    #[serde(default)]
    #[validate(range(min = 0, message = "Minimum stock cannot be negative"))]
    pub min_stock: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Maximum stock cannot be negative"))]
    pub max_stock: i32,
    pub supplier_id: Option<Uuid>,
    #[validate(length(min = 1, message = "SKU is required"))]
    pub sku: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Partial update of a product; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200, message = "Product name cannot be empty"))]
    pub name: Option<String>,
    pub category_id: Option<Uuid>,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,
    pub price: Option<Decimal>,
    #[validate(range(min = 0, message = "Minimum stock cannot be negative"))]
    pub min_stock: Option<i32>,
    #[validate(range(min = 0, message = "Maximum stock cannot be negative"))]
    pub max_stock: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub supplier_id: Option<Option<Uuid>>,
    #[validate(length(min = 1, message = "SKU cannot be empty"))]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
}

/// Query filter for product lists
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    /// Case-insensitive substring over name, sku, supplier and description
    pub search: Option<String>,
    pub category_id: Option<Uuid>,
    pub status: Option<ProductStatus>,
    #[serde(default)]
    pub sort_by: ProductSortField,
    #[serde(default)]
    pub order: SortOrder,
}
