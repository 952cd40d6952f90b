//! Movement journal models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::MovementView;

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "movement_type", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    /// Inbound, increases stock
    Entrada,
    /// Outbound, decreases stock
    Salida,
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovementType::Entrada => write!(f, "entrada"),
            MovementType::Salida => write!(f, "salida"),
        }
    }
}

/// A journal entry recording one stock change.
///
/// `product_name` and `category` are copied from the product when the movement
/// is written, so later product edits do not rewrite history. `product_id`
/// becomes `None` once the product is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: Uuid,
    pub product_id: Option<Uuid>,
    pub product_name: String,
    pub category: String,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub quantity: i32,
    pub previous_stock: i32,
    pub new_stock: i32,
    pub reason: String,
    #[serde(rename = "user")]
    pub user_name: String,
    pub cost: Option<Decimal>,
    pub notes: Option<String>,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
}

/// Input for applying a movement to a product
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovement {
    pub product_id: Uuid,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    #[validate(range(min = 1, message = "Quantity must be greater than zero"))]
    pub quantity: i32,
    #[validate(length(min = 1, max = 200, message = "Reason is required"))]
    pub reason: String,
    /// Attribution; defaults to the authenticated username
    #[serde(rename = "user")]
    #[validate(length(min = 1, max = 100))]
    pub user_name: Option<String>,
    pub cost: Option<Decimal>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Query filter for movement lists
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementFilter {
    /// Case-insensitive substring over product name, reason, user and notes
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub movement_type: Option<MovementType>,
    /// Category name as captured on the movement
    pub category: Option<String>,
    /// Calendar day (UTC) the movement was recorded on
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub view: MovementView,
    /// Size of the `recent` view
    pub limit: Option<usize>,
}
