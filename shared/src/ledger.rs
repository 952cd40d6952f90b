//! Product ledger rules
//!
//! The pure half of the stock accounting model: how a product's status is
//! derived from its thresholds, and how a movement turns a previous stock
//! level into a new one. The backend runs these inside a locked transaction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{MovementType, ProductStatus};

/// Errors raised while applying a movement to a stock level
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Quantity must be greater than zero, got {0}")]
    NonPositiveQuantity(i32),

    #[error("Insufficient stock: available {available}, requested {requested}")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("Stock level would overflow")]
    StockOverflow,
}

/// Stock levels on either side of a movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockChange {
    pub previous_stock: i32,
    pub new_stock: i32,
}

impl MovementType {
    /// Quantity as a signed delta on the stock level
    pub fn signed_quantity(self, quantity: i32) -> i32 {
        match self {
            MovementType::Entrada => quantity,
            MovementType::Salida => -quantity,
        }
    }
}

/// Compute the stock level after applying a movement.
///
/// Salidas may never take the stock below zero.
pub fn apply_movement(
    previous_stock: i32,
    movement_type: MovementType,
    quantity: i32,
) -> Result<StockChange, LedgerError> {
    if quantity <= 0 {
        return Err(LedgerError::NonPositiveQuantity(quantity));
    }

    let new_stock = previous_stock
        .checked_add(movement_type.signed_quantity(quantity))
        .ok_or(LedgerError::StockOverflow)?;

    if new_stock < 0 {
        return Err(LedgerError::InsufficientStock {
            available: previous_stock,
            requested: quantity,
        });
    }

    Ok(StockChange {
        previous_stock,
        new_stock,
    })
}

/// At or below the minimum threshold
pub fn is_low_stock(stock: i32, min_stock: i32) -> bool {
    stock <= min_stock
}

/// At or above the maximum threshold
pub fn is_at_max_stock(stock: i32, max_stock: i32) -> bool {
    stock >= max_stock
}

impl ProductStatus {
    /// Derive the status of a product.
    ///
    /// Low stock wins over the manual flag, so an inactive product that runs
    /// low still shows up in stock alerts.
    pub fn derive(stock: i32, min_stock: i32, is_active: bool) -> Self {
        if is_low_stock(stock, min_stock) {
            ProductStatus::LowStock
        } else if !is_active {
            ProductStatus::Inactive
        } else {
            ProductStatus::Active
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entrada_increases_stock() {
        let change = apply_movement(20, MovementType::Entrada, 5).unwrap();
        assert_eq!(change.previous_stock, 20);
        assert_eq!(change.new_stock, 25);
    }

    #[test]
    fn test_salida_decreases_stock() {
        let change = apply_movement(20, MovementType::Salida, 15).unwrap();
        assert_eq!(change.previous_stock, 20);
        assert_eq!(change.new_stock, 5);
    }

    #[test]
    fn test_salida_to_zero_is_allowed() {
        let change = apply_movement(1, MovementType::Salida, 1).unwrap();
        assert_eq!(change.new_stock, 0);
    }

    #[test]
    fn test_salida_below_zero_is_rejected() {
        assert_eq!(
            apply_movement(1, MovementType::Salida, 2),
            Err(LedgerError::InsufficientStock {
                available: 1,
                requested: 2
            })
        );
    }

    #[test]
    fn test_non_positive_quantity_is_rejected() {
        assert_eq!(
            apply_movement(10, MovementType::Entrada, 0),
            Err(LedgerError::NonPositiveQuantity(0))
        );
        assert_eq!(
            apply_movement(10, MovementType::Salida, -3),
            Err(LedgerError::NonPositiveQuantity(-3))
        );
    }

    #[test]
    fn test_overflow_is_rejected() {
        assert_eq!(
            apply_movement(i32::MAX, MovementType::Entrada, 1),
            Err(LedgerError::StockOverflow)
        );
    }

    #[test]
    fn test_status_derivation() {
        assert_eq!(ProductStatus::derive(20, 10, true), ProductStatus::Active);
        assert_eq!(ProductStatus::derive(10, 10, true), ProductStatus::LowStock);
        assert_eq!(ProductStatus::derive(5, 10, true), ProductStatus::LowStock);
        assert_eq!(ProductStatus::derive(20, 10, false), ProductStatus::Inactive);
        assert_eq!(ProductStatus::derive(3, 10, false), ProductStatus::LowStock);
    }

    #[test]
    fn test_threshold_helpers() {
        assert!(is_low_stock(0, 0));
        assert!(!is_low_stock(1, 0));
        assert!(is_at_max_stock(50, 50));
        assert!(!is_at_max_stock(49, 50));
    }
}
