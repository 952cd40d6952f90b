//! Product ledger tests
//!
//! Property-based and unit tests for:
//! - Stock accounting: newStock = previousStock ± quantity, never negative
//! - Status derivation: low-stock iff stock ≤ minStock

use proptest::prelude::*;
use shared::{apply_movement, is_low_stock, LedgerError, MovementType, ProductStatus};

// ============================================================================
// Property Test Strategies
// ============================================================================

fn movement_type_strategy() -> impl Strategy<Value = MovementType> {
    prop_oneof![Just(MovementType::Entrada), Just(MovementType::Salida)]
}

fn stock_strategy() -> impl Strategy<Value = i32> {
    0..10_000i32
}

fn quantity_strategy() -> impl Strategy<Value = i32> {
    1..500i32
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// Applying a movement moves the stock by exactly the signed quantity
    #[test]
    fn prop_stock_moves_by_signed_quantity(
        stock in stock_strategy(),
        movement_type in movement_type_strategy(),
        quantity in quantity_strategy(),
    ) {
        match apply_movement(stock, movement_type, quantity) {
            Ok(change) => {
                prop_assert_eq!(change.previous_stock, stock);
                let expected = match movement_type {
                    MovementType::Entrada => stock + quantity,
                    MovementType::Salida => stock - quantity,
                };
                prop_assert_eq!(change.new_stock, expected);
                prop_assert!(change.new_stock >= 0);
            }
            Err(LedgerError::InsufficientStock { available, requested }) => {
                prop_assert_eq!(movement_type, MovementType::Salida);
                prop_assert!(quantity > stock);
                prop_assert_eq!(available, stock);
                prop_assert_eq!(requested, quantity);
            }
            Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
        }
    }

    /// Any sequence of movements, applied in order, keeps stock non-negative
    /// and chains previousStock to the prior newStock
    #[test]
    fn prop_movement_sequence_never_negative(
        initial in stock_strategy(),
        movements in prop::collection::vec((movement_type_strategy(), quantity_strategy()), 0..50),
    ) {
        let mut stock = initial;
        for (movement_type, quantity) in movements {
            if let Ok(change) = apply_movement(stock, movement_type, quantity) {
                prop_assert_eq!(change.previous_stock, stock);
                stock = change.new_stock;
            }
            prop_assert!(stock >= 0);
        }
    }

    /// Status is low-stock exactly when stock ≤ minStock
    #[test]
    fn prop_low_stock_status_iff_at_or_below_minimum(
        stock in stock_strategy(),
        min_stock in 0..1_000i32,
        is_active in any::<bool>(),
    ) {
        let status = ProductStatus::derive(stock, min_stock, is_active);
        prop_assert_eq!(status == ProductStatus::LowStock, is_low_stock(stock, min_stock));
        prop_assert_eq!(status == ProductStatus::LowStock, stock <= min_stock);
    }

    /// Non-positive quantities are always rejected
    #[test]
    fn prop_non_positive_quantity_rejected(
        stock in stock_strategy(),
        movement_type in movement_type_strategy(),
        quantity in -500..=0i32,
    ) {
        prop_assert_eq!(
            apply_movement(stock, movement_type, quantity),
            Err(LedgerError::NonPositiveQuantity(quantity))
        );
    }
}

// ============================================================================
// Unit Tests: Scenarios
// ============================================================================

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn test_salida_into_low_stock() {
        // stock 20, minStock 10 starts active
        assert_eq!(ProductStatus::derive(20, 10, true), ProductStatus::Active);

        let change = apply_movement(20, MovementType::Salida, 15).unwrap();
        assert_eq!(change.previous_stock, 20);
        assert_eq!(change.new_stock, 5);
        assert_eq!(
            ProductStatus::derive(change.new_stock, 10, true),
            ProductStatus::LowStock
        );
    }

    #[test]
    fn test_salida_of_entire_stock_allowed() {
        let change = apply_movement(7, MovementType::Salida, 7).unwrap();
        assert_eq!(change.new_stock, 0);
    }

    #[test]
    fn test_salida_past_zero_refused() {
        assert_eq!(
            apply_movement(1, MovementType::Salida, 2),
            Err(LedgerError::InsufficientStock {
                available: 1,
                requested: 2
            })
        );
    }

    #[test]
    fn test_inactive_product_reports_inactive_above_minimum() {
        assert_eq!(ProductStatus::derive(50, 10, false), ProductStatus::Inactive);
        assert_eq!(ProductStatus::derive(5, 10, false), ProductStatus::LowStock);
    }

    #[test]
    fn test_entrada_overflow_detected() {
        assert_eq!(
            apply_movement(i32::MAX, MovementType::Entrada, 1),
            Err(LedgerError::StockOverflow)
        );
    }
}
