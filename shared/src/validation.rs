//! Validation utilities for Stocky
//!
//! Field-level checks the derive-based `validator` rules cannot express:
//! money amounts, threshold ordering, SKU and color formats.

use rust_decimal::Decimal;

// ============================================================================
// Inventory Validations
// ============================================================================

/// Largest amount a NUMERIC(12, 2) money column holds: 9,999,999,999.99
pub const MAX_MONEY: Decimal = Decimal::from_parts(0xD4A5_0FFF, 0xE8, 0, false, 2);

fn check_money(amount: Decimal) -> Result<(), &'static str> {
    if amount.normalize().scale() > 2 {
        return Err("Amount must have at most 2 decimal places");
    }
    if amount > MAX_MONEY {
        return Err("Amount cannot exceed 9999999999.99");
    }
    Ok(())
}

/// Validate that a price is a non-negative amount storable in cents
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    check_money(price)
}

/// Validate that a movement cost is a non-negative amount storable in cents
pub fn validate_cost(cost: Decimal) -> Result<(), &'static str> {
    if cost < Decimal::ZERO {
        return Err("Cost cannot be negative");
    }
    check_money(cost)
}

/// Validate stock thresholds: both non-negative, minimum not above maximum
pub fn validate_stock_thresholds(min_stock: i32, max_stock: i32) -> Result<(), &'static str> {
    if min_stock < 0 || max_stock < 0 {
        return Err("Stock thresholds cannot be negative");
    }
    if min_stock > max_stock {
        return Err("Minimum stock cannot exceed maximum stock");
    }
    Ok(())
}

/// Validate SKU format: 2-40 characters, letters, digits, '-' or '_'
pub fn validate_sku(sku: &str) -> Result<(), &'static str> {
    if sku.len() < 2 {
        return Err("SKU must be at least 2 characters");
    }
    if sku.len() > 40 {
        return Err("SKU must be at most 40 characters");
    }
    if !sku
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err("SKU may only contain letters, digits, '-' and '_'");
    }
    Ok(())
}

/// Validate a hex color tag (#RGB or #RRGGBB)
pub fn validate_hex_color(color: &str) -> Result<(), &'static str> {
    let Some(digits) = color.strip_prefix('#') else {
        return Err("Color must start with '#'");
    };
    if !(digits.len() == 3 || digits.len() == 6) {
        return Err("Color must be #RGB or #RRGGBB");
    }
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err("Color must be hexadecimal");
    }
    Ok(())
}

// ============================================================================
// Account Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate username: 3-50 characters, letters, digits, '.', '_' or '-'
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 3 {
        return Err("Username must be at least 3 characters");
    }
    if username.len() > 50 {
        return Err("Username must be at most 50 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '_' || c == '-')
    {
        return Err("Username may only contain letters, digits, '.', '_' and '-'");
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 6 {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Inventory Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(Decimal::new(89999, 2)).is_ok());
        assert!(validate_price(Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn test_validate_price_fits_money_column() {
        assert!(validate_price(Decimal::new(1999, 2)).is_ok());
        assert!(validate_price(Decimal::new(19990, 3)).is_ok());
        assert!(validate_price(MAX_MONEY).is_ok());
        assert_eq!(MAX_MONEY, Decimal::new(999_999_999_999, 2));

        assert_eq!(
            validate_price(Decimal::new(19999, 3)),
            Err("Amount must have at most 2 decimal places")
        );
        assert_eq!(
            validate_price(Decimal::from(100_000_000_000_i64)),
            Err("Amount cannot exceed 9999999999.99")
        );
        assert!(validate_price(MAX_MONEY + Decimal::new(1, 2)).is_err());
    }

    #[test]
    fn test_validate_cost() {
        assert!(validate_cost(Decimal::from(800)).is_ok());
        assert!(validate_cost(Decimal::from(-5)).is_err());
        assert!(validate_cost(Decimal::new(1001, 3)).is_err());
        assert!(validate_cost(Decimal::from(10_000_000_000_i64)).is_err());
    }

    #[test]
    fn test_validate_stock_thresholds() {
        assert!(validate_stock_thresholds(5, 50).is_ok());
        assert!(validate_stock_thresholds(10, 10).is_ok());
        assert!(validate_stock_thresholds(0, 0).is_ok());
        assert!(validate_stock_thresholds(51, 50).is_err());
        assert!(validate_stock_thresholds(-1, 50).is_err());
    }

    #[test]
    fn test_validate_sku_valid() {
        assert!(validate_sku("LAP-HP-001").is_ok());
        assert!(validate_sku("phn_sam_1").is_ok());
        assert!(validate_sku("A1").is_ok());
    }

    #[test]
    fn test_validate_sku_invalid() {
        assert!(validate_sku("A").is_err()); // Too short
        assert!(validate_sku(&"X".repeat(41)).is_err()); // Too long
        assert!(validate_sku("LAP HP").is_err()); // Space
        assert!(validate_sku("LAP/HP").is_err()); // Special char
    }

    #[test]
    fn test_validate_hex_color() {
        assert!(validate_hex_color("#3B82F6").is_ok());
        assert!(validate_hex_color("#fff").is_ok());
        assert!(validate_hex_color("3B82F6").is_err());
        assert!(validate_hex_color("#3B82F").is_err());
        assert!(validate_hex_color("#GGGGGG").is_err());
    }

    // ========================================================================
    // Account Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("ventas@tienda.com.ar").is_ok());
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@domain").is_err());
        assert!(validate_email("@.").is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("admin").is_ok());
        assert!(validate_username("vendedor.1").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("bad name").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret1").is_ok());
        assert!(validate_password("123456").is_ok());
        assert!(validate_password("short").is_err());
    }
}
