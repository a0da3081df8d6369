//! # Validation Module
//!
//! Field-level rules for the ordering flow.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front-end                                                    │
//! │  ├── Only offers names that exist in the menu                          │
//! │  └── Quantity input starts at 1                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Menu load (catalog.rs)                                       │
//! │  └── Prices parsed as decimals, negatives dropped                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE, called by the ledger and the session            │
//! │  ├── Item name present                                                 │
//! │  ├── Quantity in 1..=999                                               │
//! │  └── Order line count                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bistro_core::validation::{validate_item_name, validate_quantity};
//!
//! validate_item_name("Naan").unwrap();
//! validate_quantity(3).unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_ITEM_QUANTITY, MAX_ORDER_LINES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest item name accepted on a line.
const MAX_ITEM_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item name before it goes on a line.
///
/// ## Rules
/// - Must not be empty or blank
/// - At most 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "item".to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "item".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// Diner enters quantity: 3
///      │
///      ▼
/// validate_quantity(3) ← THIS FUNCTION
///      │
///      ├── qty <= 0?  → "quantity must be positive"
///      ├── qty > 999? → "quantity must be between 1 and 999"
///      └── OK → line is added
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a menu price.
///
/// Zero is allowed (complimentary items, unresolved sizes).
///
/// ```rust
/// use bistro_core::validation::validate_price;
/// use bistro_core::Money;
///
/// assert!(validate_price(Money::from_major(40)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_minor(-1)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a configured table count (1..=255).
pub fn validate_table_count(count: u32) -> ValidationResult<u8> {
    u8::try_from(count)
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "table count".to_string(),
            min: 1,
            max: u8::MAX as i64,
        })
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that one more line fits on the order.
pub fn validate_order_size(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_ORDER_LINES {
        return Err(ValidationError::OutOfRange {
            field: "order lines".to_string(),
            min: 0,
            max: MAX_ORDER_LINES as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Chicken Biryani").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name("   ").is_err());
        assert!(validate_item_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_table_count() {
        assert_eq!(validate_table_count(15).unwrap(), 15);
        assert_eq!(validate_table_count(255).unwrap(), 255);
        assert!(validate_table_count(0).is_err());
        assert!(validate_table_count(256).is_err());
    }

    #[test]
    fn test_validate_order_size() {
        assert!(validate_order_size(0).is_ok());
        assert!(validate_order_size(MAX_ORDER_LINES - 1).is_ok());
        assert!(validate_order_size(MAX_ORDER_LINES).is_err());
    }
}
