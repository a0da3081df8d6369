//! # Error Types
//!
//! Domain-specific error types for bistro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bistro-core errors (this file)                                        │
//! │  ├── CoreError        - Session and ledger rule violations             │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── CatalogError     - Menu document unusable at startup              │
//! │                                                                         │
//! │  kiosk errors (in app)                                                 │
//! │  └── ApiError         - What the diner sees (code + message)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Terminal               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `CoreError` is recoverable within the same session. Malformed
//! individual menu entries never show up here: the catalog recovers from them
//! while loading.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Ordering rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The diner tried to add an item before the menu path resolved, or with
    /// a quantity/name that cannot form a line.
    ///
    /// ## User Workflow
    /// ```text
    /// Category: Mains, Sub-Category: Curry, Dish: (none)
    ///      │
    ///      ▼
    /// Add to Order
    ///      │
    ///      ▼
    /// SelectionIncomplete { reason: "select a dish" }
    ///      │
    ///      ▼
    /// UI shows: "Please complete all selections" and nothing changes
    /// ```
    #[error("Selection incomplete: {reason}")]
    SelectionIncomplete { reason: String },

    /// Every dine-in table is taken.
    ///
    /// The session controller turns this into an unseated outcome; the diner
    /// keeps ordering without a table.
    #[error("All {capacity} tables are currently occupied")]
    NoTablesAvailable { capacity: u8 },

    /// The requested action does not fit the session's current phase.
    #[error("Cannot {action} while the order is {phase}")]
    InvalidTransition { phase: String, action: String },

    /// Checkout with nothing on the order.
    #[error("Order is empty")]
    EmptyOrder,

    /// Order has exceeded maximum allowed lines.
    #[error("Order cannot have more than {max} lines")]
    OrderTooLarge { max: usize },

    /// A line total or the order total would not fit in the money type.
    #[error("Amount too large: {reason}")]
    AmountTooLarge { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Shorthand for [`CoreError::SelectionIncomplete`].
    pub fn incomplete(reason: impl Into<String>) -> Self {
        CoreError::SelectionIncomplete {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., a price that is not a decimal number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Catalog Error
// =============================================================================

/// The menu document as a whole could not be used.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Not valid JSON.
    #[error("Menu is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON, but the top level (or a category) is not an object.
    #[error("Menu {location} must be an object")]
    NotAnObject { location: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::NoTablesAvailable { capacity: 15 };
        assert_eq!(err.to_string(), "All 15 tables are currently occupied");

        let err = CoreError::InvalidTransition {
            phase: "completed".to_string(),
            action: "add to order".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot add to order while the order is completed"
        );
    }

    #[test]
    fn test_incomplete_shorthand() {
        let err = CoreError::incomplete("select a size");
        assert!(matches!(err, CoreError::SelectionIncomplete { .. }));
        assert_eq!(err.to_string(), "Selection incomplete: select a size");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "Validation error: quantity must be positive");
    }

    #[test]
    fn test_catalog_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CatalogError = json_err.into();
        assert!(err.to_string().starts_with("Menu is not valid JSON"));
    }
}
