//! # API Error Type
//!
//! Unified error type for kiosk commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Kiosk                              │
//! │                                                                         │
//! │  Diner types: add 2                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Parse Error? ─── "add two" ──────────────────────┐              │  │
//! │  │         │                                          │              │  │
//! │  │         ▼                                          ▼              │  │
//! │  │  Core Error? ─── CoreError::SelectionIncomplete ── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Terminal prints:  [SELECTION_INCOMPLETE] Please complete all ...       │
//! │  The session is unchanged and the loop keeps running.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bistro_core::{CatalogError, CoreError, ValidationError};
use serde::Serialize;

/// Error returned from kiosk commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "SELECTION_INCOMPLETE",
///   "message": "Please complete all selections: select a size"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The menu path is not fully chosen, or the quantity is not positive
    SelectionIncomplete,

    /// No free dine-in table
    NoTablesAvailable,

    /// Command does not fit the current session phase
    InvalidState,

    /// Checkout with nothing ordered
    EmptyOrder,

    /// Order line limit reached
    OrderTooLarge,

    /// Input validation failed
    ValidationError,

    /// The menu file is unusable
    CatalogError,

    /// Command not understood
    UnknownCommand,

    /// Internal error (I/O, poisoned lock)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn unknown_command(input: &str) -> Self {
        ApiError::new(
            ErrorCode::UnknownCommand,
            format!("Unknown command '{}'. Type 'help' for the list", input),
        )
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::SelectionIncomplete { reason } => ApiError::new(
                ErrorCode::SelectionIncomplete,
                format!("Please complete all selections: {}", reason),
            ),
            e @ CoreError::NoTablesAvailable { .. } => {
                ApiError::new(ErrorCode::NoTablesAvailable, e.to_string())
            }
            e @ CoreError::InvalidTransition { .. } => {
                ApiError::new(ErrorCode::InvalidState, e.to_string())
            }
            CoreError::EmptyOrder => ApiError::new(
                ErrorCode::EmptyOrder,
                "Nothing ordered yet. Add an item before checking out",
            ),
            e @ (CoreError::OrderTooLarge { .. } | CoreError::AmountTooLarge { .. }) => {
                ApiError::new(ErrorCode::OrderTooLarge, e.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::new(ErrorCode::CatalogError, err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        // Log the actual error but return a generic message
        tracing::error!("I/O failure: {}", err);
        ApiError::internal(format!("I/O failure: {}", err.kind()))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = serde_json::to_value(self.code)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| format!("{:?}", self.code));
        write!(f, "[{}] {}", code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let err = ApiError::from(CoreError::incomplete("select a size"));
        assert_eq!(err.code, ErrorCode::SelectionIncomplete);
        assert_eq!(err.message, "Please complete all selections: select a size");

        let err = ApiError::from(CoreError::InvalidTransition {
            phase: "completed".to_string(),
            action: "add to order".to_string(),
        });
        assert_eq!(err.code, ErrorCode::InvalidState);
        assert_eq!(err.message, "Cannot add to order while the order is completed");

        assert_eq!(ApiError::from(CoreError::EmptyOrder).code, ErrorCode::EmptyOrder);

        let err = ApiError::from(CoreError::AmountTooLarge {
            reason: "order total exceeds the maximum".to_string(),
        });
        assert_eq!(err.code, ErrorCode::OrderTooLarge);
        assert_eq!(err.message, "Amount too large: order total exceeds the maximum");
    }

    #[test]
    fn test_display_uses_wire_code() {
        let err = ApiError::from(CoreError::incomplete("select a dish"));
        assert_eq!(
            err.to_string(),
            "[SELECTION_INCOMPLETE] Please complete all selections: select a dish"
        );
    }

    #[test]
    fn test_serialization() {
        let err = ApiError::unknown_command("dance");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "UNKNOWN_COMMAND");
        assert!(json["message"].as_str().unwrap().contains("dance"));
    }
}
