//! # bistro-core: Pure Ordering Logic for Bistro
//!
//! This crate is the **heart** of Bistro. It contains the whole order-assembly
//! flow as plain data and functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bistro Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Front-end (terminal kiosk, web, ...)            │   │
//! │  │   Seating ──► Menu dropdowns ──► Quantity ──► Bill ──► QR code  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ explicit commands                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bistro-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌───────────┐ ┌──────────┐ ┌──────────────────┐ │   │
//! │  │   │ catalog  │ │ navigator │ │  tables  │ │     session      │ │   │
//! │  │   │ MenuCat. │ │ MenuPath  │ │ TableAll.│ │   OrderSession   │ │   │
//! │  │   └──────────┘ └───────────┘ └──────────┘ │  (state machine) │ │   │
//! │  │   ┌──────────┐ ┌───────────┐ ┌──────────┐ └──────────────────┘ │   │
//! │  │   │  ledger  │ │  receipt  │ │  money   │                      │   │
//! │  │   │ OrderLed.│ │ BillSumm. │ │  Money   │                      │   │
//! │  │   └──────────┘ └───────────┘ └──────────┘                      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO TERMINAL • NO GLOBAL STATE             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (paise, no floating point)
//! - [`types`] - Shared value types (TableId, OrderLine, PriceQuote, ...)
//! - [`catalog`] - The read-only menu, parsed once from JSON
//! - [`navigator`] - Resolves a menu path to a price quote
//! - [`tables`] - Table allocation for dine-in diners
//! - [`ledger`] - Append-only order ledger with a running total
//! - [`receipt`] - Bill summary and the receipt encoder seam
//! - [`session`] - The order session state machine
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level rules
//!
//! ## Example Usage
//!
//! ```rust
//! use bistro_core::catalog::MenuCatalog;
//! use bistro_core::navigator::{MenuPath, Resolution};
//! use bistro_core::Money;
//!
//! let catalog = MenuCatalog::from_json_str(r#"{"Indian Breads": {"Naan": 40}}"#).unwrap();
//! let path = MenuPath::category("Indian Breads").with_item("Naan");
//!
//! match catalog.resolve(&path) {
//!     Resolution::Ready(quote) => {
//!         assert_eq!(quote.unit_price, Money::from_major(40));
//!         assert_eq!(quote.size, "Piece");
//!     }
//!     Resolution::Incomplete { .. } => unreachable!(),
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod ledger;
pub mod money;
pub mod navigator;
pub mod receipt;
pub mod session;
pub mod tables;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::MenuCatalog;
pub use error::{CatalogError, CoreError, CoreResult, ValidationError};
pub use ledger::OrderLedger;
pub use money::Money;
pub use receipt::{BillSummary, EncodedReceipt, ReceiptEncoder};
pub use session::{OrderSession, SeatingOutcome, SessionPhase, SessionView};
pub use tables::TableAllocator;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of dine-in tables in the restaurant.
///
/// Tables are numbered `1..=DEFAULT_TABLE_COUNT`.
pub const DEFAULT_TABLE_COUNT: u8 = 15;

/// Maximum lines allowed in a single order.
pub const MAX_ORDER_LINES: usize = 100;

/// Maximum quantity of a single line.
///
/// Guards against typing 1000 instead of 10.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Size label used for direct-priced items (breads sold by the piece).
pub const PIECE_SIZE: &str = "Piece";

/// Size label used when a nested dish has a bare price instead of sizes.
pub const SINGLE_SERVING_SIZE: &str = "Single Serving";

/// Size label recorded on a line that was added without any size.
pub const STANDARD_SIZE: &str = "Standard";

/// Categories priced directly per item unless configured otherwise.
pub const DEFAULT_DIRECT_PRICED_CATEGORIES: &[&str] = &["Indian Breads"];

/// Returns true for the placeholder size labels that are hidden on bills.
///
/// ```rust
/// assert!(bistro_core::is_sentinel_size("Piece"));
/// assert!(!bistro_core::is_sentinel_size("Full"));
/// ```
pub fn is_sentinel_size(size: &str) -> bool {
    size == PIECE_SIZE || size == SINGLE_SERVING_SIZE || size == STANDARD_SIZE
}
