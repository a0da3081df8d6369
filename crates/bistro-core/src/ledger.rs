//! # Order Ledger
//!
//! Append-only list of order lines with a running total.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_line("Naan", "Piece", 3, ₹40)                                      │
//! │       │                                                                 │
//! │       ├── blank item / qty <= 0 ──► SelectionIncomplete (no change)     │
//! │       ├── qty > 999             ──► Validation (no change)              │
//! │       ├── 100 lines already     ──► OrderTooLarge (no change)           │
//! │       ├── total would overflow  ──► AmountTooLarge (no change)          │
//! │       └── OK ──► push line (₹120), running_total += ₹120                │
//! │                                                                         │
//! │  reset() ──► no lines, running_total = ₹0                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are never edited or removed one by one.

use serde::Serialize;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::OrderLine;
use crate::validation::{validate_item_name, validate_order_size, validate_quantity};
use crate::{MAX_ORDER_LINES, STANDARD_SIZE};

/// The lines of the active order.
///
/// ## Invariants
/// - `running_total == Σ line.line_total`
/// - every line has a non-blank item and a quantity in `1..=999`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLedger {
    lines: Vec<OrderLine>,
    running_total: Money,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line and returns it.
    ///
    /// An empty `size` is recorded as `"Standard"`. All checks run before
    /// anything changes, so a rejected call leaves the ledger untouched.
    ///
    /// ```rust
    /// use bistro_core::{Money, OrderLedger};
    ///
    /// let mut ledger = OrderLedger::new();
    /// let line = ledger.add_line("Naan", "Piece", 3, Money::from_major(40)).unwrap();
    /// assert_eq!(line.line_total, Money::from_major(120));
    /// assert!(ledger.add_line("", "Piece", 1, Money::from_major(40)).is_err());
    /// assert_eq!(ledger.current_total(), Money::from_major(120));
    /// ```
    pub fn add_line(
        &mut self,
        item: &str,
        size: &str,
        quantity: i64,
        unit_price: Money,
    ) -> CoreResult<&OrderLine> {
        if item.trim().is_empty() {
            return Err(CoreError::incomplete("select an item"));
        }
        if quantity <= 0 {
            return Err(CoreError::incomplete("quantity must be at least 1"));
        }
        validate_item_name(item)?;
        validate_quantity(quantity)?;
        validate_order_size(self.lines.len()).map_err(|_| CoreError::OrderTooLarge {
            max: MAX_ORDER_LINES,
        })?;

        let line_total = unit_price
            .checked_mul_quantity(quantity)
            .ok_or_else(|| CoreError::AmountTooLarge {
                reason: format!("{} × {} {}", unit_price, quantity, item.trim()),
            })?;
        let running_total = self
            .running_total
            .checked_add(line_total)
            .ok_or_else(|| CoreError::AmountTooLarge {
                reason: "order total exceeds the maximum".to_string(),
            })?;

        let size = match size.trim() {
            "" => STANDARD_SIZE,
            size => size,
        };
        let line = OrderLine {
            item: item.trim().to_string(),
            size: size.to_string(),
            quantity,
            unit_price,
            line_total,
        };

        self.running_total = running_total;
        debug!(
            item = %line.item,
            size = %line.size,
            quantity,
            line_total = %line.line_total,
            running_total = %self.running_total,
            "Order line added"
        );
        self.lines.push(line);

        let idx = self.lines.len() - 1;
        Ok(&self.lines[idx])
    }

    /// The running total.
    pub fn current_total(&self) -> Money {
        debug_assert_eq!(
            self.running_total,
            self.recomputed_total(),
            "running total drifted from the sum of its lines"
        );
        self.running_total
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drops every line and zeroes the total.
    pub fn reset(&mut self) {
        self.lines.clear();
        self.running_total = Money::zero();
    }

    fn recomputed_total(&self) -> Money {
        self.lines.iter().map(|l| l.line_total).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
