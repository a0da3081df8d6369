//! # Receipt Module
//!
//! The final bill and the seam to whatever turns it into a scannable code.
//!
//! ## Checkout Data Flow
//! ```text
//! OrderLedger ──► BillSummary ──► payment_text() ──► ReceiptEncoder ──► EncodedReceipt
//!                     │                                  (external:
//!                     └──► Display: detailed final bill   QR, ESC/POS, ...)
//! ```
//!
//! The payment text is what ends up inside the code:
//! ```text
//! Restaurant Bill
//! Table: 7
//! Total: ₹680
//! Items: 5
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;
use uuid::Uuid;

use crate::ledger::OrderLedger;
use crate::money::Money;
use crate::types::{OrderLine, SeatingChoice, TableId};

// =============================================================================
// Bill Summary
// =============================================================================

/// Everything printed on the final bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    /// UUID v4 reference for this checkout.
    pub order_ref: String,
    pub seating: SeatingChoice,
    /// Assigned table; `None` for takeaway and for unseated dine-in.
    pub table: Option<TableId>,
    pub lines: Vec<OrderLine>,
    /// Σ quantity over all lines.
    pub item_count: i64,
    pub grand_total: Money,
    #[ts(as = "String")]
    pub issued_at: DateTime<Utc>,
}

impl BillSummary {
    /// Snapshots the ledger into a bill.
    pub fn from_ledger(ledger: &OrderLedger, seating: SeatingChoice, table: Option<TableId>) -> Self {
        BillSummary {
            order_ref: Uuid::new_v4().to_string(),
            seating,
            table,
            lines: ledger.lines().to_vec(),
            item_count: ledger.item_count(),
            grand_total: ledger.current_total(),
            issued_at: Utc::now(),
        }
    }

    /// Table number, or `Takeaway` when no table is assigned.
    pub fn table_label(&self) -> String {
        self.table
            .map(|t| t.to_string())
            .unwrap_or_else(|| "Takeaway".to_string())
    }

    /// The short text handed to the receipt encoder.
    pub fn payment_text(&self) -> String {
        format!(
            "Restaurant Bill\nTable: {}\nTotal: {}\nItems: {}",
            self.table_label(),
            self.grand_total,
            self.item_count
        )
    }
}

/// The detailed final bill, one line per order line.
impl fmt::Display for BillSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Order {}", self.order_ref)?;
        if let Some(table) = self.table {
            writeln!(f, "Table Number: {}", table)?;
        }
        for line in &self.lines {
            writeln!(f, "  {}", line)?;
        }
        writeln!(f, "---")?;
        writeln!(f, "Total Items Ordered: {}", self.item_count)?;
        write!(f, "Grand Total: {}", self.grand_total)
    }
}

// =============================================================================
// Receipt Encoder
// =============================================================================

/// An encoded payment code ready for display or printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedReceipt {
    /// What `data` holds, e.g. `application/vnd.escpos`.
    pub media_type: String,
    pub data: Vec<u8>,
}

/// Turns the bill's payment text into a scannable payload.
///
/// Encoders are treated as infallible: checkout never fails because of them.
pub trait ReceiptEncoder {
    fn encode(&self, text: &str) -> EncodedReceipt;
}

impl<F> ReceiptEncoder for F
where
    F: Fn(&str) -> EncodedReceipt,
{
    fn encode(&self, text: &str) -> EncodedReceipt {
        self(text)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> OrderLedger {
        let mut ledger = OrderLedger::new();
        ledger.add_line("Naan", "Piece", 3, Money::from_major(40)).unwrap();
        ledger
            .add_line("Chicken Biryani", "Full", 2, Money::from_major(280))
            .unwrap();
        ledger
    }

    #[test]
    fn test_bill_totals_come_from_ledger() {
        let bill = BillSummary::from_ledger(&ledger(), SeatingChoice::DineIn, Some(TableId::from_number(7)));
        assert_eq!(bill.grand_total, Money::from_major(680));
        assert_eq!(bill.item_count, 5);
        assert_eq!(bill.lines.len(), 2);
        assert!(Uuid::parse_str(&bill.order_ref).is_ok());
    }

    #[test]
    fn test_payment_text() {
        let bill = BillSummary::from_ledger(&ledger(), SeatingChoice::DineIn, Some(TableId::from_number(7)));
        assert_eq!(
            bill.payment_text(),
            "Restaurant Bill\nTable: 7\nTotal: ₹680\nItems: 5"
        );

        let takeaway = BillSummary::from_ledger(&ledger(), SeatingChoice::Takeaway, None);
        assert!(takeaway.payment_text().contains("Table: Takeaway"));
    }

    #[test]
    fn test_detailed_bill() {
        let bill = BillSummary::from_ledger(&ledger(), SeatingChoice::DineIn, Some(TableId::from_number(3)));
        let text = bill.to_string();
        assert!(text.contains("Table Number: 3"));
        assert!(text.contains("  Naan - ₹40 each × 3 = ₹120"));
        assert!(text.contains("  Chicken Biryani (Full) - ₹280 each × 2 = ₹560"));
        assert!(text.ends_with("Total Items Ordered: 5\nGrand Total: ₹680"));
    }

    #[test]
    fn test_closure_encoder() {
        let encoder = |text: &str| EncodedReceipt {
            media_type: "text/plain".to_string(),
            data: text.as_bytes().to_vec(),
        };
        let receipt = encoder.encode("hello");
        assert_eq!(receipt.data, b"hello");
    }
}
