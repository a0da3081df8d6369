//! # Order Commands
//!
//! Adding lines, showing the bill, checking out and starting over.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐        │
//! │  │  Seated  │────►│ Ordering │────►│ Checkout │────►│  Paid    │        │
//! │  └──────────┘     └──────────┘     └──────────┘     └────┬─────┘        │
//! │                        │                                  │             │
//! │                   add_to_order                      start_new_order     │
//! │                   get_order                         (table released)    │
//! │                                                           │             │
//! │        ◄──────────────────────────────────────────────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::path::PathBuf;

use bistro_core::{BillSummary, Money, OrderLine, OrderSession, ReceiptEncoder, TableId};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::receipt::save_receipt;
use crate::state::{ConfigState, TableState};

/// Running order: lines and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub lines: Vec<OrderLine>,
    pub total_items: i64,
    pub grand_total: Money,
}

impl From<&OrderSession> for OrderResponse {
    fn from(session: &OrderSession) -> Self {
        OrderResponse {
            lines: session.lines().to_vec(),
            total_items: session.item_count(),
            grand_total: session.running_total(),
        }
    }
}

impl fmt::Display for OrderResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lines.is_empty() {
            return write!(f, "Your order is empty.");
        }
        writeln!(f, "Current Order:")?;
        for line in &self.lines {
            writeln!(f, "  {}", line)?;
        }
        writeln!(f, "Total Items: {}", self.total_items)?;
        write!(f, "Grand Total: {}", self.grand_total)
    }
}

/// Reply to `add`: the new line plus the updated order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddResponse {
    pub added: OrderLine,
    pub order: OrderResponse,
}

impl fmt::Display for AddResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Added {} x {} to your order!", self.added.quantity, self.added.label())?;
        write!(f, "{}", self.order)
    }
}

/// Reply to `checkout`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub store_name: String,
    pub bill: BillSummary,
    pub payment_text: String,
    pub receipt_path: PathBuf,
}

impl fmt::Display for CheckoutResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} - Final Bill", self.store_name)?;
        writeln!(f, "{}", self.bill)?;
        writeln!(f)?;
        writeln!(f, "Scan to pay:")?;
        for line in self.payment_text.lines() {
            writeln!(f, "  {}", line)?;
        }
        write!(f, "Payment code saved to {}", self.receipt_path.display())
    }
}

/// Reply to `new`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderResponse {
    pub released_table: Option<TableId>,
}

impl fmt::Display for NewOrderResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(table) = self.released_table {
            writeln!(f, "Table {} is free again.", table)?;
        }
        write!(f, "New order started. Choose 'seat takeaway' or 'seat dine-in'.")
    }
}

/// Gets the running order.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  > bill                                                                 │
/// │                                                                         │
/// │  Current Order:                                                         │
/// │    Naan - ₹40 each × 3 = ₹120                                           │
/// │    Chicken Biryani (Full) - ₹280 each × 2 = ₹560                        │
/// │  Total Items: 5                                                         │
/// │  Grand Total: ₹680                                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_order(session: &OrderSession) -> OrderResponse {
    debug!("get_order command");
    OrderResponse::from(session)
}

/// Adds the current selection `quantity` times.
///
/// ## Behavior
/// - Selection incomplete: nothing is added, the reply names what is missing
/// - Quantity below 1: nothing is added
/// - Each add is its own line, even for a repeated selection
pub fn add_to_order(session: &mut OrderSession, quantity: i64) -> Result<AddResponse, ApiError> {
    debug!(quantity, "add_to_order command");

    let added = session.add_to_order(quantity)?;
    Ok(AddResponse {
        added,
        order: OrderResponse::from(&*session),
    })
}

/// Closes the order, encodes the payment code and saves it.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  > checkout                                                             │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  1. Session builds the bill (totals come from the ledger)      │    │
/// │  │  2. Payment text encoded once as ESC/POS QR                    │    │
/// │  │  3. Encoded bytes written to <receipt_dir>/<order ref>.escpos  │    │
/// │  │  4. Order closed; a failed write leaves it open for a retry    │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  Final bill printed; 'new' starts the next order                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn checkout<E>(
    session: &mut OrderSession,
    config: &ConfigState,
    encoder: &E,
) -> Result<CheckoutResponse, ApiError>
where
    E: ReceiptEncoder + ?Sized,
{
    debug!("checkout command");

    let checkout = session.prepare_checkout(encoder)?;
    let receipt_path = save_receipt(config.receipt_dir(), &checkout.bill.order_ref, &checkout.receipt)?;
    session.complete_checkout(&checkout)?;

    Ok(CheckoutResponse {
        store_name: config.store_name.clone(),
        payment_text: checkout.bill.payment_text(),
        bill: checkout.bill,
        receipt_path,
    })
}

/// Resets the session and frees its table.
pub fn start_new_order(session: &mut OrderSession, tables: &TableState) -> NewOrderResponse {
    debug!("start_new_order command");

    let released_table = tables.with_tables_mut(|t| session.start_new_order(t));
    NewOrderResponse { released_table }
}
