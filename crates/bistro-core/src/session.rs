//! # Order Session
//!
//! The state machine that drives one diner from seating to checkout.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌────────────┐ confirm_seating ┌───────────────┐ select_menu_path      │
//! │  │ NotStarted │────────────────►│ SeatingChosen │──────────────┐        │
//! │  └────────────┘                 └───────────────┘              ▼        │
//! │        ▲                                               ┌────────────┐   │
//! │        │                                add_to_order ─►│  Browsing  │   │
//! │        │                                               └─────┬──────┘   │
//! │        │                                         ≥ 1 line    │          │
//! │        │                                               ┌─────▼──────┐   │
//! │        │ start_new_order                               │ ReadyTo-   │   │
//! │        │ (ledger reset, table released)                │ Checkout   │   │
//! │        │                                               └─────┬──────┘   │
//! │        │                 ┌───────────┐     checkout          │          │
//! │        └─────────────────│ Completed │◄──────────────────────┘          │
//! │                          └───────────┘                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The session owns its [`SessionState`] (selection, ledger, seating). The
//! table book is shared between sessions, so it is borrowed only by the two
//! calls that touch it: `confirm_seating` and `start_new_order`.
//!
//! ## Failure Semantics
//! Every rejected command returns before mutating anything.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::catalog::MenuCatalog;
use crate::error::{CoreError, CoreResult};
use crate::ledger::OrderLedger;
use crate::money::Money;
use crate::navigator::{MenuOptions, MenuPath, Resolution};
use crate::receipt::{BillSummary, EncodedReceipt, ReceiptEncoder};
use crate::tables::TableAllocator;
use crate::types::{OrderLine, SeatingChoice, TableId};

// =============================================================================
// Phase & Outcomes
// =============================================================================

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Waiting for Takeaway / Dine-in.
    #[default]
    NotStarted,
    /// Seating confirmed, nothing selected yet.
    SeatingChosen,
    /// Picking dishes; no lines yet.
    Browsing,
    /// Browsing with at least one line on the order.
    ReadyToCheckout,
    /// Checked out; waiting for "start new order".
    Completed,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionPhase::NotStarted => "not started",
            SessionPhase::SeatingChosen => "seated",
            SessionPhase::Browsing => "browsing",
            SessionPhase::ReadyToCheckout => "ready to checkout",
            SessionPhase::Completed => "completed",
        };
        f.write_str(label)
    }
}

/// Result of confirming the seating choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeatingOutcome {
    Takeaway,
    Seated { table: TableId },
    /// Dine-in was requested but every table is taken. The diner can still
    /// order; the bill will say "Takeaway".
    FullyBooked { capacity: u8 },
}

/// What checkout hands back.
#[derive(Debug, Clone)]
pub struct Checkout {
    pub bill: BillSummary,
    pub receipt: EncodedReceipt,
}

/// Read-only snapshot for the front-end.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub phase: SessionPhase,
    pub seating: Option<SeatingChoice>,
    pub table: Option<TableId>,
    pub selection: MenuPath,
    pub lines: Vec<OrderLine>,
    pub running_total: Money,
    pub item_count: i64,
}

// =============================================================================
// Session State
// =============================================================================

/// Per-diner mutable state. Built at session start, wiped by
/// `start_new_order`.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    phase: SessionPhase,
    seating: Option<SeatingChoice>,
    table: Option<TableId>,
    selection: MenuPath,
    ledger: OrderLedger,
    last_bill: Option<BillSummary>,
}

// =============================================================================
// Order Session
// =============================================================================

/// The session controller.
#[derive(Debug, Clone)]
pub struct OrderSession {
    catalog: Arc<MenuCatalog>,
    state: SessionState,
}

impl OrderSession {
    pub fn new(catalog: Arc<MenuCatalog>) -> Self {
        OrderSession {
            catalog,
            state: SessionState::default(),
        }
    }

    pub fn catalog(&self) -> &MenuCatalog {
        &self.catalog
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Records Takeaway or Dine-in. Dine-in asks `tables` for a free table;
    /// a full house is reported in the outcome, not as an error.
    pub fn confirm_seating(
        &mut self,
        choice: SeatingChoice,
        tables: &mut TableAllocator,
    ) -> CoreResult<SeatingOutcome> {
        self.require(&[SessionPhase::NotStarted], "confirm seating")?;

        let outcome = match choice {
            SeatingChoice::Takeaway => SeatingOutcome::Takeaway,
            SeatingChoice::DineIn => match tables.allocate() {
                Ok(table) => SeatingOutcome::Seated { table },
                Err(CoreError::NoTablesAvailable { capacity }) => {
                    warn!(capacity, "Dine-in requested but all tables are occupied");
                    SeatingOutcome::FullyBooked { capacity }
                }
                Err(e) => return Err(e),
            },
        };

        self.state.seating = Some(choice);
        self.state.table = match outcome {
            SeatingOutcome::Seated { table } => Some(table),
            _ => None,
        };
        self.state.phase = SessionPhase::SeatingChosen;

        info!(seating = %choice, ?outcome, "Seating confirmed");
        Ok(outcome)
    }

    /// Replaces the current selection and reports whether it is ready for a
    /// quantity.
    pub fn select_menu_path(&mut self, path: MenuPath) -> Resolution {
        let resolution = self.catalog.resolve(&path);
        debug!(?path, ready = resolution.is_ready(), "Menu path selected");

        self.state.selection = path;
        if self.state.phase == SessionPhase::SeatingChosen {
            self.state.phase = SessionPhase::Browsing;
        }
        resolution
    }

    /// Choices for the next level of the current selection.
    pub fn options(&self) -> Option<MenuOptions> {
        self.catalog.options(&self.state.selection)
    }

    /// Adds the current selection `quantity` times.
    pub fn add_to_order(&mut self, quantity: i64) -> CoreResult<OrderLine> {
        self.require(
            &[
                SessionPhase::SeatingChosen,
                SessionPhase::Browsing,
                SessionPhase::ReadyToCheckout,
            ],
            "add to order",
        )?;

        let quote = match self.catalog.resolve(&self.state.selection) {
            Resolution::Ready(quote) => quote,
            Resolution::Incomplete { missing } => {
                return Err(CoreError::incomplete(format!("select a {missing}")));
            }
        };

        let line = self
            .state
            .ledger
            .add_line(&quote.item, &quote.size, quantity, quote.unit_price)?
            .clone();
        self.state.phase = SessionPhase::Browsing;
        Ok(line)
    }

    /// Closes the order: builds the bill, encodes its payment text once and
    /// moves to `Completed`.
    pub fn checkout<E>(&mut self, encoder: &E) -> CoreResult<Checkout>
    where
        E: ReceiptEncoder + ?Sized,
    {
        let checkout = self.prepare_checkout(encoder)?;
        self.complete_checkout(&checkout)?;
        Ok(checkout)
    }

    /// Builds the bill and encodes its payment text without closing the
    /// order. Callers that persist the receipt do so before
    /// [`complete_checkout`](Self::complete_checkout).
    pub fn prepare_checkout<E>(&self, encoder: &E) -> CoreResult<Checkout>
    where
        E: ReceiptEncoder + ?Sized,
    {
        self.require_checkout()?;

        let seating = self.state.seating.unwrap_or(SeatingChoice::Takeaway);
        let bill = BillSummary::from_ledger(&self.state.ledger, seating, self.state.table);
        let receipt = encoder.encode(&bill.payment_text());
        Ok(Checkout { bill, receipt })
    }

    /// Moves a prepared order to `Completed` and keeps its bill.
    pub fn complete_checkout(&mut self, checkout: &Checkout) -> CoreResult<()> {
        self.require_checkout()?;

        let bill = &checkout.bill;
        self.state.phase = SessionPhase::Completed;
        self.state.last_bill = Some(bill.clone());

        info!(
            order_ref = %bill.order_ref,
            table = %bill.table_label(),
            grand_total = %bill.grand_total,
            items = bill.item_count,
            "Order checked out"
        );
        Ok(())
    }

    /// Resets the session from any phase and frees its table. Returns the
    /// table that was released, if any.
    pub fn start_new_order(&mut self, tables: &mut TableAllocator) -> Option<TableId> {
        let released = self.state.table.take();
        if let Some(table) = released {
            tables.release(table);
        }
        self.state.ledger.reset();
        self.state.seating = None;
        self.state.selection = MenuPath::default();
        self.state.last_bill = None;
        self.state.phase = SessionPhase::NotStarted;

        info!(released = ?released.map(|t| t.number()), "Started new order");
        released
    }

    // -------------------------------------------------------------------------
    // Views
    // -------------------------------------------------------------------------

    pub fn phase(&self) -> SessionPhase {
        match self.state.phase {
            SessionPhase::Browsing if !self.state.ledger.is_empty() => {
                SessionPhase::ReadyToCheckout
            }
            phase => phase,
        }
    }

    pub fn seating(&self) -> Option<SeatingChoice> {
        self.state.seating
    }

    pub fn table(&self) -> Option<TableId> {
        self.state.table
    }

    pub fn selection(&self) -> &MenuPath {
        &self.state.selection
    }

    pub fn lines(&self) -> &[OrderLine] {
        self.state.ledger.lines()
    }

    pub fn running_total(&self) -> Money {
        self.state.ledger.current_total()
    }

    pub fn item_count(&self) -> i64 {
        self.state.ledger.item_count()
    }

    /// The bill from the last checkout, kept until the next order starts.
    pub fn last_bill(&self) -> Option<&BillSummary> {
        self.state.last_bill.as_ref()
    }

    pub fn snapshot(&self) -> SessionView {
        SessionView {
            phase: self.phase(),
            seating: self.state.seating,
            table: self.state.table,
            selection: self.state.selection.clone(),
            lines: self.lines().to_vec(),
            running_total: self.running_total(),
            item_count: self.item_count(),
        }
    }

    fn require_checkout(&self) -> CoreResult<()> {
        self.require(
            &[
                SessionPhase::SeatingChosen,
                SessionPhase::Browsing,
                SessionPhase::ReadyToCheckout,
            ],
            "check out",
        )?;
        if self.state.ledger.is_empty() {
            return Err(CoreError::EmptyOrder);
        }
        Ok(())
    }

    fn require(&self, allowed: &[SessionPhase], action: &str) -> CoreResult<()> {
        let phase = self.phase();
        if allowed.contains(&phase) {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                phase: phase.to_string(),
                action: action.to_string(),
            })
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
