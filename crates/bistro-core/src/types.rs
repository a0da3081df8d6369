//! # Domain Types
//!
//! Value types shared across the ordering flow.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ SeatingChoice   │   │    TableId      │   │   MenuLevel     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Takeaway       │   │  1..=15 (u8)    │   │  Category       │       │
//! │  │  DineIn         │   │                 │   │  SubCategory    │       │
//! │  └─────────────────┘   └─────────────────┘   │  Dish / Item    │       │
//! │                                              │  Size           │       │
//! │  ┌─────────────────┐   ┌─────────────────┐   └─────────────────┘       │
//! │  │   PriceQuote    │──►│   OrderLine     │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  item, size     │   │  item, size     │                             │
//! │  │  unit_price     │   │  quantity       │                             │
//! │  └─────────────────┘   │  line_total     │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Seating
// =============================================================================

/// How the diner is eating, chosen once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SeatingChoice {
    /// Order is packed to go; no table needed.
    Takeaway,
    /// Diner eats in and gets a table if one is free.
    DineIn,
}

impl fmt::Display for SeatingChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeatingChoice::Takeaway => f.write_str("Takeaway"),
            SeatingChoice::DineIn => f.write_str("Dine-in"),
        }
    }
}

impl FromStr for SeatingChoice {
    type Err = ValidationError;

    /// Accepts the labels a diner is likely to type: `takeaway`, `take-away`,
    /// `dine-in`, `dinein`, `dine in` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        match normalized.as_str() {
            "takeaway" => Ok(SeatingChoice::Takeaway),
            "dinein" => Ok(SeatingChoice::DineIn),
            _ => Err(ValidationError::NotAllowed {
                field: "seating".to_string(),
                allowed: vec!["Takeaway".to_string(), "Dine-in".to_string()],
            }),
        }
    }
}

// =============================================================================
// Table Id
// =============================================================================

/// A dine-in table number.
///
/// Range checks live in the [`TableAllocator`](crate::tables::TableAllocator),
/// which is the only thing that hands these out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TableId(u8);

impl TableId {
    #[inline]
    pub const fn from_number(number: u8) -> Self {
        TableId(number)
    }

    #[inline]
    pub const fn number(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Menu Level
// =============================================================================

/// One level of a menu path, used to say which selection is still missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MenuLevel {
    Category,
    SubCategory,
    /// A dish inside a nested category ("Chicken Biryani").
    Dish,
    /// An item inside a direct-priced category ("Naan").
    Item,
    Size,
}

impl fmt::Display for MenuLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuLevel::Category => "category",
            MenuLevel::SubCategory => "sub-category",
            MenuLevel::Dish => "dish",
            MenuLevel::Item => "item",
            MenuLevel::Size => "size",
        };
        f.write_str(label)
    }
}

// =============================================================================
// Price Quote
// =============================================================================

/// A fully resolved menu selection, ready to take a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// Category the selection came from.
    pub category: String,
    /// Name that goes on the bill (the item or dish name).
    pub item: String,
    /// Chosen size, or a sentinel label for sizeless entries.
    pub size: String,
    /// Price of one unit.
    pub unit_price: Money,
}

// =============================================================================
// Order Line
// =============================================================================

/// One confirmed addition to the order.
///
/// Created by the [`OrderLedger`](crate::ledger::OrderLedger); the ledger only
/// hands out shared references, so a line never changes after it is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub item: String,
    /// Size label, `"Standard"` when the line was added without one.
    pub size: String,
    pub quantity: i64,
    pub unit_price: Money,
    /// `unit_price × quantity`, fixed at creation.
    pub line_total: Money,
}

impl OrderLine {
    /// The size to print next to the item, `None` for sentinel sizes.
    pub fn display_size(&self) -> Option<&str> {
        if crate::is_sentinel_size(&self.size) {
            None
        } else {
            Some(&self.size)
        }
    }

    /// Item name with the size in parentheses when it is a real size.
    pub fn label(&self) -> String {
        match self.display_size() {
            Some(size) => format!("{} ({})", self.item, size),
            None => self.item.clone(),
        }
    }
}

/// Bill line format: `Chicken Biryani (Full) - ₹280 each × 2 = ₹560`.
impl fmt::Display for OrderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} each × {} = {}",
            self.label(),
            self.unit_price,
            self.quantity,
            self.line_total
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(size: &str) -> OrderLine {
        OrderLine {
            item: "Chicken Biryani".to_string(),
            size: size.to_string(),
            quantity: 2,
            unit_price: Money::from_major(280),
            line_total: Money::from_major(560),
        }
    }

    #[test]
    fn test_seating_choice_parsing() {
        assert_eq!("takeaway".parse::<SeatingChoice>().unwrap(), SeatingChoice::Takeaway);
        assert_eq!("Take-Away".parse::<SeatingChoice>().unwrap(), SeatingChoice::Takeaway);
        assert_eq!("dine-in".parse::<SeatingChoice>().unwrap(), SeatingChoice::DineIn);
        assert_eq!(" Dine In ".parse::<SeatingChoice>().unwrap(), SeatingChoice::DineIn);
        assert!("delivery".parse::<SeatingChoice>().is_err());
    }

    #[test]
    fn test_table_id_display() {
        assert_eq!(TableId::from_number(7).to_string(), "7");
        assert_eq!(TableId::from_number(7).number(), 7);
    }

    #[test]
    fn test_order_line_display_hides_sentinel_sizes() {
        assert_eq!(
            line("Full").to_string(),
            "Chicken Biryani (Full) - ₹280 each × 2 = ₹560"
        );
        assert_eq!(line("Piece").label(), "Chicken Biryani");
        assert_eq!(line("Single Serving").display_size(), None);
        assert_eq!(line("Standard").display_size(), None);
        assert_eq!(line("Half").display_size(), Some("Half"));
    }

    #[test]
    fn test_menu_level_display() {
        assert_eq!(MenuLevel::SubCategory.to_string(), "sub-category");
        assert_eq!(MenuLevel::Size.to_string(), "size");
    }
}
