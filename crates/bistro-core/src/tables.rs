//! # Table Allocator
//!
//! Tracks which dine-in tables are occupied.
//!
//! ## Lifecycle of a Table
//! ```text
//!   free ──allocate()──► occupied ──release()──► free
//!    ▲                                            │
//!    └────────────────────────────────────────────┘
//!
//!   allocate() on a full house ─► NoTablesAvailable (nothing changes)
//!   release() on a free table  ─► no-op
//! ```
//!
//! This is the one piece of state that would have to be shared between
//! sessions, so the session controller borrows it per call instead of
//! owning it.

use std::collections::BTreeSet;

use rand::seq::IteratorRandom;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::types::TableId;
use crate::DEFAULT_TABLE_COUNT;

/// The occupied-table book.
///
/// ## Invariants
/// - Every occupied id lies in `1..=capacity`
/// - `allocate()` never returns an occupied id
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableAllocator {
    capacity: u8,
    occupied: BTreeSet<TableId>,
}

impl TableAllocator {
    /// Creates a book for tables `1..=capacity`, all free.
    pub fn new(capacity: u8) -> Self {
        TableAllocator {
            capacity,
            occupied: BTreeSet::new(),
        }
    }

    /// Picks a free table uniformly at random and marks it occupied.
    pub fn allocate(&mut self) -> CoreResult<TableId> {
        self.allocate_with(&mut rand::thread_rng())
    }

    /// Same as [`allocate`](Self::allocate) with a caller-supplied RNG.
    ///
    /// ```rust
    /// use bistro_core::TableAllocator;
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut tables = TableAllocator::new(2);
    /// let mut rng = StdRng::seed_from_u64(7);
    ///
    /// let a = tables.allocate_with(&mut rng).unwrap();
    /// let b = tables.allocate_with(&mut rng).unwrap();
    /// assert_ne!(a, b);
    /// assert!(tables.allocate_with(&mut rng).is_err());
    /// ```
    pub fn allocate_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> CoreResult<TableId> {
        let table = self
            .available()
            .choose(rng)
            .ok_or(CoreError::NoTablesAvailable {
                capacity: self.capacity,
            })?;

        self.occupied.insert(table);
        debug!(table = %table, occupied = self.occupied.len(), "Table allocated");
        Ok(table)
    }

    /// Frees a table. Releasing a free or out-of-range table does nothing.
    pub fn release(&mut self, table: TableId) {
        if self.occupied.remove(&table) {
            debug!(table = %table, occupied = self.occupied.len(), "Table released");
        }
    }

    /// Free tables in ascending order.
    pub fn available(&self) -> impl Iterator<Item = TableId> + '_ {
        (1..=self.capacity)
            .map(TableId::from_number)
            .filter(|t| !self.occupied.contains(t))
    }

    pub fn is_occupied(&self, table: TableId) -> bool {
        self.occupied.contains(&table)
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.len()
    }

    pub fn available_count(&self) -> usize {
        self.capacity as usize - self.occupied.len()
    }

    pub fn capacity(&self) -> u8 {
        self.capacity
    }
}

impl Default for TableAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_COUNT)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_fifteen_distinct_tables_then_none() {
        let mut tables = TableAllocator::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();

        for _ in 0..15 {
            let table = tables.allocate_with(&mut rng).unwrap();
            assert!((1..=15).contains(&table.number()));
            assert!(seen.insert(table), "table {table} handed out twice");
        }

        assert_eq!(tables.available_count(), 0);
        let err = tables.allocate_with(&mut rng).unwrap_err();
        assert!(matches!(err, CoreError::NoTablesAvailable { capacity: 15 }));
        assert_eq!(tables.occupied_count(), 15);
    }

    #[test]
    fn test_released_table_can_be_handed_out_again() {
        let mut tables = TableAllocator::default();
        for _ in 0..15 {
            tables.allocate().unwrap();
        }

        let seven = TableId::from_number(7);
        tables.release(seven);
        assert!(!tables.is_occupied(seven));

        // Only one table is free, so it must be the one just released.
        assert_eq!(tables.allocate().unwrap(), seven);
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut tables = TableAllocator::default();
        let table = tables.allocate().unwrap();

        tables.release(table);
        tables.release(table);
        tables.release(TableId::from_number(200));

        assert_eq!(tables.occupied_count(), 0);
        assert_eq!(tables.available_count(), 15);
    }

    #[test]
    fn test_allocation_never_returns_occupied() {
        let mut tables = TableAllocator::new(5);
        let mut rng = StdRng::seed_from_u64(1);
        let first = tables.allocate_with(&mut rng).unwrap();
        let second = tables.allocate_with(&mut rng).unwrap();
        tables.release(first);

        for _ in 0..4 {
            let table = tables.allocate_with(&mut rng).unwrap();
            assert_ne!(table, second);
        }
        assert!(tables.allocate_with(&mut rng).is_err());
    }

    #[test]
    fn test_available_lists_free_tables_in_order() {
        let mut tables = TableAllocator::new(3);
        let mut rng = StdRng::seed_from_u64(3);
        let taken = tables.allocate_with(&mut rng).unwrap();

        let free: Vec<TableId> = tables.available().collect();
        assert_eq!(free.len(), 2);
        assert!(!free.contains(&taken));
        assert!(free.windows(2).all(|w| w[0] < w[1]));
    }
}
