//! # Table State
//!
//! The restaurant's table book, shared by every session the kiosk runs.
//!
//! ## Thread Safety
//! The book is wrapped in `Arc<Mutex<T>>`: two diners confirming dine-in at
//! the same moment must never be handed the same table.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  seat dine-in ────► with_tables_mut(|t| session.confirm_seating(.., t)) │
//! │  new          ────► with_tables_mut(|t| session.start_new_order(t))     │
//! │  tables       ────► with_tables(|t| t.available_count())                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use bistro_core::TableAllocator;
use tracing::warn;

/// Shared handle to the table book. Clones point at the same book.
#[derive(Debug, Clone)]
pub struct TableState {
    tables: Arc<Mutex<TableAllocator>>,
}

impl TableState {
    /// Creates a book of `capacity` free tables.
    pub fn new(capacity: u8) -> Self {
        TableState {
            tables: Arc::new(Mutex::new(TableAllocator::new(capacity))),
        }
    }

    /// Executes a function with read access to the table book.
    pub fn with_tables<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&TableAllocator) -> R,
    {
        let tables = self.lock();
        f(&tables)
    }

    /// Executes a function with write access to the table book.
    ///
    /// ## Usage
    /// ```rust
    /// use bistro_kiosk::state::TableState;
    ///
    /// let tables = TableState::new(2);
    /// let table = tables.with_tables_mut(|t| t.allocate()).unwrap();
    /// assert!(tables.with_tables(|t| t.is_occupied(table)));
    /// ```
    pub fn with_tables_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut TableAllocator) -> R,
    {
        let mut tables = self.lock();
        f(&mut tables)
    }

    // Allocator updates are single inserts/removes, so a poisoned book is
    // still consistent.
    fn lock(&self) -> MutexGuard<'_, TableAllocator> {
        self.tables.lock().unwrap_or_else(|poisoned| {
            warn!("Table book mutex was poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(bistro_core::DEFAULT_TABLE_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_clones_share_the_book() {
        let a = TableState::new(3);
        let b = a.clone();

        let table = a.with_tables_mut(|t| t.allocate()).unwrap();
        assert!(b.with_tables(|t| t.is_occupied(table)));
        assert_eq!(b.with_tables(|t| t.available_count()), 2);
    }

    #[test]
    fn test_concurrent_allocation_is_distinct() {
        let state = TableState::new(15);

        let handles: Vec<_> = (0..15)
            .map(|_| {
                let state = state.clone();
                thread::spawn(move || state.with_tables_mut(|t| t.allocate()).unwrap())
            })
            .collect();

        let tables: HashSet<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(tables.len(), 15);
        assert!(state.with_tables_mut(|t| t.allocate()).is_err());
    }
}
