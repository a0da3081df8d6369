//! # State Module
//!
//! Kiosk state, split by concern like the command handlers that use it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐   │
//! │  │   ConfigState    │  │   TableState     │  │   OrderSession       │   │
//! │  │                  │  │                  │  │   (bistro-core)      │   │
//! │  │  store_name      │  │  Arc<Mutex<      │  │                      │   │
//! │  │  menu_path       │  │   TableAllocator │  │  seating, selection, │   │
//! │  │  table_count     │  │  >>              │  │  ledger              │   │
//! │  │  receipt_dir     │  │                  │  │                      │   │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                         │
//! │  • ConfigState: Read-only after initialization                          │
//! │  • TableState: Shared across sessions, Mutex for exclusive access       │
//! │  • OrderSession: Owned by one diner's loop, no sharing                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod tables;

pub use config::ConfigState;
pub use tables::TableState;
