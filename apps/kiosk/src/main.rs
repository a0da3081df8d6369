//! # Bistro Kiosk Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bistro Kiosk                                     │
//! │                                                                         │
//! │  stdin ──► commands/ ──► bistro-core (session, ledger, tables) ──┐      │
//! │                                                                  │      │
//! │  stdout ◄── replies, bills ◄─────────────────────────────────────┘      │
//! │                                                                         │
//! │  receipts/<order ref>.escpos ◄── checkout                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The actual setup is in lib.rs for better testability.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    bistro_kiosk::run()
}
