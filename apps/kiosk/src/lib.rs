//! # Bistro Kiosk Library
//!
//! Terminal front-end for the bistro ordering flow. All ordering rules live
//! in `bistro-core`; this crate reads configuration and the menu file, owns
//! the shared table book and turns typed commands into replies.
//!
//! ## Module Organization
//! ```text
//! bistro_kiosk/
//! ├── lib.rs          ◄─── You are here (startup & line loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── BISTRO_* configuration
//! │   └── tables.rs   ◄─── Shared table book
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command parsing & dispatch
//! │   ├── seating.rs  ◄─── Takeaway / Dine-in
//! │   ├── menu.rs     ◄─── Browse and select menu paths
//! │   └── order.rs    ◄─── Add, bill, checkout, new order
//! ├── receipt.rs      ◄─── ESC/POS QR payment code
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod receipt;
pub mod state;

use std::fs;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use bistro_core::MenuCatalog;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use commands::{Kiosk, Reply};
use error::{ApiError, ErrorCode};
use state::{ConfigState, TableState};

/// Runs the kiosk on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Kiosk Startup                                     │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,bistro=debug, override with RUST_LOG                │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • BISTRO_* environment variables over defaults                      │
/// │                                                                         │
/// │  3. Load Menu ────────────────────────────────────────────────────────► │
/// │     • Read BISTRO_MENU_PATH once; bad entries skipped with a warning    │
/// │                                                                         │
/// │  4. Initialize State ─────────────────────────────────────────────────► │
/// │     • TableState: all tables free                                       │
/// │     • Kiosk: fresh order session                                        │
/// │                                                                         │
/// │  5. Serve ────────────────────────────────────────────────────────────► │
/// │     • One command per line until 'quit' or end of input                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Bistro kiosk");

    let config = ConfigState::from_env()?;
    info!(menu = %config.menu_path.display(), tables = config.table_count, "Configuration loaded");

    let catalog = load_catalog(&config)?;
    let tables = TableState::new(config.table_count);
    let mut kiosk = Kiosk::new(config, tables, Arc::new(catalog));

    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(&mut kiosk, stdin.lock(), stdout.lock())?;

    info!("Kiosk stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bistro_core=trace` - Show trace for the core only
/// - Default: INFO, DEBUG for bistro crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bistro=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Reads and parses the configured menu file.
pub fn load_catalog(config: &ConfigState) -> Result<MenuCatalog, ApiError> {
    let path = &config.menu_path;
    let json = fs::read_to_string(path).map_err(|e| {
        ApiError::new(
            ErrorCode::CatalogError,
            format!("Cannot read menu file {}: {}", path.display(), e),
        )
    })?;

    let catalog = MenuCatalog::from_json_str_with(&json, config.direct_priced_categories.as_slice())?;
    if catalog.skipped_entries() > 0 {
        warn!(skipped = catalog.skipped_entries(), "Some menu entries could not be priced");
    }
    info!(categories = catalog.len(), "Menu loaded");
    Ok(catalog)
}

/// Runs the prompt loop until `quit` or end of input.
///
/// Command errors are printed and the loop continues; only I/O failures end it.
pub fn serve<R, W>(kiosk: &mut Kiosk, input: R, mut output: W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", kiosk.greeting())?;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        match kiosk.handle_line(&line) {
            Ok(Some(Reply::Text(text))) => writeln!(output, "{}", text)?,
            Ok(Some(Reply::Quit)) => {
                writeln!(output, "Goodbye!")?;
                return Ok(());
            }
            Ok(None) => {}
            Err(err) => {
                debug!(code = ?err.code, message = %err.message, "Command rejected");
                writeln!(output, "{}", err)?;
            }
        }
        write!(output, "> ")?;
        output.flush()?;
    }

    writeln!(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::Path;

    const MENU: &str = r#"{
        "Indian Breads": {"Naan": 40, "Butter Naan": 50},
        "Mains": {"Curry": {"Chicken Biryani": {"Half": 150, "Full": 280}}}
    }"#;

    fn config_in(dir: &Path) -> ConfigState {
        ConfigState {
            menu_path: dir.join("menu.json"),
            receipt_dir: dir.join("receipts"),
            ..ConfigState::default()
        }
    }

    #[test]
    fn test_load_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.menu_path, MENU).unwrap();

        let catalog = load_catalog(&config).unwrap();
        assert_eq!(catalog.category_names(), vec!["Indian Breads", "Mains"]);
    }

    #[test]
    fn test_bundled_menu() {
        let catalog = MenuCatalog::from_json_str(include_str!("../menu.json")).unwrap();
        assert_eq!(catalog.skipped_entries(), 0);
        assert!(catalog.category("Indian Breads").unwrap().is_direct_priced());
        assert!(!catalog.category("Main Course").unwrap().is_direct_priced());
    }

    #[test]
    fn test_load_catalog_errors() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let err = load_catalog(&config).unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogError);
        assert!(err.message.starts_with("Cannot read menu file"));

        fs::write(&config.menu_path, "[1, 2, 3]").unwrap();
        assert_eq!(load_catalog(&config).unwrap_err().code, ErrorCode::CatalogError);
    }

    #[test]
    fn test_serve_session() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let catalog = Arc::new(MenuCatalog::from_json_str(MENU).unwrap());
        let mut kiosk = Kiosk::new(config, TableState::new(15), catalog);

        let input = "seat takeaway\n\
                     select Mains / Curry / Chicken Biryani\n\
                     add\n\
                     select Mains / Curry / Chicken Biryani / Half\n\
                     add 2\n\
                     checkout\n\
                     quit\n\
                     bill\n";
        let mut output = Vec::new();
        serve(&mut kiosk, Cursor::new(input), &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.starts_with("Welcome to Smart Restaurant!"));
        assert!(output.contains("Takeaway order started."));
        assert!(output.contains("Please select a size.\nSizes: Half, Full"));
        assert!(output.contains("[SELECTION_INCOMPLETE] Please complete all selections: select a size"));
        assert!(output.contains("Added 2 x Chicken Biryani (Half) to your order!"));
        assert!(output.contains("Restaurant Bill\n  Table: Takeaway\n  Total: ₹300\n  Items: 2"));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_serve_end_of_input() {
        let catalog = Arc::new(MenuCatalog::from_json_str(MENU).unwrap());
        let mut kiosk = Kiosk::new(ConfigState::default(), TableState::new(15), catalog);

        let mut output = Vec::new();
        serve(&mut kiosk, Cursor::new("menu\n"), &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("Categories: Indian Breads, Mains"));
        assert!(output.ends_with("> \n"));
    }
}
