//! # Kiosk Commands
//!
//! Everything the diner can type, and the dispatcher that routes it.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (parsing + dispatch)
//! ├── seating.rs  ◄─── seat takeaway | seat dine-in
//! ├── menu.rs     ◄─── menu [path], select <path>
//! └── order.rs    ◄─── add [qty], bill, checkout, new
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin: "select Mains / Curry / Chicken Biryani / Full"                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Command::parse ──► Command::Select(["Mains", "Curry", ...])            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Kiosk::execute ──► menu::select_menu_path(&mut session, &segments)     │
//! │         │               (each handler takes only the state it needs)    │
//! │         ▼                                                               │
//! │  Reply::Text(response.to_string())  or  ApiError                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod menu;
pub mod order;
pub mod seating;

use std::sync::Arc;

use bistro_core::{MenuCatalog, OrderSession, SeatingChoice};

use crate::error::ApiError;
use crate::receipt::EscPosQrEncoder;
use crate::state::{ConfigState, TableState};

pub const HELP: &str = "\
Commands:
  seat takeaway | seat dine-in    start the order
  menu [category / ...]           list choices at a level
  select <category / ... / size>  choose what to order
  add [qty]                       add the selection (default 1)
  bill                            show the current order
  checkout                        finish and get the payment code
  tables                          free table count
  new                             start a new order
  help                            this list
  quit                            leave";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Seat(SeatingChoice),
    Menu(Vec<String>),
    Select(Vec<String>),
    Add(i64),
    Bill,
    Checkout,
    Tables,
    NewOrder,
    Help,
    Quit,
}

impl Command {
    /// Parses one line. Blank lines give `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, ApiError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "seat" => Command::Seat(rest.parse::<SeatingChoice>()?),
            "menu" => Command::Menu(menu::split_path(rest)),
            "select" => Command::Select(menu::split_path(rest)),
            "add" => Command::Add(parse_quantity(rest)?),
            "bill" => Command::Bill,
            "checkout" => Command::Checkout,
            "tables" => Command::Tables,
            "new" => Command::NewOrder,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(ApiError::unknown_command(verb)),
        };
        Ok(Some(command))
    }
}

fn parse_quantity(text: &str) -> Result<i64, ApiError> {
    if text.is_empty() {
        return Ok(1);
    }
    text.parse::<i64>()
        .map_err(|_| ApiError::validation(format!("Quantity must be a whole number, got '{}'", text)))
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

/// One kiosk terminal: configuration, the shared table book, and the
/// session of the diner currently at the screen.
#[derive(Debug)]
pub struct Kiosk {
    config: ConfigState,
    tables: TableState,
    session: OrderSession,
    encoder: EscPosQrEncoder,
}

impl Kiosk {
    pub fn new(config: ConfigState, tables: TableState, catalog: Arc<MenuCatalog>) -> Self {
        let encoder = EscPosQrEncoder::new(config.qr_module_size);
        Kiosk {
            config,
            tables,
            session: OrderSession::new(catalog),
            encoder,
        }
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn session(&self) -> &OrderSession {
        &self.session
    }

    pub fn greeting(&self) -> String {
        format!(
            "Welcome to {}! Are you dining in or taking away? (seat takeaway | seat dine-in)",
            self.config.store_name
        )
    }

    /// Parses and runs one input line.
    pub fn handle_line(&mut self, line: &str) -> Result<Option<Reply>, ApiError> {
        match Command::parse(line)? {
            Some(command) => self.execute(command).map(Some),
            None => Ok(None),
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<Reply, ApiError> {
        let text = match command {
            Command::Seat(choice) => {
                seating::confirm_seating(&mut self.session, &self.tables, choice)?.to_string()
            }
            Command::Menu(segments) => menu::browse_menu(&self.session, &segments).to_string(),
            Command::Select(segments) => {
                menu::select_menu_path(&mut self.session, &segments).to_string()
            }
            Command::Add(quantity) => order::add_to_order(&mut self.session, quantity)?.to_string(),
            Command::Bill => order::get_order(&self.session).to_string(),
            Command::Checkout => {
                order::checkout(&mut self.session, &self.config, &self.encoder)?.to_string()
            }
            Command::Tables => {
                let (free, capacity) = self
                    .tables
                    .with_tables(|t| (t.available_count(), t.capacity()));
                format!("{} of {} tables free", free, capacity)
            }
            Command::NewOrder => {
                let response = order::start_new_order(&mut self.session, &self.tables);
                format!("{}\n{}", response, self.greeting())
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Text(text))
    }
}
