//! # Seating Commands
//!
//! `seat takeaway` / `seat dine-in`, the first thing a diner does.

use std::fmt;

use bistro_core::{OrderSession, SeatingChoice, SeatingOutcome};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::TableState;

/// Reply to a seating command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatingResponse {
    pub choice: SeatingChoice,
    pub outcome: SeatingOutcome,
    pub tables_free: usize,
}

impl fmt::Display for SeatingResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            SeatingOutcome::Takeaway => write!(f, "Takeaway order started."),
            SeatingOutcome::Seated { table } => {
                write!(f, "Welcome! You have been assigned Table {}.", table)
            }
            SeatingOutcome::FullyBooked { .. } => write!(
                f,
                "Sorry, all tables are currently occupied. You can still order; the bill will say Takeaway."
            ),
        }
    }
}

/// Confirms Takeaway or Dine-in for the current session.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  > seat dine-in                                                         │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  1. Lock the shared table book                                 │    │
/// │  │  2. Session picks a random free table (or reports full house)  │    │
/// │  │  3. Unlock, reply with the table number                        │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  Welcome! You have been assigned Table 7.                               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn confirm_seating(
    session: &mut OrderSession,
    tables: &TableState,
    choice: SeatingChoice,
) -> Result<SeatingResponse, ApiError> {
    debug!(%choice, "confirm_seating command");

    let (outcome, tables_free) = tables.with_tables_mut(|t| {
        let outcome = session.confirm_seating(choice, t)?;
        Ok::<_, ApiError>((outcome, t.available_count()))
    })?;

    Ok(SeatingResponse {
        choice,
        outcome,
        tables_free,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bistro_core::MenuCatalog;
    use std::sync::Arc;

    use crate::error::ErrorCode;

    fn session() -> OrderSession {
        OrderSession::new(Arc::new(
            MenuCatalog::from_json_str(r#"{"Indian Breads": {"Naan": 40}}"#).unwrap(),
        ))
    }

    #[test]
    fn test_dine_in_takes_a_table() {
        let tables = TableState::new(2);
        let mut session = session();

        let response = confirm_seating(&mut session, &tables, SeatingChoice::DineIn).unwrap();
        let SeatingOutcome::Seated { table } = response.outcome else {
            panic!("expected a table, got {:?}", response.outcome);
        };
        assert_eq!(response.tables_free, 1);
        assert_eq!(
            response.to_string(),
            format!("Welcome! You have been assigned Table {}.", table)
        );
    }

    #[test]
    fn test_full_house_is_not_an_error() {
        let tables = TableState::new(1);
        let mut first = session();
        let mut second = session();

        confirm_seating(&mut first, &tables, SeatingChoice::DineIn).unwrap();
        let response = confirm_seating(&mut second, &tables, SeatingChoice::DineIn).unwrap();

        assert_eq!(response.outcome, SeatingOutcome::FullyBooked { capacity: 1 });
        assert!(response.to_string().starts_with("Sorry, all tables"));
    }

    #[test]
    fn test_second_seating_rejected() {
        let tables = TableState::new(3);
        let mut session = session();

        confirm_seating(&mut session, &tables, SeatingChoice::Takeaway).unwrap();
        let err = confirm_seating(&mut session, &tables, SeatingChoice::DineIn).unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidState);
        assert_eq!(tables.with_tables(|t| t.occupied_count()), 0);
    }
}
