//! # Menu Commands
//!
//! Browsing (`menu`) and choosing (`select`) along a menu path.
//!
//! ```text
//! > menu                          Categories: Indian Breads, Mains
//! > menu Mains / Curry            Dishes: Chicken Biryani, Dal Makhani
//! > select Mains / Curry / Chicken Biryani
//!                                 Sizes: Half, Full
//! > select Mains / Curry / Chicken Biryani / Full
//!                                 Chicken Biryani (Full): ₹280 each
//! ```

use std::fmt;

use bistro_core::navigator::{MenuOptions, MenuPath, Resolution};
use bistro_core::{MenuLevel, OrderSession};
use serde::Serialize;
use tracing::debug;

/// Reply to `menu`: the choices at the next level of a path.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub path: MenuPath,
    pub options: Option<MenuOptions>,
}

/// Reply to `select`: the new selection and what it resolves to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    pub path: MenuPath,
    pub resolution: Resolution,
    pub options: Option<MenuOptions>,
}

fn level_heading(level: MenuLevel) -> &'static str {
    match level {
        MenuLevel::Category => "Categories",
        MenuLevel::SubCategory => "Sub-categories",
        MenuLevel::Dish => "Dishes",
        MenuLevel::Item => "Items",
        MenuLevel::Size => "Sizes",
    }
}

fn write_options(f: &mut fmt::Formatter<'_>, options: &MenuOptions) -> fmt::Result {
    if options.choices.is_empty() {
        write!(f, "No {} available", level_heading(options.level).to_lowercase())
    } else {
        write!(f, "{}: {}", level_heading(options.level), options.choices.join(", "))
    }
}

impl fmt::Display for MenuResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.options {
            Some(options) => write_options(f, options),
            None => write!(f, "Nothing more to choose. Use 'select' then 'add'."),
        }
    }
}

impl fmt::Display for SelectionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.resolution, &self.options) {
            (Resolution::Ready(quote), _) => {
                let label = if bistro_core::is_sentinel_size(&quote.size) {
                    quote.item.clone()
                } else {
                    format!("{} ({})", quote.item, quote.size)
                };
                write!(f, "{}: {} each. Use 'add [qty]' to order.", label, quote.unit_price)
            }
            (Resolution::Incomplete { missing }, Some(options)) => {
                writeln!(f, "Please select a {}.", missing)?;
                write_options(f, options)
            }
            (Resolution::Incomplete { missing }, None) => {
                write!(f, "Please select a {}.", missing)
            }
        }
    }
}

/// Splits `a / b / c` into trimmed segments.
pub fn split_path(text: &str) -> Vec<String> {
    text.split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lists choices below `segments` without touching the selection.
pub fn browse_menu(session: &OrderSession, segments: &[String]) -> MenuResponse {
    debug!(?segments, "browse_menu command");

    let catalog = session.catalog();
    let path = catalog.path_from_segments(segments);
    let options = catalog.options(&path);
    MenuResponse { path, options }
}

/// Replaces the session's selection with `segments`.
pub fn select_menu_path(session: &mut OrderSession, segments: &[String]) -> SelectionResponse {
    debug!(?segments, "select_menu_path command");

    let path = session.catalog().path_from_segments(segments);
    let resolution = session.select_menu_path(path.clone());
    let options = session.options();
    SelectionResponse {
        path,
        resolution,
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bistro_core::MenuCatalog;
    use std::sync::Arc;

    const MENU: &str = r#"{
        "Indian Breads": {"Naan": 40, "Butter Naan": 50},
        "Mains": {
            "Curry": {
                "Chicken Biryani": {"Half": 150, "Full": 280},
                "Dal Makhani": 190
            }
        }
    }"#;

    fn session() -> OrderSession {
        OrderSession::new(Arc::new(MenuCatalog::from_json_str(MENU).unwrap()))
    }

    #[test]
    fn test_split_path() {
        assert_eq!(split_path(" Mains /Curry/ "), vec!["Mains", "Curry"]);
        assert!(split_path("").is_empty());
    }

    #[test]
    fn test_browse_levels() {
        let session = session();
        assert_eq!(
            browse_menu(&session, &[]).to_string(),
            "Categories: Indian Breads, Mains"
        );
        assert_eq!(
            browse_menu(&session, &split_path("Mains / Curry")).to_string(),
            "Dishes: Chicken Biryani, Dal Makhani"
        );
        assert_eq!(
            browse_menu(&session, &split_path("Indian Breads")).to_string(),
            "Items: Naan, Butter Naan"
        );
    }

    #[test]
    fn test_browse_leaves_selection_alone() {
        let mut session = session();
        select_menu_path(&mut session, &split_path("Indian Breads / Naan"));
        browse_menu(&session, &split_path("Mains"));
        assert_eq!(session.selection().item.as_deref(), Some("Naan"));
    }

    #[test]
    fn test_select_incomplete_lists_next_level() {
        let mut session = session();
        let response = select_menu_path(&mut session, &split_path("Mains / Curry / Chicken Biryani"));
        assert!(!response.resolution.is_ready());
        assert_eq!(response.to_string(), "Please select a size.\nSizes: Half, Full");
    }

    #[test]
    fn test_select_ready() {
        let mut session = session();
        let response = select_menu_path(&mut session, &split_path("Mains / Curry / Chicken Biryani / Full"));
        assert_eq!(
            response.to_string(),
            "Chicken Biryani (Full): ₹280 each. Use 'add [qty]' to order."
        );

        let response = select_menu_path(&mut session, &split_path("Indian Breads / Naan"));
        assert_eq!(response.to_string(), "Naan: ₹40 each. Use 'add [qty]' to order.");
    }
}
