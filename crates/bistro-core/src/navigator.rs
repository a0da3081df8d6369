//! # Menu Navigator
//!
//! Turns the diner's selections into a price, or says which selection is
//! still missing.
//!
//! ## Resolution Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DirectPriced category                                                  │
//! │    category ─► item ─────────────────────────► Ready (size "Piece")     │
//! │                  └─ item has sizes (fallback) ─► size ─► Ready          │
//! │                                                                         │
//! │  Nested category                                                        │
//! │    category ─► sub-category ─► dish ─► size ─► Ready                    │
//! │                                  └─ bare price ─► Ready                 │
//! │                                                   (size "Single Serving")│
//! │                                                                         │
//! │  Any missing or unknown step ─► Incomplete { missing: <that level> }    │
//! │  Unknown size ─► Ready with unit price 0 (logged)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::catalog::{Entries, MenuCatalog, MenuCategory, PriceEntry};
use crate::money::Money;
use crate::types::{MenuLevel, PriceQuote};
use crate::{PIECE_SIZE, SINGLE_SERVING_SIZE};

// =============================================================================
// Menu Path
// =============================================================================

/// The diner's current selections. Blank strings count as "not selected".
///
/// `item` holds the item of a direct-priced category or the dish of a nested
/// one; `sub_category` is ignored for direct-priced categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuPath {
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub item: Option<String>,
    pub size: Option<String>,
}

impl MenuPath {
    /// Starts a path at a category.
    pub fn category(name: impl Into<String>) -> Self {
        MenuPath {
            category: Some(name.into()),
            ..MenuPath::default()
        }
    }

    pub fn with_sub_category(mut self, name: impl Into<String>) -> Self {
        self.sub_category = Some(name.into());
        self
    }

    /// Sets the item (direct-priced) or dish (nested).
    pub fn with_item(mut self, name: impl Into<String>) -> Self {
        self.item = Some(name.into());
        self
    }

    pub fn with_size(mut self, name: impl Into<String>) -> Self {
        self.size = Some(name.into());
        self
    }

    /// True when nothing has been selected yet.
    pub fn is_empty(&self) -> bool {
        chosen(&self.category).is_none()
    }
}

fn chosen(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// =============================================================================
// Resolution
// =============================================================================

/// Outcome of resolving a [`MenuPath`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    /// Every needed selection is made; a quantity can be entered.
    Ready(PriceQuote),
    /// The path stops short at `missing`.
    Incomplete { missing: MenuLevel },
}

impl Resolution {
    pub fn is_ready(&self) -> bool {
        matches!(self, Resolution::Ready(_))
    }
}

/// Choices for the next unresolved level of a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuOptions {
    pub level: MenuLevel,
    pub choices: Vec<String>,
}

enum Step {
    Need(MenuLevel, Vec<String>),
    Done(PriceQuote),
}

fn need<'a>(level: MenuLevel, names: impl Iterator<Item = &'a str>) -> Step {
    Step::Need(level, names.map(str::to_string).collect())
}

// =============================================================================
// Navigation
// =============================================================================

impl MenuCatalog {
    /// Resolves a path to a price quote.
    pub fn resolve(&self, path: &MenuPath) -> Resolution {
        match self.walk(path) {
            Step::Done(quote) => Resolution::Ready(quote),
            Step::Need(missing, _) => Resolution::Incomplete { missing },
        }
    }

    /// Lists the choices for the first level the path has not resolved yet,
    /// or `None` once the path is complete.
    ///
    /// ```rust
    /// use bistro_core::catalog::MenuCatalog;
    /// use bistro_core::navigator::MenuPath;
    /// use bistro_core::MenuLevel;
    ///
    /// let catalog = MenuCatalog::from_json_str(
    ///     r#"{"Mains": {"Curry": {"Chicken Biryani": {"Half": 150, "Full": 280}}}}"#,
    /// ).unwrap();
    ///
    /// let path = MenuPath::category("Mains")
    ///     .with_sub_category("Curry")
    ///     .with_item("Chicken Biryani");
    /// let options = catalog.options(&path).unwrap();
    /// assert_eq!(options.level, MenuLevel::Size);
    /// assert_eq!(options.choices, vec!["Half", "Full"]);
    /// ```
    pub fn options(&self, path: &MenuPath) -> Option<MenuOptions> {
        match self.walk(path) {
            Step::Done(_) => None,
            Step::Need(level, choices) => Some(MenuOptions { level, choices }),
        }
    }

    /// Builds a path from plain segments, reading them according to the
    /// category's shape: `category / item [/ size]` for direct-priced,
    /// `category / sub-category / dish / size` for nested.
    pub fn path_from_segments<S: AsRef<str>>(&self, segments: &[S]) -> MenuPath {
        let segment = |i: usize| {
            segments
                .get(i)
                .map(|s| s.as_ref().trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let category = segment(0);
        let direct = category
            .as_deref()
            .and_then(|c| self.category(c))
            .is_some_and(MenuCategory::is_direct_priced);

        if direct {
            MenuPath {
                category,
                sub_category: None,
                item: segment(1),
                size: segment(2),
            }
        } else {
            MenuPath {
                category,
                sub_category: segment(1),
                item: segment(2),
                size: segment(3),
            }
        }
    }

    fn walk(&self, path: &MenuPath) -> Step {
        let Some((category_name, category)) =
            chosen(&path.category).and_then(|c| self.category(c).map(|body| (c, body)))
        else {
            return Step::Need(
                MenuLevel::Category,
                self.category_names().into_iter().map(str::to_string).collect(),
            );
        };

        match category {
            MenuCategory::DirectPriced(items) => {
                let Some((item, entry)) =
                    chosen(&path.item).and_then(|i| items.get(i).map(|e| (i, e)))
                else {
                    return need(MenuLevel::Item, items.names());
                };
                price_direct(category_name, item, entry, chosen(&path.size))
            }
            MenuCategory::Nested(subs) => {
                let Some(dishes) = chosen(&path.sub_category).and_then(|s| subs.get(s)) else {
                    return need(MenuLevel::SubCategory, subs.names());
                };
                let Some((dish, entry)) =
                    chosen(&path.item).and_then(|d| dishes.get(d).map(|e| (d, e)))
                else {
                    return need(MenuLevel::Dish, dishes.names());
                };
                price_nested(category_name, dish, entry, chosen(&path.size))
            }
        }
    }
}

fn quote(category: &str, item: &str, size: &str, unit_price: Money) -> Step {
    Step::Done(PriceQuote {
        category: category.to_string(),
        item: item.to_string(),
        size: size.to_string(),
        unit_price,
    })
}

fn price_direct(category: &str, item: &str, entry: &PriceEntry, size: Option<&str>) -> Step {
    match entry {
        PriceEntry::Flat(price) => quote(category, item, PIECE_SIZE, *price),
        PriceEntry::Sized(sizes) if sizes.len() == 1 => {
            let (only, price) = sizes.iter().next().map(|(n, p)| (n, *p)).unwrap_or_default();
            quote(category, item, only, price)
        }
        PriceEntry::Sized(sizes) => match size {
            Some(size) => quote(category, item, size, sized_price(item, sizes, size)),
            None => need(MenuLevel::Size, sizes.names()),
        },
    }
}

fn price_nested(category: &str, dish: &str, entry: &PriceEntry, size: Option<&str>) -> Step {
    match entry {
        PriceEntry::Flat(price) => quote(category, dish, SINGLE_SERVING_SIZE, *price),
        PriceEntry::Sized(sizes) => match size {
            Some(size) => quote(category, dish, size, sized_price(dish, sizes, size)),
            None => need(MenuLevel::Size, sizes.names()),
        },
    }
}

fn sized_price(item: &str, sizes: &Entries<Money>, size: &str) -> Money {
    sizes.get(size).copied().unwrap_or_else(|| {
        warn!(%item, %size, "Size not on the menu, pricing at zero");
        Money::zero()
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const MENU: &str = r#"{
        "Indian Breads": {
            "Naan": 40,
            "Kulcha": {"Plain": 45, "Stuffed": 70},
            "Roti": {"Tandoori": 25}
        },
        "Mains": {
            "Curry": {
                "Chicken Biryani": {"Half": 150, "Full": 280},
                "Dal Makhani": 190
            },
            "Tandoor": {
                "Chicken Tikka": {"Full": 320}
            }
        }
    }"#;

    fn catalog() -> MenuCatalog {
        MenuCatalog::from_json_str(MENU).unwrap()
    }

    fn ready(resolution: Resolution) -> PriceQuote {
        match resolution {
            Resolution::Ready(quote) => quote,
            other => panic!("expected a ready quote, got {other:?}"),
        }
    }

    #[test]
    fn test_direct_item_is_complete_with_piece_size() {
        let quote = ready(catalog().resolve(&MenuPath::category("Indian Breads").with_item("Naan")));
        assert_eq!(quote.item, "Naan");
        assert_eq!(quote.size, "Piece");
        assert_eq!(quote.unit_price, Money::from_major(40));
        assert_eq!(quote.category, "Indian Breads");
    }

    #[test]
    fn test_nested_needs_all_four_levels() {
        let catalog = catalog();
        let path = MenuPath::category("Mains");
        assert_eq!(
            catalog.resolve(&path),
            Resolution::Incomplete { missing: MenuLevel::SubCategory }
        );

        let path = path.with_sub_category("Curry");
        assert_eq!(
            catalog.resolve(&path),
            Resolution::Incomplete { missing: MenuLevel::Dish }
        );

        let path = path.with_item("Chicken Biryani");
        assert_eq!(
            catalog.resolve(&path),
            Resolution::Incomplete { missing: MenuLevel::Size }
        );

        let quote = ready(catalog.resolve(&path.with_size("Full")));
        assert_eq!(quote.item, "Chicken Biryani");
        assert_eq!(quote.size, "Full");
        assert_eq!(quote.unit_price, Money::from_major(280));
    }

    #[test]
    fn test_single_size_nested_dish_still_needs_a_size() {
        let path = MenuPath::category("Mains")
            .with_sub_category("Tandoor")
            .with_item("Chicken Tikka");
        assert!(!catalog().resolve(&path).is_ready());
    }

    #[test]
    fn test_empty_and_unknown_selections_are_incomplete() {
        let catalog = catalog();
        assert_eq!(
            catalog.resolve(&MenuPath::default()),
            Resolution::Incomplete { missing: MenuLevel::Category }
        );
        assert_eq!(
            catalog.resolve(&MenuPath::category("  ")),
            Resolution::Incomplete { missing: MenuLevel::Category }
        );
        assert_eq!(
            catalog.resolve(&MenuPath::category("Desserts")),
            Resolution::Incomplete { missing: MenuLevel::Category }
        );
        assert_eq!(
            catalog.resolve(&MenuPath::category("Indian Breads").with_item("Paratha")),
            Resolution::Incomplete { missing: MenuLevel::Item }
        );
        assert_eq!(
            catalog.resolve(&MenuPath::category("Mains").with_sub_category("Curry").with_item("")),
            Resolution::Incomplete { missing: MenuLevel::Dish }
        );
    }

    #[test]
    fn test_unknown_size_prices_at_zero() {
        let path = MenuPath::category("Mains")
            .with_sub_category("Curry")
            .with_item("Chicken Biryani")
            .with_size("Family");
        let quote = ready(catalog().resolve(&path));
        assert_eq!(quote.size, "Family");
        assert_eq!(quote.unit_price, Money::zero());
    }

    #[test]
    fn test_bare_price_dish_uses_single_serving() {
        let path = MenuPath::category("Mains")
            .with_sub_category("Curry")
            .with_item("Dal Makhani");
        let quote = ready(catalog().resolve(&path));
        assert_eq!(quote.size, "Single Serving");
        assert_eq!(quote.unit_price, Money::from_major(190));
    }

    #[test]
    fn test_direct_item_with_sizes_falls_back() {
        let catalog = catalog();

        // Several sizes: the diner has to pick one.
        let kulcha = MenuPath::category("Indian Breads").with_item("Kulcha");
        let options = catalog.options(&kulcha).unwrap();
        assert_eq!(options.level, MenuLevel::Size);
        assert_eq!(options.choices, vec!["Plain", "Stuffed"]);

        let quote = ready(catalog.resolve(&kulcha.clone().with_size("Stuffed")));
        assert_eq!(quote.unit_price, Money::from_major(70));

        // A size the item does not list still resolves, priced at zero.
        let quote = ready(catalog.resolve(&kulcha.with_size("Family")));
        assert_eq!(quote.size, "Family");
        assert_eq!(quote.unit_price, Money::zero());

        // A single size is picked automatically.
        let quote = ready(catalog.resolve(&MenuPath::category("Indian Breads").with_item("Roti")));
        assert_eq!(quote.size, "Tandoori");
        assert_eq!(quote.unit_price, Money::from_major(25));
    }

    #[test]
    fn test_options_per_level() {
        let catalog = catalog();
        assert_eq!(
            catalog.options(&MenuPath::default()).unwrap().choices,
            vec!["Indian Breads", "Mains"]
        );
        assert_eq!(
            catalog.options(&MenuPath::category("Indian Breads")).unwrap(),
            MenuOptions {
                level: MenuLevel::Item,
                choices: vec!["Naan".to_string(), "Kulcha".to_string(), "Roti".to_string()],
            }
        );
        assert_eq!(
            catalog.options(&MenuPath::category("Mains")).unwrap().choices,
            vec!["Curry", "Tandoor"]
        );
        assert_eq!(
            catalog
                .options(&MenuPath::category("Mains").with_sub_category("Curry"))
                .unwrap()
                .choices,
            vec!["Chicken Biryani", "Dal Makhani"]
        );
        assert!(catalog
            .options(&MenuPath::category("Indian Breads").with_item("Naan"))
            .is_none());
    }

    #[test]
    fn test_path_from_segments_follows_category_shape() {
        let catalog = catalog();

        let path = catalog.path_from_segments(&["Indian Breads", "Kulcha", "Plain"]);
        assert_eq!(path, MenuPath::category("Indian Breads").with_item("Kulcha").with_size("Plain"));

        let path = catalog.path_from_segments(&["Mains", "Curry", "Chicken Biryani", "Half"]);
        assert_eq!(
            path,
            MenuPath::category("Mains")
                .with_sub_category("Curry")
                .with_item("Chicken Biryani")
                .with_size("Half")
        );

        let path = catalog.path_from_segments(&[" Mains ", ""]);
        assert_eq!(path, MenuPath::category("Mains"));
        assert!(catalog.path_from_segments::<&str>(&[]).is_empty());
    }
}
