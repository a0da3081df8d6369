//! # Menu Catalog
//!
//! The read-only menu, parsed once from JSON before any session starts.
//!
//! ## Two Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DirectPriced (2 levels)              Nested (4 levels)                 │
//! │                                                                         │
//! │  "Indian Breads"                      "Mains"                           │
//! │    ├── "Naan"        : 40               └── "Curry"                     │
//! │    └── "Butter Naan" : 50                     └── "Chicken Biryani"     │
//! │                                                     ├── "Half" : 150    │
//! │  category → item → price                            └── "Full" : 280    │
//! │                                                                         │
//! │                                       category → sub → dish → size     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The shape is decided once per category while loading: a category is
//! direct-priced when it is listed as such, or when every value in it is a
//! bare price. Everything else is nested.
//!
//! ## Recovery
//! Individual entries that do not fit are never fatal. A bare price where a
//! size table was expected becomes a [`PriceEntry::Flat`]; anything else that
//! cannot be priced (strings, negative numbers, too many decimals) is skipped
//! with a warning and counted in [`MenuCatalog::skipped_entries`].

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::CatalogError;
use crate::money::Money;
use crate::validation::validate_price;
use crate::DEFAULT_DIRECT_PRICED_CATEGORIES;

// =============================================================================
// Entries
// =============================================================================

/// Name → value pairs in menu file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entries<T>(Vec<(String, T)>);

impl<T> Entries<T> {
    /// Looks up an entry by exact name.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Names in file order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> Default for Entries<T> {
    fn default() -> Self {
        Entries(Vec::new())
    }
}

impl<T> FromIterator<(String, T)> for Entries<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Entries(iter.into_iter().collect())
    }
}

// =============================================================================
// Catalog Types
// =============================================================================

/// What a dish or item costs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceEntry {
    /// One price, no size choice.
    Flat(Money),
    /// Size name → price.
    Sized(Entries<Money>),
}

/// One top-level menu category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuCategory {
    /// item → price
    DirectPriced(Entries<PriceEntry>),
    /// sub-category → dish → price
    Nested(Entries<Entries<PriceEntry>>),
}

impl MenuCategory {
    pub fn is_direct_priced(&self) -> bool {
        matches!(self, MenuCategory::DirectPriced(_))
    }

    /// Names one level down: items for direct-priced, sub-categories for
    /// nested.
    pub fn names(&self) -> Vec<&str> {
        match self {
            MenuCategory::DirectPriced(items) => items.names().collect(),
            MenuCategory::Nested(subs) => subs.names().collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            MenuCategory::DirectPriced(items) => items.len(),
            MenuCategory::Nested(subs) => subs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The whole menu.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuCatalog {
    categories: Entries<MenuCategory>,
    skipped: usize,
}

impl MenuCatalog {
    /// Parses a menu document, treating the default categories (see
    /// [`DEFAULT_DIRECT_PRICED_CATEGORIES`]) as direct-priced.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Self::from_json_str_with(json, DEFAULT_DIRECT_PRICED_CATEGORIES)
    }

    /// Parses a menu document with an explicit list of direct-priced
    /// category names.
    pub fn from_json_str_with<S: AsRef<str>>(
        json: &str,
        direct_priced: &[S],
    ) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value, direct_priced)
    }

    /// Builds the catalog from an already parsed JSON value.
    pub fn from_value<S: AsRef<str>>(
        value: Value,
        direct_priced: &[S],
    ) -> Result<Self, CatalogError> {
        let Value::Object(root) = value else {
            return Err(CatalogError::NotAnObject {
                location: "top level".to_string(),
            });
        };

        let mut loader = Loader::default();
        let mut categories = Vec::with_capacity(root.len());

        for (name, body) in root {
            let Value::Object(body) = body else {
                loader.skip(&name, "category is not an object");
                continue;
            };

            let listed = direct_priced.iter().any(|d| d.as_ref() == name);
            let all_prices = !body.is_empty() && body.values().all(Value::is_number);

            let category = if listed || all_prices {
                MenuCategory::DirectPriced(loader.price_entries(&name, body))
            } else {
                MenuCategory::Nested(loader.sub_categories(&name, body))
            };

            debug!(
                category = %name,
                direct_priced = category.is_direct_priced(),
                entries = category.len(),
                "Menu category loaded"
            );
            categories.push((name, category));
        }

        Ok(MenuCatalog {
            categories: Entries(categories),
            skipped: loader.skipped,
        })
    }

    /// Category names in menu order.
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.names().collect()
    }

    pub fn category(&self, name: &str) -> Option<&MenuCategory> {
        self.categories.get(name)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of entries dropped while loading because they could not be
    /// priced.
    pub fn skipped_entries(&self) -> usize {
        self.skipped
    }
}

// =============================================================================
// Loader
// =============================================================================

#[derive(Default)]
struct Loader {
    skipped: usize,
}

impl Loader {
    fn skip(&mut self, location: &str, reason: &str) {
        warn!(%location, %reason, "Skipping malformed menu entry");
        self.skipped += 1;
    }

    fn sub_categories(
        &mut self,
        category: &str,
        body: Map<String, Value>,
    ) -> Entries<Entries<PriceEntry>> {
        let mut subs = Vec::with_capacity(body.len());
        for (name, value) in body {
            let location = format!("{category} / {name}");
            match value {
                Value::Object(dishes) => {
                    let dishes = self.price_entries(&location, dishes);
                    if dishes.is_empty() {
                        self.skip(&location, "sub-category has no priced dishes");
                    } else {
                        subs.push((name, dishes));
                    }
                }
                _ => self.skip(&location, "sub-category is not an object"),
            }
        }
        Entries(subs)
    }

    fn price_entries(&mut self, parent: &str, body: Map<String, Value>) -> Entries<PriceEntry> {
        let mut entries = Vec::with_capacity(body.len());
        for (name, value) in body {
            let location = format!("{parent} / {name}");
            if let Some(entry) = self.price_entry(&location, value) {
                entries.push((name, entry));
            }
        }
        Entries(entries)
    }

    fn price_entry(&mut self, location: &str, value: Value) -> Option<PriceEntry> {
        match value {
            Value::Number(_) => self.price(location, &value).map(PriceEntry::Flat),
            Value::Object(sizes) => {
                let mut priced = Vec::with_capacity(sizes.len());
                for (size, value) in sizes {
                    let location = format!("{location} / {size}");
                    if let Some(price) = self.price(&location, &value) {
                        priced.push((size, price));
                    }
                }
                if priced.is_empty() {
                    self.skip(location, "no priced sizes");
                    None
                } else {
                    Some(PriceEntry::Sized(Entries(priced)))
                }
            }
            _ => {
                self.skip(location, "expected a price or a size table");
                None
            }
        }
    }

    fn price(&mut self, location: &str, value: &Value) -> Option<Money> {
        let Value::Number(number) = value else {
            self.skip(location, "price is not a number");
            return None;
        };

        let parsed = Money::parse_decimal(&number.to_string())
            .and_then(|price| validate_price(price).map(|_| price));

        match parsed {
            Ok(price) => Some(price),
            Err(e) => {
                self.skip(location, &e.to_string());
                None
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const MENU: &str = r#"{
        "Starters": {
            "Veg": {
                "Paneer Tikka": {"Half": 120, "Full": 220},
                "Hara Bhara Kebab": {"Full": 180}
            }
        },
        "Indian Breads": {"Naan": 40, "Butter Naan": 50.5},
        "Mains": {
            "Curry": {
                "Chicken Biryani": {"Half": 150, "Full": 280},
                "Dal Makhani": 190
            }
        }
    }"#;

    #[test]
    fn test_keeps_file_order() {
        let catalog = MenuCatalog::from_json_str(MENU).unwrap();
        assert_eq!(
            catalog.category_names(),
            vec!["Starters", "Indian Breads", "Mains"]
        );
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.skipped_entries(), 0);
    }

    #[test]
    fn test_shapes_are_tagged_at_load() {
        let catalog = MenuCatalog::from_json_str(MENU).unwrap();

        let breads = catalog.category("Indian Breads").unwrap();
        assert!(breads.is_direct_priced());
        assert_eq!(breads.names(), vec!["Naan", "Butter Naan"]);
        assert_eq!(breads.len(), 2);
        assert!(!breads.is_empty());

        let mains = catalog.category("Mains").unwrap();
        assert!(!mains.is_direct_priced());
        assert_eq!(mains.names(), vec!["Curry"]);
        assert_eq!(mains.len(), 1);
    }

    #[test]
    fn test_prices_parse_to_paise() {
        let catalog = MenuCatalog::from_json_str(MENU).unwrap();
        let Some(MenuCategory::DirectPriced(items)) = catalog.category("Indian Breads") else {
            panic!("breads should be direct-priced");
        };
        assert_eq!(items.get("Butter Naan"), Some(&PriceEntry::Flat(Money::from_minor(5050))));
    }

    #[test]
    fn test_bare_number_dish_becomes_flat_entry() {
        let catalog = MenuCatalog::from_json_str(MENU).unwrap();
        let Some(MenuCategory::Nested(subs)) = catalog.category("Mains") else {
            panic!("mains should be nested");
        };
        let curry = subs.get("Curry").unwrap();
        assert_eq!(
            curry.get("Dal Makhani"),
            Some(&PriceEntry::Flat(Money::from_major(190)))
        );
        assert!(matches!(curry.get("Chicken Biryani"), Some(PriceEntry::Sized(_))));
    }

    #[test]
    fn test_all_number_category_is_direct_even_if_unlisted() {
        let catalog =
            MenuCatalog::from_json_str_with(r#"{"Drinks": {"Lassi": 60, "Chaas": 40}}"#, &["Breads"])
                .unwrap();
        assert!(catalog.category("Drinks").unwrap().is_direct_priced());
    }

    #[test]
    fn test_listed_category_with_sizes_stays_direct() {
        let catalog = MenuCatalog::from_json_str(
            r#"{"Indian Breads": {"Kulcha": {"Plain": 45, "Stuffed": 70}, "Naan": 40}}"#,
        )
        .unwrap();
        let Some(MenuCategory::DirectPriced(items)) = catalog.category("Indian Breads") else {
            panic!("breads should be direct-priced");
        };
        let Some(PriceEntry::Sized(sizes)) = items.get("Kulcha") else {
            panic!("kulcha should keep its sizes");
        };
        assert_eq!(sizes.names().collect::<Vec<_>>(), vec!["Plain", "Stuffed"]);
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let catalog = MenuCatalog::from_json_str(
            r#"{
                "Mains": {
                    "Curry": {
                        "Mystery": "ask the chef",
                        "Refund Special": {"Full": -10, "Half": 90},
                        "Gold Leaf": {"Full": 12.345}
                    },
                    "Specials": 99
                },
                "Broken": 5
            }"#,
        )
        .unwrap();

        // Mystery, Refund Special/Full, Gold Leaf/Full, Gold Leaf, Specials, Broken
        assert_eq!(catalog.skipped_entries(), 6);
        assert_eq!(catalog.category_names(), vec!["Mains"]);

        let Some(MenuCategory::Nested(subs)) = catalog.category("Mains") else {
            panic!("mains should be nested");
        };
        let curry = subs.get("Curry").unwrap();
        assert_eq!(curry.names().collect::<Vec<_>>(), vec!["Refund Special"]);
    }

    #[test]
    fn test_document_level_errors() {
        assert!(matches!(
            MenuCatalog::from_json_str("[1, 2]"),
            Err(CatalogError::NotAnObject { .. })
        ));
        assert!(matches!(
            MenuCatalog::from_json_str("{not json"),
            Err(CatalogError::Json(_))
        ));
        assert!(MenuCatalog::from_json_str("{}").unwrap().is_empty());
    }
}
