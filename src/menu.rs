//! # Menu Catalog
//!
//! The fixed mapping from [`FoodKind`] to price and preparation time. Built
//! once at startup (from defaults or `cafe.toml`) and shared read-only with
//! the table actor through an `Arc`.

use crate::config::ConfigError;
use crate::model::{FoodKind, MenuItem};
use crate::table_actor::TableError;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::str::FromStr;

/// Highest unit price a catalog entry may carry, in rupees.
const MAX_PRICE: u32 = 1_000_000;

#[derive(Debug, Clone, PartialEq)]
pub struct MenuCatalog {
    items: Vec<MenuItem>,
}

impl MenuCatalog {
    /// Builds a catalog after checking every entry; each kind may appear once.
    pub fn new(items: Vec<MenuItem>) -> Result<Self, ConfigError> {
        if items.is_empty() {
            return Err(ConfigError::Invalid("menu has no items".into()));
        }
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.kind) {
                return Err(ConfigError::Invalid(format!("{} listed twice", item.kind)));
            }
            if item.price.is_sign_negative() {
                return Err(ConfigError::Invalid(format!("{} has a negative price", item.kind)));
            }
            if item.price > Decimal::from(MAX_PRICE) {
                return Err(ConfigError::Invalid(format!(
                    "{} costs more than {MAX_PRICE}",
                    item.kind
                )));
            }
            if item.prep_minutes == 0 {
                return Err(ConfigError::Invalid(format!("{} has no preparation time", item.kind)));
            }
        }
        Ok(Self { items })
    }

    /// The café's standard six-item menu.
    pub fn standard() -> Self {
        Self {
            items: standard_items(),
        }
    }

    /// Items in display order.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn lookup(&self, kind: FoodKind) -> Result<&MenuItem, TableError> {
        self.items
            .iter()
            .find(|item| item.kind == kind)
            .ok_or_else(|| TableError::UnknownItem(kind.to_string()))
    }

    /// Resolves operator input: a 1-based menu position or a dish name in any case.
    pub fn resolve_selection(&self, input: &str) -> Result<FoodKind, TableError> {
        let input = input.trim();
        let unknown = || TableError::UnknownItem(input.to_string());

        if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
            let position: usize = input.parse().map_err(|_| unknown())?;
            return position
                .checked_sub(1)
                .and_then(|index| self.items.get(index))
                .map(|item| item.kind)
                .ok_or_else(unknown);
        }

        let kind = FoodKind::from_str(input).map_err(|_| unknown())?;
        self.lookup(kind).map(|item| item.kind).map_err(|_| unknown())
    }
}

impl Default for MenuCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

pub(crate) fn standard_items() -> Vec<MenuItem> {
    vec![
        MenuItem::new(FoodKind::Coffee, Decimal::new(2000, 2), 5),
        MenuItem::new(FoodKind::Tea, Decimal::new(1000, 2), 3),
        MenuItem::new(FoodKind::Sandwich, Decimal::new(5500, 2), 10),
        MenuItem::new(FoodKind::Burger, Decimal::new(8500, 2), 15),
        MenuItem::new(FoodKind::Fries, Decimal::new(4000, 2), 8),
        MenuItem::new(FoodKind::Cake, Decimal::new(15000, 2), 5),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_by_position_and_name() {
        let menu = MenuCatalog::standard();
        assert_eq!(menu.resolve_selection("1").unwrap(), FoodKind::Coffee);
        assert_eq!(menu.resolve_selection("6").unwrap(), FoodKind::Cake);
        assert_eq!(menu.resolve_selection(" burger ").unwrap(), FoodKind::Burger);
        assert_eq!(menu.resolve_selection("TEA").unwrap(), FoodKind::Tea);
    }

    #[test]
    fn test_bad_selection_is_unknown_item() {
        let menu = MenuCatalog::standard();
        for input in ["0", "7", "pizza", "", "99999999999999999999999"] {
            assert!(
                matches!(menu.resolve_selection(input), Err(TableError::UnknownItem(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_lookup_respects_trimmed_catalog() {
        let menu = MenuCatalog::new(vec![MenuItem::new(FoodKind::Tea, Decimal::new(1000, 2), 3)])
            .unwrap();
        assert_eq!(menu.lookup(FoodKind::Tea).unwrap().prep_minutes, 3);
        assert!(matches!(
            menu.lookup(FoodKind::Cake),
            Err(TableError::UnknownItem(name)) if name == "Cake"
        ));
        assert!(menu.resolve_selection("cake").is_err());
        assert_eq!(menu.resolve_selection("1").unwrap(), FoodKind::Tea);
    }

    #[test]
    fn test_invalid_catalogs_are_refused() {
        let tea = MenuItem::new(FoodKind::Tea, Decimal::new(1000, 2), 3);
        assert!(MenuCatalog::new(vec![]).is_err());
        assert!(MenuCatalog::new(vec![tea.clone(), tea.clone()]).is_err());
        assert!(MenuCatalog::new(vec![MenuItem { prep_minutes: 0, ..tea.clone() }]).is_err());
        assert!(MenuCatalog::new(vec![MenuItem {
            price: Decimal::new(-1, 0),
            ..tea.clone()
        }])
        .is_err());
        assert!(MenuCatalog::new(vec![MenuItem {
            price: Decimal::MAX,
            ..tea
        }])
        .is_err());
    }
}
