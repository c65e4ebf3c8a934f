use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The closed set of dishes the café can serve.
///
/// Iteration order is menu order. Parsing ignores ASCII case, and `Display`
/// renders the capitalised name used on bills and in persisted summaries
/// (`Coffee`, `Fries`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "title_case", ascii_case_insensitive)]
pub enum FoodKind {
    Coffee,
    Tea,
    Sandwich,
    Burger,
    Fries,
    Cake,
}

/// One catalog entry: what a dish costs and how long a batch takes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub kind: FoodKind,
    pub price: Decimal,
    pub prep_minutes: u32,
}

impl MenuItem {
    pub fn new(kind: FoodKind, price: Decimal, prep_minutes: u32) -> Self {
        Self {
            kind,
            price,
            prep_minutes,
        }
    }
}
