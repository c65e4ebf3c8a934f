use crate::model::FoodKind;
use crate::table_actor::TableError;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A physical table, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableNumber(pub u32);

impl TableNumber {
    /// Accepts `number` only if it lies in `1..=tables`.
    pub fn checked(number: u32, tables: u32) -> Result<Self, TableError> {
        if (1..=tables).contains(&number) {
            Ok(Self(number))
        } else {
            Err(TableError::InvalidTableNumber { number, tables })
        }
    }
}

impl From<u32> for TableNumber {
    fn from(number: u32) -> Self {
        Self(number)
    }
}

impl Display for TableNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Largest quantity a single line may carry.
pub const MAX_QUANTITY: u32 = 9999;

/// One dish and how many of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub kind: FoodKind,
    pub quantity: u32,
}

impl OrderLine {
    /// Builds a line, refusing a quantity outside `1..=MAX_QUANTITY`.
    pub fn new(kind: FoodKind, quantity: u32) -> Result<Self, TableError> {
        if !(1..=MAX_QUANTITY).contains(&quantity) {
            return Err(TableError::InvalidQuantity(quantity.into()));
        }
        Ok(Self { kind, quantity })
    }
}

/// Renders the `<Kind> x<quantity>` token used in bills and history summaries.
impl Display for OrderLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x{}", self.kind, self.quantity)
    }
}

/// Represents the order currently held by one table.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor)
/// keyed by [`TableNumber`].
///
/// See [`impl ActorEntity for Order`](#impl-ActorEntity-for-Order) for details on:
/// - Creation parameters ([`OrderCreate`])
/// - Custom actions ([`OrderAction`](crate::table_actor::OrderAction))
#[derive(Debug, Clone)]
pub struct Order {
    pub table: TableNumber,
    pub lines: Vec<OrderLine>,
    pub active: bool,
    pub total_bill: Decimal,
    pub tip: Decimal,
    pub entry_time: NaiveDateTime,
    pub exit_time: Option<NaiveDateTime>,
}

/// Payload for opening an order on a table.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub opened_at: NaiveDateTime,
}

impl Order {
    /// Opens an empty, active order.
    pub fn new(table: TableNumber, entry_time: NaiveDateTime) -> Self {
        Self {
            table,
            lines: Vec::new(),
            active: true,
            total_bill: Decimal::ZERO,
            tip: Decimal::ZERO,
            entry_time,
            exit_time: None,
        }
    }

    /// Human-readable line items, e.g. `Coffee x2, Cake x1`.
    pub fn summary(&self) -> String {
        self.lines
            .iter()
            .map(OrderLine::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
