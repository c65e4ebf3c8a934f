use crate::model::TableNumber;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Layout of every timestamp written to or read from history.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Identifier handed out when an order is closed. Strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// An immutable summary of a closed order.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    pub order_id: OrderId,
    pub table: TableNumber,
    pub order_summary: String,
    pub total_bill: Decimal,
    pub tip: Decimal,
    pub entry_time: NaiveDateTime,
    pub exit_time: NaiveDateTime,
}

/// A closed order waiting for the history actor to give it an [`OrderId`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDraft {
    pub table: TableNumber,
    pub order_summary: String,
    pub total_bill: Decimal,
    pub tip: Decimal,
    pub entry_time: NaiveDateTime,
    pub exit_time: NaiveDateTime,
}

impl RecordDraft {
    pub fn into_record(self, order_id: OrderId) -> HistoryRecord {
        HistoryRecord {
            order_id,
            table: self.table,
            order_summary: self.order_summary,
            total_bill: self.total_bill,
            tip: self.tip,
            entry_time: self.entry_time,
            exit_time: self.exit_time,
        }
    }
}

/// One printable row: id, table, summary, bill, tip, entry, exit.
impl Display for HistoryRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:>4}  {:>5}  {:<40}  {:>9.2}  {:>7.2}  {}  {}",
            self.order_id,
            self.table,
            self.order_summary,
            self.total_bill,
            self.tip,
            self.entry_time.format(TIMESTAMP_FORMAT),
            self.exit_time.format(TIMESTAMP_FORMAT),
        )
    }
}
