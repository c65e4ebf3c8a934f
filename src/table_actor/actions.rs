//! Custom actions for the table actor.
//!
//! Everything that happens to an open order after it is created goes through
//! [`OrderAction`]; see [`impl ActorEntity for Order`](crate::model::Order#impl-ActorEntity-for-Order).

use crate::billing::Bill;
use crate::model::OrderLine;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// Operations on an active order.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Appends a line. The dish must be on the menu.
    AddLine(OrderLine),
    /// Ends a placement round and estimates the wait for the whole order.
    Finalize,
    /// Prices the order without closing it.
    PreviewBill,
    /// Prices the order, records it in history and retires it.
    ///
    /// # Errors
    /// Fails with `NoActiveOrder` if the order was already closed, so a
    /// repeated close never records twice.
    Close { tip: Decimal, closed_at: NaiveDateTime },
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone)]
pub enum OrderActionResult {
    /// Number of lines on the order after the append.
    AddLine(usize),
    Finalize(Placement),
    PreviewBill(Bill),
    Close(Bill),
}

/// Outcome of finishing a placement round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The order has lines; this is the estimated wait for all of them.
    Placed { wait_minutes: u64 },
    /// The order had no lines and was discarded.
    Cancelled,
}
