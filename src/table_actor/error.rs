//! Error types for the table actor.

use crate::history_actor::HistoryError;
use crate::model::{TableNumber, MAX_QUANTITY};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while handling a table's order.
///
/// Everything except a lost actor is recoverable: the operator is told and
/// asked again.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TableError {
    /// The table is outside the configured range.
    #[error("Invalid table number {number}. Please choose a table between 1 and {tables}.")]
    InvalidTableNumber { number: u32, tables: u32 },

    /// The dish is not in the catalog, or the selection did not name one.
    #[error("Invalid item: {0}")]
    UnknownItem(String),

    /// Quantities must lie in `1..=MAX_QUANTITY`.
    #[error("Invalid quantity {0}. Please enter a positive integer up to {max}.", max = MAX_QUANTITY)]
    InvalidQuantity(i64),

    /// Tips must not be negative.
    #[error("Invalid tip amount {0}. Please enter a non-negative number.")]
    InvalidTipAmount(Decimal),

    /// The table has no order accepting lines.
    #[error("No active order for table {0}.")]
    NoActiveOrder(TableNumber),

    /// The table already has an order; extend it instead.
    #[error("Table {0} already has an active order.")]
    TableAlreadyActive(TableNumber),

    /// Recording the closed order failed.
    #[error(transparent)]
    History(#[from] HistoryError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for TableError {
    fn from(msg: String) -> Self {
        TableError::ActorCommunicationError(msg)
    }
}
