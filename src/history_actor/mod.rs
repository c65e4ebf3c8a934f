//! # History Actor
//!
//! Owns the two history tables (AllTimeHistory loaded from disk at startup,
//! SessionHistory built during this run), the order-id counter and the
//! current recommendations.
//!
//! Unlike the table actor this is not a keyed resource store, so it carries
//! its own request enum while keeping the same shape: one task, one
//! `mpsc` inbox, a `oneshot` reply per request.
//!
//! ## Structure
//!
//! - [`actor`] - [`HistoryActor`] event loop and [`HistoryRequest`]
//! - [`store`] - [`HistoryStore`] tables, id counter and flush
//! - [`csv`] - file codec
//! - [`error`] - [`HistoryError`]

pub mod actor;
pub mod csv;
pub mod error;
pub mod store;

pub use actor::{HistoryActor, HistoryRequest};
pub use error::*;
pub use store::HistoryStore;

use crate::clients::HistoryClient;
use tokio::sync::mpsc;

/// Creates a history actor over `store` and its client.
pub fn new(store: HistoryStore) -> (HistoryActor, HistoryClient) {
    let (sender, receiver) = mpsc::channel(32);
    (HistoryActor::new(receiver, store), HistoryClient::new(sender))
}
