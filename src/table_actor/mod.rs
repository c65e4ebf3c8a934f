//! # Table Actor
//!
//! Owns every table's order. Built on the generic
//! [`ResourceActor`](crate::framework::ResourceActor) with [`TableNumber`](crate::model::TableNumber)
//! as the key, so at most one order per table can be open at a time.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Order`]
//! - [`actions`] - [`OrderAction`], [`OrderActionResult`] and [`Placement`]
//! - [`error`] - [`TableError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Lifecycle
//!
//! ```text
//! NoOrder --start--> Active --close--> Closed
//!    ^                 |                  |
//!    +---finalize with no lines           +--start (replaces)
//! ```
//!
//! ## Context
//!
//! The actor is started with a [`TableContext`]: the shared menu and a
//! [`HistoryClient`] used when an order is closed.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::HistoryClient;
use crate::framework::{ResourceActor, ResourceClient};
use crate::menu::MenuCatalog;
use crate::model::Order;
use std::sync::Arc;

/// Dependencies injected into the table actor at `run()` time.
#[derive(Clone)]
pub struct TableContext {
    pub menu: Arc<MenuCatalog>,
    pub history: HistoryClient,
}

/// Creates a new table actor and its client.
pub fn new() -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::TipChoice;
    use crate::clients::TableClient;
    use crate::history_actor::{self, HistoryError, HistoryStore};
    use crate::model::{FoodKind, OrderId, TableNumber};
    use rust_decimal::Decimal;

    async fn spawn_tables() -> (TableClient, HistoryClient) {
        spawn_tables_with(HistoryStore::empty("unused.csv")).await
    }

    async fn spawn_tables_with(store: HistoryStore) -> (TableClient, HistoryClient) {
        let (history_actor, history) = history_actor::new(store);
        tokio::spawn(history_actor.run());
        let (actor, client) = new();
        tokio::spawn(actor.run(TableContext {
            menu: Arc::new(MenuCatalog::standard()),
            history: history.clone(),
        }));
        (TableClient::new(client, 6), history)
    }

    #[tokio::test]
    async fn test_start_twice_is_rejected() {
        let (tables, _history) = spawn_tables().await;
        let table = tables.start_order(2).await.unwrap();
        assert_eq!(
            tables.start_order(2).await.unwrap_err(),
            TableError::TableAlreadyActive(table)
        );
        assert_eq!(tables.extend_order(2).await.unwrap(), table);
    }

    #[tokio::test]
    async fn test_close_records_once_and_frees_table() {
        let (tables, history) = spawn_tables().await;
        let table = tables.start_order(1).await.unwrap();
        tables.add_line(table, FoodKind::Coffee, 2).await.unwrap();
        tables.add_line(table, FoodKind::Cake, 1).await.unwrap();

        let bill = tables
            .close_and_bill(table, TipChoice::Amount(Decimal::new(15, 0)))
            .await
            .unwrap();
        assert_eq!(bill.total, Decimal::new(19000, 2));
        assert_eq!(bill.tip, Decimal::new(15, 0));
        assert_eq!(bill.order_id, Some(OrderId(1)));

        assert_eq!(
            tables.close_and_bill(table, TipChoice::NoTip).await.unwrap_err(),
            TableError::NoActiveOrder(table)
        );
        let session = history.session_snapshot().await.unwrap();
        assert_eq!(session.len(), 1);
        assert_eq!(session[0].order_summary, "Coffee x2, Cake x1");
        assert_eq!(session[0].total_bill, Decimal::new(19000, 2));

        assert!(tables.open_tables().await.unwrap().is_empty());
        tables.start_order(1).await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_placement_is_discarded() {
        let (tables, history) = spawn_tables().await;
        let table = tables.start_order(4).await.unwrap();
        assert_eq!(tables.finalize_order(table).await.unwrap(), Placement::Cancelled);
        assert!(tables.order(table).await.unwrap().is_none());
        assert_eq!(
            tables.extend_order(4).await.unwrap_err(),
            TableError::NoActiveOrder(TableNumber(4))
        );
        assert!(history.session_snapshot().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_finalize_reports_wait_for_whole_order() {
        let (tables, _history) = spawn_tables().await;
        let table = tables.start_order(3).await.unwrap();
        tables.add_line(table, FoodKind::Coffee, 4).await.unwrap();
        assert_eq!(
            tables.finalize_order(table).await.unwrap(),
            Placement::Placed { wait_minutes: 5 }
        );
        tables.add_line(table, FoodKind::Coffee, 5).await.unwrap();
        assert_eq!(
            tables.finalize_order(table).await.unwrap(),
            Placement::Placed { wait_minutes: 12 }
        );
    }

    #[tokio::test]
    async fn test_order_ids_increase_across_closes() {
        let (tables, _history) = spawn_tables().await;
        let mut ids = Vec::new();
        for number in [5, 1, 5] {
            let table = tables.start_order(number).await.unwrap();
            tables.add_line(table, FoodKind::Tea, 1).await.unwrap();
            let bill = tables.close_and_bill(table, TipChoice::NoTip).await.unwrap();
            ids.push(bill.order_id.unwrap());
        }
        assert_eq!(ids, vec![OrderId(1), OrderId(2), OrderId(3)]);
    }

    #[tokio::test]
    async fn test_refused_record_keeps_order_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        tokio::fs::write(
            &path,
            "Order ID,Table Number,Customer Order,Total Bill,Tip,Entry Time,Exit Time\n\
             4294967294,1,Tea x1,10,0,2024-03-01 12:00:00,2024-03-01 12:40:00\n",
        )
        .await
        .unwrap();
        let (tables, history) = spawn_tables_with(HistoryStore::load(&path).await.unwrap()).await;

        let table = tables.start_order(2).await.unwrap();
        tables.add_line(table, FoodKind::Cake, 1).await.unwrap();
        assert_eq!(
            tables.close_and_bill(table, TipChoice::NoTip).await.unwrap_err(),
            TableError::History(HistoryError::IdsExhausted(OrderId(u32::MAX - 1)))
        );

        assert_eq!(tables.open_tables().await.unwrap(), vec![table]);
        assert!(tables.order(table).await.unwrap().unwrap().active);
        assert!(history.session_snapshot().await.unwrap().is_empty());
    }
}
