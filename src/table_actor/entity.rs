//! ActorEntity trait implementation for the Order domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation
//! that enables [`Order`] to be managed by the generic [`crate::framework::ResourceActor`],
//! one entity per table.
//!
//! The order holds no collaborators of its own. Prices and prep times come
//! from the injected [`TableContext`] menu, and closing hands a
//! [`RecordDraft`] to the history actor through the injected client.

use super::actions::{OrderAction, OrderActionResult, Placement};
use super::{TableContext, TableError};
use crate::billing::{self, Bill};
use crate::framework::ActorEntity;
use crate::model::{Order, OrderCreate, RecordDraft, TableNumber};
use async_trait::async_trait;
use tracing::info;

#[async_trait]
impl ActorEntity for Order {
    type Id = TableNumber;
    type Create = OrderCreate;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = TableContext;
    type Error = TableError;

    /// Opens an empty, active order on `table`.
    fn from_create_params(table: TableNumber, params: OrderCreate) -> Result<Self, TableError> {
        Ok(Self::new(table, params.opened_at))
    }

    /// A closed order keeps its slot readable but lets a new order take the table.
    fn is_open(&self) -> bool {
        self.active
    }

    /// Handles the order lifecycle.
    ///
    /// # Actions
    /// - `AddLine`: appends after checking the dish against the menu
    /// - `Finalize`: reports the wait, or `Cancelled` when there are no lines
    /// - `PreviewBill`: prices the order without side effects
    /// - `Close`: records history (when there are lines) and retires the order
    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &TableContext,
    ) -> Result<OrderActionResult, TableError> {
        if !self.active {
            return Err(TableError::NoActiveOrder(self.table));
        }

        match action {
            OrderAction::AddLine(line) => {
                ctx.menu.lookup(line.kind)?;
                self.lines.push(line);
                Ok(OrderActionResult::AddLine(self.lines.len()))
            }
            OrderAction::Finalize => {
                if self.lines.is_empty() {
                    return Ok(OrderActionResult::Finalize(Placement::Cancelled));
                }
                let wait_minutes = billing::wait_minutes(&ctx.menu, &self.lines)?;
                Ok(OrderActionResult::Finalize(Placement::Placed { wait_minutes }))
            }
            OrderAction::PreviewBill => Ok(OrderActionResult::PreviewBill(Bill::price(
                &ctx.menu,
                self.table,
                &self.lines,
            )?)),
            OrderAction::Close { tip, closed_at } => {
                let mut bill = Bill::price(&ctx.menu, self.table, &self.lines)?;
                bill.tip = tip;

                // Recorded before any state changes: a failed append leaves the order open.
                if !self.lines.is_empty() {
                    let record = ctx
                        .history
                        .append(RecordDraft {
                            table: self.table,
                            order_summary: self.summary(),
                            total_bill: bill.total,
                            tip,
                            entry_time: self.entry_time,
                            exit_time: closed_at,
                        })
                        .await?;
                    bill.order_id = Some(record.order_id);
                }

                self.total_bill = bill.total;
                self.tip = tip;
                self.exit_time = Some(closed_at);
                self.active = false;
                info!(table = %self.table, order_id = ?bill.order_id, total = %bill.total, "Order closed");
                Ok(OrderActionResult::Close(bill))
            }
        }
    }
}
