//! # Operator Console
//!
//! The four-option prompt loop the café staff drive: place an order, add to
//! an order, close and bill a table, exit. Generic over its input and output
//! so tests can script a whole shift.
//!
//! Mistyped input is answered with a message and the same question again.
//! End of input behaves like choosing "Exit": open tables are closed
//! without a tip and history is saved.

use crate::billing::TipChoice;
use crate::clients::TableClient;
use crate::history_actor::HistoryError;
use crate::lifecycle::{CafeSystem, ShutdownReport, SystemError};
use crate::model::{HistoryRecord, TableNumber};
use crate::table_actor::{Placement, TableError};
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

const MENU_RULE_WIDTH: usize = 75;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    System(#[from] SystemError),
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Serves the operator until they exit, then shuts `system` down.
    pub async fn run(&mut self, system: CafeSystem) -> Result<ShutdownReport, ConsoleError> {
        loop {
            self.say("\nBiscotti Cafe Order System").await?;
            self.say("==========================").await?;
            self.say("1. Place Order").await?;
            self.say("2. Add to Existing Order").await?;
            self.say("3. Close Order and Generate Bill").await?;
            self.say("4. Exit\n").await?;

            let Some(choice) = self.prompt("Enter your choice (1-4): ").await? else {
                info!("Input closed, exiting");
                break;
            };
            match choice.as_str() {
                "1" => self.place_order(&system).await?,
                "2" => self.add_to_order(&system).await?,
                "3" => self.close_order(&system.tables).await?,
                "4" => break,
                _ => self.say("\nInvalid choice. Please try again.").await?,
            }
        }
        self.exit(system).await
    }

    async fn place_order(&mut self, system: &CafeSystem) -> Result<(), ConsoleError> {
        let tables = &system.tables;
        let free = tables.free_tables().await?;
        if free.is_empty() {
            return self.say("\nNo free tables.").await;
        }
        self.say(&format!("\nAvailable tables: {}", join(&free))).await?;

        let table = loop {
            let Some(input) = self.prompt("\nEnter table number: ").await? else {
                return Ok(());
            };
            let Ok(number) = input.parse::<u32>() else {
                self.say("Invalid input. Please enter a number.").await?;
                continue;
            };
            match tables.start_order(number).await {
                Ok(table) => break table,
                Err(TableError::TableAlreadyActive(table)) => {
                    self.say(&format!(
                        "\nTable {table} already has an active order. Please choose another table."
                    ))
                    .await?;
                }
                Err(e) => return self.report(e).await,
            }
        };
        self.take_lines(system, table).await
    }

    async fn add_to_order(&mut self, system: &CafeSystem) -> Result<(), ConsoleError> {
        let tables = &system.tables;
        let open = tables.open_tables().await?;
        if open.is_empty() {
            return self.say("\nNo open tables with active orders.").await;
        }
        self.say(&format!("\nOpen tables with active orders: {}", join(&open)))
            .await?;

        let number = loop {
            let Some(input) = self.prompt("\nEnter table number: ").await? else {
                return Ok(());
            };
            match input.parse::<u32>() {
                Ok(number) => break number,
                Err(_) => {
                    self.say("Invalid input. Please choose from the open tables.")
                        .await?
                }
            }
        };
        match tables.extend_order(number).await {
            Ok(table) => self.take_lines(system, table).await,
            Err(TableError::NoActiveOrder(table)) => {
                self.say(&format!(
                    "\nNo active order for table {table}. Please place a new order."
                ))
                .await
            }
            Err(e) => self.report(e).await,
        }
    }

    /// Collects lines until the operator is done, then reports the wait.
    async fn take_lines(
        &mut self,
        system: &CafeSystem,
        table: TableNumber,
    ) -> Result<(), ConsoleError> {
        let tables = &system.tables;
        self.display_menu(system).await?;

        while let Some(input) = self
            .prompt("Enter item number or name (or 'done' or 'x' to finish): ")
            .await?
        {
            if input.eq_ignore_ascii_case("done") || input.eq_ignore_ascii_case("x") {
                break;
            }
            let Ok(kind) = system.menu.resolve_selection(&input) else {
                self.say("Invalid item. Please try again.").await?;
                continue;
            };

            loop {
                let Some(input) = self.prompt("Enter quantity: ").await? else {
                    break;
                };
                let Ok(quantity) = input.parse::<i64>() else {
                    self.say("Invalid quantity. Please enter a positive integer.")
                        .await?;
                    continue;
                };
                match tables.add_line(table, kind, quantity).await {
                    Ok(_) => break,
                    Err(e @ TableError::InvalidQuantity(_)) => self.say(&e.to_string()).await?,
                    Err(e) => return self.report(e).await,
                }
            }
        }

        match tables.finalize_order(table).await {
            Ok(Placement::Placed { wait_minutes }) => {
                self.say(&format!("\nOrder placed for table {table}")).await?;
                self.say(&format!("Approximate waiting time: {wait_minutes} minutes"))
                    .await
            }
            Ok(Placement::Cancelled) => self.say("\nNo items ordered. Order cancelled.").await,
            Err(e) => self.report(e).await,
        }
    }

    async fn close_order(&mut self, tables: &TableClient) -> Result<(), ConsoleError> {
        let open = tables.open_tables().await?;
        if open.is_empty() {
            return self.say("\nNo open tables with active orders.").await;
        }
        self.say(&format!("\nOpen tables with active orders: {}", join(&open)))
            .await?;

        let table = loop {
            let Some(input) = self.prompt("\nEnter table number to close: ").await? else {
                return Ok(());
            };
            match input.parse::<u32>().map(TableNumber) {
                Ok(table) if open.contains(&table) => break table,
                Ok(_) => {
                    self.say("\nInvalid table number. Please choose from the open tables.")
                        .await?
                }
                Err(_) => {
                    self.say("\nInvalid input. Please choose from the open tables.")
                        .await?
                }
            }
        };
        self.bill_and_close(tables, table).await
    }

    /// Shows the bill, asks about the tip and closes the table.
    async fn bill_and_close(
        &mut self,
        tables: &TableClient,
        table: TableNumber,
    ) -> Result<(), ConsoleError> {
        let bill = match tables.preview_bill(table).await {
            Ok(bill) => bill,
            Err(e) => return self.report(e).await,
        };
        self.say("").await?;
        for line in bill.printable_lines() {
            self.say(&line).await?;
        }

        let tip = self.ask_tip().await?;
        match tables.close_and_bill(table, tip).await {
            Ok(closed) => {
                debug!(%table, order_id = ?closed.order_id, tip = %closed.tip, "Table billed");
                self.say(&format!("\nPayment received for table {table}. Order closed."))
                    .await
            }
            Err(e) => self.report(e).await,
        }
    }

    async fn ask_tip(&mut self) -> Result<TipChoice, ConsoleError> {
        loop {
            let Some(answer) = self.prompt("\nDid the customer tip? (y/n): ").await? else {
                return Ok(TipChoice::NoTip);
            };
            match answer.to_lowercase().as_str() {
                "y" => loop {
                    let Some(input) = self.prompt("Enter tip amount: ").await? else {
                        return Ok(TipChoice::NoTip);
                    };
                    let tip = Decimal::from_str(&input)
                        .ok()
                        .map(TipChoice::Amount)
                        .filter(|choice| choice.amount().is_ok());
                    match tip {
                        Some(tip) => return Ok(tip),
                        None => {
                            self.say("Invalid tip amount. Please enter a non-negative number.")
                                .await?
                        }
                    }
                },
                "n" => return Ok(TipChoice::NoTip),
                _ => self.say("Invalid input. Please enter 'y' or 'n'.").await?,
            }
        }
    }

    async fn display_menu(&mut self, system: &CafeSystem) -> Result<(), ConsoleError> {
        let items = system.menu.items();
        let prices: Vec<String> = items
            .iter()
            .map(|item| format!("{:.2} Rs", item.price))
            .collect();
        let name_width = items
            .iter()
            .map(|item| item.kind.to_string().len())
            .max()
            .unwrap_or(0)
            + 5;
        let price_width = prices.iter().map(String::len).max().unwrap_or(0) + 5;

        let rule = "-".repeat(MENU_RULE_WIDTH);
        self.say("\nMenu:").await?;
        self.say(&rule).await?;
        for (index, (item, price)) in items.iter().zip(&prices).enumerate() {
            let name = item.kind.to_string();
            self.say(&format!(
                "{}. {name:<name_width$} {price:<price_width$} (Prep time: {} min)",
                index + 1,
                item.prep_minutes
            ))
            .await?;
        }
        self.say(&rule).await?;

        let recommendations = system.history.recommendations().await?;
        if !recommendations.is_empty() {
            self.say("\nRecommended dishes based on popular orders:").await?;
            self.say("--------------------------------------------").await?;
            for kind in recommendations {
                self.say(&format!("--> {kind}")).await?;
            }
        }
        self.say("").await
    }

    /// Closes every open table, saves history and prints this run's orders.
    async fn exit(&mut self, system: CafeSystem) -> Result<ShutdownReport, ConsoleError> {
        self.say("\nClosing all open tables...").await?;
        for table in system.tables.open_tables().await? {
            self.bill_and_close(&system.tables, table).await?;
        }

        let report = system.shutdown().await?;
        self.say("\nThank you for using Biscotti Cafe Order System. Goodbye!")
            .await?;
        self.display_session(&report.session).await?;
        Ok(report)
    }

    async fn display_session(&mut self, session: &[HistoryRecord]) -> Result<(), ConsoleError> {
        self.say("\nOrder History for the Current Session:").await?;
        self.say("---------------------------------------").await?;
        if session.is_empty() {
            self.say("No orders in this session.").await?;
        } else {
            self.say(&format!(
                "{:>4}  {:>5}  {:<40}  {:>9}  {:>7}  {:<19}  {}",
                "ID", "Table", "Customer Order", "Bill", "Tip", "Entry Time", "Exit Time"
            ))
            .await?;
            for record in session {
                self.say(&record.to_string()).await?;
            }
        }
        self.say("").await
    }

    /// Prints a recoverable error; anything else ends the session.
    async fn report(&mut self, error: TableError) -> Result<(), ConsoleError> {
        match error {
            TableError::ActorCommunicationError(_)
            | TableError::History(HistoryError::ActorCommunicationError(_)) => Err(error.into()),
            recoverable => {
                warn!(error = %recoverable, "Operation rejected");
                self.say(&format!("\n{recoverable}")).await
            }
        }
    }

    async fn say(&mut self, text: &str) -> Result<(), ConsoleError> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }

    /// Prints `question` and reads one trimmed line; `None` at end of input.
    async fn prompt(&mut self, question: &str) -> Result<Option<String>, ConsoleError> {
        self.output.write_all(question.as_bytes()).await?;
        self.output.flush().await?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn join(tables: &[TableNumber]) -> String {
    tables
        .iter()
        .map(TableNumber::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
