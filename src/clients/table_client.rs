//! # Table Client
//!
//! High-level API over the table actor. Table numbers typed by the operator
//! are range-checked here, before any request is sent, and framework
//! failures are mapped back into [`TableError`].
use crate::billing::{Bill, TipChoice};
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{FoodKind, Order, OrderCreate, OrderLine, TableNumber};
use crate::table_actor::{OrderAction, OrderActionResult, Placement, TableError};
use async_trait::async_trait;
use chrono::Local;
use tracing::{debug, info, instrument};

/// Client for interacting with the table actor.
#[derive(Clone)]
pub struct TableClient {
    inner: ResourceClient<Order>,
    tables: u32,
}

#[async_trait]
impl ActorClient<Order> for TableClient {
    type Error = TableError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    /// Entity failures come back as the original [`TableError`].
    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast::<TableError>() {
                Ok(table_error) => *table_error,
                Err(other) => TableError::ActorCommunicationError(other.to_string()),
            },
            other => TableError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl TableClient {
    /// `tables` is the number of tables in the café, numbered `1..=tables`.
    pub fn new(inner: ResourceClient<Order>, tables: u32) -> Self {
        Self { inner, tables }
    }

    pub fn tables(&self) -> u32 {
        self.tables
    }

    /// Maps lookup failures for one table into its domain meaning.
    fn for_table(table: TableNumber) -> impl Fn(FrameworkError) -> TableError {
        move |e| match e {
            FrameworkError::NotFound(_) => TableError::NoActiveOrder(table),
            FrameworkError::AlreadyExists(_) => TableError::TableAlreadyActive(table),
            other => Self::map_error(other),
        }
    }

    /// Opens an order on a free table.
    #[instrument(skip(self))]
    pub async fn start_order(&self, number: u32) -> Result<TableNumber, TableError> {
        let table = TableNumber::checked(number, self.tables)?;
        debug!("Sending request");
        let params = OrderCreate {
            opened_at: Local::now().naive_local(),
        };
        self.inner
            .create(table, params)
            .await
            .map_err(Self::for_table(table))
    }

    /// Confirms `number` has an order that still accepts lines.
    #[instrument(skip(self))]
    pub async fn extend_order(&self, number: u32) -> Result<TableNumber, TableError> {
        let table = TableNumber::checked(number, self.tables)?;
        match self.get(table).await? {
            Some(order) if order.active => Ok(table),
            _ => Err(TableError::NoActiveOrder(table)),
        }
    }

    /// Adds `quantity` of `kind`. Returns how many lines the order now has.
    ///
    /// The quantity is taken as typed, so zero, negatives and anything above
    /// [`MAX_QUANTITY`](crate::model::MAX_QUANTITY) are refused with the value
    /// the operator entered. Refused quantities never reach the actor.
    #[instrument(skip(self))]
    pub async fn add_line(
        &self,
        table: TableNumber,
        kind: FoodKind,
        quantity: i64,
    ) -> Result<usize, TableError> {
        let count = u32::try_from(quantity).map_err(|_| TableError::InvalidQuantity(quantity))?;
        let line = OrderLine::new(kind, count)?;
        debug!(%line, "Sending request");
        match self
            .inner
            .perform_action(table, OrderAction::AddLine(line))
            .await
            .map_err(Self::for_table(table))?
        {
            OrderActionResult::AddLine(lines) => Ok(lines),
            _ => unreachable!("AddLine action must return AddLine result"),
        }
    }

    /// Ends a placement round.
    ///
    /// An order with no lines is discarded and the table becomes free again.
    #[instrument(skip(self))]
    pub async fn finalize_order(&self, table: TableNumber) -> Result<Placement, TableError> {
        let placement = match self
            .inner
            .perform_action(table, OrderAction::Finalize)
            .await
            .map_err(Self::for_table(table))?
        {
            OrderActionResult::Finalize(placement) => placement,
            _ => unreachable!("Finalize action must return Finalize result"),
        };

        if placement == Placement::Cancelled {
            self.inner
                .delete(table)
                .await
                .map_err(Self::for_table(table))?;
            info!(%table, "Empty order discarded");
        }
        Ok(placement)
    }

    /// Tables with an active order, ascending.
    #[instrument(skip(self))]
    pub async fn open_tables(&self) -> Result<Vec<TableNumber>, TableError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|order| order.active)
            .map(|order| order.table)
            .collect())
    }

    /// Tables without an active order, ascending.
    #[instrument(skip(self))]
    pub async fn free_tables(&self) -> Result<Vec<TableNumber>, TableError> {
        let open = self.open_tables().await?;
        Ok((1..=self.tables)
            .map(TableNumber)
            .filter(|table| !open.contains(table))
            .collect())
    }

    /// Prices an active order without closing it.
    #[instrument(skip(self))]
    pub async fn preview_bill(&self, table: TableNumber) -> Result<Bill, TableError> {
        match self
            .inner
            .perform_action(table, OrderAction::PreviewBill)
            .await
            .map_err(Self::for_table(table))?
        {
            OrderActionResult::PreviewBill(bill) => Ok(bill),
            _ => unreachable!("PreviewBill action must return PreviewBill result"),
        }
    }

    /// Closes the order, records it and returns the final bill.
    #[instrument(skip(self))]
    pub async fn close_and_bill(
        &self,
        table: TableNumber,
        tip: TipChoice,
    ) -> Result<Bill, TableError> {
        let tip = tip.amount()?;
        let action = OrderAction::Close {
            tip,
            closed_at: Local::now().naive_local(),
        };
        match self
            .inner
            .perform_action(table, action)
            .await
            .map_err(Self::for_table(table))?
        {
            OrderActionResult::Close(bill) => Ok(bill),
            _ => unreachable!("Close action must return Close result"),
        }
    }

    /// The order held for `table`, open or closed, if any.
    pub async fn order(&self, table: TableNumber) -> Result<Option<Order>, TableError> {
        self.get(table).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{
        create_mock_client, expect_action, expect_create, expect_delete, expect_get,
        expect_list, reply_entity_error,
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn order_at(table: u32, active: bool) -> Order {
        let opened = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let mut order = Order::new(TableNumber(table), opened);
        order.active = active;
        order
    }

    #[tokio::test]
    async fn test_out_of_range_table_never_reaches_actor() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let tables = TableClient::new(client, 6);

        assert_eq!(
            tables.start_order(0).await.unwrap_err(),
            TableError::InvalidTableNumber { number: 0, tables: 6 }
        );
        assert!(matches!(
            tables.extend_order(7).await,
            Err(TableError::InvalidTableNumber { number: 7, .. })
        ));
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_occupied_table_maps_to_already_active() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let tables = TableClient::new(client, 6);

        let task = tokio::spawn(async move { tables.start_order(3).await });
        let (id, _params, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(id, TableNumber(3));
        responder
            .send(Err(FrameworkError::AlreadyExists(id.to_string())))
            .unwrap();

        assert_eq!(
            task.await.unwrap().unwrap_err(),
            TableError::TableAlreadyActive(TableNumber(3))
        );
    }

    #[tokio::test]
    async fn test_extend_needs_an_active_order() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let tables = TableClient::new(client, 6);

        let cases = [
            (Some(order_at(2, true)), Ok(TableNumber(2))),
            (Some(order_at(2, false)), Err(TableError::NoActiveOrder(TableNumber(2)))),
            (None, Err(TableError::NoActiveOrder(TableNumber(2)))),
        ];
        for (stored, expected) in cases {
            let client = tables.clone();
            let task = tokio::spawn(async move { client.extend_order(2).await });
            let (id, responder) = expect_get(&mut receiver)
                .await
                .expect("Expected Get request");
            assert_eq!(id, TableNumber(2));
            responder.send(Ok(stored)).unwrap();
            assert_eq!(task.await.unwrap(), expected);
        }
    }

    #[tokio::test]
    async fn test_add_line_validates_quantity_then_sends() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let tables = TableClient::new(client, 6);

        for bad in [0, -3, 10_000, 1_000_000_000, i64::MAX] {
            assert_eq!(
                tables.add_line(TableNumber(1), FoodKind::Tea, bad).await.unwrap_err(),
                TableError::InvalidQuantity(bad)
            );
        }
        assert!(receiver.try_recv().is_err());

        let task =
            tokio::spawn(async move { tables.add_line(TableNumber(1), FoodKind::Tea, 3).await });
        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, TableNumber(1));
        match action {
            OrderAction::AddLine(line) => {
                assert_eq!(line.kind, FoodKind::Tea);
                assert_eq!(line.quantity, 3);
            }
            other => panic!("Expected AddLine, got {other:?}"),
        }
        responder.send(Ok(OrderActionResult::AddLine(2))).unwrap();
        assert_eq!(task.await.unwrap().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_entity_errors_come_back_typed() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let tables = TableClient::new(client, 6);

        let task = tokio::spawn(async move { tables.preview_bill(TableNumber(4)).await });
        let (_, _, responder) = expect_action(&mut receiver).await.unwrap();
        reply_entity_error(responder, TableError::NoActiveOrder(TableNumber(4)));

        assert_eq!(
            task.await.unwrap().unwrap_err(),
            TableError::NoActiveOrder(TableNumber(4))
        );
    }

    #[tokio::test]
    async fn test_missing_order_maps_to_no_active_order() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let tables = TableClient::new(client, 6);

        let task = tokio::spawn(async move {
            tables
                .close_and_bill(TableNumber(2), TipChoice::NoTip)
                .await
        });
        let (id, action, responder) = expect_action(&mut receiver).await.unwrap();
        assert!(matches!(action, OrderAction::Close { tip, .. } if tip.is_zero()));
        responder
            .send(Err(FrameworkError::NotFound(id.to_string())))
            .unwrap();

        assert_eq!(
            task.await.unwrap().unwrap_err(),
            TableError::NoActiveOrder(TableNumber(2))
        );
    }

    #[tokio::test]
    async fn test_negative_tip_is_refused_locally() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let tables = TableClient::new(client, 6);

        let tip = TipChoice::Amount(Decimal::new(-1, 0));
        assert_eq!(
            tables.close_and_bill(TableNumber(1), tip).await.unwrap_err(),
            TableError::InvalidTipAmount(Decimal::new(-1, 0))
        );
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_cancelled_placement_deletes_order() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let tables = TableClient::new(client, 6);

        let task = tokio::spawn(async move { tables.finalize_order(TableNumber(5)).await });
        let (_, action, responder) = expect_action(&mut receiver).await.unwrap();
        assert!(matches!(action, OrderAction::Finalize));
        responder
            .send(Ok(OrderActionResult::Finalize(Placement::Cancelled)))
            .unwrap();

        let (id, responder) = expect_delete(&mut receiver)
            .await
            .expect("Expected Delete request");
        assert_eq!(id, TableNumber(5));
        responder.send(Ok(())).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), Placement::Cancelled);
    }

    #[tokio::test]
    async fn test_free_tables_skip_only_active_orders() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let tables = TableClient::new(client, 6);

        let task = tokio::spawn(async move { tables.free_tables().await });
        let responder = expect_list(&mut receiver)
            .await
            .expect("Expected List request");
        responder
            .send(Ok(vec![order_at(2, true), order_at(5, false)]))
            .unwrap();

        let free = task.await.unwrap().unwrap();
        assert_eq!(
            free,
            [1, 3, 4, 5, 6].map(TableNumber).to_vec()
        );
    }
}
