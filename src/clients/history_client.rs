//! # History Client
//!
//! Cloneable handle to the history actor. The table actor holds one to record
//! closed orders; the console holds another for snapshots and the final flush.
use crate::history_actor::actor::Reply;
use crate::history_actor::{HistoryError, HistoryRequest};
use crate::model::{FoodKind, HistoryRecord, RecordDraft};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct HistoryClient {
    sender: mpsc::Sender<HistoryRequest>,
}

impl HistoryClient {
    pub fn new(sender: mpsc::Sender<HistoryRequest>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Reply<R>) -> HistoryRequest,
    ) -> Result<R, HistoryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| HistoryError::ActorCommunicationError("History actor closed".into()))?;
        response.await.map_err(|_| {
            HistoryError::ActorCommunicationError("History actor dropped response channel".into())
        })?
    }

    /// Records a closed order and returns it with its assigned id.
    #[instrument(skip(self, draft), fields(table = %draft.table))]
    pub async fn append(&self, draft: RecordDraft) -> Result<HistoryRecord, HistoryError> {
        debug!("Sending request");
        self.request(|respond_to| HistoryRequest::Append { draft, respond_to })
            .await
    }

    /// Orders closed during this run, in closing order.
    #[instrument(skip(self))]
    pub async fn session_snapshot(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        self.request(|respond_to| HistoryRequest::SessionSnapshot { respond_to })
            .await
    }

    /// Orders persisted before this run, plus any already flushed.
    #[instrument(skip(self))]
    pub async fn all_time_snapshot(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        self.request(|respond_to| HistoryRequest::AllTimeSnapshot { respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn recommendations(&self) -> Result<Vec<FoodKind>, HistoryError> {
        self.request(|respond_to| HistoryRequest::Recommendations { respond_to })
            .await
    }

    /// Writes the combined history to disk and returns fresh recommendations.
    #[instrument(skip(self))]
    pub async fn flush(&self) -> Result<Vec<FoodKind>, HistoryError> {
        debug!("Sending request");
        self.request(|respond_to| HistoryRequest::Flush { respond_to })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history_actor::{self, HistoryStore};
    use crate::model::TableNumber;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn draft(summary: &str) -> RecordDraft {
        let at = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();
        RecordDraft {
            table: TableNumber(2),
            order_summary: summary.to_string(),
            total_bill: Decimal::new(85, 0),
            tip: Decimal::new(5, 0),
            entry_time: at,
            exit_time: at,
        }
    }

    #[tokio::test]
    async fn test_flush_moves_session_into_all_time() {
        let dir = tempfile::tempdir().unwrap();
        let (actor, history) =
            history_actor::new(HistoryStore::empty(dir.path().join("history.csv")));
        let handle = tokio::spawn(actor.run());

        history.append(draft("Burger x1")).await.unwrap();
        assert!(history.all_time_snapshot().await.unwrap().is_empty());
        assert!(history.recommendations().await.unwrap().is_empty());

        assert_eq!(history.flush().await.unwrap(), vec![FoodKind::Burger]);
        assert_eq!(history.all_time_snapshot().await.unwrap().len(), 1);
        assert_eq!(history.session_snapshot().await.unwrap().len(), 1);
        assert_eq!(history.recommendations().await.unwrap(), vec![FoodKind::Burger]);

        drop(history);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_closed_actor_is_reported() {
        let (sender, receiver) = mpsc::channel(1);
        drop(receiver);
        let history = HistoryClient::new(sender);
        assert!(matches!(
            history.session_snapshot().await,
            Err(HistoryError::ActorCommunicationError(_))
        ));
    }
}
