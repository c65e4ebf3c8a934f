use super::{HistoryError, HistoryStore};
use crate::model::{FoodKind, HistoryRecord, RecordDraft};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

pub type Reply<T> = oneshot::Sender<Result<T, HistoryError>>;

/// Requests understood by the [`HistoryActor`].
#[derive(Debug)]
pub enum HistoryRequest {
    Append {
        draft: RecordDraft,
        respond_to: Reply<HistoryRecord>,
    },
    SessionSnapshot {
        respond_to: Reply<Vec<HistoryRecord>>,
    },
    AllTimeSnapshot {
        respond_to: Reply<Vec<HistoryRecord>>,
    },
    Recommendations {
        respond_to: Reply<Vec<FoodKind>>,
    },
    Flush {
        respond_to: Reply<Vec<FoodKind>>,
    },
}

/// Sole owner of the [`HistoryStore`].
pub struct HistoryActor {
    receiver: mpsc::Receiver<HistoryRequest>,
    store: HistoryStore,
}

impl HistoryActor {
    pub(super) fn new(receiver: mpsc::Receiver<HistoryRequest>, store: HistoryStore) -> Self {
        Self { receiver, store }
    }

    /// Serves requests until every client has been dropped.
    pub async fn run(mut self) {
        info!(path = %self.store.path().display(), "History actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                HistoryRequest::Append { draft, respond_to } => {
                    let result = self.store.append(draft);
                    match &result {
                        Ok(record) => {
                            info!(order_id = %record.order_id, table = %record.table, "Appended")
                        }
                        Err(e) => warn!(error = %e, "Append refused"),
                    }
                    let _ = respond_to.send(result);
                }
                HistoryRequest::SessionSnapshot { respond_to } => {
                    debug!(size = self.store.session().len(), "Session snapshot");
                    let _ = respond_to.send(Ok(self.store.session().to_vec()));
                }
                HistoryRequest::AllTimeSnapshot { respond_to } => {
                    debug!(size = self.store.all_time().len(), "All-time snapshot");
                    let _ = respond_to.send(Ok(self.store.all_time().to_vec()));
                }
                HistoryRequest::Recommendations { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.recommendations().to_vec()));
                }
                HistoryRequest::Flush { respond_to } => {
                    let result = self.store.flush().await;
                    if let Err(e) = &result {
                        warn!(error = %e, "Flush failed");
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(
            session = self.store.session().len(),
            "History actor shutdown"
        );
    }
}
