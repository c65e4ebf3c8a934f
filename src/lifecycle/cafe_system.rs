use crate::clients::{HistoryClient, TableClient};
use crate::config::{CafeConfig, ConfigError};
use crate::history_actor::{self, HistoryError, HistoryStore};
use crate::menu::MenuCatalog;
use crate::model::{FoodKind, HistoryRecord};
use crate::table_actor::{self, TableContext};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Failures while starting or stopping the system. All of them are fatal.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("Actor task failed: {0}")]
    TaskFailed(String),
}

/// What is left once the café has shut down.
#[derive(Debug, Clone, PartialEq)]
pub struct ShutdownReport {
    /// Recommendations recomputed from the history just written.
    pub recommendations: Vec<FoodKind>,
    /// Orders closed during this run.
    pub session: Vec<HistoryRecord>,
}

/// The running café: both actors, their clients and the shared menu.
///
/// # Wiring
///
/// The history actor has no dependencies. The table actor receives the menu
/// and a [`HistoryClient`] clone through its `run()` context, so closing an
/// order records it without the caller relaying anything.
///
/// # Example
///
/// ```ignore
/// let system = CafeSystem::start(&CafeConfig::default()).await?;
/// let table = system.tables.start_order(2).await?;
/// system.tables.add_line(table, FoodKind::Tea, 2).await?;
/// let report = system.shutdown().await?;
/// ```
pub struct CafeSystem {
    pub tables: TableClient,
    pub history: HistoryClient,
    pub menu: Arc<MenuCatalog>,

    /// Table actor first: it holds a history client and must stop before history can.
    handles: Vec<JoinHandle<()>>,
}

impl CafeSystem {
    /// Loads history, then spawns the history and table actors.
    pub async fn start(config: &CafeConfig) -> Result<Self, SystemError> {
        let menu = Arc::new(config.catalog()?);
        let store = HistoryStore::load(&config.history_path).await?;

        let (history_actor, history) = history_actor::new(store);
        let (table_actor, tables) = table_actor::new();

        let history_handle = tokio::spawn(history_actor.run());
        let table_handle = tokio::spawn(table_actor.run(TableContext {
            menu: menu.clone(),
            history: history.clone(),
        }));

        info!(tables = config.tables, items = menu.items().len(), "Café open");
        Ok(Self {
            tables: TableClient::new(tables, config.tables),
            history,
            menu,
            handles: vec![table_handle, history_handle],
        })
    }

    /// Flushes history to disk and stops both actors.
    ///
    /// Every other clone of the clients must already be dropped, or the
    /// actors never see their inbox close.
    pub async fn shutdown(self) -> Result<ShutdownReport, SystemError> {
        info!("Shutting down café...");

        let flushed = self.history.flush().await;
        let session = self.history.session_snapshot().await;

        drop(self.tables);
        drop(self.history);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(SystemError::TaskFailed(e.to_string()));
            }
        }

        let report = ShutdownReport {
            recommendations: flushed?,
            session: session?,
        };
        info!(session = report.session.len(), "Café closed");
        Ok(report)
    }
}
