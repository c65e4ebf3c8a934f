//! In-memory history tables and their backing file.

use super::{csv, HistoryError};
use crate::model::{FoodKind, HistoryRecord, OrderId, RecordDraft};
use crate::recommend::recommend;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// AllTimeHistory, SessionHistory and the order-id counter.
///
/// Session rows are merged into the all-time table on [`HistoryStore::flush`].
/// Flushing again only merges rows appended since the previous flush, so a
/// repeated flush never duplicates a record.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    all_time: Vec<HistoryRecord>,
    session: Vec<HistoryRecord>,
    flushed: usize,
    next_id: u32,
    recommendations: Vec<FoodKind>,
}

impl HistoryStore {
    /// A store with no history, writing to `path` on flush.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self::with_records(path.into(), Vec::new())
    }

    /// Loads the all-time table from `path`. A missing file is an empty history.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        let path = path.into();
        let records = match tokio::fs::read_to_string(&path).await {
            Ok(text) => csv::decode(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No history file, starting empty");
                Vec::new()
            }
            Err(e) => return Err(HistoryError::persistence(&path, e)),
        };
        let store = Self::with_records(path, records);
        info!(
            path = %store.path.display(),
            size = store.all_time.len(),
            next_id = store.next_id,
            "History loaded"
        );
        Ok(store)
    }

    fn with_records(path: PathBuf, all_time: Vec<HistoryRecord>) -> Self {
        let next_id = all_time
            .iter()
            .map(|record| record.order_id.0)
            .max()
            .map_or(1, |max| max.saturating_add(1));
        let recommendations = recommend(all_time.iter().map(|r| r.order_summary.as_str()));
        Self {
            path,
            all_time,
            session: Vec::new(),
            flushed: 0,
            next_id,
            recommendations,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Assigns the next order id and records the draft in session history.
    ///
    /// `u32::MAX` is never handed out, matching what [`HistoryStore::load`]
    /// accepts from the file.
    pub fn append(&mut self, draft: RecordDraft) -> Result<HistoryRecord, HistoryError> {
        let id = self.next_id;
        let next_id = id
            .checked_add(1)
            .ok_or_else(|| HistoryError::IdsExhausted(OrderId(id - 1)))?;
        let record = draft.into_record(OrderId(id));
        self.next_id = next_id;
        debug!(order_id = %record.order_id, table = %record.table, "Recorded");
        self.session.push(record.clone());
        Ok(record)
    }

    pub fn session(&self) -> &[HistoryRecord] {
        &self.session
    }

    pub fn all_time(&self) -> &[HistoryRecord] {
        &self.all_time
    }

    pub fn recommendations(&self) -> &[FoodKind] {
        &self.recommendations
    }

    /// Writes all-time plus unflushed session rows over the file, then
    /// recomputes recommendations from the combined table.
    ///
    /// The in-memory tables only change once the file has been replaced.
    pub async fn flush(&mut self) -> Result<Vec<FoodKind>, HistoryError> {
        let pending = &self.session[self.flushed..];
        let mut combined = Vec::with_capacity(self.all_time.len() + pending.len());
        combined.extend_from_slice(&self.all_time);
        combined.extend_from_slice(pending);

        self.write_atomically(&csv::encode(&combined)).await?;

        info!(
            path = %self.path.display(),
            size = combined.len(),
            merged = pending.len(),
            "History flushed"
        );
        self.flushed = self.session.len();
        self.all_time = combined;
        self.recommendations = recommend(self.all_time.iter().map(|r| r.order_summary.as_str()));
        Ok(self.recommendations.clone())
    }

    /// Writes beside the target and renames over it.
    async fn write_atomically(&self, contents: &str) -> Result<(), HistoryError> {
        let fail = |e| HistoryError::persistence(&self.path, e);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(fail)?;
        }

        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        tokio::fs::write(&tmp_path, contents).await.map_err(fail)?;
        tokio::fs::rename(&tmp_path, &self.path).await.map_err(fail)
    }
}
