//! Dataset persistence seam.
//!
//! The pipeline consumes storage through the [`DatasetStore`] trait; a
//! database-backed implementation is a boundary concern. [`MemoryStore`] is
//! the in-crate reference implementation, suitable for tests and embedding.
//!
//! The store owns all persisted datasets. No component holds a dataset across
//! calls; each operation re-fetches by id.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use crate::error::{DatasetError, DatasetResult};
use crate::types::{Dataset, DatasetId, DatasetStats, DatasetSummary};

/// Durable record of datasets and their raw payloads.
pub trait DatasetStore: Send + Sync {
    /// Persist a new dataset, assigning identity and creation time.
    ///
    /// Identity comes from a strictly monotonic counter, so creation order is
    /// total even when two creations share a timestamp resolution unit.
    fn create(&self, name: &str, stats: DatasetStats, csv_file: &str) -> DatasetResult<Dataset>;

    /// All dataset summaries, newest-first (ties broken by id, descending).
    fn list(&self) -> DatasetResult<Vec<DatasetSummary>>;

    /// Fetch a dataset including its raw blob. Fails with `NotFound` for an
    /// unknown id.
    fn get(&self, id: DatasetId) -> DatasetResult<Dataset>;

    /// Delete a dataset. Deleting an id that is already gone is a no-op, so
    /// racing eviction passes never fail on each other's deletes.
    fn delete(&self, id: DatasetId) -> DatasetResult<()>;
}

/// In-memory [`DatasetStore`] backed by a mutex-guarded record list.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    datasets: Vec<Dataset>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> DatasetResult<MutexGuard<'_, Inner>> {
        self.inner.lock().map_err(|_| DatasetError::Store {
            message: "memory store lock poisoned".to_string(),
        })
    }
}

impl DatasetStore for MemoryStore {
    fn create(&self, name: &str, stats: DatasetStats, csv_file: &str) -> DatasetResult<Dataset> {
        let mut inner = self.lock()?;
        inner.next_id += 1;
        let dataset = Dataset {
            summary: DatasetSummary {
                id: DatasetId(inner.next_id),
                name: name.to_string(),
                uploaded_at: Utc::now(),
                stats,
            },
            csv_file: csv_file.to_string(),
        };
        inner.datasets.push(dataset.clone());
        Ok(dataset)
    }

    fn list(&self) -> DatasetResult<Vec<DatasetSummary>> {
        let inner = self.lock()?;
        let mut summaries: Vec<DatasetSummary> =
            inner.datasets.iter().map(|d| d.summary.clone()).collect();
        summaries.sort_by(|a, b| (b.uploaded_at, b.id).cmp(&(a.uploaded_at, a.id)));
        Ok(summaries)
    }

    fn get(&self, id: DatasetId) -> DatasetResult<Dataset> {
        let inner = self.lock()?;
        inner
            .datasets
            .iter()
            .find(|d| d.summary.id == id)
            .cloned()
            .ok_or(DatasetError::NotFound { id })
    }

    fn delete(&self, id: DatasetId) -> DatasetResult<()> {
        let mut inner = self.lock()?;
        inner.datasets.retain(|d| d.summary.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DatasetStore, MemoryStore};
    use crate::error::DatasetError;
    use crate::types::{DatasetId, DatasetStats};

    fn stats(rows: u64) -> DatasetStats {
        DatasetStats {
            total_count: rows,
            avg_flowrate: 0.0,
            avg_pressure: 0.0,
            avg_temperature: 0.0,
            type_distribution: Default::default(),
        }
    }

    #[test]
    fn create_assigns_monotonic_ids() {
        let store = MemoryStore::new();
        let a = store.create("a.csv", stats(1), "x").unwrap();
        let b = store.create("b.csv", stats(1), "x").unwrap();
        assert!(b.summary.id > a.summary.id);
    }

    #[test]
    fn list_is_newest_first() {
        let store = MemoryStore::new();
        store.create("a.csv", stats(1), "x").unwrap();
        store.create("b.csv", stats(1), "x").unwrap();
        store.create("c.csv", stats(1), "x").unwrap();

        let names: Vec<String> = store.list().unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["c.csv", "b.csv", "a.csv"]);
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let err = store.get(DatasetId(42)).unwrap_err();
        assert!(matches!(err, DatasetError::NotFound { id: DatasetId(42) }));
    }

    #[test]
    fn delete_is_idempotent() {
        let store = MemoryStore::new();
        let a = store.create("a.csv", stats(1), "x").unwrap();
        store.delete(a.summary.id).unwrap();
        store.delete(a.summary.id).unwrap();
        assert!(store.list().unwrap().is_empty());
    }
}
