//! Boundary-facing pipeline entrypoints.
//!
//! [`DatasetService`] is what an HTTP/CLI/GUI layer calls. Each upload runs
//! end-to-end within one call (parse, validate, aggregate, persist, evict)
//! with no suspension points; the store is the only shared mutable resource,
//! so independent callers may run uploads in parallel against one service.

use std::sync::Arc;

use crate::error::{DatasetError, DatasetResult};
use crate::observe::{PipelineObserver, severity_for_error};
use crate::store::DatasetStore;
use crate::types::{DatasetDetail, DatasetId, DatasetSummary};
use crate::{aggregate, ingest, report, retention};

/// A rendered report document plus its suggested download filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    /// Document bytes.
    pub bytes: Vec<u8>,
    /// Suggested filename, `{name}_report.pdf`.
    pub filename: String,
}

/// The ingestion/aggregation/retention pipeline and its read entrypoints.
pub struct DatasetService {
    store: Arc<dyn DatasetStore>,
    observer: Option<Arc<dyn PipelineObserver>>,
}

impl DatasetService {
    /// Create a service over a store.
    pub fn new(store: Arc<dyn DatasetStore>) -> Self {
        Self {
            store,
            observer: None,
        }
    }

    /// Attach an observer for upload/eviction/report events.
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Ingest one CSV upload under a display name.
    ///
    /// Runs parse -> validate -> aggregate -> persist -> evict. Nothing is
    /// persisted when parsing or validation fails, and uploads with zero data
    /// rows are rejected. A failed eviction pass is reported to the observer
    /// but does not fail the upload; the created dataset stays committed.
    pub fn upload_csv(&self, name: &str, csv_text: &str) -> DatasetResult<DatasetSummary> {
        match self.try_upload(name, csv_text) {
            Ok(summary) => {
                if let Some(obs) = &self.observer {
                    obs.on_ingested(name, &summary.stats);
                }
                Ok(summary)
            }
            Err(error) => {
                if let Some(obs) = &self.observer {
                    obs.on_rejected(name, severity_for_error(&error), &error);
                }
                Err(error)
            }
        }
    }

    fn try_upload(&self, name: &str, csv_text: &str) -> DatasetResult<DatasetSummary> {
        let table = ingest::ingest_csv(csv_text)?;
        if table.row_count() == 0 {
            return Err(DatasetError::EmptyTable);
        }

        let stats = aggregate::summarize(&table);
        let dataset = self.store.create(name, stats, csv_text)?;

        match retention::enforce(self.store.as_ref()) {
            Ok(evicted) => {
                if !evicted.is_empty() {
                    if let Some(obs) = &self.observer {
                        obs.on_evicted(&evicted);
                    }
                }
            }
            Err(error) => {
                if let Some(obs) = &self.observer {
                    obs.on_eviction_failed(&error);
                }
            }
        }

        Ok(dataset.summary)
    }

    /// All persisted dataset summaries, newest-first, without raw row data.
    pub fn list(&self) -> DatasetResult<Vec<DatasetSummary>> {
        self.store.list()
    }

    /// Full dataset detail, with rows re-parsed from the stored blob.
    ///
    /// The re-parsed rows carry every column of the original upload,
    /// including columns aggregation ignored.
    pub fn detail(&self, id: DatasetId) -> DatasetResult<DatasetDetail> {
        let dataset = self.store.get(id)?;
        let table = report::reparse_stored_table(&dataset)?;
        Ok(DatasetDetail {
            summary: dataset.summary,
            csv_data: table.to_records(),
        })
    }

    /// Render the report document for a stored dataset.
    pub fn report(&self, id: DatasetId) -> DatasetResult<RenderedReport> {
        let dataset = self.store.get(id)?;
        let bytes = report::render_report(&dataset)?;
        if let Some(obs) = &self.observer {
            obs.on_report_rendered(id, bytes.len());
        }
        Ok(RenderedReport {
            bytes,
            filename: report::report_filename(&dataset.summary.name),
        })
    }
}
