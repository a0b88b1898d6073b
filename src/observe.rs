//! Pipeline observability hooks.
//!
//! Implementors can record metrics, logs, or trigger alerts for upload,
//! eviction, and report-rendering outcomes. Observer callbacks are
//! best-effort and never affect pipeline results.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::DatasetError;
use crate::types::{DatasetId, DatasetStats};

/// Severity classification used for observer callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (operation failed on user input).
    Error,
    /// Critical error (I/O, storage, or data-integrity failures).
    Critical,
}

/// Classify an error for observer callbacks.
pub fn severity_for_error(error: &DatasetError) -> Severity {
    match error {
        DatasetError::Csv(err) => match err.kind() {
            csv::ErrorKind::Io(_) => Severity::Critical,
            _ => Severity::Error,
        },
        DatasetError::Schema { .. } | DatasetError::EmptyTable => Severity::Error,
        DatasetError::NotFound { .. } => Severity::Warning,
        DatasetError::Render { .. } | DatasetError::Store { .. } => Severity::Critical,
    }
}

/// Observer interface for pipeline outcomes.
pub trait PipelineObserver: Send + Sync {
    /// Called when an upload is validated, aggregated, and persisted.
    fn on_ingested(&self, _name: &str, _stats: &DatasetStats) {}

    /// Called when an upload is rejected.
    fn on_rejected(&self, _name: &str, _severity: Severity, _error: &DatasetError) {}

    /// Called after an eviction pass that deleted at least one dataset.
    fn on_evicted(&self, _ids: &[DatasetId]) {}

    /// Called when an eviction pass fails. The upload that triggered it is
    /// already committed and is not rolled back.
    fn on_eviction_failed(&self, _error: &DatasetError) {}

    /// Called when a report is rendered, with the document size in bytes.
    fn on_report_rendered(&self, _id: DatasetId, _byte_len: usize) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn PipelineObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl PipelineObserver for CompositeObserver {
    fn on_ingested(&self, name: &str, stats: &DatasetStats) {
        for o in &self.observers {
            o.on_ingested(name, stats);
        }
    }

    fn on_rejected(&self, name: &str, severity: Severity, error: &DatasetError) {
        for o in &self.observers {
            o.on_rejected(name, severity, error);
        }
    }

    fn on_evicted(&self, ids: &[DatasetId]) {
        for o in &self.observers {
            o.on_evicted(ids);
        }
    }

    fn on_eviction_failed(&self, error: &DatasetError) {
        for o in &self.observers {
            o.on_eviction_failed(error);
        }
    }

    fn on_report_rendered(&self, id: DatasetId, byte_len: usize) {
        for o in &self.observers {
            o.on_report_rendered(id, byte_len);
        }
    }
}

/// Logs pipeline events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl PipelineObserver for StdErrObserver {
    fn on_ingested(&self, name: &str, stats: &DatasetStats) {
        eprintln!("[upload][ok] name={name} rows={}", stats.total_count);
    }

    fn on_rejected(&self, name: &str, severity: Severity, error: &DatasetError) {
        eprintln!("[upload][{severity:?}] name={name} err={error}");
    }

    fn on_evicted(&self, ids: &[DatasetId]) {
        eprintln!("[retention][ok] evicted={ids:?}");
    }

    fn on_eviction_failed(&self, error: &DatasetError) {
        eprintln!("[retention][Critical] err={error}");
    }

    fn on_report_rendered(&self, id: DatasetId, byte_len: usize) {
        eprintln!("[report][ok] id={id} bytes={byte_len}");
    }
}

/// Appends pipeline events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are
    /// ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl PipelineObserver for FileObserver {
    fn on_ingested(&self, name: &str, stats: &DatasetStats) {
        self.append_line(&format!(
            "{} upload ok name={name} rows={}",
            unix_ts(),
            stats.total_count
        ));
    }

    fn on_rejected(&self, name: &str, severity: Severity, error: &DatasetError) {
        self.append_line(&format!(
            "{} upload fail severity={severity:?} name={name} err={error}",
            unix_ts()
        ));
    }

    fn on_evicted(&self, ids: &[DatasetId]) {
        self.append_line(&format!("{} retention evicted={ids:?}", unix_ts()));
    }

    fn on_eviction_failed(&self, error: &DatasetError) {
        self.append_line(&format!("{} retention fail err={error}", unix_ts()));
    }

    fn on_report_rendered(&self, id: DatasetId, byte_len: usize) {
        self.append_line(&format!("{} report ok id={id} bytes={byte_len}", unix_ts()));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::{Severity, severity_for_error};
    use crate::error::DatasetError;
    use crate::types::DatasetId;

    #[test]
    fn user_input_defects_are_error_level() {
        let schema = DatasetError::Schema {
            message: "missing".to_string(),
        };
        assert_eq!(severity_for_error(&schema), Severity::Error);
        assert_eq!(severity_for_error(&DatasetError::EmptyTable), Severity::Error);
    }

    #[test]
    fn integrity_defects_are_critical() {
        let render = DatasetError::Render {
            message: "bad blob".to_string(),
        };
        assert_eq!(severity_for_error(&render), Severity::Critical);
    }

    #[test]
    fn stale_references_are_warnings() {
        let err = DatasetError::NotFound { id: DatasetId(9) };
        assert_eq!(severity_for_error(&err), Severity::Warning);
    }
}
