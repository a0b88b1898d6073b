//! `equipment-datasets` ingests equipment-parameter CSV uploads into
//! summarized datasets, keeps a bounded history of them, and renders stored
//! datasets as fixed-layout PDF reports.
//!
//! An upload must declare the columns `Equipment Name`, `Type`, `Flowrate`,
//! `Pressure`, and `Temperature` (extra columns are allowed; they are kept in
//! raw storage and shown in detail views, but ignored by aggregation).
//! Aggregation produces a row count, per-column means rounded to 2 decimal
//! places, and a count of rows per distinct `Type` value. The store retains
//! the 5 most recent datasets; older ones are evicted after each upload.
//!
//! ## Quick example: upload and report
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use equipment_datasets::service::DatasetService;
//! use equipment_datasets::store::MemoryStore;
//!
//! # fn main() -> Result<(), equipment_datasets::DatasetError> {
//! let service = DatasetService::new(Arc::new(MemoryStore::new()));
//!
//! let csv_text = "\
//! Equipment Name,Type,Flowrate,Pressure,Temperature
//! P-101,Pump,10,1,100
//! V-201,Valve,30,3,300
//! ";
//! let summary = service.upload_csv("plant_a.csv", csv_text)?;
//! assert_eq!(summary.stats.total_count, 2);
//! assert_eq!(summary.stats.avg_flowrate, 20.00);
//!
//! let report = service.report(summary.id)?;
//! assert!(report.bytes.starts_with(b"%PDF"));
//! assert_eq!(report.filename, "plant_a.csv_report.pdf");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingest`]: CSV parsing and required-column validation
//! - [`aggregate`]: summary statistics over a parsed table
//! - [`store`]: persistence seam ([`store::DatasetStore`]) and the in-memory
//!   reference implementation
//! - [`retention`]: bounded-history eviction
//! - [`report`]: PDF report rendering
//! - [`service`]: boundary-facing entrypoints (upload/list/detail/report)
//! - [`observe`]: observer hooks for logging/metrics
//! - [`types`]: data model
//! - [`error`]: error types used across the pipeline

pub mod aggregate;
pub mod error;
pub mod ingest;
pub mod observe;
pub mod report;
pub mod retention;
pub mod service;
pub mod store;
pub mod types;

pub use error::{DatasetError, DatasetResult};
