//! Financial report generation.
//!
//! This module provides the report vocabulary and its reference semantics:
//! - Financial summary
//! - Monthly breakdown
//! - Car-brand breakdown
//! - Customer report and payment listing
//! - Dashboard statistics and customer history
//!
//! [`ReportStore`] is the seam between handlers and data sources.

pub mod error;
pub mod service;
pub mod snapshot;
pub mod store;
pub mod types;


pub use error::ReportError;
pub use service::ReportService;
pub use snapshot::SnapshotStore;
pub use store::ReportStore;
pub use types::*;
