//! Per-process accounting.
//!
//! This module provides:
//! - `stat`: CPU tick record from /proc/<pid>/stat
//! - `status`: VmRSS and UID lookup in /proc/<pid>/status
//! - `metrics`: total accessors over the per-process files
//! - `snapshot`: identity plus live metrics for one process

pub mod metrics;
pub mod snapshot;
pub mod stat;
pub mod status;

pub use metrics::ProcessMetrics;
pub use snapshot::{ProcessRecord, ProcessSnapshot};
pub use stat::ProcessAccounting;
