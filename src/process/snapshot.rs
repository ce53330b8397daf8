//! Point-in-time view of a single process.

use crate::format::format_elapsed;
use crate::process::metrics::ProcessMetrics;
use crate::users::UserDirectory;
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;

/// Identity fixed at construction plus live metrics read on demand.
///
/// `pid`, `user` and `command` never change after construction. CPU,
/// memory and uptime are re-read from the proc files on every call, so
/// they are not atomic with each other or with the identity fields.
/// Snapshots order by pid only.
#[derive(Debug, Clone)]
pub struct ProcessSnapshot {
    pid: u32,
    user: String,
    command: String,
    metrics: Arc<ProcessMetrics>,
}

/// Serialisable copy of a snapshot's values at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessRecord {
    pub pid: u32,
    pub user: String,
    pub command: String,
    pub cpu_utilization: f64,
    pub ram_mb: u64,
    pub uptime_seconds: u64,
    pub uptime: String,
}

impl ProcessSnapshot {
    pub fn new(
        pid: u32,
        user: impl Into<String>,
        command: impl Into<String>,
        metrics: Arc<ProcessMetrics>,
    ) -> Self {
        Self {
            pid,
            user: user.into(),
            command: command.into(),
            metrics,
        }
    }

    /// Resolves owner and command line for `pid` now.
    pub fn capture(pid: u32, metrics: Arc<ProcessMetrics>, users: &UserDirectory) -> Self {
        let user = users.resolve(&metrics.owner_uid(pid));
        let command = metrics.command_line(pid);
        Self::new(pid, user, command, metrics)
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn cpu_utilization(&self) -> f64 {
        self.metrics.cpu_utilization(self.pid)
    }

    pub fn ram_mb(&self) -> u64 {
        self.metrics.resident_memory_mb(self.pid)
    }

    /// Cumulative CPU seconds (see [`ProcessMetrics::uptime_seconds`]).
    pub fn uptime_seconds(&self) -> u64 {
        self.metrics.uptime_seconds(self.pid)
    }

    pub fn record(&self) -> ProcessRecord {
        let uptime_seconds = self.uptime_seconds();
        ProcessRecord {
            pid: self.pid,
            user: self.user.clone(),
            command: self.command.clone(),
            cpu_utilization: self.cpu_utilization(),
            ram_mb: self.ram_mb(),
            uptime_seconds,
            uptime: format_elapsed(uptime_seconds),
        }
    }
}

impl PartialEq for ProcessSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.pid == other.pid
    }
}

impl Eq for ProcessSnapshot {}

impl PartialOrd for ProcessSnapshot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ProcessSnapshot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.pid.cmp(&other.pid)
    }
}
