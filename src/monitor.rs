//! Wiring of the parsers into one sampling entry point.

use crate::clock::ClockTicks;
use crate::format::format_elapsed;
use crate::paths::ProcPaths;
use crate::process::{ProcessMetrics, ProcessRecord, ProcessSnapshot};
use crate::processor::{CpuMode, Processor};
use crate::system::SystemMetrics;
use crate::users::UserDirectory;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// System-wide values plus one record per sampled process, in pid order.
#[derive(Debug, Clone, Serialize)]
pub struct SystemReport {
    pub sampled_at: DateTime<Utc>,
    pub operating_system: String,
    pub kernel: String,
    pub memory_utilization: f64,
    pub cpu_utilization: f64,
    pub cpu_mode: CpuMode,
    pub uptime_seconds: u64,
    pub uptime: String,
    pub total_processes: u64,
    pub running_processes: u64,
    pub processes: Vec<ProcessRecord>,
}

pub struct Monitor {
    system: SystemMetrics,
    processor: Processor,
    processes: Arc<ProcessMetrics>,
    users: UserDirectory,
}

impl Monitor {
    pub fn new(paths: ProcPaths, clock: ClockTicks) -> Self {
        let system = SystemMetrics::new(paths, clock);
        let users = UserDirectory::new(system.paths().passwd());
        Self {
            processor: Processor::new(system.clone()),
            processes: Arc::new(ProcessMetrics::new(system.clone())),
            system,
            users,
        }
    }

    pub fn system(&self) -> &SystemMetrics {
        &self.system
    }

    pub fn processor(&self) -> &Processor {
        &self.processor
    }

    pub fn process_metrics(&self) -> &Arc<ProcessMetrics> {
        &self.processes
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    /// Snapshots of the live pids in ascending pid order, at most `limit`.
    pub fn snapshots(&self, limit: Option<usize>) -> Vec<ProcessSnapshot> {
        let pids = self.system.list_process_ids();
        let take = limit.unwrap_or(pids.len());
        debug!("Sampling {} of {} processes", take.min(pids.len()), pids.len());

        pids.into_iter()
            .take(take)
            .map(|pid| ProcessSnapshot::capture(pid, self.processes.clone(), &self.users))
            .collect()
    }

    pub fn report(&self, mode: CpuMode, limit: Option<usize>) -> SystemReport {
        let uptime_seconds = self.system.uptime_seconds();
        SystemReport {
            sampled_at: Utc::now(),
            operating_system: self.system.operating_system_name(),
            kernel: self.system.kernel_version(),
            memory_utilization: self.system.memory_utilization(),
            cpu_utilization: self.processor.utilization_for(mode),
            cpu_mode: mode,
            uptime_seconds,
            uptime: format_elapsed(uptime_seconds),
            total_processes: self.system.total_processes(),
            running_processes: self.system.running_processes(),
            processes: self
                .snapshots(limit)
                .iter()
                .map(ProcessSnapshot::record)
                .collect(),
        }
    }
}
