//! Per-process metrics from `/proc/<pid>/{stat,status,cmdline}`.
//!
//! All accessors are total: a pid that vanished between enumeration and the
//! read, or whose files cannot be opened, yields zero or an empty string.

use crate::error::{or_default, ProcError, ProcResult};
use crate::process::stat::ProcessAccounting;
use crate::process::status::{resident_mb, status_value};
use crate::reader::{read_all_lines, read_line_raw, NEWLINE, NUL};
use crate::schema::StatusField;
use crate::system::SystemMetrics;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ProcessMetrics {
    system: SystemMetrics,
}

impl ProcessMetrics {
    pub fn new(system: SystemMetrics) -> Self {
        Self { system }
    }

    pub fn system(&self) -> &SystemMetrics {
        &self.system
    }

    /// The full stat record from one read of the file.
    pub fn try_accounting(&self, pid: u32) -> ProcResult<ProcessAccounting> {
        let path = self.system.paths().pid_stat(pid);
        let line = read_line_raw(&path, 0).ok_or_else(|| ProcError::Unavailable {
            path: path.clone(),
        })?;
        ProcessAccounting::parse(&path, &line)
    }

    pub fn accounting(&self, pid: u32) -> Option<ProcessAccounting> {
        match self.try_accounting(pid) {
            Ok(acct) => Some(acct),
            Err(e) => {
                debug!("No accounting for pid {}: {}", pid, e);
                None
            }
        }
    }

    /// `utime + stime + cutime + cstime`, in ticks.
    pub fn active_ticks(&self, pid: u32) -> u64 {
        self.accounting(pid)
            .map(|a| a.active_ticks())
            .unwrap_or(0)
    }

    /// Tick since boot at which the process started.
    pub fn start_tick(&self, pid: u32) -> u64 {
        self.accounting(pid).map(|a| a.starttime).unwrap_or(0)
    }

    /// Cumulative CPU time in whole seconds. This is not the wall-clock age
    /// of the process; see [`ProcessMetrics::age_seconds`] for that.
    pub fn uptime_seconds(&self, pid: u32) -> u64 {
        self.system.clock().to_seconds(self.active_ticks(pid))
    }

    /// Wall-clock seconds since the process started, clamped at zero.
    pub fn age_seconds(&self, pid: u32) -> u64 {
        let Some(acct) = self.accounting(pid) else {
            return 0;
        };
        let started = self.system.clock().to_seconds(acct.starttime);
        self.system.uptime_seconds().saturating_sub(started)
    }

    /// Lifetime-average CPU utilisation: CPU seconds consumed divided by
    /// seconds since the process started.
    ///
    /// Zero when the process is gone or started within the current second
    /// (non-positive elapsed time). Values above 1.0 are possible for
    /// multi-threaded processes.
    pub fn cpu_utilization(&self, pid: u32) -> f64 {
        let Some(acct) = self.accounting(pid) else {
            return 0.0;
        };
        let clock = self.system.clock();
        let elapsed = self.system.uptime_seconds() as f64 - clock.to_seconds_f64(acct.starttime);
        if elapsed <= 0.0 {
            return 0.0;
        }
        clock.to_seconds_f64(acct.active_ticks()) / elapsed
    }

    /// Resident memory (VmRSS) in whole megabytes.
    pub fn resident_memory_mb(&self, pid: u32) -> u64 {
        let path = self.system.paths().pid_status(pid);
        or_default(resident_mb(&path, &read_all_lines(&path, NEWLINE)))
    }

    /// Real UID of the process owner, as text.
    pub fn owner_uid(&self, pid: u32) -> String {
        let path = self.system.paths().pid_status(pid);
        let lines = read_all_lines(&path, NEWLINE);
        or_default(status_value(&path, &lines, StatusField::Uid).map(str::to_string))
    }

    /// Arguments joined with single spaces. Empty for kernel threads and
    /// exited processes.
    pub fn command_line(&self, pid: u32) -> String {
        let path = self.system.paths().pid_cmdline(pid);
        read_all_lines(&path, NUL)
            .into_iter()
            .filter(|arg| !arg.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
