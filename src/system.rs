//! System-wide metrics from the /proc filesystem.
//!
//! This module reads `stat`, `meminfo`, `uptime` and `version` under the
//! proc root plus the OS release file. Every accessor re-reads its file on
//! each call and returns a zero or empty value when the data is missing or
//! malformed.

use crate::clock::ClockTicks;
use crate::cpu::CpuSample;
use crate::error::{or_default, parse_number, ProcError, ProcResult};
use crate::paths::ProcPaths;
use crate::reader::{read_all_lines, read_line, NEWLINE};
use crate::schema::{keyed_line, MeminfoField};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const PRETTY_NAME_KEY: &str = "PRETTY_NAME";
pub const TOTAL_PROCESSES_KEY: &str = "processes";
pub const RUNNING_PROCESSES_KEY: &str = "procs_running";

/// Reader for the system-wide accounting files.
#[derive(Debug, Clone)]
pub struct SystemMetrics {
    paths: ProcPaths,
    clock: ClockTicks,
}

impl SystemMetrics {
    pub fn new(paths: ProcPaths, clock: ClockTicks) -> Self {
        Self { paths, clock }
    }

    pub fn paths(&self) -> &ProcPaths {
        &self.paths
    }

    pub fn clock(&self) -> ClockTicks {
        self.clock
    }

    /// `PRETTY_NAME` from the OS release file, unquoted, with underscores
    /// turned into spaces. Empty when the key is absent.
    pub fn operating_system_name(&self) -> String {
        or_default(parse_os_release(
            self.paths.os_release(),
            &read_all_lines(self.paths.os_release(), NEWLINE),
        ))
    }

    /// Third token of the version file (`Linux version <release> ...`).
    pub fn kernel_version(&self) -> String {
        let tokens = read_line(&self.paths.version(), 0);
        tokens.get(2).cloned().unwrap_or_default()
    }

    /// Numeric subdirectories of the proc root.
    ///
    /// A pid listed here may already be gone by the time its files are read;
    /// the per-process accessors degrade to defaults in that case.
    pub fn list_process_ids(&self) -> BTreeSet<u32> {
        let mut pids = BTreeSet::new();
        let entries = match fs::read_dir(&self.paths.proc_root) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(
                    "Failed to list {}: {}",
                    self.paths.proc_root.display(),
                    e
                );
                return pids;
            }
        };

        for entry in entries.flatten() {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }
            let name = entry.file_name();
            let name = match name.to_str() {
                Some(v) => v,
                None => continue,
            };
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            if let Ok(pid) = name.parse::<u32>() {
                pids.insert(pid);
            }
        }
        pids
    }

    /// `1 - MemFree / MemTotal`, in `[0, 1]`. Zero when either line is
    /// unusable or the total is zero.
    pub fn memory_utilization(&self) -> f64 {
        let path = self.paths.meminfo();
        or_default(parse_memory_utilization(
            &path,
            &read_all_lines(&path, NEWLINE),
        ))
    }

    /// System uptime truncated to whole seconds.
    pub fn uptime_seconds(&self) -> u64 {
        or_default(self.try_uptime()).trunc() as u64
    }

    /// Uptime expressed in clock ticks.
    pub fn total_ticks(&self) -> u64 {
        let uptime = or_default(self.try_uptime());
        (uptime * self.clock.per_second() as f64) as u64
    }

    /// Processes created since boot (`processes` line of the stat file).
    pub fn total_processes(&self) -> u64 {
        self.stat_counter(TOTAL_PROCESSES_KEY)
    }

    /// Processes currently runnable (`procs_running` line of the stat file).
    pub fn running_processes(&self) -> u64 {
        self.stat_counter(RUNNING_PROCESSES_KEY)
    }

    /// Aggregate CPU counters from the first line of the stat file.
    /// All zero when the line is missing or malformed.
    pub fn cpu_sample(&self) -> CpuSample {
        or_default(self.try_cpu_sample())
    }

    pub fn try_cpu_sample(&self) -> ProcResult<CpuSample> {
        let path = self.paths.stat();
        CpuSample::from_tokens(&path, &read_line(&path, 0))
    }

    /// Ticks spent in every state except idle.
    pub fn active_ticks(&self) -> u64 {
        self.cpu_sample().active()
    }

    pub fn idle_ticks(&self) -> u64 {
        self.cpu_sample().idle_ticks()
    }

    /// Uptime in fractional seconds, first token of the uptime file.
    pub fn try_uptime(&self) -> ProcResult<f64> {
        let path = self.paths.uptime();
        let tokens = read_line(&path, 0);
        let raw = tokens
            .first()
            .ok_or_else(|| ProcError::Unavailable { path: path.clone() })?;
        parse_number::<f64>(&path, "uptime", raw)
    }

    fn stat_counter(&self, key: &'static str) -> u64 {
        let path = self.paths.stat();
        or_default(parse_stat_counter(
            &path,
            &read_all_lines(&path, NEWLINE),
            key,
        ))
    }
}

pub fn parse_os_release<S: AsRef<str>>(path: &Path, lines: &[S]) -> ProcResult<String> {
    for line in lines {
        let Some((key, value)) = line.as_ref().split_once('=') else {
            continue;
        };
        if key.trim() != PRETTY_NAME_KEY {
            continue;
        }
        let value = value.trim().trim_matches(|c: char| c == '"' || c == '\'');
        return Ok(value.replace('_', " "));
    }
    Err(ProcError::MissingKey {
        path: path.to_path_buf(),
        key: PRETTY_NAME_KEY,
    })
}

pub fn parse_memory_utilization<S: AsRef<str>>(path: &Path, lines: &[S]) -> ProcResult<f64> {
    let total: u64 = meminfo_value(path, lines, MeminfoField::MemTotal)?;
    let free: u64 = meminfo_value(path, lines, MeminfoField::MemFree)?;
    if total == 0 {
        return Ok(0.0);
    }
    let ratio = 1.0 - free as f64 / total as f64;
    Ok(ratio.clamp(0.0, 1.0))
}

fn meminfo_value<S: AsRef<str>>(path: &Path, lines: &[S], field: MeminfoField) -> ProcResult<u64> {
    let layout = field.layout();
    let line = keyed_line(lines, layout).ok_or_else(|| ProcError::MissingKey {
        path: path.to_path_buf(),
        key: layout.key,
    })?;
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let raw = tokens.get(1).ok_or_else(|| ProcError::ShortRecord {
        path: path.to_path_buf(),
        expected: 2,
        found: tokens.len(),
    })?;
    parse_number(path, layout.key, raw)
}

/// Second token of the first line whose first token equals `key`.
pub fn parse_stat_counter<S: AsRef<str>>(
    path: &Path,
    lines: &[S],
    key: &'static str,
) -> ProcResult<u64> {
    for line in lines {
        let mut tokens = line.as_ref().split_whitespace();
        if tokens.next() != Some(key) {
            continue;
        }
        return match tokens.next() {
            Some(raw) => parse_number(path, key, raw),
            None => Err(ProcError::ShortRecord {
                path: path.to_path_buf(),
                expected: 2,
                found: 1,
            }),
        };
    }
    Err(ProcError::MissingKey {
        path: path.to_path_buf(),
        key,
    })
}
