//! CPU accounting parsed from `/proc/<pid>/stat`.

use crate::error::{parse_number, ProcError, ProcResult};
use crate::schema::{split_pid_stat, PidStatField};
use serde::Serialize;
use std::path::Path;

/// Tick counters of one process, all in jiffies.
///
/// `utime`/`stime` are the process's own user and system time, `cutime`/
/// `cstime` those of its waited-for children, and `starttime` the tick at
/// which the process started, counted from boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcessAccounting {
    pub utime: u64,
    pub stime: u64,
    pub cutime: u64,
    pub cstime: u64,
    pub starttime: u64,
}

impl ProcessAccounting {
    /// Parses the single line of a stat file.
    pub fn parse(path: &Path, line: &str) -> ProcResult<Self> {
        let tokens = split_pid_stat(line);
        let required = PidStatField::required_len();
        if tokens.len() < required {
            return Err(ProcError::ShortRecord {
                path: path.to_path_buf(),
                expected: required,
                found: tokens.len(),
            });
        }

        let field = |f: PidStatField| -> ProcResult<u64> {
            parse_number(path, f.name(), tokens[f.column()])
        };

        Ok(Self {
            utime: field(PidStatField::Utime)?,
            stime: field(PidStatField::Stime)?,
            cutime: field(PidStatField::Cutime)?,
            cstime: field(PidStatField::Cstime)?,
            starttime: field(PidStatField::StartTime)?,
        })
    }

    /// Own plus children CPU ticks.
    pub fn active_ticks(&self) -> u64 {
        self.utime
            .saturating_add(self.stime)
            .saturating_add(self.cutime)
            .saturating_add(self.cstime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Typical /proc/<pid>/stat format:
    // pid (comm) state ppid pgrp session tty_nr tpgid flags minflt cminflt majflt cmajflt utime stime cutime cstime ...
    const STAT: &str = "1234 (test_process) S 1 1234 1234 0 -1 4194304 100 0 0 0 1000 500 20 30 20 0 1 0 12345 12345678 1234 18446744073709551615 4194304 4238788 140736466511168 0 0 0 0 0 0 0 0 0 17 1 0 0 0 0 0";

    #[test]
    fn test_parse_stat() {
        let acct = ProcessAccounting::parse(Path::new("/proc/1234/stat"), STAT).expect("valid stat");
        assert_eq!(acct.utime, 1000);
        assert_eq!(acct.stime, 500);
        assert_eq!(acct.cutime, 20);
        assert_eq!(acct.cstime, 30);
        assert_eq!(acct.starttime, 12345);
        assert_eq!(acct.active_ticks(), 1550);
    }

    #[test]
    fn test_parse_stat_comm_with_spaces() {
        let line = STAT.replace("(test_process)", "(Web Content (x))");
        let acct = ProcessAccounting::parse(Path::new("stat"), &line).expect("valid stat");
        assert_eq!(acct.active_ticks(), 1550);
        assert_eq!(acct.starttime, 12345);
    }

    #[test]
    fn test_parse_stat_short() {
        let result = ProcessAccounting::parse(Path::new("stat"), "1234 (test) S 1 2 3");
        assert!(matches!(
            result,
            Err(ProcError::ShortRecord { expected: 22, found: 6, .. })
        ));
    }

    #[test]
    fn test_parse_stat_garbage_field() {
        let line = STAT.replace(" 1000 500 ", " 1000 xx ");
        let result = ProcessAccounting::parse(Path::new("stat"), &line);
        assert!(matches!(
            result,
            Err(ProcError::InvalidNumber { field: "stime", .. })
        ));
    }
}
