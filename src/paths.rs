//! Locations of the accounting files.
//!
//! Every file the parsers touch is derived from a `ProcPaths` value, so the
//! whole tree can be redirected to a synthetic directory in tests.

use std::path::{Path, PathBuf};

pub const DEFAULT_PROC_ROOT: &str = "/proc";
pub const DEFAULT_OS_RELEASE: &str = "/etc/os-release";
pub const DEFAULT_PASSWD: &str = "/etc/passwd";

pub const STAT_FILENAME: &str = "stat";
pub const MEMINFO_FILENAME: &str = "meminfo";
pub const UPTIME_FILENAME: &str = "uptime";
pub const VERSION_FILENAME: &str = "version";
pub const STATUS_FILENAME: &str = "status";
pub const CMDLINE_FILENAME: &str = "cmdline";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcPaths {
    pub proc_root: PathBuf,
    pub os_release: PathBuf,
    pub passwd: PathBuf,
}

impl Default for ProcPaths {
    fn default() -> Self {
        Self {
            proc_root: PathBuf::from(DEFAULT_PROC_ROOT),
            os_release: PathBuf::from(DEFAULT_OS_RELEASE),
            passwd: PathBuf::from(DEFAULT_PASSWD),
        }
    }
}

impl ProcPaths {
    /// Paths rooted at `proc_root` with the default OS release and account files.
    pub fn with_proc_root(proc_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
            ..Self::default()
        }
    }

    pub fn stat(&self) -> PathBuf {
        self.proc_root.join(STAT_FILENAME)
    }

    pub fn meminfo(&self) -> PathBuf {
        self.proc_root.join(MEMINFO_FILENAME)
    }

    pub fn uptime(&self) -> PathBuf {
        self.proc_root.join(UPTIME_FILENAME)
    }

    pub fn version(&self) -> PathBuf {
        self.proc_root.join(VERSION_FILENAME)
    }

    pub fn pid_dir(&self, pid: u32) -> PathBuf {
        self.proc_root.join(pid.to_string())
    }

    pub fn pid_stat(&self, pid: u32) -> PathBuf {
        self.pid_dir(pid).join(STAT_FILENAME)
    }

    pub fn pid_status(&self, pid: u32) -> PathBuf {
        self.pid_dir(pid).join(STATUS_FILENAME)
    }

    pub fn pid_cmdline(&self, pid: u32) -> PathBuf {
        self.pid_dir(pid).join(CMDLINE_FILENAME)
    }

    pub fn os_release(&self) -> &Path {
        &self.os_release
    }

    pub fn passwd(&self) -> &Path {
        &self.passwd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let paths = ProcPaths::default();
        assert_eq!(paths.stat(), PathBuf::from("/proc/stat"));
        assert_eq!(paths.meminfo(), PathBuf::from("/proc/meminfo"));
        assert_eq!(paths.os_release(), Path::new("/etc/os-release"));
        assert_eq!(paths.passwd(), Path::new("/etc/passwd"));
    }

    #[test]
    fn test_pid_paths() {
        let paths = ProcPaths::with_proc_root("/tmp/fakeproc");
        assert_eq!(paths.pid_stat(42), PathBuf::from("/tmp/fakeproc/42/stat"));
        assert_eq!(
            paths.pid_status(42),
            PathBuf::from("/tmp/fakeproc/42/status")
        );
        assert_eq!(
            paths.pid_cmdline(7),
            PathBuf::from("/tmp/fakeproc/7/cmdline")
        );
    }
}
