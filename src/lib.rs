//! Herakles Process Monitor Library
//!
//! This library parses the Linux `/proc` accounting files into typed system
//! and per-process metrics: CPU utilisation, memory utilisation, process
//! counts, and per-process CPU time, resident memory, owner and command line.
//!
//! # Features
//!
//! - **Total accessors**: missing files, short records and vanished pids
//!   yield zero or empty values instead of errors
//! - **Named field schema**: every fixed column and line index of the
//!   kernel formats lives in [`schema`]
//! - **Injectable layout**: paths and the tick rate are passed in, so a
//!   synthetic proc tree can stand in for `/proc`
//!
//! # Usage
//!
//! ```rust,no_run
//! use herakles_process_monitor::{ClockTicks, CpuMode, Monitor, ProcPaths};
//!
//! let monitor = Monitor::new(ProcPaths::default(), ClockTicks::detect());
//!
//! let system = monitor.system();
//! println!("{} ({})", system.operating_system_name(), system.kernel_version());
//! println!("Memory: {:.1}%", system.memory_utilization() * 100.0);
//! println!("CPU: {:.1}%", monitor.processor().utilization() * 100.0);
//!
//! for snapshot in monitor.snapshots(Some(10)) {
//!     println!("{} {} {}", snapshot.pid(), snapshot.user(), snapshot.command());
//! }
//!
//! let report = monitor.report(CpuMode::Cumulative, None);
//! println!("{} processes", report.processes.len());
//! ```

pub mod clock;
pub mod cpu;
pub mod error;
pub mod format;
pub mod monitor;
pub mod paths;
pub mod process;
pub mod processor;
pub mod reader;
pub mod schema;
pub mod system;
pub mod users;

// Re-export main types for convenience
pub use clock::ClockTicks;
pub use cpu::CpuSample;
pub use error::{ProcError, ProcResult};
pub use format::format_elapsed;
pub use monitor::{Monitor, SystemReport};
pub use paths::ProcPaths;
pub use process::{ProcessAccounting, ProcessMetrics, ProcessRecord, ProcessSnapshot};
pub use processor::{CpuMode, Processor};
pub use system::SystemMetrics;
pub use users::UserDirectory;
