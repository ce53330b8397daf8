//! Column and line layout of the kernel accounting files.
//!
//! All positional knowledge about `/proc` text formats lives here. Parsers
//! look fields up by name through these tables instead of using bare
//! indices.

/// Tick counters on the aggregate `cpu` line of `/proc/stat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuField {
    User,
    Nice,
    System,
    Idle,
    Iowait,
    Irq,
    Softirq,
    Steal,
    Guest,
    GuestNice,
}

impl CpuField {
    pub const SCHEMA: [(CpuField, &'static str, usize); 10] = [
        (CpuField::User, "user", 1),
        (CpuField::Nice, "nice", 2),
        (CpuField::System, "system", 3),
        (CpuField::Idle, "idle", 4),
        (CpuField::Iowait, "iowait", 5),
        (CpuField::Irq, "irq", 6),
        (CpuField::Softirq, "softirq", 7),
        (CpuField::Steal, "steal", 8),
        (CpuField::Guest, "guest", 9),
        (CpuField::GuestNice, "guest_nice", 10),
    ];

    /// Label that starts the aggregate line.
    pub const LINE_LABEL: &'static str = "cpu";

    /// Token index on the `cpu` line (index 0 is the label).
    pub fn column(self) -> usize {
        Self::SCHEMA[self as usize].2
    }

    pub fn name(self) -> &'static str {
        Self::SCHEMA[self as usize].1
    }
}

/// Fields of `/proc/[pid]/stat`, 0-based token columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PidStatField {
    Utime,
    Stime,
    Cutime,
    Cstime,
    StartTime,
}

impl PidStatField {
    pub const SCHEMA: [(PidStatField, &'static str, usize); 5] = [
        (PidStatField::Utime, "utime", 13),
        (PidStatField::Stime, "stime", 14),
        (PidStatField::Cutime, "cutime", 15),
        (PidStatField::Cstime, "cstime", 16),
        (PidStatField::StartTime, "starttime", 21),
    ];

    pub fn column(self) -> usize {
        Self::SCHEMA[self as usize].2
    }

    pub fn name(self) -> &'static str {
        Self::SCHEMA[self as usize].1
    }

    /// Tokens a record needs before every field is addressable.
    pub fn required_len() -> usize {
        Self::SCHEMA.iter().map(|(_, _, c)| c + 1).max().unwrap_or(0)
    }
}

/// A line of a `Key: value` file expected at a fixed position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyedLine {
    pub key: &'static str,
    pub line: usize,
}

/// Lines of `/proc/[pid]/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusField {
    Uid,
    VmRss,
}

impl StatusField {
    pub const SCHEMA: [(StatusField, KeyedLine); 2] = [
        (StatusField::Uid, KeyedLine { key: "Uid:", line: 8 }),
        (StatusField::VmRss, KeyedLine { key: "VmRSS:", line: 17 }),
    ];

    pub fn layout(self) -> KeyedLine {
        Self::SCHEMA[self as usize].1
    }
}

/// Lines of `/proc/meminfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeminfoField {
    MemTotal,
    MemFree,
}

impl MeminfoField {
    pub const SCHEMA: [(MeminfoField, KeyedLine); 2] = [
        (MeminfoField::MemTotal, KeyedLine { key: "MemTotal:", line: 0 }),
        (MeminfoField::MemFree, KeyedLine { key: "MemFree:", line: 1 }),
    ];

    pub fn layout(self) -> KeyedLine {
        Self::SCHEMA[self as usize].1
    }
}

/// Returns the line for `layout`: the fixed line when it carries the key,
/// otherwise the first line in `lines` that does.
pub fn keyed_line<S: AsRef<str>>(lines: &[S], layout: KeyedLine) -> Option<&str> {
    let has_key = |l: &S| l.as_ref().split_whitespace().next() == Some(layout.key);
    lines
        .get(layout.line)
        .filter(|l| has_key(*l))
        .or_else(|| lines.iter().find(|l| has_key(*l)))
        .map(|l| l.as_ref())
}

/// Splits a `/proc/[pid]/stat` line into tokens, keeping the parenthesised
/// command name as a single token even when it contains spaces.
pub fn split_pid_stat(line: &str) -> Vec<&str> {
    match (line.find('('), line.rfind(')')) {
        (Some(open), Some(close)) if open < close => {
            let mut out: Vec<&str> = line[..open].split_whitespace().collect();
            out.push(&line[open..=close]);
            out.extend(line[close + 1..].split_whitespace());
            out
        }
        _ => line.split_whitespace().collect(),
    }
}
