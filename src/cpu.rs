//! Aggregate CPU tick counters from the `cpu` line of `/proc/stat`.

use crate::error::{ProcError, ProcResult};
use crate::schema::CpuField;
use serde::Serialize;
use std::path::Path;

/// The ten tick counters of one `cpu` line, in jiffies since boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CpuSample {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
    pub guest: u64,
    pub guest_nice: u64,
}

impl CpuSample {
    /// Builds a sample from the tokens of a `cpu` line.
    ///
    /// Counters up to and including `idle` are required; older kernels omit
    /// the trailing ones, which then read as zero.
    pub fn from_tokens<S: AsRef<str>>(path: &Path, tokens: &[S]) -> ProcResult<Self> {
        match tokens.first() {
            Some(label) if label.as_ref() == CpuField::LINE_LABEL => {}
            _ => {
                return Err(ProcError::MissingKey {
                    path: path.to_path_buf(),
                    key: CpuField::LINE_LABEL,
                })
            }
        }

        let required = CpuField::Idle.column() + 1;
        if tokens.len() < required {
            return Err(ProcError::ShortRecord {
                path: path.to_path_buf(),
                expected: required,
                found: tokens.len(),
            });
        }

        let mut sample = CpuSample::default();
        for (field, name, column) in CpuField::SCHEMA {
            let value = match tokens.get(column) {
                Some(raw) => raw
                    .as_ref()
                    .parse::<u64>()
                    .map_err(|_| ProcError::InvalidNumber {
                        path: path.to_path_buf(),
                        field: name,
                        value: raw.as_ref().to_string(),
                    })?,
                None => 0,
            };
            *sample.field_mut(field) = value;
        }
        Ok(sample)
    }

    pub fn get(&self, field: CpuField) -> u64 {
        match field {
            CpuField::User => self.user,
            CpuField::Nice => self.nice,
            CpuField::System => self.system,
            CpuField::Idle => self.idle,
            CpuField::Iowait => self.iowait,
            CpuField::Irq => self.irq,
            CpuField::Softirq => self.softirq,
            CpuField::Steal => self.steal,
            CpuField::Guest => self.guest,
            CpuField::GuestNice => self.guest_nice,
        }
    }

    fn field_mut(&mut self, field: CpuField) -> &mut u64 {
        match field {
            CpuField::User => &mut self.user,
            CpuField::Nice => &mut self.nice,
            CpuField::System => &mut self.system,
            CpuField::Idle => &mut self.idle,
            CpuField::Iowait => &mut self.iowait,
            CpuField::Irq => &mut self.irq,
            CpuField::Softirq => &mut self.softirq,
            CpuField::Steal => &mut self.steal,
            CpuField::Guest => &mut self.guest,
            CpuField::GuestNice => &mut self.guest_nice,
        }
    }

    /// Sum of all ten counters.
    pub fn total(&self) -> u64 {
        CpuField::SCHEMA
            .iter()
            .map(|(field, _, _)| self.get(*field))
            .fold(0u64, u64::saturating_add)
    }

    /// Every counter except `idle`. Note that `iowait` counts as active.
    pub fn active(&self) -> u64 {
        self.total().saturating_sub(self.idle)
    }

    pub fn idle_ticks(&self) -> u64 {
        self.idle
    }

    /// Per-counter difference against an earlier sample. Counters that went
    /// backwards (wrap or reset) contribute zero.
    pub fn delta_since(&self, earlier: &CpuSample) -> CpuSample {
        let mut out = CpuSample::default();
        for (field, _, _) in CpuField::SCHEMA {
            *out.field_mut(field) = self.get(field).saturating_sub(earlier.get(field));
        }
        out
    }
}
