//! Aggregate CPU utilisation.
//!
//! `utilization` divides cumulative counters since boot, so two calls a few
//! seconds apart return nearly the same value. `delta_utilization` keeps the
//! previous sample and reports the ratio over the interval between calls.

use crate::cpu::CpuSample;
use crate::system::SystemMetrics;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

/// How aggregate CPU utilisation is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CpuMode {
    /// Ratio of counters since boot.
    #[default]
    Cumulative,
    /// Ratio of counter deltas between two samples.
    Delta,
}

#[derive(Debug)]
pub struct Processor {
    system: SystemMetrics,
    previous: Mutex<Option<CpuSample>>,
}

/// `active / (active + idle)`, or zero when no ticks were counted.
pub fn busy_ratio(sample: &CpuSample) -> f64 {
    let active = sample.active();
    let busy_and_idle = active.saturating_add(sample.idle_ticks());
    if busy_and_idle == 0 {
        return 0.0;
    }
    active as f64 / busy_and_idle as f64
}

impl Processor {
    pub fn new(system: SystemMetrics) -> Self {
        Self {
            system,
            previous: Mutex::new(None),
        }
    }

    /// Cumulative utilisation since boot.
    pub fn utilization(&self) -> f64 {
        busy_ratio(&self.system.cpu_sample())
    }

    /// Utilisation over the interval since the previous call.
    ///
    /// Returns `None` on the first call and when no ticks elapsed between
    /// the two samples.
    pub fn delta_utilization(&self) -> Option<f64> {
        let current = self.system.cpu_sample();
        let mut previous = self.previous.lock().unwrap_or_else(PoisonError::into_inner);
        let result = previous.as_ref().and_then(|earlier| {
            let delta = current.delta_since(earlier);
            if delta.total() == 0 {
                None
            } else {
                Some(busy_ratio(&delta))
            }
        });
        *previous = Some(current);
        result
    }

    /// Dispatches on `mode`. In delta mode the first call falls back to the
    /// cumulative value.
    pub fn utilization_for(&self, mode: CpuMode) -> f64 {
        match mode {
            CpuMode::Cumulative => self.utilization(),
            CpuMode::Delta => self
                .delta_utilization()
                .unwrap_or_else(|| self.utilization()),
        }
    }
}
