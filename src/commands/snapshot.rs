//! Snapshot command implementation.
//!
//! Samples the system once and prints the report.

use anyhow::Context;
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

use herakles_process_monitor::{format_elapsed, CpuMode, Monitor, SystemReport};

use crate::cli::ReportFormat;
use crate::config::Config;

/// Maximum command width in the text table.
const COMMAND_WIDTH: usize = 60;

/// Samples the system and prints a report.
pub fn command_snapshot(
    format: ReportFormat,
    limit: Option<usize>,
    config: &Config,
) -> anyhow::Result<()> {
    let monitor = Monitor::new(config.proc_paths(), config.clock_ticks());
    let mode = config.cpu_mode();
    let limit = limit.or(config.max_processes);

    if mode == CpuMode::Delta {
        // prime the previous sample so the report shows a real interval
        monitor.processor().delta_utilization();
        thread::sleep(Duration::from_millis(config.sample_interval_ms()));
    }

    let start = Instant::now();
    let report = monitor.report(mode, limit);
    debug!(
        "Sampled {} processes in {:.2}ms",
        report.processes.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    let output = match format {
        ReportFormat::Text => render_text(&report),
        ReportFormat::Yaml => serde_yaml::to_string(&report).context("Failed to render YAML")?,
        ReportFormat::Json => {
            serde_json::to_string_pretty(&report).context("Failed to render JSON")?
        }
    };
    println!("{}", output);
    Ok(())
}

fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

/// Plain-text rendering of a report.
pub fn render_text(report: &SystemReport) -> String {
    let mode = match report.cpu_mode {
        CpuMode::Cumulative => "since boot",
        CpuMode::Delta => "interval",
    };

    let mut out = String::new();
    out.push_str(&format!("OS:         {}\n", report.operating_system));
    out.push_str(&format!("Kernel:     {}\n", report.kernel));
    out.push_str(&format!(
        "CPU:        {} ({})\n",
        percent(report.cpu_utilization),
        mode
    ));
    out.push_str(&format!(
        "Memory:     {}\n",
        percent(report.memory_utilization)
    ));
    out.push_str(&format!(
        "Processes:  {} total, {} running\n",
        report.total_processes, report.running_processes
    ));
    out.push_str(&format!("Up Time:    {}\n", report.uptime));
    out.push('\n');
    out.push_str(&format!(
        "{:>7}  {:<12} {:>6} {:>8} {:>10}  {}\n",
        "PID", "USER", "CPU%", "RAM[MB]", "TIME+", "COMMAND"
    ));
    for p in &report.processes {
        out.push_str(&format!(
            "{:>7}  {:<12} {:>6.1} {:>8} {:>10}  {}\n",
            p.pid,
            truncate(&p.user, 12),
            p.cpu_utilization * 100.0,
            p.ram_mb,
            format_elapsed(p.uptime_seconds),
            truncate(&p.command, COMMAND_WIDTH)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use herakles_process_monitor::ProcessRecord;

    fn report() -> SystemReport {
        SystemReport {
            sampled_at: Utc::now(),
            operating_system: "Ubuntu 24.04.1 LTS".into(),
            kernel: "6.8.0-45-generic".into(),
            memory_utilization: 0.75,
            cpu_utilization: 0.125,
            cpu_mode: CpuMode::Cumulative,
            uptime_seconds: 3725,
            uptime: "01:02:05".into(),
            total_processes: 4321,
            running_processes: 3,
            processes: vec![ProcessRecord {
                pid: 42,
                user: "alice".into(),
                command: "/usr/bin/python3 -m http.server".into(),
                cpu_utilization: 0.25,
                ram_mb: 51,
                uptime_seconds: 65,
                uptime: "00:01:05".into(),
            }],
        }
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&report());
        assert!(text.contains("Kernel:     6.8.0-45-generic"));
        assert!(text.contains("CPU:        12.5% (since boot)"));
        assert!(text.contains("Memory:     75.0%"));
        assert!(text.contains("Processes:  4321 total, 3 running"));
        assert!(text.contains("Up Time:    01:02:05"));
        assert!(text.contains("alice"));
        assert!(text.contains("25.0"));
        assert!(text.contains("00:01:05"));
        assert!(text.contains("/usr/bin/python3 -m http.server"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
