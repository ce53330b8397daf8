//! Config command implementation.
//!
//! Generates configuration files in various formats.

use anyhow::Context;
use std::fs;
use std::path::PathBuf;

use crate::cli::ConfigFormat;
use crate::config::{render_config, Config};

/// Generates configuration files.
pub fn command_config(output: Option<PathBuf>, format: ConfigFormat) -> anyhow::Result<()> {
    let config = Config::default();
    let output = output.unwrap_or_else(|| PathBuf::from("herakles-process-monitor.yaml"));

    let mut content = render_config(&config, &format)
        .map_err(|e| anyhow::anyhow!("Failed to render config: {}", e))?;
    if matches!(format, ConfigFormat::Yaml) {
        content = add_config_comments(content);
    }

    if output.to_string_lossy() == "-" {
        print!("{}", content);
    } else {
        fs::write(&output, content)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("✅ Configuration written to: {}", output.display());
    }

    Ok(())
}

/// Adds comments to YAML configuration.
fn add_config_comments(yaml: String) -> String {
    let comments = r#"# Herakles Process Monitor Configuration
# ======================================
#
# Accounting Files
# ----------------
# proc_root: "/proc"               # Root of the proc filesystem
# os_release_path: "/etc/os-release"
# passwd_path: "/etc/passwd"       # Account database for UID -> user name
#
# Tick Conversion
# ---------------
# ticks_per_second: null           # null = sysconf(_SC_CLK_TCK)
#
# CPU Utilisation
# ---------------
# cpu_mode: "cumulative"           # cumulative (since boot) or delta (between samples)
# sample_interval_ms: 1000         # Interval between samples in delta mode
#
# Process Sampling
# ----------------
# max_processes: null              # Maximum processes to sample (pid order)
#
# Logging
# -------
# log_level: "info"                # off, error, warn, info, debug, trace
"#;

    format!("{comments}\n{yaml}")
}
