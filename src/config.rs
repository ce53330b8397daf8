//! Configuration management for herakles-process-monitor.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats.

use crate::cli::{Args, ConfigFormat, LogLevel};
use clap::ValueEnum;
use herakles_process_monitor::paths::{DEFAULT_OS_RELEASE, DEFAULT_PASSWD, DEFAULT_PROC_ROOT};
use herakles_process_monitor::{ClockTicks, CpuMode, ProcPaths};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

// Default configuration constants
pub const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 1000;

/// Enhanced configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Accounting file locations
    #[serde(alias = "proc-root")]
    pub proc_root: Option<PathBuf>,
    #[serde(alias = "os-release-path")]
    pub os_release_path: Option<PathBuf>,
    #[serde(alias = "passwd-path")]
    pub passwd_path: Option<PathBuf>,

    /// Kernel clock ticks per second; detected via sysconf when unset
    #[serde(alias = "ticks-per-second")]
    pub ticks_per_second: Option<u64>,

    // CPU utilisation
    /// "cumulative" | "delta"
    #[serde(alias = "cpu-mode")]
    pub cpu_mode: Option<String>,
    #[serde(alias = "sample-interval-ms")]
    pub sample_interval_ms: Option<u64>,

    // Process sampling
    #[serde(alias = "max-processes")]
    pub max_processes: Option<usize>,

    // Logging
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proc_root: Some(PathBuf::from(DEFAULT_PROC_ROOT)),
            os_release_path: Some(PathBuf::from(DEFAULT_OS_RELEASE)),
            passwd_path: Some(PathBuf::from(DEFAULT_PASSWD)),
            ticks_per_second: None,
            cpu_mode: Some("cumulative".into()),
            sample_interval_ms: Some(DEFAULT_SAMPLE_INTERVAL_MS),
            max_processes: None,
            log_level: Some("info".into()),
        }
    }
}

/// Parses a `cpu_mode` value.
pub fn parse_cpu_mode(mode: &str) -> Option<CpuMode> {
    match mode {
        "cumulative" => Some(CpuMode::Cumulative),
        "delta" => Some(CpuMode::Delta),
        _ => None,
    }
}

/// Parses a `log_level` value, ignoring case.
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    LogLevel::from_str(level, true).ok()
}

impl Config {
    /// Accounting file locations with defaults filled in.
    pub fn proc_paths(&self) -> ProcPaths {
        let defaults = ProcPaths::default();
        ProcPaths {
            proc_root: self.proc_root.clone().unwrap_or(defaults.proc_root),
            os_release: self.os_release_path.clone().unwrap_or(defaults.os_release),
            passwd: self.passwd_path.clone().unwrap_or(defaults.passwd),
        }
    }

    /// Configured tick rate, or the value reported by the system.
    pub fn clock_ticks(&self) -> ClockTicks {
        match self.ticks_per_second {
            Some(tps) => ClockTicks::new(tps),
            None => ClockTicks::detect(),
        }
    }

    /// Effective CPU mode. Unknown values are rejected by validation and
    /// read as cumulative here.
    pub fn cpu_mode(&self) -> CpuMode {
        self.cpu_mode
            .as_deref()
            .and_then(parse_cpu_mode)
            .unwrap_or_default()
    }

    pub fn sample_interval_ms(&self) -> u64 {
        self.sample_interval_ms.unwrap_or(DEFAULT_SAMPLE_INTERVAL_MS)
    }

    /// Effective log level. Unknown values are rejected by validation and
    /// read as info here.
    pub fn log_level(&self) -> LogLevel {
        self.log_level
            .as_deref()
            .and_then(parse_log_level)
            .unwrap_or(LogLevel::Info)
    }
}

/// Validate effective config (used by --check-config and at startup)
pub fn validate_effective_config(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if cfg.ticks_per_second == Some(0) {
        return Err("ticks_per_second must be greater than 0".into());
    }

    if let Some(mode) = cfg.cpu_mode.as_deref() {
        if parse_cpu_mode(mode).is_none() {
            return Err(format!(
                "Invalid cpu_mode '{}', expected 'cumulative' or 'delta'",
                mode
            )
            .into());
        }
    }

    if cfg.cpu_mode() == CpuMode::Delta && cfg.sample_interval_ms == Some(0) {
        return Err("sample_interval_ms must be greater than 0 in delta mode".into());
    }

    if let Some(level) = cfg.log_level.as_deref() {
        if parse_log_level(level).is_none() {
            return Err(format!(
                "Invalid log_level '{}', expected off, error, warn, info, debug or trace",
                level
            )
            .into());
        }
    }

    if cfg.max_processes == Some(0) {
        return Err("max_processes must be greater than 0 when set".into());
    }

    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref())?
    };

    if let Some(root) = &args.proc_root {
        config.proc_root = Some(root.clone());
    }
    if let Some(path) = &args.os_release {
        config.os_release_path = Some(path.clone());
    }
    if let Some(path) = &args.passwd {
        config.passwd_path = Some(path.clone());
    }
    if let Some(tps) = args.ticks_per_second {
        config.ticks_per_second = Some(tps);
    }
    if let Some(mode) = &args.cpu_mode {
        config.cpu_mode = Some(mode.clone());
    }
    if let Some(ms) = args.sample_interval_ms {
        config.sample_interval_ms = Some(ms);
    }
    if let Some(max) = args.max_processes {
        config.max_processes = Some(max);
    }
    if let Some(level) = args.log_level {
        config.log_level = Some(level.as_str().to_string());
    }

    Ok(config)
}

/// Enhanced configuration loading with multiple format support
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            // Try default locations
            let defaults = [
                "/etc/herakles/process-monitor.yaml",
                "/etc/herakles/process-monitor.yml",
                "/etc/herakles/process-monitor.json",
                "./herakles-process-monitor.yaml",
                "./herakles-process-monitor.yml",
                "./herakles-process-monitor.json",
            ];

            match defaults.iter().find(|p| Path::new(p).exists()) {
                Some(p) => PathBuf::from(p),
                None => return Ok(Config::default()),
            }
        }
    };

    if !path.exists() {
        return Err(format!("Config file not found: {}", path.display()).into());
    }

    let content = fs::read_to_string(&path)?;

    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => {
            let config: Config = serde_json::from_str(&content)?;
            info!("Loaded JSON configuration from: {}", path.display());
            Ok(config)
        }
        Some("toml") => {
            let config: Config = toml::from_str(&content)?;
            info!("Loaded TOML configuration from: {}", path.display());
            Ok(config)
        }
        _ => {
            // Default to YAML
            let config: Config = serde_yaml::from_str(&content)?;
            info!("Loaded YAML configuration from: {}", path.display());
            Ok(config)
        }
    }
}

/// Renders configuration in the requested format
pub fn render_config(
    config: &Config,
    format: &ConfigFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(output)
}

/// Shows configuration in requested format
pub fn show_config(config: &Config, format: &ConfigFormat) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", render_config(config, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = Config::default();
        assert!(validate_effective_config(&cfg).is_ok());
        assert_eq!(cfg.cpu_mode(), CpuMode::Cumulative);
        assert_eq!(cfg.proc_paths(), ProcPaths::default());
        assert_eq!(cfg.sample_interval_ms(), 1000);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut cfg = Config::default();
        cfg.ticks_per_second = Some(0);
        assert!(validate_effective_config(&cfg).is_err());

        let mut cfg = Config::default();
        cfg.cpu_mode = Some("instant".into());
        assert!(validate_effective_config(&cfg).is_err());

        let mut cfg = Config::default();
        cfg.cpu_mode = Some("delta".into());
        cfg.sample_interval_ms = Some(0);
        assert!(validate_effective_config(&cfg).is_err());

        let mut cfg = Config::default();
        cfg.max_processes = Some(0);
        assert!(validate_effective_config(&cfg).is_err());

        let mut cfg = Config::default();
        cfg.log_level = Some("verbose".into());
        assert!(validate_effective_config(&cfg).is_err());
    }

    #[test]
    fn test_clock_ticks_override() {
        let mut cfg = Config::default();
        cfg.ticks_per_second = Some(250);
        assert_eq!(cfg.clock_ticks().per_second(), 250);
    }

    #[test]
    fn test_load_yaml_json_toml() {
        let dir = tempdir().expect("Failed to create temp dir");

        let yaml = dir.path().join("cfg.yaml");
        fs::write(&yaml, "proc_root: /tmp/fakeproc\ncpu-mode: delta\n").expect("write yaml");
        let cfg = load_config(Some(&yaml)).expect("yaml loads");
        assert_eq!(cfg.proc_root, Some(PathBuf::from("/tmp/fakeproc")));
        assert_eq!(cfg.cpu_mode(), CpuMode::Delta);

        let json = dir.path().join("cfg.json");
        fs::write(&json, r#"{"ticks_per_second": 300, "max_processes": 5}"#).expect("write json");
        let cfg = load_config(Some(&json)).expect("json loads");
        assert_eq!(cfg.ticks_per_second, Some(300));
        assert_eq!(cfg.max_processes, Some(5));

        let toml_path = dir.path().join("cfg.toml");
        fs::write(&toml_path, "passwd_path = \"/tmp/passwd\"\n").expect("write toml");
        let cfg = load_config(Some(&toml_path)).expect("toml loads");
        assert_eq!(cfg.proc_paths().passwd, PathBuf::from("/tmp/passwd"));
        assert_eq!(cfg.proc_paths().proc_root, PathBuf::from("/proc"));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempdir().expect("Failed to create temp dir");
        assert!(load_config(Some(&dir.path().join("missing.yaml"))).is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let yaml = dir.path().join("cfg.yaml");
        fs::write(&yaml, "ticks_per_second: 100\nproc_root: /from/file\n").expect("write yaml");

        let args = Args::parse_from([
            "herakles-process-monitor",
            "--config",
            yaml.to_str().expect("utf-8 path"),
            "--ticks-per-second",
            "250",
        ]);
        let cfg = resolve_config(&args).expect("resolves");
        assert_eq!(cfg.ticks_per_second, Some(250));
        assert_eq!(cfg.proc_root, Some(PathBuf::from("/from/file")));
    }

    #[test]
    fn test_log_level_precedence() {
        let dir = tempdir().expect("Failed to create temp dir");
        let yaml = dir.path().join("cfg.yaml");
        fs::write(&yaml, "log_level: DEBUG\n").expect("write yaml");
        let path = yaml.to_str().expect("utf-8 path");

        let args = Args::parse_from(["herakles-process-monitor", "--config", path]);
        let cfg = resolve_config(&args).expect("resolves");
        assert!(validate_effective_config(&cfg).is_ok());
        assert_eq!(cfg.log_level(), LogLevel::Debug);

        let args = Args::parse_from([
            "herakles-process-monitor",
            "--config",
            path,
            "--log-level",
            "warn",
        ]);
        assert_eq!(resolve_config(&args).expect("resolves").log_level(), LogLevel::Warn);

        let args = Args::parse_from(["herakles-process-monitor", "--no-config"]);
        assert_eq!(resolve_config(&args).expect("resolves").log_level(), LogLevel::Info);

        let mut cfg = Config::default();
        cfg.log_level = None;
        assert_eq!(cfg.log_level(), LogLevel::Info);
    }

    #[test]
    fn test_render_config_formats() {
        let cfg = Config::default();
        for format in [ConfigFormat::Yaml, ConfigFormat::Json, ConfigFormat::Toml] {
            let text = render_config(&cfg, &format).expect("renders");
            assert!(text.contains("proc_root"));
        }
    }
}
