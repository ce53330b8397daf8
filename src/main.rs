//! herakles-process-monitor - version 0.1.0
//!
//! One-shot /proc sampler with tracing logging.
//! This is the main entry point that resolves configuration and dispatches subcommands.

mod cli;
mod commands;
mod config;

use clap::Parser;
use tracing::{debug, info, Level};

use cli::{Args, Commands, LogLevel, ReportFormat};
use commands::{command_check, command_config, command_snapshot};
use config::{resolve_config, show_config, validate_effective_config, Config};

/// Initializes tracing logging subsystem with the resolved log level.
fn setup_logging(level: LogLevel) {
    let log_level = match level {
        LogLevel::Off => return,
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return;
    }

    debug!("Logging initialized with level: {:?}", level);
}

/// Validates the resolved configuration before sampling.
/// Exits the process with error code 1 if validation fails.
fn validated(config: Config) -> Config {
    if let Err(e) = validate_effective_config(&config) {
        eprintln!("❌ Configuration invalid: {}", e);
        std::process::exit(1);
    }
    info!(
        "Sampling {} (cpu_mode={:?}, ticks_per_second={})",
        config.proc_paths().proc_root.display(),
        config.cpu_mode(),
        config.clock_ticks().per_second()
    );
    config
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = resolve_config(&args).map_err(|e| anyhow::anyhow!("{}", e))?;
    setup_logging(config.log_level());

    if args.check_config {
        if let Err(e) = validate_effective_config(&config) {
            eprintln!("❌ Configuration invalid: {}", e);
            std::process::exit(1);
        }
        println!("✅ Configuration is valid");
        return Ok(());
    }

    if args.show_config {
        return show_config(&config, &args.config_format).map_err(|e| anyhow::anyhow!("{}", e));
    }

    match &args.command {
        // Config generation needs no validated config
        Some(Commands::Config { output, format }) => {
            command_config(output.clone(), format.clone())
        }
        Some(Commands::Check) => command_check(&validated(config)),
        Some(Commands::Snapshot { format, limit }) => {
            command_snapshot(format.clone(), *limit, &validated(config))
        }
        None => command_snapshot(ReportFormat::Text, None, &validated(config)),
    }
}
