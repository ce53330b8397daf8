//! Check command implementation.
//!
//! Validates that the accounting files are present and parse.

use nix::unistd::geteuid;
use std::path::Path;

use herakles_process_monitor::{Monitor, ProcessMetrics, UserDirectory};

use crate::config::{validate_effective_config, Config};

/// Validates the accounting files and configuration.
pub fn command_check(config: &Config) -> anyhow::Result<()> {
    println!("🔍 Herakles Process Monitor - System Check");
    println!("==========================================");

    let mut all_ok = true;
    let paths = config.proc_paths();
    let clock = config.clock_ticks();

    // Check proc filesystem
    println!("\n📁 Checking {} ...", paths.proc_root.display());
    if !paths.proc_root.exists() {
        println!("   ❌ {} not found", paths.proc_root.display());
        all_ok = false;
    } else {
        let monitor = Monitor::new(paths.clone(), clock);
        let system = monitor.system();

        match system.try_cpu_sample() {
            Ok(sample) => println!("   ✅ stat readable ({} CPU ticks)", sample.total()),
            Err(e) => {
                println!("   ❌ stat unusable: {}", e);
                all_ok = false;
            }
        }

        match system.try_uptime() {
            Ok(uptime) => println!("   ✅ uptime readable ({:.0}s)", uptime),
            Err(e) => {
                println!("   ❌ uptime unusable: {}", e);
                all_ok = false;
            }
        }

        let mem = system.memory_utilization();
        if mem > 0.0 {
            println!("   ✅ meminfo readable ({:.1}% used)", mem * 100.0);
        } else {
            println!("   ❌ meminfo unusable or reports no memory in use");
            all_ok = false;
        }

        let pids = system.list_process_ids();
        if pids.is_empty() {
            println!("   ❌ Cannot read any process entries");
            all_ok = false;
        } else {
            println!("   ✅ Found {} process entries", pids.len());
        }

        if paths.proc_root == Path::new("/proc") {
            let own_pid = std::process::id();
            let metrics = ProcessMetrics::new(system.clone());
            match metrics.try_accounting(own_pid) {
                Ok(acct) => println!(
                    "   ✅ Own process accounting readable ({} active ticks)",
                    acct.active_ticks()
                ),
                Err(e) => {
                    println!("   ❌ Own process accounting unusable: {}", e);
                    all_ok = false;
                }
            }
        }

        println!("   ℹ️  Clock ticks per second: {}", clock.per_second());
    }

    // Check account database
    println!("\n👤 Checking account database {} ...", paths.passwd.display());
    let users = UserDirectory::new(&paths.passwd);
    let count = users.load();
    if count == 0 {
        println!("   ❌ No accounts loaded; user names will be empty");
        all_ok = false;
    } else {
        println!("   ✅ {} accounts loaded", count);
    }

    // Check privileges
    println!("\n🔐 Checking privileges...");
    if geteuid().is_root() {
        println!("   ✅ Running as root");
    } else {
        println!("   ⚠️  Not running as root - some per-process files may be unreadable");
    }

    // Check configuration
    println!("\n⚙️  Checking configuration...");
    match validate_effective_config(config) {
        Ok(_) => println!("   ✅ Configuration is valid"),
        Err(e) => {
            println!("   ❌ Configuration invalid: {}", e);
            all_ok = false;
        }
    }

    println!("\n📋 Summary:");
    if all_ok {
        println!("   ✅ All checks passed - system is ready");
        Ok(())
    } else {
        println!("   ❌ Some checks failed - please review warnings");
        std::process::exit(1);
    }
}
