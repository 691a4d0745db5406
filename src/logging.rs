//! Logging infrastructure.
//!
//! Structured logging via the `log` facade with an `env_logger` backend.
//! The level is determined by (in priority order):
//!
//! 1. `RUST_LOG` environment variable (if set)
//! 2. CLI flags: `--quiet` (errors only) or `-v`/`-vv` (debug/trace)
//! 3. Default: info level
//!
//! Debug builds include timestamps and module paths; release builds use a
//! compact level-and-message format.

use env_logger::Builder;
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Initialize the logging subsystem from CLI verbosity flags.
///
/// Call once at startup, before any logging calls.
///
/// # Arguments
///
/// * `verbose` - Verbosity count from the CLI (0=info, 1=debug, 2+=trace)
/// * `quiet` - If true, only show errors (overridden by `RUST_LOG`)
///
/// # Panics
///
/// Panics if called more than once; `env_logger` can only be initialized
/// once per process.
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();

    if env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    configure_format(&mut builder);
    builder.init();

    log::debug!("Logging initialized at level: {}", log::max_level());
}

/// Determine the log level from CLI flags. `quiet` wins over `verbose`.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Debug builds get timestamp + module path; release builds stay compact.
fn configure_format(builder: &mut Builder) {
    #[cfg(debug_assertions)]
    {
        builder.format(|buf, record| {
            let timestamp = buf.timestamp_seconds();
            let level = record.level();
            let level_style = buf.default_level_style(level);
            writeln!(
                buf,
                "{} {level_style}{:<5}{level_style:#} [{}] {}",
                timestamp,
                level,
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        });
    }

    #[cfg(not(debug_assertions))]
    {
        builder.format(|buf, record| {
            let level = record.level();
            let level_style = buf.default_level_style(level);
            writeln!(
                buf,
                "{level_style}{:<5}{level_style:#} {}",
                level,
                record.args()
            )
        });
    }
}
