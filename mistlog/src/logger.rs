// mistlog/src/logger.rs
//! Logging setup for the `mistlog` binary.
//!
//! Messages go to stderr as `[LEVEL target] message`, keeping stdout free for
//! records and tables.

use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger exactly once.
///
/// With `Some(level)` that level applies to the `mistlog` and `mistlog_core`
/// targets, overriding `RUST_LOG` for them. With `None`, `RUST_LOG` decides
/// and defaults to `warn`.
pub fn init_logger(level: Option<LevelFilter>) {
    INIT.call_once(|| {
        let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
        if let Some(level) = level {
            builder.filter_module("mistlog", level);
            builder.filter_module("mistlog_core", level);
        }
        builder
            .format(|buf, record| writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args()))
            .try_init()
            .ok();
    });
}

/// Maps the global CLI flags to a level override.
pub fn level_from_flags(quiet: bool, debug: bool, disable_debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug && !disable_debug {
        Some(LevelFilter::Debug)
    } else if disable_debug {
        Some(LevelFilter::Info)
    } else {
        None
    }
}
