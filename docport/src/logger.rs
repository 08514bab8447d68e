// docport/src/logger.rs
//! Logger setup for the DocPort CLI.
//!
//! All log output goes to stderr so it never mixes with command output on
//! stdout. `RUST_LOG` is honored unless an explicit level is passed.
//!
//! License: MIT OR Apache-2.0

use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;

/// Initializes the global logger. Calling it more than once is harmless.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format(|buf, record| writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args()));
    let _ = builder.try_init();
}
