//! Tracing subscriber setup.
//!
//! Priority: `ROLLCALL_LOG` directives, then `RUST_LOG`, then `--log-level`.
//! Console commands log to stderr. The attendance screen owns the terminal,
//! so while it runs logs go to `<data_dir>/rollcall.log` instead.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Result;
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::types::LogLevel;

pub const LOG_FILE_NAME: &str = "rollcall.log";

pub enum LogSink<'a> {
    Stderr,
    /// Append to `<dir>/rollcall.log`
    File(&'a Path),
}

fn build_env_filter(level: LogLevel) -> EnvFilter {
    if let Ok(directives) = std::env::var("ROLLCALL_LOG")
        && let Ok(filter) = EnvFilter::try_new(&directives)
    {
        return filter;
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(format!("warn,rollcall={level},rollcall_runtime={level}"))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(level: LogLevel, sink: LogSink<'_>) -> Result<()> {
    let filter = build_env_filter(level);
    match sink {
        LogSink::Stderr => {
            let layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .without_time()
                .compact();
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init();
        }
        LogSink::File(dir) => {
            std::fs::create_dir_all(dir)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(LOG_FILE_NAME))?;
            let layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true);
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init();
        }
    }
    Ok(())
}
