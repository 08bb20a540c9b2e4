//! Logging Infrastructure
//!
//! Structured logging for applications embedding the client.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use crate::{ClientError, ClientResult};

const LOG_FILE_PREFIX: &str = "shine-client";

/// Logger options
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
    /// Write to a daily rolling file in this directory instead of stdout
    pub log_dir: Option<PathBuf>,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            log_dir: None,
        }
    }
}

/// Initialize the logger with defaults
pub fn init_logger() -> ClientResult<()> {
    init_logger_with(&LogOptions::default())
}

/// Initialize the global subscriber. Fails if one is already installed.
pub fn init_logger_with(options: &LogOptions) -> ClientResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&options.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let result = match (&options.log_dir, options.json) {
        (Some(dir), json) => {
            std::fs::create_dir_all(dir)
                .map_err(|e| ClientError::Config(format!("log dir {}: {e}", dir.display())))?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            if json {
                builder.json().with_writer(appender).try_init()
            } else {
                builder.with_ansi(false).with_writer(appender).try_init()
            }
        }
        (None, true) => builder.json().try_init(),
        (None, false) => builder.try_init(),
    };

    result.map_err(|e| ClientError::Config(format!("logger: {e}")))
}
