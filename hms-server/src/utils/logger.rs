//! Logging infrastructure.
//!
//! Console output in development, daily-rotated files in production.
//! `RUST_LOG` overrides the default `info` filter.

use tracing_subscriber::EnvFilter;

use crate::core::Config;

/// Initialize the global tracing subscriber.
pub fn init(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(false)
        .with_line_number(false);

    if config.is_production() {
        let log_dir = config.log_dir();
        if std::fs::create_dir_all(&log_dir).is_ok() {
            let file_appender = tracing_appender::rolling::daily(&log_dir, "hms-server");
            builder.with_writer(file_appender).with_ansi(false).init();
            return;
        }
        // Fall through to console logging if the log dir is unusable
    }

    builder.init();
}
