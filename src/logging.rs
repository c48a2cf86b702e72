//! Tracing setup: rolling file output plus console, filterable via
//! `RUST_LOG` or the configured level.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::AppConfig;

/// Unrecognized values fall back to a single unrotated file.
fn rotation(kind: &str) -> Rotation {
    match kind {
        "hourly" => Rotation::HOURLY,
        "daily" => Rotation::DAILY,
        _ => Rotation::NEVER,
    }
}

/// Installs the global subscriber. The returned guard owns the background
/// log writer; dropping it flushes and stops file output.
pub fn init_logging(config: &AppConfig) -> WorkerGuard {
    let appender = RollingFileAppender::new(
        rotation(&config.rotation),
        &config.log_dir,
        &config.log_file,
    );
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    let file_layer = fmt::layer().with_writer(file_writer).with_ansi(false);
    let registry = tracing_subscriber::registry().with(filter);

    if config.use_json {
        // JSON goes to the file only; operators tail it with jq.
        registry.with(file_layer.json().with_target(true)).init();
    } else {
        let console_layer = fmt::layer().with_target(false).with_ansi(true);
        registry
            .with(file_layer.with_target(false))
            .with(console_layer)
            .init();
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_parsing_defaults_to_never() {
        assert_eq!(rotation("hourly"), Rotation::HOURLY);
        assert_eq!(rotation("daily"), Rotation::DAILY);
        assert_eq!(rotation("never"), Rotation::NEVER);
        assert_eq!(rotation("weekly"), Rotation::NEVER);
        assert_eq!(rotation(""), Rotation::NEVER);
    }
}
