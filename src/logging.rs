//! Logging/tracing setup shared by the binaries

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, prelude::*, registry::Registry, EnvFilter, Layer};

use crate::config::{LogFormat, LogTarget, LoggingConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the logging/tracing infrastructure
///
/// `RUST_LOG` takes precedence over the configured level. The returned guard
/// must be kept alive for the duration of the program so file output is
/// flushed.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut guard = None;

    if matches!(config.target, LogTarget::Console | LogTarget::Both) {
        layers.push(format_layer(&config.format, None));
    }

    if matches!(config.target, LogTarget::File | LogTarget::Both) {
        let (writer, file_guard) = create_file_writer(config);
        layers.push(format_layer(&config.format, Some(writer)));
        guard = Some(file_guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .init();

    guard
}

/// Quiet stderr logging for command line tools
pub fn init_cli_logging(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(env_filter)
        .init();
}

fn format_layer(format: &LogFormat, writer: Option<NonBlocking>) -> BoxedLayer {
    match (format, writer) {
        (LogFormat::Json, None) => fmt::layer().json().with_target(true).boxed(),
        (LogFormat::Json, Some(w)) => fmt::layer().json().with_target(true).with_writer(w).boxed(),
        (LogFormat::Compact, None) => fmt::layer().compact().with_target(false).boxed(),
        (LogFormat::Compact, Some(w)) => fmt::layer()
            .compact()
            .with_target(false)
            .with_ansi(false)
            .with_writer(w)
            .boxed(),
        (LogFormat::Pretty, None) => fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .boxed(),
        (LogFormat::Pretty, Some(w)) => fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(false)
            .with_writer(w)
            .boxed(),
    }
}

/// Create a file writer with optional daily rotation
fn create_file_writer(config: &LoggingConfig) -> (NonBlocking, WorkerGuard) {
    if let Err(e) = std::fs::create_dir_all(&config.log_dir) {
        eprintln!(
            "Warning: Failed to create log directory {:?}: {}",
            config.log_dir, e
        );
    }

    let file_appender = if config.daily_rotation {
        tracing_appender::rolling::daily(&config.log_dir, &config.log_prefix)
    } else {
        tracing_appender::rolling::never(&config.log_dir, &config.log_prefix)
    };

    tracing_appender::non_blocking(file_appender)
}
