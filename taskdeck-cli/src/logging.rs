use std::io::{self, IsTerminal};

use shared::config::{LogFormat, LoggingConfig};
use tracing_subscriber::{EnvFilter, fmt};

/// Initializes the tracing subscriber, writing to stderr so command output
/// stays clean.
pub fn initialize_tracing(logging: &LoggingConfig) -> String {
    let env_filter = build_env_filter(logging);

    let fmt_builder = fmt::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true);

    let result = if matches!(logging.format, LogFormat::Json) {
        fmt_builder.json().with_ansi(false).try_init()
    } else {
        fmt_builder.with_ansi(io::stderr().is_terminal()).try_init()
    };
    if let Err(err) = result {
        eprintln!("warning: tracing already initialized: {err}");
    }

    logging.level.clone()
}

/// `RUST_LOG` wins; otherwise the configured directive, then `warn`.
fn build_env_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}
