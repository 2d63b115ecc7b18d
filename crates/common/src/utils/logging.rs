use std::io;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info,sqlx=warn";

/// Output flavour of the tracing subscriber, picked from `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") { LogFormat::Json } else { LogFormat::Compact }
    }

    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT").map(|v| Self::parse(&v)).unwrap_or(LogFormat::Compact)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize tracing subscriber with sensible defaults and stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info` with sqlx statements muted to `warn`
/// - Safe to call more than once (later calls are no-ops)
pub fn init_logging_default() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output.
pub fn init_logging_json() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .json()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize with the format chosen by `LOG_FORMAT` (`compact` or `json`).
pub fn init_logging_from_env() {
    match LogFormat::from_env() {
        LogFormat::Compact => init_logging_default(),
        LogFormat::Json => init_logging_json(),
    }
}
