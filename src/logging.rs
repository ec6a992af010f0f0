//! Logging bootstrap for the dtl binary.
//!
//! The library only talks to the `log` facade. The binary calls
//! [`init_logging`] once at startup to route records to stderr.
//!
//! Level priority: explicit `--log-level`, then `RUST_LOG`, then the
//! configured default.

use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};
use once_cell::sync::OnceCell;
use thiserror::Error;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    spec: String,
    _logger: LoggerHandle,
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log level `{spec}`: {source}")]
    InvalidLevel {
        spec: String,
        #[source]
        source: FlexiLoggerError,
    },

    #[error("failed to start logger: {0}")]
    Start(#[source] FlexiLoggerError),
}

/// Pick the effective level spec
pub fn resolve_level(explicit: Option<&str>, fallback: &str) -> String {
    if let Some(level) = explicit.filter(|level| !level.trim().is_empty()) {
        return level.trim().to_string();
    }
    match std::env::var("RUST_LOG") {
        Ok(env) if !env.trim().is_empty() => env.trim().to_string(),
        _ => fallback.to_string(),
    }
}

/// Start stderr logging once per process.
///
/// Returns the level spec in effect. Later calls do not reconfigure the
/// logger and report the spec of the first successful call.
pub fn init_logging(explicit: Option<&str>, fallback: &str) -> Result<&'static str, LoggingError> {
    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, LoggingError> {
        let spec = resolve_level(explicit, fallback);
        let logger = Logger::try_with_str(&spec)
            .map_err(|source| LoggingError::InvalidLevel {
                spec: spec.clone(),
                source,
            })?
            .log_to_stderr()
            .start()
            .map_err(LoggingError::Start)?;

        log::debug!("logging initialized with `{}`", spec);
        Ok(LoggingState {
            spec,
            _logger: logger,
        })
    })?;
    Ok(state.spec.as_str())
}

/// Active level spec, or `None` before initialization
pub fn logging_status() -> Option<&'static str> {
    LOGGING_STATE.get().map(|state| state.spec.as_str())
}
