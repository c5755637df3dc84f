//! Diagnostics for the `gamegen` binary.
//!
//! Generator spans (`generator.generate`, `corpus.generate`, `cli.run`) and
//! PLOD budget warnings go to stderr; stdout carries only the topology
//! summary. `GAMEGEN_LOG_FORMAT` picks line or JSON records.

use std::{env, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

const LOG_FORMAT_ENV: &str = "GAMEGEN_LOG_FORMAT";

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Shape of each diagnostic record on stderr.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    /// One line per event, with span timings on close.
    Human,
    /// One JSON object per event, carrying the active span list.
    Json,
}

/// Reasons `gamegen` could not set up its diagnostics.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// `GAMEGEN_LOG_FORMAT` was set to bytes that are not UTF-8.
    #[error("`{name}` is not valid UTF-8: {source}")]
    InvalidUnicode {
        /// Variable that was read.
        name: &'static str,
        /// Lookup failure from `std::env`.
        #[source]
        source: env::VarError,
    },
    /// `GAMEGEN_LOG_FORMAT` named neither `human` nor `json`.
    #[error("log format `{provided}` is neither `human` nor `json`")]
    UnsupportedFormat {
        /// Value after trimming and lowercasing.
        provided: String,
    },
    /// Another global subscriber was already in place.
    #[error("a global subscriber is already installed: {source}")]
    InstallFailed {
        /// Rejection from the registry.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}

/// Routes `gamegen` diagnostics to stderr before a command runs.
///
/// `RUST_LOG` filters events (default `info`, which shows corpus summaries
/// and PLOD warnings but hides per-graph `debug!` records). A subscriber
/// installed earlier, for example by a test harness, is left in place, and
/// calling this twice does nothing.
///
/// # Errors
/// Returns [`LoggingError`] when `GAMEGEN_LOG_FORMAT` is not UTF-8 or names
/// an unknown format.
pub fn init_logging() -> Result<(), LoggingError> {
    if INITIALISED.get().is_some() {
        return Ok(());
    }

    match install_subscriber(log_format()?) {
        Ok(()) | Err(LoggingError::InstallFailed { .. }) => {}
        Err(err) => return Err(err),
    }
    let _ = INITIALISED.set(());
    Ok(())
}

fn log_format() -> Result<LogFormat, LoggingError> {
    match env::var(LOG_FORMAT_ENV) {
        Ok(raw) => parse_log_format(&raw),
        Err(env::VarError::NotPresent) => Ok(LogFormat::Human),
        Err(source @ env::VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode {
            name: LOG_FORMAT_ENV,
            source,
        }),
    }
}

fn install_subscriber(format: LogFormat) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let fmt_layer = match format {
        LogFormat::Json => fmt_layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
        LogFormat::Human => fmt_layer.boxed(),
    };

    // Another logger may already own the `log` slot; keep it if so.
    let _ = LogTracer::init();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|source| LoggingError::InstallFailed { source })
}

fn parse_log_format(raw: &str) -> Result<LogFormat, LoggingError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "human" => Ok(LogFormat::Human),
        "json" => Ok(LogFormat::Json),
        other => Err(LoggingError::UnsupportedFormat {
            provided: other.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("human", LogFormat::Human)]
    #[case("HUMAN", LogFormat::Human)]
    #[case(" json ", LogFormat::Json)]
    fn supported_formats_parse(#[case] raw: &str, #[case] expected: LogFormat) {
        assert_eq!(parse_log_format(raw).expect("format must parse"), expected);
    }

    #[test]
    fn unknown_formats_are_rejected() {
        let err = parse_log_format("xml").expect_err("xml is not supported");
        assert!(matches!(err, LoggingError::UnsupportedFormat { provided } if provided == "xml"));
    }

    #[test]
    fn unsupported_format_message_names_the_normalised_value() {
        let err = parse_log_format(" XML ").expect_err("xml is not supported");
        assert_eq!(err.to_string(), "log format `xml` is neither `human` nor `json`");
    }

    #[test]
    fn init_logging_is_idempotent() {
        init_logging().expect("logging must initialise");
        init_logging().expect("subsequent calls must be no-ops");
    }
}
