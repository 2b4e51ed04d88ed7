// src/cli/logging.rs

use crate::constants::LOG_LEVEL_ENV;
use log::LevelFilter;
use std::env;
use thiserror::Error;

/// Failures while configuring the logger.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// The level override holds a value that names no level.
    #[error("Unrecognized log level '{value}' in {var}")]
    UnknownLevel { var: &'static str, value: String },
    /// Another logger was installed first.
    #[error("Could not install the logger: {0}")]
    Install(#[from] log::SetLoggerError),
}

/// Parses a log level override. Blank or absent values mean "no override".
///
/// Accepts the `log` level names plus the classic aliases `severe`, `warning`,
/// `config`, `fine`, `finer`, `finest` and `all`, all case-insensitive.
pub fn parse_level(value: Option<&str>) -> Result<Option<LevelFilter>, LoggingError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    let level = match value.to_uppercase().as_str() {
        "OFF" => LevelFilter::Off,
        "ERROR" | "SEVERE" => LevelFilter::Error,
        "WARN" | "WARNING" => LevelFilter::Warn,
        "INFO" | "CONFIG" => LevelFilter::Info,
        "DEBUG" | "FINE" | "FINER" => LevelFilter::Debug,
        "TRACE" | "FINEST" | "ALL" => LevelFilter::Trace,
        _ => {
            return Err(LoggingError::UnknownLevel {
                var: LOG_LEVEL_ENV,
                value: value.to_string(),
            });
        }
    };
    Ok(Some(level))
}

/// Installs the `env_logger` backend.
///
/// `RUST_LOG` is honoured as usual; `CMDKIT_LOG_LEVEL` overrides the level of
/// this crate's own log records.
pub fn init() -> Result<(), LoggingError> {
    let override_level = parse_level(env::var(LOG_LEVEL_ENV).ok().as_deref())?;

    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = override_level {
        builder.filter_module(env!("CARGO_CRATE_NAME"), level);
    }
    builder.try_init()?;

    if let Some(level) = override_level {
        log::trace!("Overridden log level to {} by env var {}", level, LOG_LEVEL_ENV);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_override() {
        assert_eq!(parse_level(None).unwrap(), None);
        assert_eq!(parse_level(Some("   ")).unwrap(), None);
    }

    #[test]
    fn test_level_names_are_case_insensitive() {
        assert_eq!(parse_level(Some("debug")).unwrap(), Some(LevelFilter::Debug));
        assert_eq!(parse_level(Some("WARN")).unwrap(), Some(LevelFilter::Warn));
        assert_eq!(parse_level(Some(" Off ")).unwrap(), Some(LevelFilter::Off));
    }

    #[test]
    fn test_classic_aliases() {
        assert_eq!(parse_level(Some("severe")).unwrap(), Some(LevelFilter::Error));
        assert_eq!(parse_level(Some("FINE")).unwrap(), Some(LevelFilter::Debug));
        assert_eq!(parse_level(Some("finest")).unwrap(), Some(LevelFilter::Trace));
    }

    #[test]
    fn test_unknown_level_fails() {
        let err = parse_level(Some("loud")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unrecognized log level 'loud' in CMDKIT_LOG_LEVEL"
        );
    }
}
