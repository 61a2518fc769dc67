//! Logging setup with automatic PHI/PII redaction
//!
//! Treatment recommendations and patient context can carry identifiers, so
//! anything derived from them is logged through the `redacted_*` macros,
//! which pass the formatted message through a shared [`PiiRedactor`] before
//! it reaches the subscriber.
//!
//! # Detected Data Types
//!
//! - **Email Addresses**: user@example.com → EMAIL[hash]
//! - **Phone Numbers**: (555) 123-4567 → PHONE[hash]
//! - **SSN**: 123-45-6789 → SSN[hash]
//! - **Medical Record Numbers**: MRN 123456 → MRN[hash]
//! - **Dates**: 04/12/1971 → DATE[hash]
//!
//! # Example
//!
//! ```rust
//! use logger_redacted::{init, redacted_info, LoggerConfig};
//!
//! init(&LoggerConfig::default()).ok();
//! redacted_info!("Report requested by {}", "jane.roe@example.org");
//! // Output: "Report requested by EMAIL[...]"
//! ```

pub mod config;
pub mod macros;
pub mod redactor;

pub use config::*;
pub use redactor::*;

#[doc(hidden)]
pub use tracing;

use lazy_static::lazy_static;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

lazy_static! {
    static ref GLOBAL_REDACTOR: PiiRedactor = PiiRedactor::default();
}

static REDACTION_ENABLED: AtomicBool = AtomicBool::new(true);

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Logger already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Redact `text` with the shared redactor, unless redaction is switched off.
pub fn redact(text: &str) -> String {
    if REDACTION_ENABLED.load(Ordering::Relaxed) {
        GLOBAL_REDACTOR.redact(text)
    } else {
        text.to_string()
    }
}

pub fn set_redaction_enabled(enabled: bool) {
    REDACTION_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Fails when the configured filter does not parse or a global subscriber is
/// already installed.
pub fn init(config: &LoggerConfig) -> Result<(), LoggerError> {
    set_redaction_enabled(config.redaction_enabled);

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| LoggerError::Filter(e.to_string()))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match config.format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_uses_global_redactor() {
        let redacted = redact("reach me at 555-123-4567");
        assert!(redacted.starts_with("reach me at PHONE["));
    }

    #[test]
    fn test_invalid_filter_rejected() {
        let config = LoggerConfig {
            log_level: "oncobill=verbose".to_string(),
            ..Default::default()
        };
        if std::env::var("RUST_LOG").is_err() {
            assert!(matches!(init(&config), Err(LoggerError::Filter(_))));
        }
    }
}
