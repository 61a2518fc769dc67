// Error reporting: structured, redacted error output

use crate::context::ErrorContext;
use crate::types::OncoBillError;
use serde::Serialize;

/// Error as presented to operators and callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub error_code: &'static str,
    pub error_type: &'static str,
    pub message: String,
    pub context: ErrorContext,
}

#[derive(Debug, Default)]
pub struct ErrorReporter;

impl ErrorReporter {
    pub fn new() -> Self {
        Self
    }

    /// Log the error and build its report. The message is redacted because
    /// validation errors can echo request content.
    pub fn report(&self, error: &OncoBillError, context: ErrorContext) -> ErrorReport {
        let message = logger_redacted::redact(&error.to_string());
        tracing::error!(
            error_code = error.code(),
            error_type = error.error_type(),
            request_id = context.request_id.as_deref(),
            "{}",
            message
        );
        ErrorReport {
            error_code: error.code(),
            error_type: error.error_type(),
            message,
            context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_redacts_message() {
        let err = OncoBillError::validation("unexpected contact jane.roe@example.org in text");
        let report = ErrorReporter::new().report(&err, ErrorContext::new().with_request_id("req-1"));
        assert_eq!(report.error_code, "VALIDATION_1001");
        assert_eq!(report.error_type, "validation");
        assert!(!report.message.contains("jane.roe@example.org"));
        assert_eq!(report.context.request_id.as_deref(), Some("req-1"));
    }
}
