use error_common::{codes, OncoBillError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("Validation error: missing required {section} field: {field}")]
    MissingField {
        section: &'static str,
        field: &'static str,
    },

    #[error("Validation error: recommendation text is {size} bytes, limit is {limit}")]
    TextTooLarge { size: usize, limit: usize },

    #[error("Reference table error: {0}")]
    Catalog(String),
}

impl BillingError {
    /// Request problems the caller can correct
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BillingError::MissingField { .. } | BillingError::TextTooLarge { .. }
        )
    }
}

impl From<BillingError> for OncoBillError {
    fn from(err: BillingError) -> Self {
        let (code, message) = match err {
            BillingError::Catalog(msg) => return OncoBillError::CatalogError(msg),
            BillingError::MissingField { section, field } => (
                codes::validation::MISSING_REQUIRED_FIELD,
                format!("missing required {section} field: {field}"),
            ),
            BillingError::TextTooLarge { size, limit } => (
                codes::validation::INPUT_TOO_LARGE,
                format!("recommendation text is {size} bytes, limit is {limit}"),
            ),
        };
        OncoBillError::ValidationError { code, message }
    }
}

pub type BillingResult<T> = Result<T, BillingError>;
