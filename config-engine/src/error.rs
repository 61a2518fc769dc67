use error_common::{codes, OncoBillError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration source not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Configuration parsing failed: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for OncoBillError {
    fn from(err: ConfigError) -> Self {
        let code = match &err {
            ConfigError::SourceNotFound(_) => codes::config::SOURCE_NOT_FOUND,
            ConfigError::UnsupportedFormat(_) | ConfigError::ParseError(_) => codes::config::PARSE_FAILED,
            ConfigError::ValidationError(_) => codes::config::INVALID_VALUE,
        };
        OncoBillError::config(code, err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_with_config_codes() {
        let missing: OncoBillError = ConfigError::SourceNotFound(PathBuf::from("oncobill.yaml")).into();
        assert_eq!(missing.code(), "CONFIG_3001");
        assert_eq!(
            missing.to_string(),
            "Configuration error: Configuration source not found: oncobill.yaml"
        );

        let invalid: OncoBillError = ConfigError::ValidationError("limit is zero".into()).into();
        assert_eq!(invalid.code(), "CONFIG_3003");
        assert_eq!(invalid.error_type(), "config");
    }
}
