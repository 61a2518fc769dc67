use config_engine::{load_file, ConfigEngine, ConfigError, ConfigSource};
use error_common::Result;
use logger_redacted::LoggerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use treatment_billing::{MapperLimits, ReferenceTables, TreatmentBillingMapper};

/// Looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "oncobill.yaml";

/// Environment prefix; `ONCOBILL_LIMITS__MAX_TEXT_BYTES` sets `limits.max_text_bytes`
pub const ENV_PREFIX: &str = "ONCOBILL_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggerConfig,
    pub limits: MapperLimits,
    /// Table file replacing the built-in reference tables
    pub reference_tables: Option<PathBuf>,
}

impl AppConfig {
    /// Defaults, then the config file, then the environment.
    ///
    /// An explicit `path` must exist; the default file is optional.
    ///
    /// # Errors
    ///
    /// Configuration errors from the engine, or a limit of zero.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => ConfigSource::file(path),
            None => ConfigSource::optional_file(DEFAULT_CONFIG_FILE),
        };
        let config: AppConfig = ConfigEngine::new()
            .with_defaults(&AppConfig::default())
            .add_source(file)
            .add_source(ConfigSource::env(ENV_PREFIX))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.limits.max_text_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_text_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Reference tables named by the configuration, or the built-in set
    ///
    /// # Errors
    ///
    /// A table file that is missing or does not parse.
    pub fn reference_tables(&self) -> Result<ReferenceTables> {
        match &self.reference_tables {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading reference tables");
                Ok(load_file(path)?)
            }
            None => Ok(ReferenceTables::builtin()),
        }
    }

    /// # Errors
    ///
    /// Table loading errors, or tables that fail validation.
    pub fn build_mapper(&self) -> Result<TreatmentBillingMapper> {
        let tables = self.reference_tables()?;
        Ok(TreatmentBillingMapper::new(tables, self.limits)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = write_file(
            ".yaml",
            "logging:\n  log_level: debug\nlimits:\n  max_text_bytes: 1024\n",
        );
        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.logging.log_level, "debug");
        assert!(config.logging.redaction_enabled);
        assert_eq!(config.limits.max_text_bytes, 1024);
        assert_eq!(config.limits.parallel_threshold, 16);
        assert!(config.reference_tables.is_none());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/oncobill.yaml"))).unwrap_err();
        assert_eq!(err.code(), "CONFIG_3001");
    }

    #[test]
    fn test_zero_text_limit_rejected() {
        let file = write_file(".toml", "[limits]\nmax_text_bytes = 0\n");
        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert_eq!(err.code(), "CONFIG_3003");
    }

    #[test]
    fn test_builtin_mapper_by_default() {
        let mapper = AppConfig::default().build_mapper().unwrap();
        assert_eq!(mapper.tables().procedures.len(), ReferenceTables::builtin().procedures.len());
        assert_eq!(mapper.limits(), &MapperLimits::default());
    }

    #[test]
    fn test_reference_tables_from_file() {
        let tables = r#"{
            "procedures": [
                {"key": "mri_brain", "code": "70553", "description": "MRI brain with and without contrast",
                 "cost_range": {"min": "2000", "max": "3500"}, "insurance_coverage": "0.95"}
            ],
            "keywords": [{"procedure": "mri_brain", "phrases": ["MRI"]}],
            "diagnoses": [
                {"tumor_type": "Glioma", "primary": "C71.9", "description": "Malignant neoplasm of brain, unspecified",
                 "subtypes": {}}
            ]
        }"#;
        let file = write_file(".json", tables);
        let config = AppConfig {
            reference_tables: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let mapper = config.build_mapper().unwrap();
        assert_eq!(mapper.extract("Follow-up MRI in 3 months"), vec!["mri_brain"]);
        assert_eq!(mapper.resolve(Some("glioma"), None).unwrap().code, "C71.9");
    }

    #[test]
    fn test_invalid_reference_tables_rejected() {
        let tables = r#"{
            "procedures": [
                {"key": "mri_brain", "code": "70553", "description": "MRI",
                 "cost_range": {"min": "3500", "max": "2000"}, "insurance_coverage": "0.95"}
            ],
            "keywords": [],
            "diagnoses": []
        }"#;
        let file = write_file(".json", tables);
        let config = AppConfig {
            reference_tables: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        assert_eq!(config.build_mapper().unwrap_err().code(), "CATALOG_2001");
    }
}
