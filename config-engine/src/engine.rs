use crate::error::{ConfigError, Result};
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use figment::Figment;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A configuration layer. Later sources override earlier ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// YAML, TOML or JSON file, chosen by extension
    File { path: PathBuf, required: bool },
    /// Environment variables with a prefix; `__` separates nested keys
    Env { prefix: String },
}

impl ConfigSource {
    /// Required file
    pub fn file(path: impl Into<PathBuf>) -> Self {
        ConfigSource::File { path: path.into(), required: true }
    }

    /// File that is skipped when absent
    pub fn optional_file(path: impl Into<PathBuf>) -> Self {
        ConfigSource::File { path: path.into(), required: false }
    }

    pub fn env(prefix: impl Into<String>) -> Self {
        ConfigSource::Env { prefix: prefix.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Toml,
    Json,
}

impl FileFormat {
    fn detect(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml" | "yml") => Ok(FileFormat::Yaml),
            Some("toml") => Ok(FileFormat::Toml),
            Some("json") => Ok(FileFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Layered configuration loader
#[derive(Debug)]
pub struct ConfigEngine {
    figment: Figment,
    sources: Vec<ConfigSource>,
}

impl ConfigEngine {
    pub fn new() -> Self {
        Self {
            figment: Figment::new(),
            sources: Vec::new(),
        }
    }

    /// Seed the configuration with serialized defaults.
    pub fn with_defaults<T: Serialize>(mut self, defaults: &T) -> Self {
        self.figment = self.figment.merge(Serialized::defaults(defaults));
        self
    }

    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// Merge every source in order and deserialize the result.
    ///
    /// # Errors
    ///
    /// `SourceNotFound` for a missing required file, `UnsupportedFormat` for
    /// an unknown extension and `ParseError` when the merged value does not
    /// deserialize into `T`.
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T> {
        let mut figment = self.figment.clone();

        for source in &self.sources {
            figment = match source {
                ConfigSource::File { path, required } => {
                    if !path.is_file() {
                        if *required {
                            return Err(ConfigError::SourceNotFound(path.clone()));
                        }
                        tracing::debug!(path = %path.display(), "optional config file not present");
                        continue;
                    }
                    tracing::debug!(path = %path.display(), "loading config file");
                    match FileFormat::detect(path)? {
                        FileFormat::Yaml => figment.merge(Yaml::file(path)),
                        FileFormat::Toml => figment.merge(Toml::file(path)),
                        FileFormat::Json => figment.merge(Json::file(path)),
                    }
                }
                ConfigSource::Env { prefix } => figment.merge(Env::prefixed(prefix).split("__")),
            };
        }

        Ok(figment.extract()?)
    }
}

impl Default for ConfigEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Deserialize a single document file (YAML, TOML or JSON).
///
/// # Errors
///
/// As [`ConfigEngine::extract`].
pub fn load_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    ConfigEngine::new()
        .add_source(ConfigSource::file(path.as_ref()))
        .extract()
}
