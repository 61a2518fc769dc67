//! Layered configuration loading for OncoBill Engine
//!
//! This module merges configuration from several sources, in order:
//! - Serialized defaults supplied by the caller
//! - Local files: YAML, TOML or JSON, chosen by extension
//! - Environment variables with a prefix (`__` separates nested keys)
//!
//! The same loader reads standalone documents such as replacement
//! reference tables via [`load_file`].
//!
//! # Example
//!
//! ```rust,no_run
//! use config_engine::{ConfigEngine, ConfigSource};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Default, Serialize, Deserialize)]
//! #[serde(default)]
//! struct AppConfig {
//!     log_level: String,
//!     reference_tables: Option<String>,
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config: AppConfig = ConfigEngine::new()
//!         .with_defaults(&AppConfig::default())
//!         .add_source(ConfigSource::optional_file("oncobill.yaml"))
//!         .add_source(ConfigSource::env("ONCOBILL_"))
//!         .extract()?;
//!
//!     println!("log level: {}", config.log_level);
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod error;

pub use engine::*;
pub use error::*;
