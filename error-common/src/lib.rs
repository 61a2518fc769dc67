//! Common error handling utilities for OncoBill Engine
//!
//! This module provides the error type, error codes, and reporting helpers
//! shared by the OncoBill crates. Domain crates keep their own `thiserror`
//! enums and convert into [`OncoBillError`] at the boundary, so tools report
//! every failure with a stable code.
//!
//! # Error Categories
//!
//! - **ValidationError**: Request fields and size limits
//! - **CatalogError**: Reference table problems
//! - **ConfigError**: Missing or malformed configuration
//! - **IoError / SerializationError**: Reading input, writing output
//! - **InternalError**: Everything else
//!
//! # Example
//!
//! ```rust
//! use error_common::{codes, ErrorContext, ErrorReporter, OncoBillError};
//!
//! fn check_text(text: &str) -> Result<(), OncoBillError> {
//!     if text.trim().is_empty() {
//!         return Err(OncoBillError::ValidationError {
//!             code: codes::validation::MISSING_REQUIRED_FIELD,
//!             message: "recommendation text is empty".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! if let Err(e) = check_text("") {
//!     let report = ErrorReporter::new().report(&e, ErrorContext::new().with_operation("report"));
//!     assert_eq!(report.error_code, "VALIDATION_1002");
//! }
//! ```

pub mod codes;
pub mod context;
pub mod reporting;
pub mod types;

pub use context::*;
pub use reporting::*;
pub use types::*;
