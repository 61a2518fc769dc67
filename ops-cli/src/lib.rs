//! Command-line interface for the OncoBill treatment billing mapper
//!
//! The `oncobill` binary loads layered configuration, builds a
//! [`TreatmentBillingMapper`](treatment_billing::TreatmentBillingMapper) over
//! the built-in or configured reference tables, and runs one command.
//!
//! # Example Usage
//!
//! ```bash
//! # One recommendation, JSON report with request metadata
//! oncobill report --text "Craniotomy followed by IMRT and temozolomide" --tumor-type glioma
//!
//! # Read the recommendation from stdin, colored text output
//! cat plan.txt | oncobill report --tumor-type meningioma --format text
//!
//! # Many requests at once
//! oncobill batch --input requests.json
//!
//! # Reference data
//! oncobill diagnosis --tumor-type glioma --subtype glioblastoma
//! oncobill codes
//! oncobill tumor-types
//!
//! # Validate configuration and tables
//! oncobill --config oncobill.yaml check-config
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod output;

pub use cli::*;
pub use commands::*;
pub use config::*;
