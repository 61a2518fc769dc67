//! Treatment Billing for Brain Tumor Care
//!
//! Turns free-text treatment recommendations into billing information:
//! - Procedure and medication detection by keyword matching
//! - CPT/HCPCS code lookup against reference tables
//! - Cost aggregation with insurance coverage split
//! - ICD-10 diagnosis resolution for tumor type and subtype
//! - Request validation and batch processing
//!
//! # Example
//!
//! ```rust
//! use treatment_billing::TreatmentBillingMapper;
//!
//! let mapper = TreatmentBillingMapper::with_builtin_tables();
//! let report = mapper.build_report(
//!     "Surgical resection via craniotomy, then temozolomide.",
//!     Some("glioma"),
//!     Some("glioblastoma"),
//! );
//!
//! assert_eq!(report.identified_treatments, vec!["craniotomy", "temozolomide"]);
//! assert_eq!(report.icd10_code.unwrap().code, "C71.0");
//! assert_eq!(report.summary.estimated_total_cost, "$20,000 - $33,000");
//! ```

pub mod catalog;
pub mod diagnosis;
pub mod error;
pub mod estimate;
pub mod extraction;
pub mod lookup;
pub mod models;
pub mod report;
pub mod service;
pub mod tumor_types;
pub mod validation;

pub use catalog::*;
pub use diagnosis::*;
pub use error::*;
pub use estimate::*;
pub use extraction::*;
pub use lookup::*;
pub use models::*;
pub use report::*;
pub use service::*;
pub use tumor_types::*;
pub use validation::*;
