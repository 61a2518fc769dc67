use crate::error::{BillingError, BillingResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default cap on recommendation text accepted from callers
pub const DEFAULT_MAX_TEXT_BYTES: usize = 64 * 1024;

/// Batches above this size are processed in parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 16;

/// Limits applied to caller-supplied requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperLimits {
    pub max_text_bytes: usize,
    pub parallel_threshold: usize,
}

impl Default for MapperLimits {
    fn default() -> Self {
        Self {
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Patient information from clinical notes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientData {
    pub age: String,
    pub sex: String,
    pub symptoms: String,
    pub medical_history: BTreeMap<String, serde_json::Value>,
    pub allergies: Option<String>,
    pub medications: Option<String>,
}

/// Tumor classification from imaging
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TumorData {
    #[serde(rename = "type")]
    pub tumor_type: String,
    pub grade: String,
    pub location: String,
    pub size: String,
    pub characteristics: Vec<String>,
    pub malignancy_risk: Option<String>,
}

/// A treatment recommendation to be billed, with its clinical context
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TreatmentRequest {
    pub patient_data: PatientData,
    pub tumor_data: TumorData,
    pub recommendations_text: String,
    pub subtype: Option<String>,
}

/// Check required fields and text size.
///
/// # Errors
///
/// `BillingError::MissingField` for the first blank required field, patient
/// fields before tumor fields. `BillingError::TextTooLarge` when the text is
/// over `limits.max_text_bytes`.
pub fn validate_request(request: &TreatmentRequest, limits: &MapperLimits) -> BillingResult<()> {
    let patient = &request.patient_data;
    for (field, value) in [
        ("age", &patient.age),
        ("sex", &patient.sex),
        ("symptoms", &patient.symptoms),
    ] {
        require("patient", field, value)?;
    }

    let tumor = &request.tumor_data;
    for (field, value) in [
        ("type", &tumor.tumor_type),
        ("grade", &tumor.grade),
        ("location", &tumor.location),
        ("size", &tumor.size),
    ] {
        require("tumor", field, value)?;
    }

    let size = request.recommendations_text.len();
    if size > limits.max_text_bytes {
        return Err(BillingError::TextTooLarge {
            size,
            limit: limits.max_text_bytes,
        });
    }
    Ok(())
}

fn require(section: &'static str, field: &'static str, value: &str) -> BillingResult<()> {
    if value.trim().is_empty() {
        tracing::warn!(section, field, "missing required field");
        return Err(BillingError::MissingField { section, field });
    }
    Ok(())
}
