//! Reference tables: procedure codes, keyword index and ICD-10 diagnoses.
//!
//! The built-in set covers the brain tumor treatments the mapper knows about.
//! Deployments can replace it with a table file; loaded tables go through
//! [`ReferenceTables::prepare`] before a mapper will accept them.

use crate::error::{BillingError, BillingResult};
use crate::models::{CostRange, DiagnosisCode, KeywordRule, ProcedureCode};
use itertools::Itertools;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// ICD-10 code used when the tumor type is not in the diagnosis table
pub const FALLBACK_ICD10_CODE: &str = "C71.9";
pub const FALLBACK_ICD10_DESCRIPTION: &str = "Malignant neoplasm of brain, unspecified";

/// Upper bound on a single procedure's cost; keeps report sums far from `Decimal::MAX`
pub const MAX_PROCEDURE_COST: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Read-only lookup tables shared by every report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub procedures: Vec<ProcedureCode>,
    pub keywords: Vec<KeywordRule>,
    pub diagnoses: Vec<DiagnosisCode>,
}

impl ReferenceTables {
    /// Built-in brain tumor reference tables
    pub fn builtin() -> Self {
        Self {
            procedures: builtin_procedures(),
            keywords: builtin_keywords(),
            diagnoses: builtin_diagnoses(),
        }
    }

    /// Validate, then normalize matching keys to lower case.
    pub fn prepare(mut self) -> BillingResult<Self> {
        self.validate()?;
        for rule in &mut self.keywords {
            for phrase in &mut rule.phrases {
                *phrase = phrase.to_lowercase();
            }
        }
        for diagnosis in &mut self.diagnoses {
            diagnosis.tumor_type = diagnosis.tumor_type.to_lowercase();
            diagnosis.subtypes = std::mem::take(&mut diagnosis.subtypes)
                .into_iter()
                .map(|(name, code)| (name.to_lowercase(), code))
                .collect();
        }
        Ok(self)
    }

    pub fn validate(&self) -> BillingResult<()> {
        if let Some(key) = self.procedures.iter().map(|p| p.key.as_str()).duplicates().next() {
            return Err(BillingError::Catalog(format!("duplicate procedure key: {key}")));
        }
        for procedure in &self.procedures {
            if !procedure.cost_range.is_well_formed() {
                return Err(BillingError::Catalog(format!(
                    "procedure {}: cost range must be non-negative with min <= max",
                    procedure.key
                )));
            }
            if procedure.cost_range.max > MAX_PROCEDURE_COST {
                return Err(BillingError::Catalog(format!(
                    "procedure {}: cost {} exceeds {MAX_PROCEDURE_COST}",
                    procedure.key, procedure.cost_range.max
                )));
            }
            if procedure.insurance_coverage < Decimal::ZERO
                || procedure.insurance_coverage > Decimal::ONE
            {
                return Err(BillingError::Catalog(format!(
                    "procedure {}: insurance coverage {} outside [0, 1]",
                    procedure.key, procedure.insurance_coverage
                )));
            }
        }

        if let Some(key) = self.keywords.iter().map(|r| r.procedure.as_str()).duplicates().next() {
            return Err(BillingError::Catalog(format!("duplicate keyword rule: {key}")));
        }
        for rule in &self.keywords {
            if rule.phrases.is_empty() || rule.phrases.iter().any(|p| p.trim().is_empty()) {
                return Err(BillingError::Catalog(format!(
                    "keyword rule {} has an empty phrase list or blank phrase",
                    rule.procedure
                )));
            }
        }

        // Matching is case-insensitive, so names may not differ only in case
        if let Some(name) = self.diagnoses.iter().map(|d| d.tumor_type.to_lowercase()).duplicates().next() {
            return Err(BillingError::Catalog(format!("duplicate tumor type: {name}")));
        }
        for diagnosis in &self.diagnoses {
            if let Some(name) = diagnosis.subtypes.keys().map(|s| s.to_lowercase()).duplicates().next() {
                return Err(BillingError::Catalog(format!(
                    "tumor type {}: duplicate subtype: {name}",
                    diagnosis.tumor_type
                )));
            }
        }
        Ok(())
    }

    pub fn procedure(&self, key: &str) -> Option<&ProcedureCode> {
        self.procedures.iter().find(|p| p.key == key)
    }

    /// Keyword rules whose procedure has no billing entry
    pub fn unbilled_keywords(&self) -> Vec<&str> {
        self.keywords
            .iter()
            .map(|r| r.procedure.as_str())
            .filter(|key| self.procedure(key).is_none())
            .collect()
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::builtin()
    }
}

fn procedure(key: &str, code: &str, description: &str, min: i64, max: i64, coverage_pct: i64) -> ProcedureCode {
    ProcedureCode {
        key: key.to_string(),
        code: code.to_string(),
        description: description.to_string(),
        cost_range: CostRange::new(min, max),
        insurance_coverage: Decimal::new(coverage_pct, 2),
    }
}

fn builtin_procedures() -> Vec<ProcedureCode> {
    vec![
        // Surgical procedures
        procedure("craniotomy", "61510", "Craniotomy for tumor resection", 15_000, 25_000, 85),
        procedure("stereotactic_biopsy", "61750", "Stereotactic biopsy of brain lesion", 8_000, 12_000, 90),
        procedure("endoscopic_resection", "62160", "Endoscopic resection of pituitary tumor", 12_000, 18_000, 88),
        procedure("awake_craniotomy", "61510", "Awake craniotomy for eloquent area tumors", 20_000, 30_000, 80),
        // Radiation therapy
        procedure("radiation_therapy", "77385", "Intensity-modulated radiation therapy (IMRT)", 15_000, 25_000, 92),
        procedure("stereotactic_radiosurgery", "77371", "Stereotactic radiosurgery (Gamma Knife)", 12_000, 20_000, 90),
        procedure("proton_therapy", "77520", "Proton beam radiation therapy", 30_000, 50_000, 75),
        // Chemotherapy
        procedure("temozolomide", "J9328", "Temozolomide chemotherapy", 5_000, 8_000, 95),
        procedure("bevacizumab", "J9035", "Bevacizumab (Avastin) infusion", 8_000, 12_000, 88),
        procedure("carmustine", "J9050", "Carmustine (BCNU) chemotherapy", 3_000, 5_000, 92),
        // Imaging and monitoring
        procedure("mri_brain", "70551", "MRI brain with and without contrast", 2_000, 4_000, 95),
        procedure("pet_scan", "78815", "PET scan brain", 3_000, 5_000, 90),
        // Supportive care
        procedure("dexamethasone", "J1100", "Dexamethasone injection", 50, 150, 98),
        procedure("anticonvulsant", "J2001", "Levetiracetam injection", 100, 300, 95),
    ]
}

fn rule(procedure: &str, phrases: &[&str]) -> KeywordRule {
    KeywordRule {
        procedure: procedure.to_string(),
        phrases: phrases.iter().map(|p| (*p).to_string()).collect(),
    }
}

fn builtin_keywords() -> Vec<KeywordRule> {
    vec![
        rule("craniotomy", &["craniotomy", "surgical resection", "tumor removal", "surgery"]),
        rule("stereotactic_biopsy", &["biopsy", "stereotactic biopsy", "tissue sampling"]),
        rule("endoscopic_resection", &["endoscopic", "transsphenoidal", "pituitary surgery"]),
        rule("awake_craniotomy", &["awake surgery", "awake craniotomy", "eloquent area"]),
        rule("radiation_therapy", &["radiation", "imrt", "radiotherapy", "external beam"]),
        rule("stereotactic_radiosurgery", &["gamma knife", "stereotactic radiosurgery", "srs"]),
        rule("proton_therapy", &["proton therapy", "proton beam"]),
        rule("temozolomide", &["temozolomide", "temodar", "tmz"]),
        rule("bevacizumab", &["bevacizumab", "avastin"]),
        rule("carmustine", &["carmustine", "bcnu"]),
        rule("mri_brain", &["mri", "magnetic resonance", "follow-up imaging"]),
        rule("pet_scan", &["pet scan", "pet imaging"]),
        rule("dexamethasone", &["dexamethasone", "steroid", "decadron"]),
        rule("anticonvulsant", &["anticonvulsant", "seizure medication", "levetiracetam"]),
    ]
}

fn diagnosis(tumor_type: &str, primary: &str, description: &str, subtypes: &[(&str, &str)]) -> DiagnosisCode {
    DiagnosisCode {
        tumor_type: tumor_type.to_string(),
        primary: primary.to_string(),
        description: description.to_string(),
        subtypes: subtypes
            .iter()
            .map(|(name, code)| ((*name).to_string(), (*code).to_string()))
            .collect::<BTreeMap<_, _>>(),
    }
}

fn builtin_diagnoses() -> Vec<DiagnosisCode> {
    vec![
        diagnosis(
            "glioma",
            "C71.9",
            "Malignant neoplasm of brain, unspecified",
            &[("glioblastoma", "C71.0"), ("astrocytoma", "C71.1"), ("oligodendroglioma", "C71.2")],
        ),
        diagnosis(
            "meningioma",
            "D32.9",
            "Benign neoplasm of meninges, unspecified",
            &[("convexity", "D32.0"), ("parasagittal", "D32.1"), ("sphenoid", "D32.2")],
        ),
        diagnosis(
            "pituitary",
            "D35.2",
            "Benign neoplasm of pituitary gland",
            &[("prolactinoma", "D35.2"), ("acromegaly", "D35.2"), ("cushing", "D35.2")],
        ),
    ]
}
