use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::iter::Sum;
use std::ops::Add;

/// Inclusive cost bounds in USD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl CostRange {
    pub const ZERO: CostRange = CostRange {
        min: Decimal::ZERO,
        max: Decimal::ZERO,
    };

    pub fn new(min: impl Into<Decimal>, max: impl Into<Decimal>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Multiply both bounds by the same factor
    pub fn scale(self, factor: Decimal) -> Self {
        Self {
            min: self.min * factor,
            max: self.max * factor,
        }
    }

    /// Non-negative with `min <= max`
    pub fn is_well_formed(&self) -> bool {
        !self.min.is_sign_negative() && self.min <= self.max
    }
}

impl Add for CostRange {
    type Output = CostRange;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            min: self.min + rhs.min,
            max: self.max + rhs.max,
        }
    }
}

impl Sum for CostRange {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(CostRange::ZERO, Add::add)
    }
}

/// Procedure billing code (CPT for procedures, HCPCS J-codes for drugs)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureCode {
    pub key: String,
    pub code: String,
    pub description: String,
    pub cost_range: CostRange,
    /// Fraction of cost typically covered by insurance, in `[0, 1]`
    pub insurance_coverage: Decimal,
}

/// Surface phrases that signal a procedure in free text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub procedure: String,
    pub phrases: Vec<String>,
}

/// ICD-10 reference entry for a tumor type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisCode {
    pub tumor_type: String,
    pub primary: String,
    pub description: String,
    #[serde(default)]
    pub subtypes: BTreeMap<String, String>,
}

/// Diagnosis code attached to a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDiagnosis {
    pub code: String,
    pub description: String,
    /// Tumor type as supplied by the caller
    pub tumor_type: String,
    pub subtype: Option<String>,
}

/// Procedure code matched from a recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedCode {
    pub treatment: String,
    #[serde(flatten)]
    pub procedure: ProcedureCode,
}

/// Aggregated cost estimate, unrounded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub total_cost_range: CostRange,
    pub patient_cost_range: CostRange,
    pub average_insurance_coverage: Decimal,
    pub estimated_insurance_payment: CostRange,
}

impl CostEstimate {
    pub fn zero() -> Self {
        Self {
            total_cost_range: CostRange::ZERO,
            patient_cost_range: CostRange::ZERO,
            average_insurance_coverage: Decimal::ZERO,
            estimated_insurance_payment: CostRange::ZERO,
        }
    }
}

/// Human-readable report summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_procedures: usize,
    pub estimated_total_cost: String,
    pub estimated_patient_cost: String,
    pub insurance_coverage: String,
}

/// Billing and cost report for one recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingReport {
    pub recommendations_text: String,
    pub identified_treatments: Vec<String>,
    pub billing_codes: Vec<MatchedCode>,
    pub cost_estimates: CostEstimate,
    pub icd10_code: Option<ResolvedDiagnosis>,
    pub summary: ReportSummary,
}
