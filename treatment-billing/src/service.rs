use crate::catalog::ReferenceTables;
use crate::diagnosis::DiagnosisResolver;
use crate::error::BillingResult;
use crate::estimate::estimate_costs;
use crate::extraction::KeywordExtractor;
use crate::lookup::CodeLookup;
use crate::models::{BillingReport, CostEstimate, MatchedCode, ResolvedDiagnosis};
use crate::report::ReportAssembler;
use crate::validation::{validate_request, MapperLimits, TreatmentRequest};
use logger_redacted::redacted_info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Treatment billing mapper.
///
/// Built once at startup and handed to whatever serves requests. Cloning is
/// cheap and clones share the same read-only tables.
#[derive(Debug, Clone)]
pub struct TreatmentBillingMapper {
    tables: Arc<ReferenceTables>,
    limits: MapperLimits,
}

/// Outcome of one request in a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchItem {
    Processed { index: usize, report: Box<BillingReport> },
    Failed { index: usize, error: String },
}

impl BatchItem {
    pub fn index(&self) -> usize {
        match self {
            BatchItem::Processed { index, .. } | BatchItem::Failed { index, .. } => *index,
        }
    }
}

/// Batch results, in request order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<BatchItem>,
    pub total_processed: usize,
}

impl BatchReport {
    pub fn failed(&self) -> usize {
        self.results
            .iter()
            .filter(|item| matches!(item, BatchItem::Failed { .. }))
            .count()
    }
}

impl TreatmentBillingMapper {
    /// Create a mapper over caller-supplied tables.
    ///
    /// # Errors
    ///
    /// `BillingError::Catalog` when the tables fail validation.
    pub fn new(tables: ReferenceTables, limits: MapperLimits) -> BillingResult<Self> {
        let tables = tables.prepare()?;
        for key in tables.unbilled_keywords() {
            tracing::warn!(procedure = key, "keyword rule has no billing code; matches will not be billed");
        }
        tracing::info!(
            procedures = tables.procedures.len(),
            keyword_rules = tables.keywords.len(),
            diagnoses = tables.diagnoses.len(),
            "treatment billing mapper ready"
        );
        Ok(Self {
            tables: Arc::new(tables),
            limits,
        })
    }

    /// Mapper over the built-in tables
    pub fn with_builtin_tables() -> Self {
        Self {
            tables: Arc::new(ReferenceTables::builtin()),
            limits: MapperLimits::default(),
        }
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn limits(&self) -> &MapperLimits {
        &self.limits
    }

    pub fn extract(&self, text: &str) -> Vec<String> {
        KeywordExtractor::new(&self.tables.keywords).extract(text)
    }

    pub fn lookup<S: AsRef<str>>(&self, keys: &[S]) -> Vec<MatchedCode> {
        CodeLookup::new(&self.tables.procedures).lookup(keys)
    }

    pub fn estimate(&self, codes: &[MatchedCode]) -> CostEstimate {
        estimate_costs(codes)
    }

    pub fn resolve(&self, tumor_type: Option<&str>, subtype: Option<&str>) -> Option<ResolvedDiagnosis> {
        DiagnosisResolver::new(&self.tables.diagnoses).resolve(tumor_type, subtype)
    }

    pub fn build_report(&self, text: &str, tumor_type: Option<&str>, subtype: Option<&str>) -> BillingReport {
        let report = ReportAssembler::new(&self.tables).build(text, tumor_type, subtype);
        tracing::debug!(
            procedures = report.summary.total_procedures,
            icd10 = report.icd10_code.as_ref().map(|d| d.code.as_str()),
            "billing report assembled"
        );
        report
    }

    /// Validate a request and build its report.
    ///
    /// # Errors
    ///
    /// Validation errors from [`validate_request`].
    pub fn process(&self, request: &TreatmentRequest) -> BillingResult<BillingReport> {
        validate_request(request, &self.limits)?;

        let report = self.build_report(
            &request.recommendations_text,
            Some(&request.tumor_data.tumor_type),
            request.subtype.as_deref(),
        );

        redacted_info!(
            "billed recommendation for {} year old {} with {}: {} procedures",
            request.patient_data.age,
            request.patient_data.sex,
            request.tumor_data.tumor_type,
            report.summary.total_procedures
        );
        Ok(report)
    }

    /// Process requests independently; a failure is recorded against its index.
    pub fn process_batch(&self, requests: &[TreatmentRequest]) -> BatchReport {
        let item = |(index, request): (usize, &TreatmentRequest)| match self.process(request) {
            Ok(report) => BatchItem::Processed {
                index,
                report: Box::new(report),
            },
            Err(e) => BatchItem::Failed {
                index,
                error: format!("Error processing request {}: {e}", index + 1),
            },
        };

        let results: Vec<BatchItem> = if requests.len() > self.limits.parallel_threshold {
            requests.par_iter().enumerate().map(item).collect()
        } else {
            requests.iter().enumerate().map(item).collect()
        };

        let report = BatchReport {
            total_processed: results.len(),
            results,
        };
        tracing::info!(
            total = report.total_processed,
            failed = report.failed(),
            "batch processed"
        );
        report
    }
}

impl Default for TreatmentBillingMapper {
    fn default() -> Self {
        Self::with_builtin_tables()
    }
}
