// Report envelopes and rendering

use crate::cli::OutputFormat;
use chrono::{DateTime, Utc};
use colored::Colorize;
use error_common::Result;
use serde::Serialize;
use std::fmt::Write as _;
use std::time::Instant;
use treatment_billing::{
    format_cost_range, format_percentage, BatchItem, BatchReport, BillingReport, ProcedureCode,
    ResolvedDiagnosis, TumorTypeInfo,
};
use uuid::Uuid;

/// Per-invocation metadata stamped on command output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub request_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub processing_time_ms: f64,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Envelope<T> {
    pub fn new(body: T, started: Instant) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
            body,
        }
    }
}

pub type ReportEnvelope = Envelope<BillingReport>;
pub type BatchEnvelope = Envelope<BatchReport>;

/// Render a value for json or yaml output.
///
/// # Errors
///
/// Serialization failures.
pub fn to_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map_err(|e| error_common::OncoBillError::InternalError(format!("yaml output: {e}"))),
        OutputFormat::Json | OutputFormat::Text => Ok(serde_json::to_string_pretty(value)?),
    }
}

pub fn render_report(envelope: &ReportEnvelope) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Treatment Billing Report".bold());
    let _ = writeln!(out, "  Request:   {}", envelope.request_id.to_string().dimmed());
    write_report_body(&mut out, &envelope.body);
    out
}

fn write_report_body(out: &mut String, report: &BillingReport) {
    match &report.icd10_code {
        Some(diagnosis) => {
            let _ = writeln!(out, "  Diagnosis: {}", render_diagnosis(diagnosis));
        }
        None => {
            let _ = writeln!(out, "  Diagnosis: {}", "none".dimmed());
        }
    }

    let _ = writeln!(out, "  Procedures ({}):", report.summary.total_procedures);
    if report.billing_codes.is_empty() {
        let _ = writeln!(out, "    {}", "no billable treatments identified".yellow());
    }
    for matched in &report.billing_codes {
        let procedure = &matched.procedure;
        let _ = writeln!(
            out,
            "    {:<8} {:<42} {:>20}  {:>6}",
            procedure.code.cyan(),
            procedure.description,
            format_cost_range(&procedure.cost_range),
            format_percentage(procedure.insurance_coverage)
        );
    }

    let summary = &report.summary;
    let _ = writeln!(out, "  Total cost:    {}", summary.estimated_total_cost.green());
    let _ = writeln!(out, "  Patient cost:  {}", summary.estimated_patient_cost.yellow());
    let _ = writeln!(out, "  Insurance:     {}", summary.insurance_coverage);
}

pub fn render_diagnosis(diagnosis: &ResolvedDiagnosis) -> String {
    let subtype = diagnosis
        .subtype
        .as_deref()
        .map(|s| format!(", {s}"))
        .unwrap_or_default();
    format!(
        "{} {} ({}{})",
        diagnosis.code.cyan().bold(),
        diagnosis.description,
        diagnosis.tumor_type,
        subtype
    )
}

pub fn render_batch(envelope: &BatchEnvelope) -> String {
    let batch = &envelope.body;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} processed, {} failed",
        "Batch".bold(),
        batch.total_processed,
        batch.failed()
    );
    for item in &batch.results {
        match item {
            BatchItem::Processed { index, report } => {
                let _ = writeln!(out, "{} request {}", "ok".green(), index + 1);
                write_report_body(&mut out, report);
            }
            BatchItem::Failed { error, .. } => {
                let _ = writeln!(out, "{} {}", "failed".red(), error);
            }
        }
    }
    out
}

pub fn render_codes(codes: &[ProcedureCode]) -> String {
    let mut out = String::new();
    for procedure in codes {
        let _ = writeln!(
            out,
            "{:<22} {:<8} {:<42} {:>20}  {:>6}",
            procedure.key.bold(),
            procedure.code.cyan(),
            procedure.description,
            format_cost_range(&procedure.cost_range),
            format_percentage(procedure.insurance_coverage)
        );
    }
    out
}

pub fn render_tumor_types(types: &[TumorTypeInfo]) -> String {
    let mut out = String::new();
    for info in types {
        let _ = writeln!(out, "{}  {}", info.tumor_type.bold(), info.description);
        let _ = writeln!(out, "  grades:    {}", info.grades.join(", "));
        let _ = writeln!(out, "  locations: {}", info.common_locations.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use treatment_billing::TreatmentBillingMapper;

    fn envelope() -> ReportEnvelope {
        let report = TreatmentBillingMapper::default().build_report(
            "Craniotomy followed by temozolomide",
            Some("glioma"),
            None,
        );
        Envelope::new(report, Instant::now())
    }

    #[test]
    fn test_envelope_flattens_report() {
        let json = serde_json::to_value(envelope()).unwrap();
        assert!(json["request_id"].is_string());
        assert!(json["timestamp"].as_str().unwrap().contains('T'));
        assert!(json["processing_time_ms"].as_f64().unwrap() >= 0.0);
        assert_eq!(json["icd10_code"]["code"], "C71.9");
        assert_eq!(json["summary"]["total_procedures"], 2);
    }

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(envelope().request_id, envelope().request_id);
    }

    #[test]
    fn test_render_report_text() {
        colored::control::set_override(false);
        let text = render_report(&envelope());
        assert!(text.contains("Diagnosis: C71.9 Malignant neoplasm of brain, unspecified (glioma)"));
        assert!(text.contains("61510"));
        assert!(text.contains("J9328"));
        assert!(text.contains("Total cost:    $20,000 - $33,000"));
    }

    #[test]
    fn test_render_report_without_matches() {
        colored::control::set_override(false);
        let report = TreatmentBillingMapper::default().build_report("Watchful waiting", None, None);
        let text = render_report(&Envelope::new(report, Instant::now()));
        assert!(text.contains("Diagnosis: none"));
        assert!(text.contains("no billable treatments identified"));
        assert!(text.contains("Total cost:    $0 - $0"));
    }

    #[test]
    fn test_yaml_output() {
        let yaml = to_structured(&envelope().body, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("identified_treatments:"));
        assert!(yaml.contains("- craniotomy"));
    }
}
