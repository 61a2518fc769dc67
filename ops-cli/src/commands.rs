use crate::cli::{Command, OutputFormat, ReportArgs};
use crate::config::AppConfig;
use crate::output::{self, BatchEnvelope, Envelope, ReportEnvelope};
use error_common::{OncoBillError, Result};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use treatment_billing::{
    find_tumor_type, tumor_types, BillingError, ResolvedDiagnosis, TreatmentBillingMapper,
    TreatmentRequest, TumorTypeInfo,
};

/// Loaded configuration and the mapper built from it
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: AppConfig,
    pub mapper: TreatmentBillingMapper,
}

impl CommandContext {
    /// # Errors
    ///
    /// Reference table loading or validation errors.
    pub fn new(config: AppConfig) -> Result<Self> {
        let mapper = config.build_mapper()?;
        Ok(Self { config, mapper })
    }
}

/// Summary printed by `check-config`
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary<'a> {
    pub config: &'a AppConfig,
    pub reference_tables: &'static str,
    pub procedures: usize,
    pub keyword_rules: usize,
    pub diagnoses: usize,
    pub unbilled_keywords: Vec<&'a str>,
}

/// Diagnosis output, with the catalog entry when the type is known
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisLookup {
    pub diagnosis: Option<ResolvedDiagnosis>,
    pub tumor_type: Option<TumorTypeInfo>,
}

/// Run a command and return what should be printed.
///
/// # Errors
///
/// Input, validation and serialization errors from the command.
pub fn execute(command: &Command, ctx: &CommandContext, stdin: &mut dyn Read) -> Result<String> {
    match command {
        Command::Report(args) => report(ctx, args, stdin),
        Command::Batch { input, format } => batch(ctx, input, *format),
        Command::Diagnosis {
            tumor_type,
            subtype,
            format,
        } => diagnosis(ctx, tumor_type, subtype.as_deref(), *format),
        Command::Codes { format } => codes(ctx, *format),
        Command::TumorTypes { format } => list_tumor_types(*format),
        Command::CheckConfig { format } => check_config(ctx, *format),
    }
}

/// # Errors
///
/// Unreadable input, text over the configured limit, or serialization errors.
pub fn report(ctx: &CommandContext, args: &ReportArgs, stdin: &mut dyn Read) -> Result<String> {
    let started = Instant::now();
    let text = read_recommendation(args.text.as_deref(), args.file.as_deref(), stdin)?;

    let limit = ctx.mapper.limits().max_text_bytes;
    if text.len() > limit {
        return Err(BillingError::TextTooLarge {
            size: text.len(),
            limit,
        }
        .into());
    }

    let report = ctx
        .mapper
        .build_report(&text, args.tumor_type.as_deref(), args.subtype.as_deref());
    let envelope: ReportEnvelope = Envelope::new(report, started);
    tracing::info!(
        request_id = %envelope.request_id,
        procedures = envelope.body.summary.total_procedures,
        processing_time_ms = envelope.processing_time_ms,
        "report generated"
    );

    match args.format {
        OutputFormat::Text => Ok(output::render_report(&envelope)),
        format => output::to_structured(&envelope, format),
    }
}

/// # Errors
///
/// Unreadable or malformed input file, or serialization errors. Individual
/// request failures are part of the output, not errors.
pub fn batch(ctx: &CommandContext, input: &Path, format: OutputFormat) -> Result<String> {
    let started = Instant::now();
    let raw = std::fs::read_to_string(input)?;
    let requests: Vec<TreatmentRequest> = serde_json::from_str(&raw)?;
    tracing::debug!(path = %input.display(), requests = requests.len(), "batch input loaded");

    let envelope: BatchEnvelope = Envelope::new(ctx.mapper.process_batch(&requests), started);
    match format {
        OutputFormat::Text => Ok(output::render_batch(&envelope)),
        format => output::to_structured(&envelope, format),
    }
}

/// # Errors
///
/// Serialization errors.
pub fn diagnosis(
    ctx: &CommandContext,
    tumor_type: &str,
    subtype: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    let lookup = DiagnosisLookup {
        diagnosis: ctx.mapper.resolve(Some(tumor_type).filter(|t| !t.is_empty()), subtype),
        tumor_type: find_tumor_type(tumor_type).copied(),
    };

    if format != OutputFormat::Text {
        return output::to_structured(&lookup, format);
    }
    let mut out = match &lookup.diagnosis {
        Some(diagnosis) => output::render_diagnosis(diagnosis),
        None => "no diagnosis".to_string(),
    };
    out.push('\n');
    if let Some(info) = &lookup.tumor_type {
        out.push_str(&output::render_tumor_types(std::slice::from_ref(info)));
    }
    Ok(out)
}

/// # Errors
///
/// Serialization errors.
pub fn codes(ctx: &CommandContext, format: OutputFormat) -> Result<String> {
    let procedures = &ctx.mapper.tables().procedures;
    match format {
        OutputFormat::Text => Ok(output::render_codes(procedures)),
        format => output::to_structured(procedures, format),
    }
}

/// # Errors
///
/// Serialization errors.
pub fn list_tumor_types(format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(output::render_tumor_types(tumor_types())),
        format => output::to_structured(&tumor_types(), format),
    }
}

/// # Errors
///
/// Serialization errors.
pub fn check_config(ctx: &CommandContext, format: OutputFormat) -> Result<String> {
    let tables = ctx.mapper.tables();
    let summary = ConfigSummary {
        config: &ctx.config,
        reference_tables: if ctx.config.reference_tables.is_some() { "file" } else { "builtin" },
        procedures: tables.procedures.len(),
        keyword_rules: tables.keywords.len(),
        diagnoses: tables.diagnoses.len(),
        unbilled_keywords: tables.unbilled_keywords(),
    };
    match format {
        OutputFormat::Text => Ok(format!(
            "configuration ok: {} procedures, {} keyword rules, {} diagnoses ({} tables)\n",
            summary.procedures, summary.keyword_rules, summary.diagnoses, summary.reference_tables
        )),
        format => output::to_structured(&summary, format),
    }
}

/// Recommendation text from `--text`, `--file` or stdin, in that order.
///
/// # Errors
///
/// I/O errors reading the file or stdin.
pub fn read_recommendation(text: Option<&str>, file: Option<&Path>, stdin: &mut dyn Read) -> Result<String> {
    if let Some(text) = text {
        return Ok(text.to_string());
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path).map_err(|e| read_error(path, &e));
    }
    let mut buf = String::new();
    stdin.read_to_string(&mut buf)?;
    Ok(buf)
}

fn read_error(path: &Path, err: &std::io::Error) -> OncoBillError {
    OncoBillError::IoError(std::io::Error::new(
        err.kind(),
        format!("{}: {err}", path.display()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn ctx() -> CommandContext {
        CommandContext::new(AppConfig::default()).unwrap()
    }

    fn report_args(text: Option<&str>, format: OutputFormat) -> ReportArgs {
        ReportArgs {
            text: text.map(str::to_string),
            file: None,
            tumor_type: Some("glioma".to_string()),
            subtype: Some("glioblastoma".to_string()),
            format,
        }
    }

    #[test]
    fn test_report_json_from_text() {
        let out = report(&ctx(), &report_args(Some("Craniotomy then TMZ"), OutputFormat::Json), &mut std::io::empty())
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["identified_treatments"], serde_json::json!(["craniotomy", "temozolomide"]));
        assert_eq!(json["icd10_code"]["code"], "C71.0");
        assert!(json["request_id"].is_string());
    }

    #[test]
    fn test_report_reads_stdin() {
        let mut stdin = "Gamma Knife to the residual lesion".as_bytes();
        let out = report(&ctx(), &report_args(None, OutputFormat::Json), &mut stdin).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["identified_treatments"], serde_json::json!(["stereotactic_radiosurgery"]));
    }

    #[test]
    fn test_report_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Levetiracetam for seizures").unwrap();
        let text = read_recommendation(None, Some(file.path()), &mut std::io::empty()).unwrap();
        assert_eq!(text, "Levetiracetam for seizures");
    }

    #[test]
    fn test_report_missing_file() {
        let err = read_recommendation(None, Some(Path::new("/nonexistent/plan.txt")), &mut std::io::empty())
            .unwrap_err();
        assert_eq!(err.code(), "SYS_4001");
        assert!(err.to_string().contains("/nonexistent/plan.txt"));
    }

    #[test]
    fn test_report_over_limit() {
        let mut config = AppConfig::default();
        config.limits.max_text_bytes = 8;
        let ctx = CommandContext::new(config).unwrap();
        let err = report(&ctx, &report_args(Some("Craniotomy"), OutputFormat::Json), &mut std::io::empty())
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_1003");
    }

    #[test]
    fn test_batch_keeps_failures() {
        let requests = serde_json::json!([
            {
                "patient_data": {"age": "61", "sex": "Male", "symptoms": "Headache"},
                "tumor_data": {"type": "meningioma", "grade": "Grade I", "location": "convexity", "size": "2 cm"},
                "recommendations_text": "Stereotactic radiosurgery and follow-up imaging"
            },
            {
                "patient_data": {"age": "61", "sex": "Male"},
                "tumor_data": {"type": "glioma"},
                "recommendations_text": "Craniotomy"
            }
        ]);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(requests.to_string().as_bytes()).unwrap();

        let out = batch(&ctx(), file.path(), OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["total_processed"], 2);
        assert_eq!(json["results"][0]["status"], "processed");
        assert_eq!(json["results"][0]["report"]["icd10_code"]["code"], "D32.9");
        assert_eq!(json["results"][1]["status"], "failed");
        assert_eq!(
            json["results"][1]["error"],
            "Error processing request 2: Validation error: missing required patient field: symptoms"
        );
    }

    #[test]
    fn test_batch_rejects_malformed_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"not\": \"an array\"}").unwrap();
        let err = batch(&ctx(), file.path(), OutputFormat::Json).unwrap_err();
        assert_eq!(err.code(), "SYS_4002");
    }

    #[test]
    fn test_diagnosis_includes_catalog_entry() {
        let out = diagnosis(&ctx(), "Pituitary", None, OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["diagnosis"]["code"], "D35.2");
        assert_eq!(json["tumor_type"]["type"], "pituitary");
    }

    #[test]
    fn test_diagnosis_unknown_type_falls_back() {
        colored::control::set_override(false);
        let out = diagnosis(&ctx(), "ependymoma", None, OutputFormat::Text).unwrap();
        assert!(out.starts_with("C71.9 Malignant neoplasm of brain, unspecified (ependymoma)"));
    }

    #[test]
    fn test_codes_lists_every_procedure() {
        let out = codes(&ctx(), OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 14);
    }

    #[test]
    fn test_tumor_types_text() {
        colored::control::set_override(false);
        let out = list_tumor_types(OutputFormat::Text).unwrap();
        assert!(out.contains("meningioma  Benign tumor arising from meninges"));
        assert!(out.contains("grades:    Microadenoma, Macroadenoma"));
    }

    #[test]
    fn test_check_config_summary() {
        let out = check_config(&ctx(), OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["reference_tables"], "builtin");
        assert_eq!(json["procedures"], 14);
        assert_eq!(json["diagnoses"], 3);
        assert_eq!(json["config"]["limits"]["max_text_bytes"], 65536);
    }
}
