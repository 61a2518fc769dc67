use base64::{engine::general_purpose, Engine as _};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use sha2::{Digest, Sha256};

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();
    static ref SSN_REGEX: Regex = Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").unwrap();
    static ref PHONE_REGEX: Regex = Regex::new(r"(?:\+1[-.\s]?)?(?:\(\d{3}\)|\b\d{3})[-.\s]?\d{3}[-.\s]?\d{4}\b").unwrap();
    static ref MRN_REGEX: Regex = Regex::new(r"(?i)\bMRN[:#\s]*\d{4,}\b").unwrap();
    static ref DOB_REGEX: Regex = Regex::new(r"\b(?:\d{1,2}/\d{1,2}/\d{4}|\d{4}-\d{2}-\d{2})\b").unwrap();
}

/// Kinds of identifiers the redactor looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PiiKind {
    Email,
    Ssn,
    Phone,
    MedicalRecordNumber,
    DateOfBirth,
}

impl PiiKind {
    fn label(self) -> &'static str {
        match self {
            PiiKind::Email => "EMAIL",
            PiiKind::Ssn => "SSN",
            PiiKind::Phone => "PHONE",
            PiiKind::MedicalRecordNumber => "MRN",
            PiiKind::DateOfBirth => "DATE",
        }
    }

    fn mask(self) -> &'static str {
        match self {
            PiiKind::Email => "***@***",
            PiiKind::Ssn => "***-**-****",
            PiiKind::Phone => "(***) ***-****",
            PiiKind::MedicalRecordNumber => "MRN******",
            PiiKind::DateOfBirth => "**/**/****",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            PiiKind::Email => &*EMAIL_REGEX,
            PiiKind::Ssn => &*SSN_REGEX,
            PiiKind::Phone => &*PHONE_REGEX,
            PiiKind::MedicalRecordNumber => &*MRN_REGEX,
            PiiKind::DateOfBirth => &*DOB_REGEX,
        }
    }
}

/// PII redaction configuration
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub redact_emails: bool,
    pub redact_phones: bool,
    pub redact_ssn: bool,
    pub redact_mrn: bool,
    pub redact_dates: bool,
    /// Replace with a short hash so repeated values can be correlated
    pub hash_for_correlation: bool,
    pub custom_patterns: Vec<(Regex, String)>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_emails: true,
            redact_phones: true,
            redact_ssn: true,
            redact_mrn: true,
            redact_dates: true,
            hash_for_correlation: true,
            custom_patterns: Vec::new(),
        }
    }
}

/// PII redactor for log messages
#[derive(Debug, Clone, Default)]
pub struct PiiRedactor {
    config: RedactionConfig,
}

impl PiiRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    fn enabled_kinds(&self) -> impl Iterator<Item = PiiKind> + '_ {
        // SSN before phone: both are dash-separated digit runs
        [
            (PiiKind::Email, self.config.redact_emails),
            (PiiKind::Ssn, self.config.redact_ssn),
            (PiiKind::MedicalRecordNumber, self.config.redact_mrn),
            (PiiKind::DateOfBirth, self.config.redact_dates),
            (PiiKind::Phone, self.config.redact_phones),
        ]
        .into_iter()
        .filter_map(|(kind, enabled)| enabled.then_some(kind))
    }

    pub fn redact(&self, text: &str) -> String {
        let mut result = text.to_string();

        for kind in self.enabled_kinds() {
            result = kind
                .pattern()
                .replace_all(&result, |caps: &Captures| self.replacement(kind, &caps[0]))
                .into_owned();
        }

        for (pattern, replacement) in &self.config.custom_patterns {
            result = pattern.replace_all(&result, replacement.as_str()).into_owned();
        }

        result
    }

    /// True when any enabled pattern matches
    pub fn contains_pii(&self, text: &str) -> bool {
        self.enabled_kinds().any(|kind| kind.pattern().is_match(text))
            || self.config.custom_patterns.iter().any(|(p, _)| p.is_match(text))
    }

    fn replacement(&self, kind: PiiKind, value: &str) -> String {
        if self.config.hash_for_correlation {
            format!("{}[{}]", kind.label(), hash_value(value))
        } else {
            kind.mask().to_string()
        }
    }
}

fn hash_value(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    // First 8 bytes keep log lines short
    general_purpose::STANDARD_NO_PAD.encode(&digest[..8])
}
