use crate::catalog::{FALLBACK_ICD10_CODE, FALLBACK_ICD10_DESCRIPTION};
use crate::models::{DiagnosisCode, ResolvedDiagnosis};

/// ICD-10 resolution for tumor type and optional subtype
pub struct DiagnosisResolver<'a> {
    codes: &'a [DiagnosisCode],
}

impl<'a> DiagnosisResolver<'a> {
    /// Entries must already be lower-cased (see `ReferenceTables::prepare`).
    pub fn new(codes: &'a [DiagnosisCode]) -> Self {
        Self { codes }
    }

    /// Returns `None` only when no tumor type is given. Unknown tumor types
    /// resolve to the unspecified brain neoplasm code.
    pub fn resolve(&self, tumor_type: Option<&str>, subtype: Option<&str>) -> Option<ResolvedDiagnosis> {
        let tumor_type = tumor_type?;
        let normalized = tumor_type.to_lowercase();

        let (code, description) = match self.codes.iter().find(|d| d.tumor_type == normalized) {
            Some(entry) => {
                let code = subtype
                    .and_then(|s| entry.subtypes.get(&s.to_lowercase()))
                    .unwrap_or(&entry.primary);
                (code.clone(), entry.description.clone())
            }
            None => {
                tracing::debug!(tumor_type, "unknown tumor type, using fallback diagnosis code");
                (FALLBACK_ICD10_CODE.to_string(), FALLBACK_ICD10_DESCRIPTION.to_string())
            }
        };

        Some(ResolvedDiagnosis {
            code,
            description,
            tumor_type: tumor_type.to_string(),
            subtype: subtype.map(str::to_string),
        })
    }
}
