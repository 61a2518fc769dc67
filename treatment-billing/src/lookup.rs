use crate::models::{MatchedCode, ProcedureCode};

/// Resolves detected procedure keys against the procedure code table
pub struct CodeLookup<'a> {
    procedures: &'a [ProcedureCode],
}

impl<'a> CodeLookup<'a> {
    pub fn new(procedures: &'a [ProcedureCode]) -> Self {
        Self { procedures }
    }

    /// Keys without a table entry contribute nothing and are skipped.
    pub fn lookup<S: AsRef<str>>(&self, keys: &[S]) -> Vec<MatchedCode> {
        keys.iter()
            .filter_map(|key| {
                let key = key.as_ref();
                let Some(procedure) = self.procedures.iter().find(|p| p.key == key) else {
                    tracing::debug!(procedure = key, "no billing code for detected procedure");
                    return None;
                };
                Some(MatchedCode {
                    treatment: key.to_string(),
                    procedure: procedure.clone(),
                })
            })
            .collect()
    }
}
