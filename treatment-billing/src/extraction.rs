use crate::models::KeywordRule;
use itertools::Itertools;

/// Detects procedure mentions in free text by phrase matching.
///
/// Rules are checked in table order and a procedure is recorded on its first
/// matching phrase, so output order follows the table rather than the text.
pub struct KeywordExtractor<'a> {
    rules: &'a [KeywordRule],
}

impl<'a> KeywordExtractor<'a> {
    /// Rules must already be lower-cased (see `ReferenceTables::prepare`).
    pub fn new(rules: &'a [KeywordRule]) -> Self {
        Self { rules }
    }

    pub fn extract(&self, text: &str) -> Vec<String> {
        let text = text.to_lowercase();

        self.rules
            .iter()
            .filter_map(|rule| {
                let phrase = rule.phrases.iter().find(|phrase| text.contains(phrase.as_str()))?;
                tracing::trace!(procedure = %rule.procedure, phrase = %phrase, "keyword matched");
                Some(rule.procedure.clone())
            })
            .unique()
            .collect()
    }
}
