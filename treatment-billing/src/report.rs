use crate::catalog::ReferenceTables;
use crate::diagnosis::DiagnosisResolver;
use crate::estimate::estimate_costs;
use crate::extraction::KeywordExtractor;
use crate::lookup::CodeLookup;
use crate::models::{BillingReport, CostEstimate, CostRange, ReportSummary};
use rust_decimal::{Decimal, RoundingStrategy};

/// Builds billing reports from recommendation text
pub struct ReportAssembler<'a> {
    tables: &'a ReferenceTables,
}

impl<'a> ReportAssembler<'a> {
    pub fn new(tables: &'a ReferenceTables) -> Self {
        Self { tables }
    }

    /// Deterministic in its inputs: no clock, no randomness.
    pub fn build(&self, text: &str, tumor_type: Option<&str>, subtype: Option<&str>) -> BillingReport {
        let treatments = KeywordExtractor::new(&self.tables.keywords).extract(text);
        let billing_codes = CodeLookup::new(&self.tables.procedures).lookup(&treatments);
        let cost_estimates = estimate_costs(&billing_codes);

        // An empty label carries no diagnosis
        let tumor_type = tumor_type.filter(|t| !t.is_empty());
        let icd10_code = DiagnosisResolver::new(&self.tables.diagnoses).resolve(tumor_type, subtype);

        let summary = summarize(treatments.len(), &cost_estimates);

        BillingReport {
            recommendations_text: text.to_string(),
            identified_treatments: treatments,
            billing_codes,
            cost_estimates,
            icd10_code,
            summary,
        }
    }
}

fn summarize(total_procedures: usize, estimate: &CostEstimate) -> ReportSummary {
    ReportSummary {
        total_procedures,
        estimated_total_cost: format_cost_range(&estimate.total_cost_range),
        estimated_patient_cost: format_cost_range(&estimate.patient_cost_range),
        insurance_coverage: format_percentage(estimate.average_insurance_coverage),
    }
}

/// `"$15,000 - $25,000"`
pub fn format_cost_range(range: &CostRange) -> String {
    format!("{} - {}", format_usd(range.min), format_usd(range.max))
}

/// Whole dollars with thousands separators, ties rounded away from zero.
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}${}", group_thousands(&digits))
}

/// Fraction as a percentage with one decimal place, e.g. `"85.0%"`
pub fn format_percentage(fraction: Decimal) -> String {
    let mut percent = (fraction * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven);
    percent.rescale(1);
    format!("{percent}%")
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd_grouping() {
        assert_eq!(format_usd(Decimal::ZERO), "$0");
        assert_eq!(format_usd(Decimal::from(150)), "$150");
        assert_eq!(format_usd(Decimal::from(15_000)), "$15,000");
        assert_eq!(format_usd(Decimal::from(1_234_567)), "$1,234,567");
    }

    #[test]
    fn test_format_usd_rounds_half_away_from_zero() {
        assert_eq!(format_usd(Decimal::new(25, 1)), "$3");
        assert_eq!(format_usd(Decimal::new(35, 1)), "$4");
        assert_eq!(format_usd(Decimal::new(43_505, 1)), "$4,351");
        assert_eq!(format_usd(Decimal::new(43_504, 1)), "$4,350");
        assert_eq!(format_usd(Decimal::new(4_999_996, 3)), "$5,000");
    }

    #[test]
    fn test_format_cost_range() {
        assert_eq!(format_cost_range(&CostRange::new(15_000, 25_000)), "$15,000 - $25,000");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(Decimal::new(85, 2)), "85.0%");
        assert_eq!(format_percentage(Decimal::ZERO), "0.0%");
        assert_eq!(format_percentage(Decimal::new(91_666_667, 8)), "91.7%");
    }

    #[test]
    fn test_report_without_matches() {
        let tables = ReferenceTables::builtin();
        let report = ReportAssembler::new(&tables).build("Watchful waiting.", None, None);
        assert!(report.identified_treatments.is_empty());
        assert!(report.billing_codes.is_empty());
        assert!(report.icd10_code.is_none());
        assert_eq!(report.summary.total_procedures, 0);
        assert_eq!(report.summary.estimated_total_cost, "$0 - $0");
        assert_eq!(report.summary.insurance_coverage, "0.0%");
    }

    #[test]
    fn test_empty_tumor_type_has_no_diagnosis() {
        let tables = ReferenceTables::builtin();
        let report = ReportAssembler::new(&tables).build("MRI", Some(""), None);
        assert!(report.icd10_code.is_none());
    }

    #[test]
    fn test_single_procedure_summary() {
        let tables = ReferenceTables::builtin();
        let report = ReportAssembler::new(&tables).build("Craniotomy planned", Some("glioma"), None);
        assert_eq!(report.summary.total_procedures, 1);
        assert_eq!(report.summary.estimated_total_cost, "$15,000 - $25,000");
        assert_eq!(report.summary.estimated_patient_cost, "$2,250 - $3,750");
        assert_eq!(report.summary.insurance_coverage, "85.0%");
    }
}
