use crate::models::{CostEstimate, CostRange, MatchedCode};
use rust_decimal::Decimal;

/// Aggregate matched codes into a cost estimate.
///
/// Coverage is the unweighted mean of each code's coverage fraction and is
/// zero when nothing matched. No rounding happens here.
pub fn estimate_costs(codes: &[MatchedCode]) -> CostEstimate {
    if codes.is_empty() {
        return CostEstimate::zero();
    }

    let total: CostRange = codes.iter().map(|c| c.procedure.cost_range).sum();
    let coverage_sum: Decimal = codes.iter().map(|c| c.procedure.insurance_coverage).sum();
    let average = coverage_sum / Decimal::from(codes.len());

    CostEstimate {
        total_cost_range: total,
        patient_cost_range: total.scale(Decimal::ONE - average),
        average_insurance_coverage: average,
        estimated_insurance_payment: total.scale(average),
    }
}
