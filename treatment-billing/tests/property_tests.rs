use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;
use treatment_billing::{estimate_costs, CostRange, MatchedCode, ProcedureCode, TreatmentBillingMapper};

fn code_strategy() -> impl Strategy<Value = MatchedCode> {
    (0i64..50_000, 0i64..50_000, 0i64..=100).prop_map(|(min, spread, coverage)| MatchedCode {
        treatment: format!("p{min}"),
        procedure: ProcedureCode {
            key: format!("p{min}"),
            code: "00000".to_string(),
            description: String::new(),
            cost_range: CostRange::new(min, min + spread),
            insurance_coverage: Decimal::new(coverage, 2),
        },
    })
}

fn phrase_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "craniotomy", "Biopsy", "gamma knife", "TMZ", "avastin", "BCNU", "follow-up imaging",
        "PET scan", "steroid", "seizure medication", "proton beam", "endoscopic", "awake surgery",
    ])
    .prop_map(str::to_string)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn estimate_is_order_independent(codes in prop::collection::vec(code_strategy(), 0..12)) {
        let mut reversed = codes.clone();
        reversed.reverse();
        let mut rotated = codes.clone();
        if !rotated.is_empty() {
            rotated.rotate_left(1);
        }
        let forward = estimate_costs(&codes);
        prop_assert_eq!(&forward, &estimate_costs(&reversed));
        prop_assert_eq!(&forward, &estimate_costs(&rotated));
    }

    #[test]
    fn estimate_outputs_are_well_formed(codes in prop::collection::vec(code_strategy(), 0..12)) {
        let estimate = estimate_costs(&codes);
        prop_assert!(estimate.total_cost_range.is_well_formed());
        prop_assert!(estimate.patient_cost_range.is_well_formed());
        prop_assert!(estimate.estimated_insurance_payment.is_well_formed());
        prop_assert!(estimate.average_insurance_coverage >= Decimal::ZERO);
        prop_assert!(estimate.average_insurance_coverage <= Decimal::ONE);
    }

    #[test]
    fn detected_keys_come_from_keyword_index(
        filler in "[a-z ,.]{0,80}",
        phrases in prop::collection::vec(phrase_strategy(), 0..5),
    ) {
        let mapper = TreatmentBillingMapper::with_builtin_tables();
        let text = format!("{filler} {}", phrases.join(" and "));
        let detected = mapper.extract(&text);

        for key in &detected {
            prop_assert!(mapper.tables().keywords.iter().any(|r| &r.procedure == key));
        }
        let unique: HashSet<&String> = detected.iter().collect();
        prop_assert_eq!(unique.len(), detected.len());
        prop_assert_eq!(detected, mapper.extract(&text));
    }

    #[test]
    fn lookup_never_grows(keys in prop::collection::vec("[a-z_]{1,24}", 0..10)) {
        let mapper = TreatmentBillingMapper::with_builtin_tables();
        let codes = mapper.lookup(&keys);
        prop_assert!(codes.len() <= keys.len());
        for code in &codes {
            prop_assert_eq!(Some(&code.procedure), mapper.tables().procedure(&code.treatment));
        }
    }
}
