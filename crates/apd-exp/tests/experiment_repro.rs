use std::collections::BTreeMap;

use apd_exact::MinimalExponent;
use apd_exp::{
    from_json_slice, run_experiment, run_size, to_canonical_json_bytes, Classification,
    ExperimentPlan, ExperimentReport, ExponentBounds, KindWeight, MatrixKind,
};

fn small_plan() -> ExperimentPlan {
    ExperimentPlan {
        sizes: [(2, 30), (3, 30), (4, 12)].into_iter().collect(),
        ..ExperimentPlan::default().with_seed(8001)
    }
}

#[test]
fn experiment_reports_repeat() {
    let plan = small_plan();
    let report_a = run_experiment(&plan).expect("run");
    let report_b = run_experiment(&plan).expect("run");
    assert_eq!(report_a, report_b);
    let json_a = to_canonical_json_bytes(&report_a).expect("json");
    let json_b = to_canonical_json_bytes(&report_b).expect("json");
    assert_eq!(json_a, json_b);
    assert_eq!(report_a.sizes.len(), 3);
    assert_eq!(report_a.total_samples, 72);
    assert_eq!(report_a.provenance.seed, 8001);
    assert_eq!(report_a.provenance.plan_hash.len(), 64);
}

#[test]
fn report_round_trips_through_json() {
    let report = run_experiment(&small_plan()).expect("run");
    let bytes = to_canonical_json_bytes(&report).expect("json");
    let decoded: ExperimentReport = from_json_slice(&bytes).expect("decode");
    assert_eq!(decoded, report);
}

#[test]
fn no_sample_leaves_the_conjectured_range() {
    let report = run_experiment(&small_plan()).expect("run");
    assert!(report.conjecture_holds(), "violations: {:#?}", report.sizes);
    for size in &report.sizes {
        assert_eq!(size.success_rate, 100.0);
        assert!(size.violation_records.is_empty());
        let counted: usize = size.distribution.values().sum();
        assert_eq!(counted, size.samples);
        let kinds: usize = size.kind_counts.values().sum();
        assert_eq!(kinds, size.samples);
        for exponent in size.distribution.keys() {
            if let Some(m) = exponent.finite() {
                assert!(size.bounds.lower <= m && m <= size.bounds.upper);
            }
        }
    }
}

#[test]
fn special_cases_match_known_exponents() {
    let report = run_size(&small_plan(), 3).expect("run");
    let observed: Vec<(MatrixKind, MinimalExponent)> = report
        .special_cases
        .iter()
        .map(|case| (case.kind, case.exponent))
        .collect();
    assert_eq!(
        observed,
        vec![
            (MatrixKind::Constant, MinimalExponent::Infinite),
            (MatrixKind::NaturalSquare, MinimalExponent::Infinite),
            (MatrixKind::SquaredNaturalSquare, MinimalExponent::Finite(3)),
        ]
    );
}

#[test]
fn sizes_are_reproducible_in_isolation() {
    let plan = small_plan();
    let full = run_experiment(&plan).expect("run");
    let alone = run_size(&plan, 4).expect("run");
    assert_eq!(full.sizes[2], alone);
}

#[test]
fn kind_distribution_follows_weights() {
    let plan = ExperimentPlan {
        sizes: BTreeMap::from([(3, 40)]),
        kinds: vec![
            KindWeight {
                kind: MatrixKind::Rational,
                weight: 1,
            },
            KindWeight {
                kind: MatrixKind::Singular,
                weight: 0,
            },
        ],
        special_cases: false,
        ..ExperimentPlan::default()
    };
    let report = run_size(&plan, 3).expect("run");
    assert!(report.special_cases.is_empty());
    assert_eq!(report.kind_counts.len(), 1);
    assert_eq!(report.kind_counts[&MatrixKind::Rational], 40);
}

#[test]
fn unknown_size_is_a_config_error() {
    let err = run_size(&small_plan(), 9).unwrap_err();
    assert_eq!(err.family(), "config");
}

#[test]
fn classification_boundaries() {
    let bounds = ExponentBounds::for_size(4);
    assert_eq!((bounds.lower, bounds.upper), (3, 6));
    assert_eq!(bounds.classify(MinimalExponent::Finite(2)), Classification::BelowLower);
    assert_eq!(bounds.classify(MinimalExponent::Finite(3)), Classification::Within);
    assert_eq!(bounds.classify(MinimalExponent::Finite(6)), Classification::Within);
    assert_eq!(bounds.classify(MinimalExponent::Finite(7)), Classification::AboveUpper);
    assert_eq!(bounds.classify(MinimalExponent::Infinite), Classification::Infinite);
    assert!(Classification::BelowLower.is_violation());
    assert!(!Classification::Infinite.is_violation());
}
