use apd_core::{rational, BigInt, Matrix};
use apd_exact::MinimalExponent;
use apd_exp::{
    from_json_slice, to_canonical_json_bytes, Classification, ExperimentPlan, ExperimentReport,
    GeneratedMatrix, MatrixKind, SizeReport,
};
use serde_json::{json, Value};

fn int_sample(rows: &[[i64; 4]; 4]) -> GeneratedMatrix {
    GeneratedMatrix::Integer(Matrix::<BigInt>::from_i64_rows(rows).expect("square"))
}

fn size_four_with_one_violation() -> SizeReport {
    let mut report = SizeReport::new(4, 99, Vec::new());
    let plain = int_sample(&[[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12], [13, 14, 15, 16]]);
    let suspect = int_sample(&[[3, -1, 4, 1], [-5, 9, 2, -6], [5, 3, -5, 8], [9, 7, 9, -3]]);

    assert_eq!(
        report.record(0, MatrixKind::RandomInt, &plain, MinimalExponent::Finite(3)),
        Classification::Within
    );
    assert_eq!(
        report.record(1, MatrixKind::Sparse, &suspect, MinimalExponent::Finite(1)),
        Classification::BelowLower
    );
    assert_eq!(
        report.record(2, MatrixKind::Singular, &plain, MinimalExponent::Infinite),
        Classification::Infinite
    );
    assert_eq!(
        report.record(3, MatrixKind::RandomInt, &plain, MinimalExponent::Finite(6)),
        Classification::Within
    );
    report
}

#[test]
fn below_lower_sample_is_recorded_with_its_matrix() {
    let report = size_four_with_one_violation();
    assert_eq!(report.samples, 4);
    assert_eq!(report.violations, 1);
    assert_eq!(report.success_rate, 75.0);

    let record = &report.violation_records[0];
    assert_eq!(report.violation_records.len(), 1);
    assert_eq!(record.sample, 1);
    assert_eq!(record.kind, MatrixKind::Sparse);
    assert_eq!(record.exponent, MinimalExponent::Finite(1));
    assert_eq!(record.classification, Classification::BelowLower);
    assert_eq!(
        record.rows,
        vec![
            vec!["3", "-1", "4", "1"],
            vec!["-5", "9", "2", "-6"],
            vec!["5", "3", "-5", "8"],
            vec!["9", "7", "9", "-3"],
        ]
    );

    assert_eq!(report.kind_counts[&MatrixKind::RandomInt], 2);
    assert_eq!(report.classifications[&Classification::Within], 2);
    assert_eq!(report.classifications[&Classification::Infinite], 1);
    assert_eq!(report.distribution[&MinimalExponent::Finite(1)], 1);
}

#[test]
fn above_upper_sample_counts_as_violation() {
    let mut report = SizeReport::new(3, 5, Vec::new());
    let matrix = GeneratedMatrix::Rational(
        Matrix::from_rows(vec![
            vec![rational(1, 2).unwrap(), rational(0, 1).unwrap(), rational(1, 1).unwrap()],
            vec![rational(2, 3).unwrap(), rational(-1, 1).unwrap(), rational(0, 1).unwrap()],
            vec![rational(0, 1).unwrap(), rational(3, 4).unwrap(), rational(5, 1).unwrap()],
        ])
        .expect("square"),
    );
    let class = report.record(0, MatrixKind::Rational, &matrix, MinimalExponent::Finite(4));
    assert_eq!(class, Classification::AboveUpper);
    assert_eq!(report.violations, 1);
    assert_eq!(report.success_rate, 0.0);
    assert_eq!(report.violation_records[0].rows[0], vec!["1/2", "0", "1"]);
}

#[test]
fn assembled_report_with_violation_rejects_conjecture() {
    let plan = ExperimentPlan {
        sizes: [(4, 4)].into_iter().collect(),
        ..ExperimentPlan::default()
    };
    let report =
        ExperimentReport::assemble(&plan, vec![size_four_with_one_violation()]).expect("assemble");
    assert_eq!(report.total_samples, 4);
    assert_eq!(report.total_violations, 1);
    assert!(!report.conjecture_holds());

    let bytes = to_canonical_json_bytes(&report).expect("json");
    let decoded: ExperimentReport = from_json_slice(&bytes).expect("decode");
    assert_eq!(decoded, report);
}

#[test]
fn distribution_is_written_in_exponent_order() {
    let mut report = SizeReport::new(5, 1, Vec::new());
    let matrix = GeneratedMatrix::Integer(Matrix::constant(5, BigInt::from(1)));
    for exponent in [
        MinimalExponent::Infinite,
        MinimalExponent::Finite(10),
        MinimalExponent::Finite(4),
        MinimalExponent::Finite(10),
    ] {
        report.record(0, MatrixKind::RandomInt, &matrix, exponent);
    }

    let bytes = to_canonical_json_bytes(&report).expect("json");
    let value: Value = serde_json::from_slice(&bytes).expect("value");
    assert_eq!(value["distribution"], json!([[4, 1], [10, 2], ["inf", 1]]));

    let decoded: SizeReport = from_json_slice(&bytes).expect("decode");
    assert_eq!(decoded.distribution, report.distribution);
}
