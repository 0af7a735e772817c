use apd_exp::{ExperimentPlan, IntRange, KindWeight, MatrixKind};

#[test]
fn default_plan_matches_reference_suite() {
    let plan = ExperimentPlan::default();
    assert_eq!(plan.seed, 42);
    let sizes: Vec<(usize, usize)> = plan.sizes.iter().map(|(&n, &s)| (n, s)).collect();
    assert_eq!(
        sizes,
        vec![(2, 1000), (3, 1000), (4, 1000), (5, 1000), (6, 100), (7, 100)]
    );
    assert_eq!(plan.kind_weights(), vec![1, 1, 1, 1]);
    assert!(plan.special_cases);
    assert_eq!(plan.ranges.int, IntRange::new(-50, 50));
    assert_eq!(plan.ranges.denominator, IntRange::new(1, 4));
    plan.validate().expect("default plan is valid");
}

#[test]
fn partial_yaml_fills_defaults() {
    let plan = ExperimentPlan::from_yaml_str(
        r#"
seed: 7
sizes:
  3: 25
kinds:
  - kind: rational
    weight: 3
  - kind: sparse
ranges:
  int: { min: -5, max: 5 }
"#,
    )
    .expect("plan");
    assert_eq!(plan.seed, 7);
    assert_eq!(plan.samples_for(3).unwrap(), 25);
    assert!(plan.samples_for(4).is_err());
    assert_eq!(
        plan.kinds,
        vec![
            KindWeight { kind: MatrixKind::Rational, weight: 3 },
            KindWeight { kind: MatrixKind::Sparse, weight: 1 },
        ]
    );
    assert_eq!(plan.ranges.int, IntRange::new(-5, 5));
    assert_eq!(plan.ranges.singular, IntRange::new(-10, 10));
    assert!(plan.special_cases);
}

#[test]
fn plan_round_trips_through_yaml() {
    let plan = ExperimentPlan::default().with_seed(99);
    let text = serde_yaml::to_string(&plan).expect("yaml");
    let decoded = ExperimentPlan::from_yaml_str(&text).expect("decode");
    assert_eq!(decoded, plan);
}

#[test]
fn invalid_plans_are_rejected() {
    let err = ExperimentPlan::from_yaml_str("sizes: {}\n").unwrap_err();
    assert_eq!(err.info().code, "no-sizes");

    let err = ExperimentPlan::from_yaml_str("kinds:\n  - kind: sparse\n    weight: 0\n")
        .unwrap_err();
    assert_eq!(err.info().code, "no-kinds");

    let err = ExperimentPlan::from_yaml_str("ranges:\n  sparse: { min: 4, max: 1 }\n")
        .unwrap_err();
    assert_eq!(err.info().code, "empty-range");
    assert_eq!(err.info().context["range"], "sparse");

    let err = ExperimentPlan::from_yaml_str("ranges:\n  denominator: { min: 0, max: 3 }\n")
        .unwrap_err();
    assert_eq!(err.info().code, "denominator");

    let err = ExperimentPlan::from_yaml_str("kinds: [{ kind: hexagonal }]\n").unwrap_err();
    assert_eq!(err.family(), "config");
    assert_eq!(err.info().code, "yaml-read");
}
