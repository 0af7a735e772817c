use std::collections::BTreeMap;

use apd_core::errors::ApdError;
use apd_core::{RngHandle, RunProvenance, SchemaVersion};
use apd_exact::MinimalExponent;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::bounds::{Classification, ExponentBounds};
use crate::generate::{generate, GeneratedMatrix, MatrixKind};
use crate::hash::stable_hash_string;
use crate::plan::ExperimentPlan;

/// Result for one of the deterministic special-case matrices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialCaseResult {
    pub kind: MatrixKind,
    pub exponent: MinimalExponent,
    pub classification: Classification,
}

/// A random sample whose finite exponent fell outside the conjectured range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationRecord {
    /// Zero-based index of the sample within its size.
    pub sample: usize,
    pub kind: MatrixKind,
    pub exponent: MinimalExponent,
    pub classification: Classification,
    pub rows: Vec<Vec<String>>,
}

/// Aggregated statistics for one matrix size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeReport {
    pub size: usize,
    pub bounds: ExponentBounds,
    /// Seed of the per-size substream, reproducible from the plan seed.
    pub seed: u64,
    pub special_cases: Vec<SpecialCaseResult>,
    pub samples: usize,
    pub violations: usize,
    pub violation_records: Vec<ViolationRecord>,
    pub kind_counts: BTreeMap<MatrixKind, usize>,
    /// Observed `m1` values; finite exponents ascending, `inf` last. Written
    /// to JSON as `[exponent, count]` pairs in that order.
    #[serde(with = "exponent_pairs")]
    pub distribution: BTreeMap<MinimalExponent, usize>,
    pub classifications: BTreeMap<Classification, usize>,
    /// Percentage of random samples that were not violations.
    pub success_rate: f64,
}

/// Report for a full experiment plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub schema_version: SchemaVersion,
    pub provenance: RunProvenance,
    pub sizes: Vec<SizeReport>,
    pub total_samples: usize,
    pub total_violations: usize,
}

impl SizeReport {
    /// Empty report for `size` holding only the special-case results.
    pub fn new(size: usize, seed: u64, special_cases: Vec<SpecialCaseResult>) -> Self {
        Self {
            size,
            bounds: ExponentBounds::for_size(size),
            seed,
            special_cases,
            samples: 0,
            violations: 0,
            violation_records: Vec::new(),
            kind_counts: BTreeMap::new(),
            distribution: BTreeMap::new(),
            classifications: BTreeMap::new(),
            success_rate: 100.0,
        }
    }

    /// Folds one random sample into the counters and returns its class.
    ///
    /// Violations keep a copy of the matrix rows so they can be replayed.
    pub fn record(
        &mut self,
        sample: usize,
        kind: MatrixKind,
        matrix: &GeneratedMatrix,
        exponent: MinimalExponent,
    ) -> Classification {
        let classification = self.bounds.classify(exponent);
        self.samples += 1;
        *self.kind_counts.entry(kind).or_default() += 1;
        *self.distribution.entry(exponent).or_default() += 1;
        *self.classifications.entry(classification).or_default() += 1;

        if classification.is_violation() {
            warn!(
                "n = {}: sample {sample} ({}) gave m1 = {exponent} outside [{}, {}]",
                self.size,
                kind.label(),
                self.bounds.lower,
                self.bounds.upper
            );
            self.violations += 1;
            self.violation_records.push(ViolationRecord {
                sample,
                kind,
                exponent,
                classification,
                rows: matrix.to_string_rows(),
            });
        }
        self.success_rate =
            (self.samples - self.violations) as f64 / self.samples as f64 * 100.0;
        classification
    }
}

impl ExperimentReport {
    /// `true` when no random sample landed outside its interval.
    pub fn conjecture_holds(&self) -> bool {
        self.total_violations == 0
    }
}

/// Runs the special cases and every random sample configured for `size`.
///
/// Randomness comes from the substream `(plan.seed, size)`, so each size can
/// be rerun on its own and yields the same report.
pub fn run_size(plan: &ExperimentPlan, size: usize) -> Result<SizeReport, ApdError> {
    let samples = plan.samples_for(size)?;
    let seed = apd_core::derive_substream_seed(plan.seed, size as u64);
    let mut rng = RngHandle::from_seed(seed);
    let bounds = ExponentBounds::for_size(size);
    let weights = plan.kind_weights();

    let mut special_cases = Vec::new();
    if plan.special_cases {
        for kind in MatrixKind::SPECIAL_CASES {
            let exponent = generate(kind, size, &plan.ranges, &mut rng)?.solve().exponent;
            debug!("n = {size}: {} -> m1 = {exponent}", kind.label());
            special_cases.push(SpecialCaseResult {
                kind,
                exponent,
                classification: bounds.classify(exponent),
            });
        }
    }

    let mut report = SizeReport::new(size, seed, special_cases);
    for sample in 0..samples {
        let kind = plan.kinds[rng.weighted_index(&weights)?].kind;
        let matrix = generate(kind, size, &plan.ranges, &mut rng)?;
        let exponent = matrix.solve().exponent;
        report.record(sample, kind, &matrix, exponent);
    }

    info!(
        "n = {size}: {samples} samples, {} violations",
        report.violations
    );
    Ok(report)
}

impl ExperimentReport {
    /// Combines per-size reports produced for `plan` into a full report.
    pub fn assemble(plan: &ExperimentPlan, sizes: Vec<SizeReport>) -> Result<Self, ApdError> {
        let plan_hash = stable_hash_string(plan)?;
        let total_samples = sizes.iter().map(|report| report.samples).sum();
        let total_violations = sizes.iter().map(|report| report.violations).sum();
        Ok(Self {
            schema_version: SchemaVersion::default(),
            provenance: RunProvenance::new(plan_hash, plan.seed)
                .with_tool(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            sizes,
            total_samples,
            total_violations,
        })
    }
}

/// Validates the plan and runs every configured size in ascending order.
pub fn run_experiment(plan: &ExperimentPlan) -> Result<ExperimentReport, ApdError> {
    plan.validate()?;
    let sizes = plan
        .sizes
        .keys()
        .map(|&size| run_size(plan, size))
        .collect::<Result<Vec<_>, _>>()?;
    ExperimentReport::assemble(plan, sizes)
}

mod exponent_pairs {
    use std::collections::BTreeMap;

    use apd_exact::MinimalExponent;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        distribution: &BTreeMap<MinimalExponent, usize>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(distribution.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<MinimalExponent, usize>, D::Error> {
        let pairs = Vec::<(MinimalExponent, usize)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}
