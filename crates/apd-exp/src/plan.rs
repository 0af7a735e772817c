use std::collections::BTreeMap;

use apd_core::errors::{ApdError, ErrorInfo};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::generate::MatrixKind;

/// Inclusive integer range used by the random generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

/// Value ranges for every random matrix kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRanges {
    #[serde(default = "ValueRanges::default_int")]
    pub int: IntRange,
    #[serde(default = "ValueRanges::default_singular")]
    pub singular: IntRange,
    #[serde(default = "ValueRanges::default_sparse")]
    pub sparse: IntRange,
    #[serde(default = "ValueRanges::default_numerator")]
    pub numerator: IntRange,
    #[serde(default = "ValueRanges::default_denominator")]
    pub denominator: IntRange,
}

impl ValueRanges {
    const fn default_int() -> IntRange {
        IntRange::new(-50, 50)
    }

    const fn default_singular() -> IntRange {
        IntRange::new(-10, 10)
    }

    const fn default_sparse() -> IntRange {
        IntRange::new(1, 9)
    }

    const fn default_numerator() -> IntRange {
        IntRange::new(-10, 10)
    }

    const fn default_denominator() -> IntRange {
        IntRange::new(1, 4)
    }
}

impl Default for ValueRanges {
    fn default() -> Self {
        Self {
            int: Self::default_int(),
            singular: Self::default_singular(),
            sparse: Self::default_sparse(),
            numerator: Self::default_numerator(),
            denominator: Self::default_denominator(),
        }
    }
}

/// One entry of the matrix-kind distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindWeight {
    pub kind: MatrixKind,
    #[serde(default = "KindWeight::default_weight")]
    pub weight: u32,
}

impl KindWeight {
    const fn default_weight() -> u32 {
        1
    }
}

/// Explicit configuration for one experiment: seed, per-size sample counts
/// and the distribution of random matrix kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentPlan {
    #[serde(default = "ExperimentPlan::default_seed")]
    pub seed: u64,
    /// Matrix size `n` mapped to the number of random samples.
    #[serde(default = "ExperimentPlan::default_sizes")]
    pub sizes: BTreeMap<usize, usize>,
    #[serde(default = "ExperimentPlan::default_kinds")]
    pub kinds: Vec<KindWeight>,
    /// Whether the constant and natural-square matrices run for every size.
    #[serde(default = "ExperimentPlan::default_special_cases")]
    pub special_cases: bool,
    #[serde(default)]
    pub ranges: ValueRanges,
}

impl ExperimentPlan {
    const fn default_seed() -> u64 {
        42
    }

    fn default_sizes() -> BTreeMap<usize, usize> {
        [(2, 1000), (3, 1000), (4, 1000), (5, 1000), (6, 100), (7, 100)]
            .into_iter()
            .collect()
    }

    fn default_kinds() -> Vec<KindWeight> {
        [
            MatrixKind::RandomInt,
            MatrixKind::Sparse,
            MatrixKind::Singular,
            MatrixKind::Rational,
        ]
        .into_iter()
        .map(|kind| KindWeight {
            kind,
            weight: KindWeight::default_weight(),
        })
        .collect()
    }

    const fn default_special_cases() -> bool {
        true
    }

    /// Parses a plan from YAML text and validates it.
    pub fn from_yaml_str(text: &str) -> Result<Self, ApdError> {
        let plan: Self = serde_yaml::from_str(text).map_err(|err| {
            ApdError::Config(ErrorInfo::new("yaml-read", err.to_string()))
        })?;
        plan.validate()?;
        Ok(plan)
    }

    /// Returns a copy of the plan with a different master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the number of random samples configured for `size`.
    pub fn samples_for(&self, size: usize) -> Result<usize, ApdError> {
        self.sizes.get(&size).copied().ok_or_else(|| {
            ApdError::Config(
                ErrorInfo::new("unknown-size", "matrix size is not part of the plan")
                    .with_context("size", size),
            )
        })
    }

    /// Weights of [`ExperimentPlan::kinds`] in declaration order.
    pub fn kind_weights(&self) -> Vec<u32> {
        self.kinds.iter().map(|entry| entry.weight).collect()
    }

    /// Checks sizes, kind weights and value ranges.
    pub fn validate(&self) -> Result<(), ApdError> {
        if self.sizes.is_empty() {
            return Err(ApdError::Config(
                ErrorInfo::new("no-sizes", "plan must list at least one matrix size")
                    .with_hint("add entries such as `3: 100` under `sizes`"),
            ));
        }
        if self.kinds.iter().all(|entry| entry.weight == 0) {
            return Err(ApdError::Config(
                ErrorInfo::new("no-kinds", "matrix kinds must have a positive total weight")
                    .with_context("kinds", self.kinds.len()),
            ));
        }
        let ranges = [
            ("int", self.ranges.int),
            ("singular", self.ranges.singular),
            ("sparse", self.ranges.sparse),
            ("numerator", self.ranges.numerator),
            ("denominator", self.ranges.denominator),
        ];
        for (name, range) in ranges {
            if range.min > range.max {
                return Err(ApdError::Config(
                    ErrorInfo::new("empty-range", "range minimum exceeds maximum")
                        .with_context("range", name)
                        .with_context("min", range.min)
                        .with_context("max", range.max),
                ));
            }
        }
        if self.ranges.denominator.min < 1 {
            return Err(ApdError::Config(
                ErrorInfo::new("denominator", "denominators must be positive")
                    .with_context("min", self.ranges.denominator.min),
            ));
        }
        for &size in self.sizes.keys() {
            if size >= 8 {
                warn!("size {size} enumerates {size}! permutations per matrix and will be slow");
            }
        }
        Ok(())
    }
}

impl Default for ExperimentPlan {
    fn default() -> Self {
        Self {
            seed: Self::default_seed(),
            sizes: Self::default_sizes(),
            kinds: Self::default_kinds(),
            special_cases: Self::default_special_cases(),
            ranges: ValueRanges::default(),
        }
    }
}
