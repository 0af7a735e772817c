//! Deterministic experiment harness for the APD exponent conjecture.
//!
//! The harness owns everything the solver deliberately leaves out: matrix
//! generation, sampling, classification against `[n-1, n(n-1)/2]` and
//! aggregate statistics.

mod bounds;
mod generate;
mod hash;
mod plan;
mod run;
mod serde;

pub use bounds::{Classification, ExponentBounds};
pub use generate::{generate, GeneratedMatrix, MatrixKind};
pub use hash::stable_hash_string;
pub use plan::{ExperimentPlan, IntRange, KindWeight, ValueRanges};
pub use run::{
    run_experiment, run_size, ExperimentReport, SizeReport, SpecialCaseResult, ViolationRecord,
};

pub use serde::{from_json_slice, to_canonical_json_bytes, to_canonical_json_pretty};
