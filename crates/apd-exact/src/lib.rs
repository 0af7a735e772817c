#![deny(missing_docs)]
//! Exact minimal-exponent search for alternating permutation sums.
//!
//! For an `n x n` matrix `A` and a permutation `p`, let
//! `f(p) = sum_i A[i][p(i)]` and `APD(m) = sum_p sign(p) * f(p)^m`. The solver
//! finds the least `m` in `1..=n(n-1)/2` with `APD(m) != 0`. All arithmetic is
//! carried out over [`apd_core::ExactScalar`] types, so the zero test is exact.
//!
//! The solver does not judge its result; bound checks against `[n-1, n(n-1)/2]`
//! belong to the caller.

mod exponent;
mod solver;

pub use exponent::{MinimalExponent, ParseExponentError};
pub use solver::{
    apd_sum, apd_value, minimal_violation_exponent, probe_limit, signed_values, solve, SignedValue,
    SolveReport,
};
