use std::collections::BTreeSet;

use apd_core::{factorial, permutations, ExactScalar, Matrix, Sign};
use log::{debug, trace};
use num_traits::pow;
use serde::{Deserialize, Serialize};

use crate::exponent::MinimalExponent;

/// Sign and diagonal-selection value of one permutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedValue<T> {
    /// Parity of the permutation.
    pub sign: Sign,
    /// `f(p) = sum_i matrix[i][p(i)]`.
    pub value: T,
}

/// Search result with enumeration diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveReport {
    /// Side length `n` of the matrix.
    pub size: usize,
    /// Number of permutations enumerated (`n!`).
    pub permutations: usize,
    /// Number of distinct `f(p)` values.
    pub distinct_values: usize,
    /// Exponents actually evaluated.
    pub probes: u32,
    /// Upper end of the search range, `n(n-1)/2`.
    pub probe_limit: u32,
    /// Whether the constant-`f` short-circuit fired.
    pub degenerate: bool,
    /// Minimal exponent, or the infinite sentinel.
    pub exponent: MinimalExponent,
}

/// Largest exponent probed for an `n x n` matrix: `n(n-1)/2`.
pub fn probe_limit(n: usize) -> u32 {
    let triangular = n.saturating_mul(n.saturating_sub(1)) / 2;
    u32::try_from(triangular).unwrap_or(u32::MAX)
}

/// Enumerates every permutation once and records `(sign(p), f(p))`.
pub fn signed_values<T: ExactScalar>(matrix: &Matrix<T>) -> Vec<SignedValue<T>> {
    let n = matrix.size();
    let mut values = Vec::with_capacity(factorial(n).unwrap_or(0));
    let mut net_sign = 0i64;
    for perm in permutations(n) {
        let sign = perm.sign();
        net_sign += sign.as_i64();
        values.push(SignedValue {
            sign,
            value: matrix.diagonal_value(perm.as_slice()),
        });
    }
    debug_assert!(
        n < 2 || net_sign == 0,
        "signs over S_{n} summed to {net_sign}"
    );
    debug!("enumerated {} permutations for n = {n}", values.len());
    values
}

/// Computes `APD(m) = sum_p sign(p) * f(p)^m` exactly.
///
/// Enumerates the permutations on every call; use [`apd_sum`] with the output
/// of [`signed_values`] to evaluate several exponents.
pub fn apd_value<T: ExactScalar>(matrix: &Matrix<T>, m: u32) -> T {
    apd_sum(&signed_values(matrix), m)
}

/// Evaluates `APD(m)` from precomputed `(sign(p), f(p))` pairs.
pub fn apd_sum<T: ExactScalar>(values: &[SignedValue<T>], m: u32) -> T {
    values.iter().fold(T::zero(), |acc, entry| {
        accumulate(acc, entry.sign, &pow(entry.value.clone(), m as usize))
    })
}

/// Returns the smallest `m >= 1` with `APD(m) != 0`, or
/// [`MinimalExponent::Infinite`] when none exists up to `n(n-1)/2`.
pub fn minimal_violation_exponent<T: ExactScalar>(matrix: &Matrix<T>) -> MinimalExponent {
    solve(matrix).exponent
}

/// Runs the minimal-exponent search and reports how it got there.
pub fn solve<T: ExactScalar>(matrix: &Matrix<T>) -> SolveReport {
    let size = matrix.size();
    let values = signed_values(matrix);
    let distinct_values = values
        .iter()
        .map(|entry| &entry.value)
        .collect::<BTreeSet<_>>()
        .len();
    let limit = probe_limit(size);
    let mut report = SolveReport {
        size,
        permutations: values.len(),
        distinct_values,
        probes: 0,
        probe_limit: limit,
        degenerate: distinct_values <= 1,
        exponent: MinimalExponent::Infinite,
    };

    // A constant f makes every APD(m) a multiple of the sign sum.
    if report.degenerate {
        debug!("all {} diagonal values coincide, skipping search", values.len());
        return report;
    }

    let mut powers: Vec<T> = values.iter().map(|entry| entry.value.clone()).collect();
    for m in 1..=limit {
        if m > 1 {
            for (current, entry) in powers.iter_mut().zip(&values) {
                let previous = std::mem::replace(current, T::zero());
                *current = previous * &entry.value;
            }
        }
        report.probes = m;
        let sum = values
            .iter()
            .zip(&powers)
            .fold(T::zero(), |acc, (entry, power)| accumulate(acc, entry.sign, power));
        trace!("APD({m}) = {sum}");
        if !sum.is_zero() {
            report.exponent = MinimalExponent::Finite(m);
            return report;
        }
    }
    report
}

fn accumulate<T: ExactScalar>(acc: T, sign: Sign, term: &T) -> T {
    match sign {
        Sign::Positive => acc + term,
        Sign::Negative => acc - term,
    }
}
