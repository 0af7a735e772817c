//! Permutations of `{0, ..., n-1}` and their parity.

use std::ops::{Mul, Neg};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::errors::{ApdError, ErrorInfo};

/// Parity of a permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    /// Even number of transpositions (+1).
    Positive,
    /// Odd number of transpositions (-1).
    Negative,
}

impl Sign {
    /// Sign of a product of `transpositions` transpositions.
    pub fn from_transpositions(transpositions: usize) -> Self {
        if transpositions % 2 == 0 {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }

    /// Returns `+1` or `-1`.
    pub fn as_i64(self) -> i64 {
        match self {
            Sign::Positive => 1,
            Sign::Negative => -1,
        }
    }

    /// Returns `true` for even permutations.
    pub fn is_positive(self) -> bool {
        self == Sign::Positive
    }
}

impl Mul for Sign {
    type Output = Sign;

    fn mul(self, rhs: Sign) -> Sign {
        if self == rhs {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}

impl Neg for Sign {
    type Output = Sign;

    fn neg(self) -> Sign {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }
}

/// Computes the sign of `perm` by cycle decomposition.
///
/// Each cycle of length `L` contributes `L - 1` transpositions. `perm` must be
/// a bijection on `{0, ..., perm.len() - 1}`; this is not checked in release
/// builds.
pub fn sign(perm: &[usize]) -> Sign {
    debug_assert!(is_bijection(perm), "not a permutation: {perm:?}");
    Sign::from_transpositions(cycles(perm).map(|len| len - 1).sum())
}

/// Yields the length of each disjoint cycle of `perm`, ordered by the
/// cycle's smallest element.
fn cycles(perm: &[usize]) -> impl Iterator<Item = usize> + '_ {
    let mut visited = vec![false; perm.len()];
    (0..perm.len()).filter_map(move |start| {
        if visited[start] {
            return None;
        }
        let mut cursor = start;
        let mut len = 0usize;
        while !visited[cursor] {
            visited[cursor] = true;
            cursor = perm[cursor];
            len += 1;
        }
        Some(len)
    })
}

fn is_bijection(values: &[usize]) -> bool {
    let mut seen = vec![false; values.len()];
    for &value in values {
        match seen.get_mut(value) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

/// Validated permutation of `{0, ..., n-1}` in one-line notation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Permutation(Box<[usize]>);

impl Permutation {
    /// Validates `images` as a bijection and wraps it.
    pub fn new(images: Vec<usize>) -> Result<Self, ApdError> {
        if !is_bijection(&images) {
            return Err(ApdError::Permutation(
                ErrorInfo::new("not-bijective", "every value in 0..n must appear exactly once")
                    .with_context("len", images.len())
                    .with_context("images", format!("{images:?}")),
            ));
        }
        Ok(Self(images.into_boxed_slice()))
    }

    /// The identity permutation on `n` points.
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// Number of points acted on.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the empty permutation.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// One-line notation: `self.as_slice()[i]` is the image of `i`.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Parity via cycle decomposition.
    pub fn sign(&self) -> Sign {
        sign(&self.0)
    }

    /// Returns `self ∘ other`, i.e. `i -> self[other[i]]`.
    pub fn compose(&self, other: &Permutation) -> Result<Permutation, ApdError> {
        if self.len() != other.len() {
            return Err(ApdError::Permutation(
                ErrorInfo::new("length-mismatch", "cannot compose permutations of different sizes")
                    .with_context("left", self.len())
                    .with_context("right", other.len()),
            ));
        }
        Ok(Self(other.0.iter().map(|&idx| self.0[idx]).collect()))
    }

    /// Returns the inverse permutation.
    pub fn inverse(&self) -> Permutation {
        let mut images = vec![0usize; self.len()];
        for (idx, &image) in self.0.iter().enumerate() {
            images[image] = idx;
        }
        Self(images.into_boxed_slice())
    }

    /// Lengths of the disjoint cycles, in order of their smallest element.
    pub fn cycle_lengths(&self) -> Vec<usize> {
        cycles(&self.0).collect()
    }
}

/// Enumerates all `n!` permutations of `{0, ..., n-1}` in lexicographic order.
pub fn permutations(n: usize) -> impl Iterator<Item = Permutation> {
    (0..n)
        .permutations(n)
        .map(|images| Permutation(images.into_boxed_slice()))
}

/// Returns `n!`, or `None` if it does not fit in `usize`.
pub fn factorial(n: usize) -> Option<usize> {
    (1..=n).try_fold(1usize, |acc, k| acc.checked_mul(k))
}

/// Sum of `sign(p)` over the symmetric group on `n` points.
///
/// Zero for every `n >= 2`, since transposing the first two points pairs each
/// even permutation with an odd one.
pub fn sign_sum(n: usize) -> i64 {
    permutations(n).map(|perm| perm.sign().as_i64()).sum()
}
