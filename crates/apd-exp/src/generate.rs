use apd_core::errors::{ApdError, ErrorInfo};
use apd_core::{rational, BigInt, BigRational, ExactScalar, Matrix, RngHandle};
use apd_exact::{solve, SolveReport};
use serde::{Deserialize, Serialize};

use crate::plan::{IntRange, ValueRanges};

/// Families of test matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixKind {
    /// Every entry is one.
    Constant,
    /// Entries `1..=n*n` in row-major order.
    NaturalSquare,
    /// Squares of the natural square's entries.
    SquaredNaturalSquare,
    /// Uniform integers from the `int` range.
    RandomInt,
    /// Zero matrix with `n` random cells overwritten from the `sparse` range.
    Sparse,
    /// Uniform integers from the `singular` range, last row copied from the first.
    Singular,
    /// Independent numerator and denominator per entry.
    Rational,
}

impl MatrixKind {
    /// Deterministic matrices evaluated once per size.
    pub const SPECIAL_CASES: [MatrixKind; 3] = [
        MatrixKind::Constant,
        MatrixKind::NaturalSquare,
        MatrixKind::SquaredNaturalSquare,
    ];

    /// Returns `true` for kinds that never consume randomness.
    pub fn is_special(self) -> bool {
        Self::SPECIAL_CASES.contains(&self)
    }

    /// Display label used in CLI summaries.
    pub fn label(self) -> &'static str {
        match self {
            MatrixKind::Constant => "Constant Matrix",
            MatrixKind::NaturalSquare => "Natural Square",
            MatrixKind::SquaredNaturalSquare => "Squared Natural Square",
            MatrixKind::RandomInt => "Random Integer",
            MatrixKind::Sparse => "Random Sparse",
            MatrixKind::Singular => "Random Singular",
            MatrixKind::Rational => "Random Rational",
        }
    }
}

/// Generated matrix over whichever exact type its kind needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedMatrix {
    Integer(Matrix<BigInt>),
    Rational(Matrix<BigRational>),
}

impl GeneratedMatrix {
    pub fn size(&self) -> usize {
        match self {
            GeneratedMatrix::Integer(matrix) => matrix.size(),
            GeneratedMatrix::Rational(matrix) => matrix.size(),
        }
    }

    /// Runs the exact minimal-exponent search.
    pub fn solve(&self) -> SolveReport {
        match self {
            GeneratedMatrix::Integer(matrix) => solve(matrix),
            GeneratedMatrix::Rational(matrix) => solve(matrix),
        }
    }

    /// Entries rendered as strings (`"p"` or `"p/q"`), row by row.
    pub fn to_string_rows(&self) -> Vec<Vec<String>> {
        match self {
            GeneratedMatrix::Integer(matrix) => render(matrix),
            GeneratedMatrix::Rational(matrix) => render(matrix),
        }
    }
}

fn render<T: ExactScalar>(matrix: &Matrix<T>) -> Vec<Vec<String>> {
    matrix
        .rows()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect()
}

/// Builds one `n x n` matrix of the requested kind.
///
/// Random kinds draw entries in row-major order so that a seed fixes the
/// whole sample sequence.
pub fn generate(
    kind: MatrixKind,
    size: usize,
    ranges: &ValueRanges,
    rng: &mut RngHandle,
) -> Result<GeneratedMatrix, ApdError> {
    let matrix = match kind {
        MatrixKind::Constant => GeneratedMatrix::Integer(Matrix::constant(size, BigInt::from(1))),
        MatrixKind::NaturalSquare => {
            GeneratedMatrix::Integer(Matrix::from_fn(size, |row, col| {
                BigInt::from(row * size + col + 1)
            }))
        }
        MatrixKind::SquaredNaturalSquare => {
            GeneratedMatrix::Integer(Matrix::from_fn(size, |row, col| {
                BigInt::from(row * size + col + 1).pow(2)
            }))
        }
        MatrixKind::RandomInt => GeneratedMatrix::Integer(Matrix::from_rows(random_rows(
            size,
            ranges.int,
            rng,
        )?)?),
        MatrixKind::Sparse => {
            let mut rows = vec![vec![BigInt::from(0); size]; size];
            for _ in 0..size {
                let row = rng.index(size)?;
                let col = rng.index(size)?;
                rows[row][col] = draw(rng, ranges.sparse)?;
            }
            GeneratedMatrix::Integer(Matrix::from_rows(rows)?)
        }
        MatrixKind::Singular => {
            let mut rows = random_rows(size, ranges.singular, rng)?;
            if let Some(first) = rows.first().cloned() {
                if let Some(last) = rows.last_mut() {
                    *last = first;
                }
            }
            GeneratedMatrix::Integer(Matrix::from_rows(rows)?)
        }
        MatrixKind::Rational => {
            let mut rows = Vec::with_capacity(size);
            for _ in 0..size {
                let mut row = Vec::with_capacity(size);
                for _ in 0..size {
                    let numerator = rng.int_inclusive(ranges.numerator.min, ranges.numerator.max)?;
                    let denominator =
                        rng.int_inclusive(ranges.denominator.min, ranges.denominator.max)?;
                    let value = rational(numerator, denominator).ok_or_else(|| {
                        ApdError::Config(
                            ErrorInfo::new("denominator", "drew a zero denominator")
                                .with_context("numerator", numerator),
                        )
                    })?;
                    row.push(value);
                }
                rows.push(row);
            }
            GeneratedMatrix::Rational(Matrix::from_rows(rows)?)
        }
    };
    Ok(matrix)
}

fn draw(rng: &mut RngHandle, range: IntRange) -> Result<BigInt, ApdError> {
    rng.int_inclusive(range.min, range.max).map(BigInt::from)
}

fn random_rows(
    size: usize,
    range: IntRange,
    rng: &mut RngHandle,
) -> Result<Vec<Vec<BigInt>>, ApdError> {
    (0..size)
        .map(|_| {
            (0..size)
                .map(|_| draw(rng, range))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect()
}
