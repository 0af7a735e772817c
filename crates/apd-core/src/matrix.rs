//! Square matrices of exact entries.

use std::ops::Index;

use crate::errors::{ApdError, ErrorInfo};
use crate::scalar::ExactScalar;

/// Immutable `n x n` matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T> {
    size: usize,
    entries: Box<[T]>,
}

impl<T: ExactScalar> Matrix<T> {
    /// Builds a matrix from its rows, rejecting ragged or non-square input.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, ApdError> {
        let size = rows.len();
        let mut entries = Vec::with_capacity(size * size);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(ApdError::Matrix(
                    ErrorInfo::new("not-square", "row length must equal the number of rows")
                        .with_context("rows", size)
                        .with_context("row", idx)
                        .with_context("len", row.len())
                        .with_hint("only square matrices are supported"),
                ));
            }
            entries.extend(row);
        }
        Ok(Self {
            size,
            entries: entries.into_boxed_slice(),
        })
    }

    /// Builds a matrix from machine integer rows.
    pub fn from_i64_rows<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self, ApdError> {
        Self::from_rows(
            rows.iter()
                .map(|row| row.as_ref().iter().map(|&v| T::from_i64(v)).collect())
                .collect(),
        )
    }

    /// Builds an `n x n` matrix whose entry `(row, col)` is `f(row, col)`.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut entries = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                entries.push(f(row, col));
            }
        }
        Self {
            size,
            entries: entries.into_boxed_slice(),
        }
    }

    /// Builds an `n x n` matrix with every entry equal to `value`.
    pub fn constant(size: usize, value: T) -> Self {
        Self::from_fn(size, |_, _| value.clone())
    }

    /// Returns the side length `n`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the entry at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.size && col < self.size {
            self.entries.get(row * self.size + col)
        } else {
            None
        }
    }

    /// Returns one row as a slice.
    pub fn row(&self, row: usize) -> &[T] {
        &self.entries[row * self.size..(row + 1) * self.size]
    }

    /// Iterates over the rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.entries.chunks(self.size.max(1))
    }

    /// Sums one entry per row, taking column `perm[row]` from each row.
    ///
    /// `perm` must have length `n`; its entries index columns.
    pub fn diagonal_value(&self, perm: &[usize]) -> T {
        debug_assert_eq!(perm.len(), self.size);
        perm.iter()
            .enumerate()
            .fold(T::zero(), |acc, (row, &col)| acc + &self[(row, col)])
    }

    /// Applies `f` entrywise, producing a matrix over another exact type.
    pub fn map<U: ExactScalar>(&self, f: impl Fn(&T) -> U) -> Matrix<U> {
        Matrix {
            size: self.size,
            entries: self.entries.iter().map(f).collect(),
        }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(col < self.size, "column {col} out of bounds for size {}", self.size);
        &self.entries[row * self.size + col]
    }
}
