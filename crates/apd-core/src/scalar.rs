//! Exact scalar types accepted by matrices and the exponent solver.

use std::fmt::{Debug, Display};
use std::ops::{Add, Mul, Sub};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

mod sealed {
    pub trait Sealed {}

    impl Sealed for num_bigint::BigInt {}
    impl Sealed for num_rational::BigRational {}
}

/// Arbitrary precision value with exact arithmetic and exact zero tests.
///
/// The trait is sealed and only implemented for [`BigInt`] and
/// [`BigRational`]. Machine integers overflow and floats round, and either
/// would silently corrupt an `APD(m) == 0` decision, so neither can be used as
/// a matrix entry.
pub trait ExactScalar:
    Clone
    + Ord
    + Debug
    + Display
    + Zero
    + One
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + Mul<Output = Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + sealed::Sealed
{
    /// Converts a machine integer into the exact representation.
    fn from_i64(value: i64) -> Self;
}

impl ExactScalar for BigInt {
    fn from_i64(value: i64) -> Self {
        BigInt::from(value)
    }
}

impl ExactScalar for BigRational {
    fn from_i64(value: i64) -> Self {
        BigRational::from_integer(BigInt::from(value))
    }
}

/// Builds the exact rational `numerator / denominator` in lowest terms.
///
/// Returns `None` when the denominator is zero.
pub fn rational(numerator: i64, denominator: i64) -> Option<BigRational> {
    if denominator == 0 {
        return None;
    }
    Some(BigRational::new(
        BigInt::from(numerator),
        BigInt::from(denominator),
    ))
}
