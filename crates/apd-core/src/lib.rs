#![deny(missing_docs)]
#![doc = "Exact matrices, permutations and shared types for the APD exponent engine."]

pub mod errors;
pub mod matrix;
pub mod permutation;
pub mod provenance;
pub mod rng;
pub mod scalar;

pub use errors::{ApdError, ErrorInfo};
pub use matrix::Matrix;
pub use permutation::{factorial, permutations, sign, sign_sum, Permutation, Sign};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle};
pub use scalar::{rational, ExactScalar};

pub use num_bigint::BigInt;
pub use num_rational::BigRational;
