use apd_exact::{probe_limit, MinimalExponent};
use serde::{Deserialize, Serialize};

/// Conjectured interval `[n-1, n(n-1)/2]` for a finite minimal exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExponentBounds {
    pub lower: u32,
    pub upper: u32,
}

/// Where a solver result falls relative to [`ExponentBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Within,
    BelowLower,
    AboveUpper,
    Infinite,
}

impl Classification {
    /// Finite results outside the interval.
    pub fn is_violation(self) -> bool {
        matches!(self, Classification::BelowLower | Classification::AboveUpper)
    }
}

impl ExponentBounds {
    pub fn for_size(size: usize) -> Self {
        Self {
            lower: u32::try_from(size.saturating_sub(1)).unwrap_or(u32::MAX),
            upper: probe_limit(size),
        }
    }

    pub fn classify(&self, exponent: MinimalExponent) -> Classification {
        match exponent {
            MinimalExponent::Infinite => Classification::Infinite,
            MinimalExponent::Finite(m) if m < self.lower => Classification::BelowLower,
            MinimalExponent::Finite(m) if m > self.upper => Classification::AboveUpper,
            MinimalExponent::Finite(_) => Classification::Within,
        }
    }
}
