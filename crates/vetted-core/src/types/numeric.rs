use crate::types::{ScalarKind, TypeError};
use derive_more::{Deref, Display};
use serde::Serialize;

///
/// NonNegativeInteger
///

#[derive(Clone, Copy, Debug, Deref, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct NonNegativeInteger(u64);

impl NonNegativeInteger {
    #[must_use]
    pub const fn new(n: u64) -> Self {
        Self(n)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

///
/// PositiveInteger
/// Strictly greater than zero.
///

#[derive(Clone, Copy, Debug, Deref, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PositiveInteger(u64);

impl PositiveInteger {
    pub const KIND: ScalarKind = ScalarKind::PositiveInteger;

    pub fn try_new(n: u64) -> Result<Self, TypeError> {
        if n == 0 {
            return Err(TypeError::Invalid {
                kind: Self::KIND,
                input: n.to_string(),
                reason: "must be at least 1",
            });
        }

        Ok(Self(n))
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

///
/// Decimal
/// Finite floating point number.
///

#[derive(Clone, Copy, Debug, Deref, Display, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Decimal(f64);

impl Decimal {
    pub const KIND: ScalarKind = ScalarKind::Decimal;

    pub fn try_new(d: f64) -> Result<Self, TypeError> {
        if !d.is_finite() {
            return Err(TypeError::Invalid {
                kind: Self::KIND,
                input: d.to_string(),
                reason: "must be finite",
            });
        }

        Ok(Self(d))
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}
