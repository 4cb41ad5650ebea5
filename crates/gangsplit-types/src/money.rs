//! Fixed-point money in integer minor units.
//!
//! Every amount the ledger stores is a whole number of pence, so a long
//! edit session never accumulates floating-point drift. `Decimal` is only
//! used at the boundary, when a human-readable amount comes in or goes out.

use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::constants::{MINOR_UNITS_PER_MAJOR, MONEY_SCALE};

/// A monetary amount held as minor units (pence).
///
/// Arithmetic saturates instead of overflowing. Amounts held by a ledger
/// are never negative; a negative value can only appear as the result of a
/// subtraction, e.g. a `remaining` computed against a reduced total.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// The smallest representable positive amount (one penny).
    pub const ONE_MINOR: Self = Self(1);

    /// Construct from a count of minor units.
    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Construct from whole major units (pounds).
    #[must_use]
    pub const fn from_major(major: i64) -> Self {
        Self(major.saturating_mul(MINOR_UNITS_PER_MAJOR))
    }

    /// Convert a decimal amount into pence, rounding toward zero.
    ///
    /// Negative input normalizes to zero. Values too large for the
    /// representation saturate.
    #[must_use]
    pub fn from_decimal(value: Decimal) -> Self {
        if value.is_sign_negative() || value.is_zero() {
            return Self::ZERO;
        }
        value
            .checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR))
            .and_then(|minor| minor.trunc().to_i64())
            .map_or(Self(i64::MAX), Self)
    }

    /// The amount as a two-place decimal.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, MONEY_SCALE)
    }

    /// Raw minor units.
    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Absolute value.
    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Negative values become zero.
    #[must_use]
    pub fn clamp_non_negative(self) -> Self {
        self.max(Self::ZERO)
    }

    /// Half of this amount, rounded down to the whole penny.
    #[must_use]
    pub const fn half_floor(self) -> Self {
        Self(self.0.div_euclid(2))
    }

    /// `pct` percent of this amount, rounded down to the whole penny.
    ///
    /// Used for totals such as "40% of the lift price".
    #[must_use]
    pub fn percentage(self, pct: Decimal) -> Self {
        self.to_decimal()
            .checked_mul(pct)
            .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
            .map_or(Self::ZERO, Self::from_decimal)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per_major = MINOR_UNITS_PER_MAJOR.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / per_major, abs % per_major)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
