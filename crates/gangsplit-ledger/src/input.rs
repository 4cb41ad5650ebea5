//! Edit-boundary normalization.
//!
//! Whatever the user types or drags, the ledger only ever sees a
//! non-negative whole number of pence. Blank, unparseable, negative or
//! non-finite input becomes zero.

use std::str::FromStr;

use gangsplit_types::Money;
use rust_decimal::{Decimal, RoundingStrategy, prelude::FromPrimitive};

/// Currency symbols accepted in front of a typed amount.
const CURRENCY_SYMBOLS: [char; 3] = ['£', '$', '€'];

/// Normalize a typed amount such as `"£1,250.50"`.
///
/// Fractions of a penny are dropped, never rounded up.
#[must_use]
pub fn normalize_typed(raw: &str) -> Money {
    let cleaned: String = raw
        .trim()
        .trim_start_matches(CURRENCY_SYMBOLS)
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Money::ZERO;
    }

    Decimal::from_str(&cleaned).map_or(Money::ZERO, Money::from_decimal)
}

/// Normalize a slider position to the nearest penny.
#[must_use]
pub fn normalize_slider(value: f64) -> Money {
    if !value.is_finite() || value <= 0.0 {
        return Money::ZERO;
    }

    Decimal::from_f64(value).map_or(Money::ZERO, |d| {
        Money::from_decimal(d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    })
}
