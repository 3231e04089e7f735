//! Money helpers
//!
//! Amounts are `Decimal` end to end; these helpers only cover rounding and display.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to cents, half away from zero.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `part / whole * 100` rounded to cents, or zero when `whole` is zero.
pub fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    round_cents(part / whole * Decimal::ONE_HUNDRED)
}

pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", round_cents(amount))
}
