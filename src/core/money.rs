//! Cent-exact money arithmetic.
//!
//! Every calculator derives HT, tax and TTC amounts through these functions so
//! that results agree to the cent regardless of which jurisdiction produced them.
//! Rates are fractions (`0.10` for 10%). Results always carry exactly two decimal
//! places, rounded half-up (commercial rounding).

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places for all public monetary results.
pub const MONEY_SCALE: u32 = 2;

/// Round to two decimal places, half-up, with the scale fixed at 2.
///
/// `round2(dec!(3.333))` is `3.33`, `round2(dec!(2.005))` is `2.01`,
/// and `round2(dec!(20))` is `20.00`.
pub fn round2(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Like [`round2`], treating a missing amount as zero.
pub fn round2_or_zero(value: Option<Decimal>) -> Decimal {
    round2(value.unwrap_or(Decimal::ZERO))
}

/// Tax due on `base` at `rate`: `round2(base * rate)`.
///
/// A zero or negative rate yields zero tax.
pub fn tax_amount(base: Decimal, rate: Decimal) -> Decimal {
    if rate <= Decimal::ZERO {
        return round2(Decimal::ZERO);
    }
    round2(base * rate)
}

/// Tax-inclusive amount: `round2(base + tax_amount(base, rate))`.
///
/// Uses the same two-step rounding as the calculators, so
/// `ttc(b, r) == round2(b) + tax_amount(b, r)` whenever `b` already has cents.
pub fn ttc(base: Decimal, rate: Decimal) -> Decimal {
    round2(base + tax_amount(base, rate))
}

/// Pre-tax amount recovered from a tax-inclusive one: `round2(ttc / (1 + rate))`.
pub fn ht(ttc: Decimal, rate: Decimal) -> Decimal {
    let rate = rate.max(Decimal::ZERO);
    round2(ttc / (Decimal::ONE + rate))
}
