//! The two tourist tax formula families.
//!
//! Neither formula fails: an unconfigured rate, or a product too large for
//! `Decimal`, yields a zero-amount result.

use rust_decimal::Decimal;

use crate::core::money::round2;
use crate::core::{TouristTaxBasis, TouristTaxInput, TouristTaxResult};

fn zero_result(description: String, currency: &str, basis: TouristTaxBasis) -> TouristTaxResult {
    TouristTaxResult {
        amount: round2(Decimal::ZERO),
        description,
        currency: currency.to_string(),
        basis,
    }
}

/// Flat levy per guest per night: `round2(rate * guests * nights)`.
///
/// A missing, zero or negative rate yields zero. The basis echoes the
/// configured rate.
pub(crate) fn per_guest_per_night(
    input: &TouristTaxInput,
    tax_label: &str,
    currency: &str,
) -> TouristTaxResult {
    let rate = input.per_person_per_night_rate.unwrap_or(Decimal::ZERO);
    let basis = TouristTaxBasis::PerGuestPerNight { rate };
    let stay = format!(
        "{tax_label}: {} guest(s) x {} night(s)",
        input.number_of_guests, input.number_of_nights
    );
    if rate <= Decimal::ZERO {
        tracing::debug!(currency, %rate, "no per-guest tourist tax configured");
        return zero_result(format!("{stay}, not applicable"), currency, basis);
    }

    let guests = Decimal::from(input.number_of_guests);
    let nights = Decimal::from(input.number_of_nights);
    let Some(total) = rate
        .checked_mul(guests)
        .and_then(|v| v.checked_mul(nights))
    else {
        tracing::debug!(
            currency,
            %rate,
            guests = input.number_of_guests,
            nights = input.number_of_nights,
            "per-guest tourist tax overflowed"
        );
        return zero_result(format!("{stay}, not applicable"), currency, basis);
    };

    TouristTaxResult {
        amount: round2(total),
        description: format!("{stay} at {} {currency}", round2(rate)),
        currency: currency.to_string(),
        basis,
    }
}

/// Fee on the nightly price, independent of guest count.
///
/// `per_night = round2(nightly_rate * rate)` and `amount = round2(per_night *
/// nights)`, where `rate` is `input.percentage_rate` when positive and
/// `default_rate` otherwise. A missing or non-positive nightly rate yields zero.
pub(crate) fn percentage_of_nightly_rate(
    input: &TouristTaxInput,
    default_rate: Decimal,
    tax_label: &str,
    currency: &str,
) -> TouristTaxResult {
    let rate = input
        .percentage_rate
        .filter(|r| *r > Decimal::ZERO)
        .unwrap_or(default_rate);
    let unpriced = TouristTaxBasis::PercentageOfNightlyRate {
        rate,
        per_night: round2(Decimal::ZERO),
    };

    let nightly_rate = input.nightly_rate.unwrap_or(Decimal::ZERO);
    if nightly_rate <= Decimal::ZERO {
        tracing::debug!(currency, %nightly_rate, "no nightly rate for percentage tourist tax");
        return zero_result(format!("{tax_label}: not applicable"), currency, unpriced);
    }

    let priced = nightly_rate
        .checked_mul(rate)
        .map(round2)
        .and_then(|per_night| {
            let amount = per_night.checked_mul(Decimal::from(input.number_of_nights))?;
            let percent = rate.checked_mul(Decimal::ONE_HUNDRED)?;
            Some((per_night, round2(amount), percent.normalize()))
        });
    let Some((per_night, amount, percent)) = priced else {
        tracing::debug!(currency, %nightly_rate, %rate, "percentage tourist tax overflowed");
        return zero_result(format!("{tax_label}: not applicable"), currency, unpriced);
    };

    TouristTaxResult {
        amount,
        description: format!(
            "{tax_label}: {percent}% of nightly rate x {} night(s) ({per_night} {currency} per night)",
            input.number_of_nights
        ),
        currency: currency.to_string(),
        basis: TouristTaxBasis::PercentageOfNightlyRate { rate, per_night },
    }
}
