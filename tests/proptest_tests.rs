//! Property-based tests for money arithmetic and calculator consistency.
//!
//! Run with: `cargo test --test proptest_tests`

use std::sync::Arc;

use chrono::NaiveDate;
use fiscalite::FiscalEngine;
use fiscalite::core::money::{ht, round2, round2_or_zero, tax_amount, ttc};
use fiscalite::core::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ── Proptest Strategies ─────────────────────────────────────────────────────

/// Cent amounts from 0.00 to 99999.99.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0u64..10_000_000u64).prop_map(|cents| Decimal::new(cents as i64, 2))
}

/// Arbitrary value with up to 6 decimal places.
fn arb_raw() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000i64..1_000_000_000i64).prop_map(|units| Decimal::new(units, 6))
}

/// Rate from 0.0000 to 1.0000 with scale 4.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (0u32..=10_000u32).prop_map(|bp| Decimal::new(bp as i64, 4))
}

/// Rates actually seeded for the supported countries.
fn arb_seeded_rate() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(dec!(0.07)),
        Just(dec!(0.10)),
        Just(dec!(0.15)),
        Just(dec!(0.20)),
    ]
}

fn arb_category() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just(categories::ACCOMMODATION),
        Just(categories::STANDARD),
        Just(categories::CLEANING),
    ]
}

fn engine() -> FiscalEngine {
    FiscalEngine::with_default_countries(Arc::new(InMemoryRuleStore::seeded()))
}

// ── Property Tests ──────────────────────────────────────────────────────────

proptest! {
    /// amount + tax == ttc, to the cent.
    #[test]
    fn tax_plus_base_is_ttc(amount in arb_amount(), rate in arb_rate()) {
        prop_assert_eq!(amount + tax_amount(amount, rate), ttc(amount, rate));
    }

    /// round2 is idempotent and always yields scale 2.
    #[test]
    fn round2_idempotent(x in arb_raw()) {
        let once = round2(x);
        prop_assert_eq!(round2(once), once);
        prop_assert_eq!(once.scale(), 2);
        prop_assert!((once - x).abs() <= dec!(0.005));
    }

    /// round2_or_zero agrees with round2 on present values.
    #[test]
    fn round2_or_zero_matches(x in arb_raw()) {
        prop_assert_eq!(round2_or_zero(Some(x)), round2(x));
    }

    /// Tax is never negative and never exceeds the base for rates up to 100%.
    #[test]
    fn tax_bounded(amount in arb_amount(), rate in arb_rate()) {
        let tax = tax_amount(amount, rate);
        prop_assert!(tax >= Decimal::ZERO);
        prop_assert!(tax <= amount);
    }

    /// Stripping tax from a TTC amount lands within a cent of the original base.
    #[test]
    fn ht_inverts_ttc(amount in arb_amount(), rate in arb_seeded_rate()) {
        let back = ht(ttc(amount, rate), rate);
        prop_assert!((back - amount).abs() <= dec!(0.01), "{} -> {}", amount, back);
    }

    /// Every calculator result satisfies the HT / tax / TTC invariants.
    #[test]
    fn calculator_results_consistent(
        amount in arb_amount(),
        category in arb_category(),
        country in prop_oneof![Just("FR"), Just("SA")]
    ) {
        let item = TaxableItem::new(amount, category, "prop");
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let result = engine().calculate_tax(country, &item, as_of).unwrap();
        prop_assert_eq!(result.amount_ht, amount);
        prop_assert_eq!(result.tax_amount, tax_amount(amount, result.tax_rate));
        prop_assert_eq!(result.amount_ttc, ttc(amount, result.tax_rate));
        prop_assert_eq!(result.amount_ttc, round2(result.amount_ht + result.tax_amount));
    }

    /// Per-person tourist tax is linear in guests and nights.
    #[test]
    fn per_person_tourist_tax_linear(
        cents in 1i64..1_000,
        guests in 0u32..20,
        nights in 0u32..60
    ) {
        let rate = Decimal::new(cents, 2);
        let input = TouristTaxInput::per_person(Some(rate), guests, nights, 0);
        let result = engine().calculate_tourist_tax("FR", &input).unwrap();
        prop_assert_eq!(result.amount, rate * Decimal::from(guests) * Decimal::from(nights));
    }

    /// The municipality fee never depends on guest count.
    #[test]
    fn municipality_fee_guest_independent(
        nightly in arb_amount(),
        nights in 0u32..60,
        guests in 1u32..10
    ) {
        let solo = TouristTaxInput::percentage(Some(nightly), None, 1, nights);
        let group = TouristTaxInput::percentage(Some(nightly), None, guests, nights);
        let one = engine().calculate_tourist_tax("SA", &solo).unwrap();
        let many = engine().calculate_tourist_tax("SA", &group).unwrap();
        prop_assert_eq!(one.amount, many.amount);
    }
}

// ── Edge Case Tests ─────────────────────────────────────────────────────────

#[test]
fn round2_missing_is_zero() {
    assert_eq!(round2_or_zero(None), dec!(0.00));
    assert_eq!(round2_or_zero(None).to_string(), "0.00");
}

#[test]
fn very_large_amount() {
    let item = TaxableItem::new(dec!(9999999999.99), categories::STANDARD, "bulk");
    let as_of = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let result = engine().calculate_tax("FR", &item, as_of).unwrap();
    assert_eq!(result.tax_amount, dec!(2000000000.00));
    assert_eq!(result.amount_ttc, dec!(11999999999.99));
}

#[test]
fn sub_cent_amount() {
    let item = TaxableItem::new(dec!(0.04), categories::ACCOMMODATION, "rounding");
    let as_of = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let result = engine().calculate_tax("FR", &item, as_of).unwrap();
    // 0.004 rounds down
    assert_eq!(result.tax_amount, dec!(0.00));
    assert_eq!(result.amount_ttc, dec!(0.04));
}

#[test]
fn half_cent_rounds_up() {
    let item = TaxableItem::new(dec!(0.05), categories::ACCOMMODATION, "rounding");
    let as_of = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let result = engine().calculate_tax("FR", &item, as_of).unwrap();
    // 0.005 rounds half-up to 0.01
    assert_eq!(result.tax_amount, dec!(0.01));
    assert_eq!(result.amount_ttc, dec!(0.06));
}
