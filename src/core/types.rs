use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::FiscalError;

/// Well-known tax category tags.
///
/// Categories are free-form strings; these are the tags seeded by
/// [`InMemoryRuleStore::seeded`](crate::core::InMemoryRuleStore::seeded).
pub mod categories {
    /// Room / nightly accommodation charge.
    pub const ACCOMMODATION: &str = "ACCOMMODATION";
    /// Default rate for goods and services.
    pub const STANDARD: &str = "STANDARD";
    /// Cleaning fee.
    pub const CLEANING: &str = "CLEANING";
    /// Food and beverage.
    pub const FOOD: &str = "FOOD";
}

/// One line item to be taxed (e.g. an accommodation charge or a cleaning fee).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxableItem {
    /// Pre-tax (HT) amount, assumed non-negative.
    pub amount: Decimal,
    /// Caller-defined category tag used to select the rate.
    pub tax_category: String,
    /// Free text, e.g. "3 nights, double room".
    pub description: String,
}

impl TaxableItem {
    pub fn new(
        amount: Decimal,
        tax_category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            tax_category: tax_category.into(),
            description: description.into(),
        }
    }
}

/// A versioned tax rate for one (country, category) pair.
///
/// Several rules may exist for the same pair; the one in force on a date is the
/// rule with the greatest `effective_from` not after that date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRule {
    /// ISO 3166-1 alpha-2 country code (e.g. "FR").
    pub country: String,
    /// Category tag this rate applies to.
    pub tax_category: String,
    /// Rate as a fraction with at most 4 decimal places (`0.1000` for 10%).
    pub tax_rate: Decimal,
    /// Display name of the tax (e.g. "TVA").
    pub tax_name: String,
    /// First day the rate applies.
    pub effective_from: NaiveDate,
}

impl TaxRule {
    pub fn new(
        country: impl Into<String>,
        tax_category: impl Into<String>,
        tax_rate: Decimal,
        tax_name: impl Into<String>,
        effective_from: NaiveDate,
    ) -> Self {
        Self {
            country: country.into(),
            tax_category: tax_category.into(),
            tax_rate,
            tax_name: tax_name.into(),
            effective_from,
        }
    }

    /// Whether this rule is in force on `date`.
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        self.effective_from <= date
    }

    /// Check the rule's shape before it is stored.
    pub fn validate(&self) -> Result<(), FiscalError> {
        if self.country.len() != 2 || !self.country.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(FiscalError::InvalidRule(format!(
                "country '{}' must be two uppercase ASCII letters",
                self.country
            )));
        }
        if self.tax_category.trim().is_empty() {
            return Err(FiscalError::InvalidRule(format!(
                "{}: tax category must not be empty",
                self.country
            )));
        }
        if self.tax_name.trim().is_empty() {
            return Err(FiscalError::InvalidRule(format!(
                "{}/{}: tax name must not be empty",
                self.country, self.tax_category
            )));
        }
        if self.tax_rate < Decimal::ZERO || self.tax_rate > Decimal::ONE {
            return Err(FiscalError::InvalidRule(format!(
                "{}/{}: rate {} must be between 0 and 1",
                self.country, self.tax_category, self.tax_rate
            )));
        }
        if self.tax_rate.normalize().scale() > 4 {
            return Err(FiscalError::InvalidRule(format!(
                "{}/{}: rate {} has more than 4 decimal places",
                self.country, self.tax_category, self.tax_rate
            )));
        }
        Ok(())
    }
}

/// HT / tax / TTC decomposition of one taxable item.
///
/// `amount_ttc == round2(amount_ht + tax_amount)` and
/// `tax_amount == round2(amount_ht * tax_rate)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    /// Pre-tax amount (the item amount as given).
    pub amount_ht: Decimal,
    /// Tax due, rounded to cents.
    pub tax_amount: Decimal,
    /// Tax-inclusive amount, rounded to cents.
    pub amount_ttc: Decimal,
    /// Rate that was applied.
    pub tax_rate: Decimal,
    /// Name of the applied tax.
    pub tax_name: String,
    /// Category of the taxed item.
    pub tax_category: String,
    /// Date from which the applied rule is in force.
    pub effective_from: NaiveDate,
}

/// Stay parameters for a tourist (occupancy) tax calculation.
///
/// Which rate is populated selects the formula family: per-guest-per-night
/// jurisdictions read `per_person_per_night_rate`, percentage jurisdictions read
/// `percentage_rate` against `nightly_rate`. Each jurisdiction only looks at the
/// fields its formula needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouristTaxInput {
    /// Price of one night, used by percentage formulas.
    pub nightly_rate: Option<Decimal>,
    pub number_of_guests: u32,
    pub number_of_nights: u32,
    /// Informational; none of the current formulas exempt children.
    pub number_of_children: u32,
    /// Levy per guest per night.
    pub per_person_per_night_rate: Option<Decimal>,
    /// Fraction of the nightly rate (`0.05` for 5%).
    pub percentage_rate: Option<Decimal>,
}

impl TouristTaxInput {
    /// Input for a per-guest-per-night levy. The nightly rate is zeroed and no
    /// percentage is set.
    pub fn per_person(
        rate: Option<Decimal>,
        number_of_guests: u32,
        number_of_nights: u32,
        number_of_children: u32,
    ) -> Self {
        Self {
            nightly_rate: Some(Decimal::ZERO),
            number_of_guests,
            number_of_nights,
            number_of_children,
            per_person_per_night_rate: rate,
            percentage_rate: None,
        }
    }

    /// Input for a percentage-of-nightly-rate fee. No per-guest rate is set.
    pub fn percentage(
        nightly_rate: Option<Decimal>,
        percentage_rate: Option<Decimal>,
        number_of_guests: u32,
        number_of_nights: u32,
    ) -> Self {
        Self {
            nightly_rate,
            number_of_guests,
            number_of_nights,
            number_of_children: 0,
            per_person_per_night_rate: None,
            percentage_rate,
        }
    }
}

/// How a tourist tax amount was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TouristTaxBasis {
    /// Flat levy per guest per night; `rate` echoes the configured value.
    PerGuestPerNight { rate: Decimal },
    /// Fee on the nightly price, independent of guest count. `per_night` is the
    /// computed charge for one night (`round2(nightly_rate * rate)`).
    PercentageOfNightlyRate { rate: Decimal, per_night: Decimal },
}

/// Outcome of a tourist tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouristTaxResult {
    /// Total levy for the stay, rounded to cents.
    pub amount: Decimal,
    /// Receipt text, e.g. "Taxe de séjour: 2 guest(s) x 3 night(s) at 1.50 EUR".
    pub description: String,
    /// ISO 4217 code fixed by the jurisdiction.
    pub currency: String,
    pub basis: TouristTaxBasis,
}

impl TouristTaxResult {
    /// Amount charged per night as exposed by the legacy `perPersonPerNight` field.
    ///
    /// For per-guest formulas this is the configured rate; for percentage formulas
    /// it is the computed per-night charge, which does not depend on guest count.
    pub fn per_person_per_night(&self) -> Decimal {
        match self.basis {
            TouristTaxBasis::PerGuestPerNight { rate } => rate,
            TouristTaxBasis::PercentageOfNightlyRate { per_night, .. } => per_night,
        }
    }

    /// Whether no levy is due.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rule(country: &str, rate: Decimal) -> TaxRule {
        TaxRule::new(
            country,
            categories::ACCOMMODATION,
            rate,
            "TVA",
            NaiveDate::from_ymd_opt(2014, 1, 1).unwrap(),
        )
    }

    #[test]
    fn valid_rule() {
        assert!(rule("FR", dec!(0.1000)).validate().is_ok());
    }

    #[test]
    fn lowercase_country_rejected() {
        assert!(rule("fr", dec!(0.10)).validate().is_err());
        assert!(rule("FRA", dec!(0.10)).validate().is_err());
    }

    #[test]
    fn rate_out_of_range_rejected() {
        assert!(rule("FR", dec!(-0.01)).validate().is_err());
        assert!(rule("FR", dec!(10)).validate().is_err());
    }

    #[test]
    fn rate_scale_limited_to_four() {
        assert!(rule("FR", dec!(0.12345)).validate().is_err());
        // Trailing zeros do not count
        assert!(rule("FR", dec!(0.100000)).validate().is_ok());
    }

    #[test]
    fn per_person_helper_zeroes_nightly_rate() {
        let input = TouristTaxInput::per_person(Some(dec!(1.50)), 2, 3, 1);
        assert_eq!(input.nightly_rate, Some(Decimal::ZERO));
        assert!(input.percentage_rate.is_none());
        assert_eq!(input.number_of_children, 1);
    }

    #[test]
    fn percentage_helper_leaves_per_person_unset() {
        let input = TouristTaxInput::percentage(Some(dec!(500)), Some(dec!(0.05)), 2, 3);
        assert!(input.per_person_per_night_rate.is_none());
        assert_eq!(input.number_of_nights, 3);
    }

    #[test]
    fn legacy_per_night_figure() {
        let per_guest = TouristTaxResult {
            amount: dec!(9.00),
            description: String::new(),
            currency: "EUR".into(),
            basis: TouristTaxBasis::PerGuestPerNight { rate: dec!(1.50) },
        };
        assert_eq!(per_guest.per_person_per_night(), dec!(1.50));

        let pct = TouristTaxResult {
            amount: dec!(75.00),
            description: String::new(),
            currency: "SAR".into(),
            basis: TouristTaxBasis::PercentageOfNightlyRate {
                rate: dec!(0.05),
                per_night: dec!(25.00),
            },
        };
        assert_eq!(pct.per_person_per_night(), dec!(25.00));
    }
}
