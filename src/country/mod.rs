//! Per-jurisdiction tax calculators.
//!
//! Each supported country implements [`CountryTaxCalculator`]. Standard tax is
//! identical in shape everywhere: resolve the rule in force, then apply it with
//! cent rounding. Tourist tax is where jurisdictions differ:
//!
//! | Country | Currency | Tourist tax |
//! |---------|----------|-------------|
//! | FR | EUR | taxe de séjour, per guest per night |
//! | MA | MAD | taxe de promotion touristique, per guest per night |
//! | SA | SAR | municipality fee, percentage of the nightly rate (default 5%) |
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use fiscalite::core::*;
//! use fiscalite::country::*;
//! use rust_decimal_macros::dec;
//!
//! let fr = FranceTaxCalculator::new(Arc::new(InMemoryRuleStore::seeded()));
//! let item = TaxableItem::new(dec!(200.00), categories::ACCOMMODATION, "2 nights");
//! let result = fr.calculate_tax(&item, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()).unwrap();
//! assert_eq!(result.amount_ttc, dec!(220.00));
//! ```

mod france;
mod morocco;
mod saudi_arabia;
mod tourist;

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::core::money;
use crate::core::{
    FiscalError, RuleStore, TaxResult, TaxRule, TaxableItem, TouristTaxInput, TouristTaxResult,
};

pub use france::FranceTaxCalculator;
pub use morocco::MoroccoTaxCalculator;
pub use saudi_arabia::{SA_DEFAULT_MUNICIPALITY_RATE, SaudiArabiaTaxCalculator};

/// Tax strategy for one jurisdiction.
pub trait CountryTaxCalculator {
    /// ISO 3166-1 alpha-2 code this calculator serves.
    fn country_code(&self) -> &'static str;

    /// ISO 4217 currency of the jurisdiction's levies.
    fn currency(&self) -> &'static str;

    /// Decompose `item` into HT / tax / TTC using the rule in force on `as_of`.
    ///
    /// # Errors
    ///
    /// [`FiscalError::NoApplicableRule`] when no rule for the item's category
    /// is in force on `as_of`.
    fn calculate_tax(&self, item: &TaxableItem, as_of: NaiveDate)
    -> Result<TaxResult, FiscalError>;

    /// Occupancy tax for a stay. Never fails: a missing, zero or negative rate
    /// yields a zero amount.
    fn calculate_tourist_tax(&self, input: &TouristTaxInput) -> TouristTaxResult;

    /// Rule history for `category` up to `as_of`, newest first. For display and
    /// audit; calculations use only the rule in force.
    fn applicable_rules(&self, category: &str, as_of: NaiveDate) -> Vec<TaxRule>;
}

/// Resolve the rule in force and apply it to `item`.
pub(crate) fn apply_rule(
    store: &dyn RuleStore,
    country: &str,
    item: &TaxableItem,
    as_of: NaiveDate,
) -> Result<TaxResult, FiscalError> {
    let Some(rule) = store.find_applicable_rule(country, &item.tax_category, as_of) else {
        tracing::warn!(
            country,
            category = %item.tax_category,
            %as_of,
            "no tax rule in force"
        );
        return Err(FiscalError::no_applicable_rule(
            country,
            item.tax_category.clone(),
            as_of,
        ));
    };

    let amount_ht = item.amount;
    let tax_amount = money::tax_amount(amount_ht, rule.tax_rate);
    let amount_ttc = money::round2(amount_ht + tax_amount);

    tracing::debug!(
        country,
        category = %item.tax_category,
        rate = %rule.tax_rate,
        effective_from = %rule.effective_from,
        %amount_ht,
        %tax_amount,
        "applied tax rule"
    );

    Ok(TaxResult {
        amount_ht,
        tax_amount,
        amount_ttc,
        tax_rate: rule.tax_rate,
        tax_name: rule.tax_name,
        tax_category: item.tax_category.clone(),
        effective_from: rule.effective_from,
    })
}

/// The closed set of supported jurisdictions.
#[derive(Clone)]
pub enum CountryCalculator {
    France(FranceTaxCalculator),
    Morocco(MoroccoTaxCalculator),
    SaudiArabia(SaudiArabiaTaxCalculator),
}

impl CountryCalculator {
    /// One calculator per supported country, all reading from `store`.
    pub fn all(store: Arc<dyn RuleStore>) -> Vec<Self> {
        vec![
            Self::France(FranceTaxCalculator::new(Arc::clone(&store))),
            Self::Morocco(MoroccoTaxCalculator::new(Arc::clone(&store))),
            Self::SaudiArabia(SaudiArabiaTaxCalculator::new(store)),
        ]
    }

    fn inner(&self) -> &dyn CountryTaxCalculator {
        match self {
            Self::France(c) => c,
            Self::Morocco(c) => c,
            Self::SaudiArabia(c) => c,
        }
    }
}

impl CountryTaxCalculator for CountryCalculator {
    fn country_code(&self) -> &'static str {
        self.inner().country_code()
    }

    fn currency(&self) -> &'static str {
        self.inner().currency()
    }

    fn calculate_tax(
        &self,
        item: &TaxableItem,
        as_of: NaiveDate,
    ) -> Result<TaxResult, FiscalError> {
        self.inner().calculate_tax(item, as_of)
    }

    fn calculate_tourist_tax(&self, input: &TouristTaxInput) -> TouristTaxResult {
        self.inner().calculate_tourist_tax(input)
    }

    fn applicable_rules(&self, category: &str, as_of: NaiveDate) -> Vec<TaxRule> {
        self.inner().applicable_rules(category, as_of)
    }
}

impl From<FranceTaxCalculator> for CountryCalculator {
    fn from(c: FranceTaxCalculator) -> Self {
        Self::France(c)
    }
}

impl From<MoroccoTaxCalculator> for CountryCalculator {
    fn from(c: MoroccoTaxCalculator) -> Self {
        Self::Morocco(c)
    }
}

impl From<SaudiArabiaTaxCalculator> for CountryCalculator {
    fn from(c: SaudiArabiaTaxCalculator) -> Self {
        Self::SaudiArabia(c)
    }
}

impl fmt::Debug for CountryCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CountryCalculator")
            .field(&self.country_code())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{InMemoryRuleStore, categories};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn all_covers_each_country_once() {
        let calculators = CountryCalculator::all(Arc::new(InMemoryRuleStore::seeded()));
        let codes: Vec<&str> = calculators.iter().map(|c| c.country_code()).collect();
        assert_eq!(codes, vec!["FR", "MA", "SA"]);
    }

    #[test]
    fn enum_delegates_currency() {
        let calculators = CountryCalculator::all(Arc::new(InMemoryRuleStore::seeded()));
        let currencies: Vec<&str> = calculators.iter().map(|c| c.currency()).collect();
        assert_eq!(currencies, vec!["EUR", "MAD", "SAR"]);
    }

    #[test]
    fn apply_rule_carries_rule_metadata() {
        let store = InMemoryRuleStore::seeded();
        let item = TaxableItem::new(dec!(50.00), categories::CLEANING, "cleaning");
        let result = apply_rule(&store, "FR", &item, date(2024, 1, 1)).unwrap();
        assert_eq!(result.tax_name, "TVA");
        assert_eq!(result.tax_rate, dec!(0.20));
        assert_eq!(result.effective_from, date(2014, 1, 1));
        assert_eq!(result.amount_ttc, dec!(60.00));
    }

    #[test]
    fn apply_rule_missing_category() {
        let store = InMemoryRuleStore::seeded();
        let item = TaxableItem::new(dec!(50.00), "UNKNOWN", "mystery");
        let err = apply_rule(&store, "FR", &item, date(2024, 1, 1)).unwrap_err();
        assert_eq!(
            err,
            FiscalError::NoApplicableRule {
                country: "FR".into(),
                category: "UNKNOWN".into(),
                as_of: date(2024, 1, 1),
            }
        );
    }

    #[test]
    fn debug_shows_country() {
        let calculators = CountryCalculator::all(Arc::new(InMemoryRuleStore::seeded()));
        assert_eq!(format!("{:?}", calculators[2]), "CountryCalculator(\"SA\")");
    }
}
