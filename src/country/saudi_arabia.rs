//! Saudi Arabia: flat VAT, municipality fee on the nightly rate.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{CountryTaxCalculator, apply_rule, tourist};
use crate::core::{
    FiscalError, RuleStore, TaxResult, TaxRule, TaxableItem, TouristTaxInput, TouristTaxResult,
};

const COUNTRY: &str = "SA";
const CURRENCY: &str = "SAR";

/// Municipality fee applied when no positive percentage is configured.
pub const SA_DEFAULT_MUNICIPALITY_RATE: Decimal = dec!(0.05);

/// Saudi VAT (15% on every seeded category) and the municipality fee.
///
/// The municipality fee is a percentage of the nightly price and does not
/// depend on the number of guests: two guests in a 500 SAR room pay the same
/// fee as one.
#[derive(Clone)]
pub struct SaudiArabiaTaxCalculator {
    store: Arc<dyn RuleStore>,
}

impl SaudiArabiaTaxCalculator {
    pub fn new(store: Arc<dyn RuleStore>) -> Self {
        Self { store }
    }
}

impl CountryTaxCalculator for SaudiArabiaTaxCalculator {
    fn country_code(&self) -> &'static str {
        COUNTRY
    }

    fn currency(&self) -> &'static str {
        CURRENCY
    }

    fn calculate_tax(
        &self,
        item: &TaxableItem,
        as_of: NaiveDate,
    ) -> Result<TaxResult, FiscalError> {
        apply_rule(self.store.as_ref(), COUNTRY, item, as_of)
    }

    fn calculate_tourist_tax(&self, input: &TouristTaxInput) -> TouristTaxResult {
        tourist::percentage_of_nightly_rate(
            input,
            SA_DEFAULT_MUNICIPALITY_RATE,
            "Municipality fee",
            CURRENCY,
        )
    }

    fn applicable_rules(&self, category: &str, as_of: NaiveDate) -> Vec<TaxRule> {
        self.store.find_applicable_rules(COUNTRY, category, as_of)
    }
}

impl fmt::Debug for SaudiArabiaTaxCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaudiArabiaTaxCalculator")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{InMemoryRuleStore, TouristTaxBasis, categories};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calculator() -> SaudiArabiaTaxCalculator {
        SaudiArabiaTaxCalculator::new(Arc::new(InMemoryRuleStore::seeded()))
    }

    #[test]
    fn flat_vat_across_categories() {
        for category in [
            categories::ACCOMMODATION,
            categories::STANDARD,
            categories::CLEANING,
            categories::FOOD,
        ] {
            let item = TaxableItem::new(dec!(1000.00), category, "stay");
            let result = calculator().calculate_tax(&item, date(2024, 6, 15)).unwrap();
            assert_eq!(result.tax_amount, dec!(150.00), "{category}");
            assert_eq!(result.amount_ttc, dec!(1150.00), "{category}");
            assert_eq!(result.tax_name, "VAT");
        }
    }

    #[test]
    fn municipality_fee_with_percentage() {
        let input = TouristTaxInput::percentage(Some(dec!(500.00)), Some(dec!(0.05)), 2, 3);
        let result = calculator().calculate_tourist_tax(&input);
        assert_eq!(result.amount, dec!(75.00));
        assert_eq!(result.per_person_per_night(), dec!(25.00));
        assert_eq!(result.currency, "SAR");
        assert!(result.description.contains("Municipality fee"));
    }

    #[test]
    fn municipality_fee_default_rate() {
        let input = TouristTaxInput::percentage(Some(dec!(200.00)), None, 1, 2);
        let result = calculator().calculate_tourist_tax(&input);
        assert_eq!(result.amount, dec!(20.00));
        assert_eq!(
            result.basis,
            TouristTaxBasis::PercentageOfNightlyRate {
                rate: SA_DEFAULT_MUNICIPALITY_RATE,
                per_night: dec!(10.00),
            }
        );
    }

    #[test]
    fn municipality_fee_ignores_guest_count() {
        let one = calculator()
            .calculate_tourist_tax(&TouristTaxInput::percentage(Some(dec!(300)), None, 1, 2));
        let four = calculator()
            .calculate_tourist_tax(&TouristTaxInput::percentage(Some(dec!(300)), None, 4, 2));
        assert_eq!(one.amount, four.amount);
    }

    #[test]
    fn municipality_fee_without_nightly_rate() {
        for nightly in [None, Some(dec!(0)), Some(dec!(-50))] {
            let input = TouristTaxInput::percentage(nightly, Some(dec!(0.10)), 2, 3);
            let result = calculator().calculate_tourist_tax(&input);
            assert_eq!(result.amount, dec!(0.00));
            assert_eq!(result.per_person_per_night(), dec!(0.00));
        }
    }
}
