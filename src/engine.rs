//! Single entry point for pricing, booking and invoicing code.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::core::{
    FiscalError, RuleStore, TaxResult, TaxRule, TaxableItem, TouristTaxInput, TouristTaxResult,
};
use crate::country::CountryTaxCalculator;
use crate::registry::TaxCalculatorRegistry;

/// Facade over the calculator registry.
///
/// Every method looks up the country's calculator and delegates to it.
///
/// ```
/// use std::sync::Arc;
/// use chrono::NaiveDate;
/// use fiscalite::core::*;
/// use fiscalite::FiscalEngine;
/// use rust_decimal_macros::dec;
///
/// let engine = FiscalEngine::with_default_countries(Arc::new(InMemoryRuleStore::seeded()));
/// let item = TaxableItem::new(dec!(1000.00), categories::ACCOMMODATION, "Riyadh, 2 nights");
/// let result = engine
///     .calculate_tax("SA", &item, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
///     .unwrap();
/// assert_eq!(result.amount_ttc, dec!(1150.00));
/// assert!(!engine.is_country_supported("XX"));
/// ```
#[derive(Debug, Clone)]
pub struct FiscalEngine {
    registry: TaxCalculatorRegistry,
}

impl FiscalEngine {
    pub fn new(registry: TaxCalculatorRegistry) -> Self {
        Self { registry }
    }

    /// Engine for every supported country reading from `store`.
    pub fn with_default_countries(store: Arc<dyn RuleStore>) -> Self {
        Self::new(TaxCalculatorRegistry::with_default_countries(store))
    }

    /// Standard tax on `item` in `country` as of `date`.
    ///
    /// # Errors
    ///
    /// [`FiscalError::UnsupportedCountry`] or [`FiscalError::NoApplicableRule`].
    pub fn calculate_tax(
        &self,
        country: &str,
        item: &TaxableItem,
        date: NaiveDate,
    ) -> Result<TaxResult, FiscalError> {
        self.registry.get(country)?.calculate_tax(item, date)
    }

    /// Tourist tax for a stay in `country`.
    ///
    /// # Errors
    ///
    /// [`FiscalError::UnsupportedCountry`] only; unconfigured rates yield zero.
    pub fn calculate_tourist_tax(
        &self,
        country: &str,
        input: &TouristTaxInput,
    ) -> Result<TouristTaxResult, FiscalError> {
        Ok(self.registry.get(country)?.calculate_tourist_tax(input))
    }

    pub fn is_country_supported(&self, country: &str) -> bool {
        self.registry.is_supported(country)
    }

    pub fn supported_countries(&self) -> BTreeSet<String> {
        self.registry.supported_countries()
    }

    /// Rule history for `category` in `country` up to `date`, newest first.
    pub fn applicable_rules(
        &self,
        country: &str,
        category: &str,
        date: NaiveDate,
    ) -> Result<Vec<TaxRule>, FiscalError> {
        Ok(self.registry.get(country)?.applicable_rules(category, date))
    }
}
