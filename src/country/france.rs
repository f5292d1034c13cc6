//! France: TVA by category, taxe de séjour per guest per night.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use super::{CountryTaxCalculator, apply_rule, tourist};
use crate::core::{
    FiscalError, RuleStore, TaxResult, TaxRule, TaxableItem, TouristTaxInput, TouristTaxResult,
};

const COUNTRY: &str = "FR";
const CURRENCY: &str = "EUR";

/// French TVA (10% accommodation, 20% standard and cleaning, as seeded) and
/// taxe de séjour.
#[derive(Clone)]
pub struct FranceTaxCalculator {
    store: Arc<dyn RuleStore>,
}

impl FranceTaxCalculator {
    pub fn new(store: Arc<dyn RuleStore>) -> Self {
        Self { store }
    }
}

impl CountryTaxCalculator for FranceTaxCalculator {
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
        tourist::per_guest_per_night(input, "Taxe de séjour", CURRENCY)
    }

    fn applicable_rules(&self, category: &str, as_of: NaiveDate) -> Vec<TaxRule> {
        self.store.find_applicable_rules(COUNTRY, category, as_of)
    }
}

impl fmt::Debug for FranceTaxCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FranceTaxCalculator").finish_non_exhaustive()
    }
}
