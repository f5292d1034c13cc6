//! Morocco: TVA by category, taxe de promotion touristique per guest per night.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use super::{CountryTaxCalculator, apply_rule, tourist};
use crate::core::{
    FiscalError, RuleStore, TaxResult, TaxRule, TaxableItem, TouristTaxInput, TouristTaxResult,
};

const COUNTRY: &str = "MA";
const CURRENCY: &str = "MAD";

/// Moroccan TVA (10% accommodation, 20% standard, 7% food, as seeded) and the
/// per-guest taxe de promotion touristique.
#[derive(Clone)]
pub struct MoroccoTaxCalculator {
    store: Arc<dyn RuleStore>,
}

impl MoroccoTaxCalculator {
    pub fn new(store: Arc<dyn RuleStore>) -> Self {
        Self { store }
    }
}

impl CountryTaxCalculator for MoroccoTaxCalculator {
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
        tourist::per_guest_per_night(input, "Taxe de promotion touristique", CURRENCY)
    }

    fn applicable_rules(&self, category: &str, as_of: NaiveDate) -> Vec<TaxRule> {
        self.store.find_applicable_rules(COUNTRY, category, as_of)
    }
}

impl fmt::Debug for MoroccoTaxCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoroccoTaxCalculator").finish_non_exhaustive()
    }
}
