//! Country code to calculator index.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::core::{FiscalError, RuleStore};
use crate::country::{CountryCalculator, CountryTaxCalculator};

/// Read-only index of country calculators, keyed by ISO country code.
///
/// Built once and never mutated; share it freely across threads.
#[derive(Debug, Clone)]
pub struct TaxCalculatorRegistry {
    calculators: HashMap<&'static str, CountryCalculator>,
}

impl TaxCalculatorRegistry {
    /// Index the given calculators by [`CountryTaxCalculator::country_code`].
    ///
    /// # Errors
    ///
    /// [`FiscalError::DuplicateCountry`] if two calculators serve the same code.
    pub fn new(
        calculators: impl IntoIterator<Item = CountryCalculator>,
    ) -> Result<Self, FiscalError> {
        let mut index = HashMap::new();
        for calculator in calculators {
            let code = calculator.country_code();
            if index.insert(code, calculator).is_some() {
                return Err(FiscalError::DuplicateCountry {
                    country: code.to_string(),
                });
            }
        }
        tracing::debug!(
            countries = ?index.keys().collect::<BTreeSet<_>>(),
            "tax calculator registry built"
        );
        Ok(Self { calculators: index })
    }

    /// Registry with every supported country reading from `store`.
    pub fn with_default_countries(store: Arc<dyn RuleStore>) -> Self {
        // CountryCalculator::all yields one calculator per code
        Self::new(CountryCalculator::all(store)).unwrap_or_else(|err| {
            tracing::error!(error = %err, "default country set is inconsistent");
            Self {
                calculators: HashMap::new(),
            }
        })
    }

    /// Calculator for `country` (case-insensitive, surrounding whitespace ignored).
    ///
    /// # Errors
    ///
    /// [`FiscalError::UnsupportedCountry`] carrying the code as given.
    pub fn get(&self, country: &str) -> Result<&CountryCalculator, FiscalError> {
        self.lookup(country).ok_or_else(|| {
            tracing::warn!(country, "unsupported country");
            FiscalError::unsupported_country(country)
        })
    }

    pub fn is_supported(&self, country: &str) -> bool {
        self.lookup(country).is_some()
    }

    /// Supported country codes in sorted order.
    pub fn supported_countries(&self) -> BTreeSet<String> {
        self.calculators.keys().map(|c| c.to_string()).collect()
    }

    fn lookup(&self, country: &str) -> Option<&CountryCalculator> {
        let code = country.trim().to_ascii_uppercase();
        self.calculators.get(code.as_str())
    }
}
