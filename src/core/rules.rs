//! Date-versioned tax rule storage.
//!
//! The engine reads rates through [`RuleStore`]; persistence is the
//! implementor's business. [`InMemoryRuleStore`] keeps each (country, category)
//! history sorted by `effective_from` and resolves dates by binary search.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::error::FiscalError;
use super::types::{TaxRule, categories};

/// Source of date-effective tax rules.
///
/// Implementations must be cheap to share across threads; the engine holds
/// them behind an `Arc` and calls them synchronously.
pub trait RuleStore: Send + Sync {
    /// The rule in force on `as_of`: greatest `effective_from` not after `as_of`.
    fn find_applicable_rule(
        &self,
        country: &str,
        category: &str,
        as_of: NaiveDate,
    ) -> Option<TaxRule>;

    /// All rules for the pair that started on or before `as_of`, newest first.
    fn find_applicable_rules(&self, country: &str, category: &str, as_of: NaiveDate)
    -> Vec<TaxRule>;
}

/// Rule store backed by sorted in-memory vectors.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRuleStore {
    rules: HashMap<(String, String), Vec<TaxRule>>,
}

impl InMemoryRuleStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the platform's default rates for FR, MA and SA.
    ///
    /// | Country | Category | Rate | Name |
    /// |---------|----------|------|------|
    /// | FR | ACCOMMODATION | 10% | TVA |
    /// | FR | STANDARD, CLEANING | 20% | TVA |
    /// | MA | ACCOMMODATION | 10% | TVA |
    /// | MA | STANDARD | 20% | TVA |
    /// | MA | FOOD | 7% | TVA |
    /// | SA | ACCOMMODATION, STANDARD, CLEANING, FOOD | 15% | VAT |
    pub fn seeded() -> Self {
        let mut store = Self::new();
        for rule in default_rules() {
            store.push_sorted(rule);
        }
        store
    }

    /// Build a store from rules, validating each one.
    pub fn from_rules(rules: impl IntoIterator<Item = TaxRule>) -> Result<Self, FiscalError> {
        let mut store = Self::new();
        for rule in rules {
            store.insert(rule)?;
        }
        Ok(store)
    }

    /// Load rules from a JSON array.
    ///
    /// ```json
    /// [{"country": "FR", "tax_category": "ACCOMMODATION", "tax_rate": "0.10",
    ///   "tax_name": "TVA", "effective_from": "2014-01-01"}]
    /// ```
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self, FiscalError> {
        let rules: Vec<TaxRule> =
            serde_json::from_str(json).map_err(|e| FiscalError::RuleSeed(e.to_string()))?;
        Self::from_rules(rules)
    }

    /// Add a rule. A rule with the same `effective_from` as an existing one for
    /// the same pair replaces it.
    pub fn insert(&mut self, rule: TaxRule) -> Result<(), FiscalError> {
        rule.validate()?;
        self.push_sorted(rule);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_rule(mut self, rule: TaxRule) -> Result<Self, FiscalError> {
        self.insert(rule)?;
        Ok(self)
    }

    /// Total number of stored rules.
    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn push_sorted(&mut self, rule: TaxRule) {
        let history = self
            .rules
            .entry((rule.country.clone(), rule.tax_category.clone()))
            .or_default();
        match history.binary_search_by_key(&rule.effective_from, |r| r.effective_from) {
            Ok(idx) => history[idx] = rule,
            Err(idx) => history.insert(idx, rule),
        }
    }

    /// Rules for the pair in force on or before `as_of`, oldest first.
    fn history_until(&self, country: &str, category: &str, as_of: NaiveDate) -> &[TaxRule] {
        match self.rules.get(&(country.to_string(), category.to_string())) {
            Some(history) => {
                let end = history.partition_point(|r| r.is_effective_on(as_of));
                &history[..end]
            }
            None => &[],
        }
    }
}

impl RuleStore for InMemoryRuleStore {
    fn find_applicable_rule(
        &self,
        country: &str,
        category: &str,
        as_of: NaiveDate,
    ) -> Option<TaxRule> {
        self.history_until(country, category, as_of).last().cloned()
    }

    fn find_applicable_rules(
        &self,
        country: &str,
        category: &str,
        as_of: NaiveDate,
    ) -> Vec<TaxRule> {
        self.history_until(country, category, as_of)
            .iter()
            .rev()
            .cloned()
            .collect()
    }
}

fn default_rules() -> Vec<TaxRule> {
    let since = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    let fr = since(2014, 1, 1);
    let ma = since(2020, 1, 1);
    let sa = since(2020, 7, 1);

    let mut rules = vec![
        TaxRule::new("FR", categories::ACCOMMODATION, dec!(0.1000), "TVA", fr),
        TaxRule::new("FR", categories::STANDARD, dec!(0.2000), "TVA", fr),
        TaxRule::new("FR", categories::CLEANING, dec!(0.2000), "TVA", fr),
        TaxRule::new("MA", categories::ACCOMMODATION, dec!(0.1000), "TVA", ma),
        TaxRule::new("MA", categories::STANDARD, dec!(0.2000), "TVA", ma),
        TaxRule::new("MA", categories::FOOD, dec!(0.0700), "TVA", ma),
    ];
    for category in [
        categories::ACCOMMODATION,
        categories::STANDARD,
        categories::CLEANING,
        categories::FOOD,
    ] {
        rules.push(TaxRule::new("SA", category, dec!(0.1500), "VAT", sa));
    }
    rules
}
