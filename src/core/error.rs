use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while resolving or applying tax rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FiscalError {
    /// No tax calculator is registered for the requested country code.
    #[error("unsupported country: {country}")]
    UnsupportedCountry { country: String },

    /// The rule store has no rule in force for the (country, category, date) triple.
    #[error("no applicable tax rule for country {country}, category {category} as of {as_of}")]
    NoApplicableRule {
        country: String,
        category: String,
        as_of: NaiveDate,
    },

    /// Two calculators were registered for the same country code.
    #[error("duplicate calculator for country: {country}")]
    DuplicateCountry { country: String },

    /// A tax rule failed validation before being stored.
    #[error("invalid tax rule: {0}")]
    InvalidRule(String),

    /// A rule seed document could not be parsed.
    #[error("rule seed error: {0}")]
    RuleSeed(String),
}

impl FiscalError {
    pub(crate) fn unsupported_country(country: impl Into<String>) -> Self {
        Self::UnsupportedCountry {
            country: country.into(),
        }
    }

    pub(crate) fn no_applicable_rule(
        country: impl Into<String>,
        category: impl Into<String>,
        as_of: NaiveDate,
    ) -> Self {
        Self::NoApplicableRule {
            country: country.into(),
            category: category.into(),
            as_of,
        }
    }
}
