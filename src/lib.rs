//! # fiscalite
//!
//! VAT and tourist tax engine for a multi-country hospitality platform.
//!
//! Given an amount, a tax category, a country and a date, the engine returns the
//! HT / tax / TTC decomposition using the rule in force on that date. It also
//! computes the per-stay occupancy tax, whose formula differs by country:
//! a levy per guest per night (France, Morocco) or a percentage of the nightly
//! rate (Saudi Arabia).
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point,
//! and are rounded half-up to the cent.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use fiscalite::core::*;
//! use fiscalite::FiscalEngine;
//! use rust_decimal_macros::dec;
//!
//! let engine = FiscalEngine::with_default_countries(Arc::new(InMemoryRuleStore::seeded()));
//! let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//!
//! let room = TaxableItem::new(dec!(33.33), categories::ACCOMMODATION, "1 night");
//! let vat = engine.calculate_tax("FR", &room, date).unwrap();
//! assert_eq!(vat.tax_amount, dec!(3.33));
//! assert_eq!(vat.amount_ttc, dec!(36.66));
//!
//! let stay = TouristTaxInput::per_person(Some(dec!(1.50)), 2, 3, 0);
//! let levy = engine.calculate_tourist_tax("FR", &stay).unwrap();
//! assert_eq!(levy.amount, dec!(9.00));
//! ```
//!
//! ## Errors
//!
//! A missing VAT rule is a data bug and fails with
//! [`FiscalError::NoApplicableRule`](core::FiscalError::NoApplicableRule); an
//! unconfigured tourist tax is a valid property setup and yields zero.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Engine, calculators, in-memory rule store |
//! | `json` | Load rule seeds from JSON |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod country;

#[cfg(feature = "core")]
pub mod engine;

#[cfg(feature = "core")]
pub mod registry;

#[cfg(feature = "core")]
pub use crate::engine::FiscalEngine;

#[cfg(feature = "core")]
pub use crate::registry::TaxCalculatorRegistry;
