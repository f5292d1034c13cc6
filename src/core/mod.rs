//! Core value types, money arithmetic, and rule storage.
//!
//! Everything the country calculators share: the items and results flowing
//! through the engine, the cent-exact rounding helpers, and the
//! [`RuleStore`] contract for date-effective rates.

mod error;
pub mod money;
mod rules;
mod types;

pub use error::*;
pub use rules::*;
pub use types::*;
