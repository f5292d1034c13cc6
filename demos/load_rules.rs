use std::sync::Arc;

use chrono::NaiveDate;
use fiscalite::FiscalEngine;
use fiscalite::core::*;
use rust_decimal_macros::dec;

const RULES: &str = r#"[
    {"country": "FR", "tax_category": "ACCOMMODATION", "tax_rate": "0.0550",
     "tax_name": "TVA", "effective_from": "2011-01-01"},
    {"country": "FR", "tax_category": "ACCOMMODATION", "tax_rate": "0.0700",
     "tax_name": "TVA", "effective_from": "2012-01-01"},
    {"country": "FR", "tax_category": "ACCOMMODATION", "tax_rate": "0.1000",
     "tax_name": "TVA", "effective_from": "2014-01-01"}
]"#;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let store = match InMemoryRuleStore::from_json(RULES) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("could not load rules: {e}");
            std::process::exit(1);
        }
    };
    println!("Loaded {} rules", store.len());

    let engine = FiscalEngine::with_default_countries(Arc::new(store));
    let room = TaxableItem::new(dec!(100.00), categories::ACCOMMODATION, "1 night");

    for year in [2010, 2011, 2013, 2024] {
        let as_of = NaiveDate::from_ymd_opt(year, 6, 1).unwrap();
        match engine.calculate_tax("FR", &room, as_of) {
            Ok(r) => println!("  {as_of}: rate {} -> TTC {}", r.tax_rate, r.amount_ttc),
            Err(e) => println!("  {as_of}: {e}"),
        }
    }

    println!("\nHistory as of 2024-06-01:");
    let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    for rule in engine
        .applicable_rules("FR", categories::ACCOMMODATION, as_of)
        .unwrap()
    {
        println!("  since {}: {}", rule.effective_from, rule.tax_rate);
    }
}
