use std::sync::Arc;

use chrono::NaiveDate;
use fiscalite::FiscalEngine;
use fiscalite::core::*;
use rust_decimal_macros::dec;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let engine = FiscalEngine::with_default_countries(Arc::new(InMemoryRuleStore::seeded()));
    let check_in = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

    // ── 1. Paris: 3 nights for 2 guests ───────────────────────────────
    println!("=== Paris (FR) ===");
    let lines = [
        TaxableItem::new(dec!(450.00), categories::ACCOMMODATION, "3 nights, double room"),
        TaxableItem::new(dec!(35.00), categories::CLEANING, "Cleaning fee"),
    ];
    for line in &lines {
        match engine.calculate_tax("FR", line, check_in) {
            Ok(r) => println!(
                "  {:<24} HT {:>8}  {} {:>6}  TTC {:>8}",
                line.description, r.amount_ht, r.tax_name, r.tax_amount, r.amount_ttc
            ),
            Err(e) => println!("  {}: {e}", line.description),
        }
    }
    let levy = engine
        .calculate_tourist_tax("FR", &TouristTaxInput::per_person(Some(dec!(2.88)), 2, 3, 0))
        .unwrap();
    println!("  {} = {} {}", levy.description, levy.amount, levy.currency);

    // ── 2. Marrakech: breakfast is taxed at the food rate ─────────────
    println!("\n=== Marrakech (MA) ===");
    let breakfast = TaxableItem::new(dec!(120.00), categories::FOOD, "Breakfast x2");
    let r = engine.calculate_tax("MA", &breakfast, check_in).unwrap();
    println!("  {}: {} + {} = {}", breakfast.description, r.amount_ht, r.tax_amount, r.amount_ttc);

    // ── 3. Riyadh: municipality fee ignores guest count ───────────────
    println!("\n=== Riyadh (SA) ===");
    for guests in [1, 4] {
        let input = TouristTaxInput::percentage(Some(dec!(500.00)), None, guests, 3);
        let fee = engine.calculate_tourist_tax("SA", &input).unwrap();
        println!("  {guests} guest(s): {} = {} {}", fee.description, fee.amount, fee.currency);
    }

    // ── 4. Errors ─────────────────────────────────────────────────────
    println!("\n=== Errors ===");
    let spa = TaxableItem::new(dec!(80.00), "SPA", "Massage");
    if let Err(e) = engine.calculate_tax("FR", &spa, check_in) {
        println!("  {e}");
    }
    if let Err(e) = engine.calculate_tax("XX", &spa, check_in) {
        println!("  {e}");
    }
    println!("  supported: {:?}", engine.supported_countries());
}
