//! Basic usage example for nationality-rs
//!
//! This example demonstrates how to:
//! - Build the shared database over the builtin catalog
//! - Resolve codes, flags and names (and where case matters)
//! - Search names through the query cache
//! - Aggregate votes into a nationality breakdown

use nationality_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== nationality-rs Basic Usage Example ===\n");

    let db = NationalityDb::with_options(DbOptions::default().with_cache_capacity(32))?;
    println!("✓ Catalog ready with {} entries\n", db.stats().countries);

    // Example 1: First entries in display order
    println!("--- Example 1: Display order ---");
    for (i, c) in db.countries().iter().take(4).enumerate() {
        println!("{}. {} {} ({})", i + 1, c.flag(), c.name(), c.code());
    }
    println!();

    // Example 2: Case rules
    println!("--- Example 2: Lookups ---");
    println!("resolve(\"KR\")   -> {}", db.resolve(Some("KR")).name());
    println!("resolve(\"kr\")   -> {}", db.resolve(Some("kr")).name());
    println!("flag_for(\"kr\")  -> {}", db.flag_for(Some("kr")));
    println!("name_for(\"ZZ\")  -> {}", db.name_for(Some("ZZ")));
    println!("name_for(None)  -> {}", db.name_for(None));
    println!();

    // Example 3: Cached search
    println!("--- Example 3: Search ---");
    for query in ["kor", " KOR ", "united"] {
        let names: Vec<&str> = db.search(Some(query)).iter().map(|c| c.name()).collect();
        println!("{query:?} -> {names:?}");
    }
    let stats = db.stats();
    println!(
        "cache: {} entries, {} hits, {} misses\n",
        stats.cached_queries, stats.cache_hits, stats.cache_misses
    );

    // Example 4: Results view
    println!("--- Example 4: Breakdown ---");
    let votes = [(Some("KR"), 12), (Some("se"), 5), (None, 4), (Some("unknown"), 1), (Some("??"), 2)];
    let breakdown = NationalityBreakdown::from_counts(&db, votes);
    for row in &breakdown.rows {
        println!("{} {:<20} {:>3} ({:.0}%)", row.flag, row.name, row.count, row.share * 100.0);
    }

    Ok(())
}
