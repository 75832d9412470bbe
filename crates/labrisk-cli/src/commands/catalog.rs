use labrisk_core::catalog::SubstanceRepository;
use labrisk_core::error::LabRiskError;
use labrisk_core::rules::dangerous::DANGEROUS_REACTIONS;
use std::path::Path;

use super::open_catalog;

pub fn list_substances(dir: Option<&Path>) -> Result<(), LabRiskError> {
    let catalog = open_catalog(dir)?;

    let max_name = catalog
        .substances()
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(20);

    println!("{} substances:\n", catalog.len());
    print!("  {:<width$}", "Name", width = max_name + 2);
    println!("  {:<12}  {:>10}  {:<24}  Family", "CAS", "Flash (°C)", "Toxicity");
    println!("  {}", "-".repeat(max_name + 2 + 12 + 10 + 24 + 20));

    for s in catalog.substances() {
        let flash = s
            .flash_point_c
            .map(|f| f.normalize().to_string())
            .unwrap_or_else(|| "-".into());
        print!("  {:<width$}", s.name, width = max_name + 2);
        println!(
            "  {:<12}  {:>10}  {:<24}  {}",
            s.cas.as_deref().unwrap_or("-"),
            flash,
            s.toxicity.as_deref().unwrap_or("-"),
            s.family.as_deref().unwrap_or("-")
        );
    }

    println!();
    println!("{} documented incompatibilities.", catalog.incompatibilities().len());
    Ok(())
}

pub fn list_reactions() -> Result<(), LabRiskError> {
    println!("Known dangerous reactions (final score locked at 100):\n");
    for rule in DANGEROUS_REACTIONS {
        println!("  {} ({}) - {}", rule.product, rule.product_formula, rule.severity);
        println!("    {}", rule.label);
        println!("    one of: {}", rule.side_a.join(", "));
        println!("    with:   {}", rule.side_b.join(", "));
        println!("    {}", rule.recommendation);
        println!();
    }
    Ok(())
}
