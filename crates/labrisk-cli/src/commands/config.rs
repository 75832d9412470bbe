use labrisk_core::config::load_config;
use labrisk_core::error::LabRiskError;
use labrisk_core::rules::validate_rule_tables;
use std::path::Path;

use super::open_config;

pub fn show(path: Option<&Path>) -> Result<(), LabRiskError> {
    let config = open_config(path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), LabRiskError> {
    let config = load_config(file)?;
    validate_rule_tables()?;

    println!("Scoring config '{}' is valid.", file.display());
    println!(
        "  Weights: flammability {} / toxicity {} / incompatibility {}",
        config.weights.flammability, config.weights.toxicity, config.weights.incompatibility
    );
    println!(
        "  Thresholds: MODERATE from {}, HIGH from {}",
        config.thresholds.moderate, config.thresholds.high
    );
    println!("  Substance limit: {}", config.max_substances);

    // Legal but unusual settings
    let mut warnings = Vec::new();
    if config.dangerous_reaction.final_floor < config.thresholds.high {
        warnings.push(format!(
            "dangerous-reaction floor {} is below the HIGH threshold {}: known dangerous pairs may not be reported as HIGH",
            config.dangerous_reaction.final_floor, config.thresholds.high
        ));
    }
    if config.weights.incompatibility.is_zero() {
        warnings.push("incompatibility weight is 0: pair hazards do not affect the score".to_string());
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
