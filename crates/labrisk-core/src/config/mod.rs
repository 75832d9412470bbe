pub mod schema;

use crate::error::LabRiskError;
use rust_decimal::Decimal;
use std::path::Path;

pub use schema::ScoringConfig;

/// Load a scoring config from a JSON file.
pub fn load_config(path: &Path) -> Result<ScoringConfig, LabRiskError> {
    let content = std::fs::read_to_string(path).map_err(|e| LabRiskError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse a scoring config from a JSON string, reporting errors against `source`.
pub fn parse_config(json: &str, source: &Path) -> Result<ScoringConfig, LabRiskError> {
    let config: ScoringConfig = serde_json::from_str(json).map_err(|e| LabRiskError::ConfigLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a scoring config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<ScoringConfig, LabRiskError> {
    let config: ScoringConfig = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate that a scoring config is internally consistent.
pub fn validate_config(config: &ScoringConfig) -> Result<(), LabRiskError> {
    let w = &config.weights;
    for (name, weight) in [
        ("flammability", w.flammability),
        ("toxicity", w.toxicity),
        ("incompatibility", w.incompatibility),
    ] {
        if weight < Decimal::ZERO || weight > Decimal::ONE {
            return Err(LabRiskError::ConfigInvalid(format!(
                "weight '{name}' must be between 0 and 1, got {weight}"
            )));
        }
    }
    if w.sum() != Decimal::ONE {
        return Err(LabRiskError::ConfigInvalid(format!(
            "weights must sum to exactly 1, got {}",
            w.sum()
        )));
    }

    let t = &config.thresholds;
    if !(Decimal::ZERO < t.moderate && t.moderate < t.high && t.high <= Decimal::ONE_HUNDRED) {
        return Err(LabRiskError::ConfigInvalid(format!(
            "risk thresholds must satisfy 0 < moderate < high <= 100, got {} / {}",
            t.moderate, t.high
        )));
    }

    let f = &config.flammability;
    if !(f.very_flammable_below < f.flammable_below
        && f.flammable_below < f.slightly_flammable_below)
    {
        return Err(LabRiskError::ConfigInvalid(
            "flash point thresholds must be strictly ascending".into(),
        ));
    }

    let tox = &config.toxicity;
    let inc = &config.incompatibility;
    let d = &config.dangerous_reaction;
    for (name, score) in [
        ("flammability.very_flammable", f.very_flammable),
        ("flammability.flammable", f.flammable),
        ("flammability.slightly_flammable", f.slightly_flammable),
        ("flammability.non_flammable", f.non_flammable),
        ("toxicity.very_toxic", tox.very_toxic),
        ("toxicity.toxic", tox.toxic),
        ("toxicity.harmful", tox.harmful),
        ("toxicity.irritant", tox.irritant),
        ("toxicity.slightly_toxic", tox.slightly_toxic),
        ("toxicity.non_toxic", tox.non_toxic),
        ("incompatibility.base_score", inc.base_score),
        ("incompatibility.max_score", inc.max_score),
        ("dangerous_reaction.incompatibility_score", d.incompatibility_score),
        ("dangerous_reaction.toxicity_floor", d.toxicity_floor),
        ("dangerous_reaction.final_floor", d.final_floor),
    ] {
        check_score(name, score)?;
    }

    for (name, factor) in [
        ("incompatibility.severe_multiplier", inc.severe_multiplier),
        ("incompatibility.critical_factor", inc.critical_factor),
        ("incompatibility.low_factor", inc.low_factor),
    ] {
        if factor < Decimal::ZERO {
            return Err(LabRiskError::ConfigInvalid(format!(
                "'{name}' must not be negative, got {factor}"
            )));
        }
    }

    if config.max_substances == 0 {
        return Err(LabRiskError::ConfigInvalid(
            "max_substances must be at least 1".into(),
        ));
    }

    Ok(())
}

fn check_score(name: &str, score: Decimal) -> Result<(), LabRiskError> {
    if score < Decimal::ZERO || score > Decimal::ONE_HUNDRED {
        return Err(LabRiskError::ConfigInvalid(format!(
            "score '{name}' must be between 0 and 100, got {score}"
        )));
    }
    Ok(())
}
