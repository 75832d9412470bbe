use crate::model::{IncompatibilityLevel, RiskLevel, ToxicityLevel};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Every tunable constant of the scoring pipeline.
///
/// Decimals are written as quoted strings in JSON (`"0.35"`) so that
/// weights stay exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: Weights,
    pub thresholds: RiskThresholds,
    pub flammability: FlammabilityScoring,
    pub toxicity: ToxicityScoring,
    pub incompatibility: IncompatibilityScoring,
    pub dangerous_reaction: DangerousOverride,
    /// Maximum number of substances in one request.
    pub max_substances: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            weights: Weights::default(),
            thresholds: RiskThresholds::default(),
            flammability: FlammabilityScoring::default(),
            toxicity: ToxicityScoring::default(),
            incompatibility: IncompatibilityScoring::default(),
            dangerous_reaction: DangerousOverride::default(),
            max_substances: 10,
        }
    }
}

impl ScoringConfig {
    /// Map a score onto the three-tier risk level.
    pub fn risk_level(&self, score: Decimal) -> RiskLevel {
        if score >= self.thresholds.high {
            RiskLevel::High
        } else if score >= self.thresholds.moderate {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }
}

/// Category weights of the base score. Must sum to exactly 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub flammability: Decimal,
    pub toxicity: Decimal,
    pub incompatibility: Decimal,
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            flammability: dec!(0.20),
            toxicity: dec!(0.35),
            incompatibility: dec!(0.45),
        }
    }
}

impl Weights {
    pub fn sum(&self) -> Decimal {
        self.flammability + self.toxicity + self.incompatibility
    }
}

/// Lower bounds of MODERATE and HIGH.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub moderate: Decimal,
    pub high: Decimal,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        RiskThresholds {
            moderate: dec!(40),
            high: dec!(70),
        }
    }
}

/// Flash-point bands (exclusive upper bounds, °C) and their scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlammabilityScoring {
    pub very_flammable_below: Decimal,
    pub flammable_below: Decimal,
    pub slightly_flammable_below: Decimal,
    pub very_flammable: Decimal,
    pub flammable: Decimal,
    pub slightly_flammable: Decimal,
    pub non_flammable: Decimal,
}

impl Default for FlammabilityScoring {
    fn default() -> Self {
        FlammabilityScoring {
            very_flammable_below: dec!(23),
            flammable_below: dec!(60),
            slightly_flammable_below: dec!(100),
            very_flammable: dec!(90),
            flammable: dec!(60),
            slightly_flammable: dec!(20),
            non_flammable: dec!(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToxicityScoring {
    pub very_toxic: Decimal,
    pub toxic: Decimal,
    pub harmful: Decimal,
    pub irritant: Decimal,
    pub slightly_toxic: Decimal,
    pub non_toxic: Decimal,
}

impl Default for ToxicityScoring {
    fn default() -> Self {
        ToxicityScoring {
            very_toxic: dec!(95),
            toxic: dec!(70),
            harmful: dec!(45),
            irritant: dec!(25),
            slightly_toxic: dec!(10),
            non_toxic: dec!(0),
        }
    }
}

impl ToxicityScoring {
    pub fn score(&self, level: ToxicityLevel) -> Decimal {
        match level {
            ToxicityLevel::VeryToxic => self.very_toxic,
            ToxicityLevel::Toxic => self.toxic,
            ToxicityLevel::Harmful => self.harmful,
            ToxicityLevel::Irritant => self.irritant,
            ToxicityLevel::SlightlyToxic => self.slightly_toxic,
            ToxicityLevel::NonToxic => self.non_toxic,
        }
    }
}

/// Constants turning a documented risk level into a score.
///
/// SEVERE = base × severe_multiplier × critical_factor, HIGH = base ×
/// severe_multiplier, MODERATE = base, LOW = base × low_factor, all capped
/// at `max_score`. Unrecognized levels score as MODERATE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncompatibilityScoring {
    pub base_score: Decimal,
    pub severe_multiplier: Decimal,
    pub critical_factor: Decimal,
    pub low_factor: Decimal,
    pub max_score: Decimal,
}

impl Default for IncompatibilityScoring {
    fn default() -> Self {
        IncompatibilityScoring {
            base_score: dec!(30),
            severe_multiplier: dec!(2.0),
            critical_factor: dec!(1.5),
            low_factor: dec!(0.5),
            max_score: dec!(100),
        }
    }
}

impl IncompatibilityScoring {
    pub fn score(&self, level: Option<IncompatibilityLevel>) -> Decimal {
        let raw = match level {
            Some(IncompatibilityLevel::Severe) => {
                self.base_score * self.severe_multiplier * self.critical_factor
            }
            Some(IncompatibilityLevel::High) => self.base_score * self.severe_multiplier,
            Some(IncompatibilityLevel::Moderate) | None => self.base_score,
            Some(IncompatibilityLevel::Low) => self.base_score * self.low_factor,
            Some(IncompatibilityLevel::None) => Decimal::ZERO,
        };
        raw.min(self.max_score).normalize()
    }
}

/// Values forced when a known dangerous reaction is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DangerousOverride {
    /// Incompatibility score applied in place of the detected one.
    pub incompatibility_score: Decimal,
    /// Toxicity is raised to at least this value.
    pub toxicity_floor: Decimal,
    /// Final score floor after environmental adjustment.
    pub final_floor: Decimal,
}

impl Default for DangerousOverride {
    fn default() -> Self {
        DangerousOverride {
            incompatibility_score: dec!(50),
            toxicity_floor: dec!(40),
            final_floor: dec!(100),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        assert_eq!(ScoringConfig::default().weights.sum(), Decimal::ONE);
    }

    #[test]
    fn test_risk_level_boundaries() {
        let cfg = ScoringConfig::default();
        assert_eq!(cfg.risk_level(dec!(0)), RiskLevel::Low);
        assert_eq!(cfg.risk_level(dec!(39.9)), RiskLevel::Low);
        assert_eq!(cfg.risk_level(dec!(40)), RiskLevel::Moderate);
        assert_eq!(cfg.risk_level(dec!(69.9)), RiskLevel::Moderate);
        assert_eq!(cfg.risk_level(dec!(70)), RiskLevel::High);
        assert_eq!(cfg.risk_level(dec!(100)), RiskLevel::High);
    }

    #[test]
    fn test_incompatibility_level_scores() {
        let s = IncompatibilityScoring::default();
        assert_eq!(s.score(Some(IncompatibilityLevel::Severe)), dec!(90));
        assert_eq!(s.score(Some(IncompatibilityLevel::High)), dec!(60));
        assert_eq!(s.score(Some(IncompatibilityLevel::Moderate)), dec!(30));
        assert_eq!(s.score(Some(IncompatibilityLevel::Low)), dec!(15));
        assert_eq!(s.score(Some(IncompatibilityLevel::None)), dec!(0));
        assert_eq!(s.score(None), dec!(30));
    }

    #[test]
    fn test_toxicity_scores_total() {
        let s = ToxicityScoring::default();
        let scores: Vec<Decimal> = ToxicityLevel::ALL.iter().map(|l| s.score(*l)).collect();
        assert_eq!(
            scores,
            vec![dec!(95), dec!(70), dec!(45), dec!(25), dec!(10), dec!(0)]
        );
    }
}
