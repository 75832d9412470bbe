use crate::model::{FlammabilityClass, HazardCategory, IncompatibilityLevel, RiskLevel, ToxicityLevel};
use crate::rules::dangerous::DangerousReaction;
use crate::trace::{TraceStep, TraceWarning};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Flammability verdict for one substance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlammabilityAssessment {
    pub score: Decimal,
    pub class: FlammabilityClass,
    pub flash_point_c: Option<Decimal>,
    pub reason: String,
}

/// Toxicity verdict for one substance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToxicityAssessment {
    pub score: Decimal,
    pub level: ToxicityLevel,
    /// True when the label was missing or unrecognized and the
    /// precautionary default was used.
    pub default_applied: bool,
    pub reason: String,
}

/// Per-substance detail of an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstanceAssessment {
    /// Name as given in the request.
    pub requested_name: String,
    /// Catalog display name (the requested name for placeholders).
    pub name: String,
    pub cas: Option<String>,
    /// False when the catalog did not know the name and a placeholder
    /// was evaluated instead.
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,
    pub flammability: FlammabilityAssessment,
    pub toxicity: ToxicityAssessment,
}

/// Where an incompatibility verdict came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncompatibilitySource {
    Record,
    FamilyRule,
    None,
}

/// Verdict for one pair of substances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncompatibilityAssessment {
    pub substances: [String; 2],
    pub incompatible: bool,
    pub score: Decimal,
    /// `None` when incompatible with an unrecognized documented level, or
    /// when no incompatibility was found.
    pub level: Option<IncompatibilityLevel>,
    pub source: IncompatibilitySource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
    /// True when this pair also matched a known dangerous reaction.
    pub is_dangerous: bool,
    pub reason: String,
}

/// One score per hazard category, each in [0, 100].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub flammability: Decimal,
    pub toxicity: Decimal,
    pub incompatibility: Decimal,
}

impl CategoryScores {
    pub fn get(&self, category: HazardCategory) -> Decimal {
        match category {
            HazardCategory::Flammability => self.flammability,
            HazardCategory::Toxicity => self.toxicity,
            HazardCategory::Incompatibility => self.incompatibility,
        }
    }

    /// Every score clamped into [0, 100].
    pub fn clamped(&self) -> CategoryScores {
        CategoryScores {
            flammability: clamp_score(self.flammability),
            toxicity: clamp_score(self.toxicity),
            incompatibility: clamp_score(self.incompatibility),
        }
    }
}

/// Mean per-substance scores, next to the worst-case maxima.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMeans {
    pub flammability: Decimal,
    pub toxicity: Decimal,
}

/// How the final score was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Worst case across substances and pairs.
    pub raw: CategoryScores,
    /// Scores after the dangerous-reaction override.
    pub applied: CategoryScores,
    /// `applied` multiplied by the category weights.
    pub weighted: CategoryScores,
    pub means: CategoryMeans,
    pub base_score: Decimal,
    pub final_score: Decimal,
    pub risk_level: RiskLevel,
    pub dominant: HazardCategory,
    pub dangerous_override: bool,
    pub reason: String,
}

/// Outcome of the environmental stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentAdjustment {
    /// False when a reading was missing and the multipliers were skipped.
    pub applied: bool,
    pub temperature_c: Option<Decimal>,
    pub humidity_percent: Option<Decimal>,
    pub ventilated: bool,
    pub temperature_factor: Decimal,
    pub humidity_factor: Decimal,
    pub ventilation_factor: Decimal,
    pub floor: Decimal,
    pub base_score: Decimal,
    pub final_score: Decimal,
    pub reason: String,
}

impl EnvironmentAdjustment {
    pub fn combined_factor(&self) -> Decimal {
        self.temperature_factor
            .checked_mul(self.humidity_factor)
            .and_then(|x| x.checked_mul(self.ventilation_factor))
            .unwrap_or(Decimal::MAX)
    }
}

/// Full result of one analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub breakdown: ScoreBreakdown,
    pub substances: Vec<SubstanceAssessment>,
    /// Incompatible pairs only, highest score first.
    pub incompatibilities: Vec<IncompatibilityAssessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dangerous_reaction: Option<DangerousReaction>,
    pub environment: EnvironmentAdjustment,
    /// Categories scoring at least the moderate threshold.
    pub risk_drivers: Vec<HazardCategory>,
    pub critical_scenario: String,
    pub recommendations: Vec<String>,
    pub warnings: Vec<TraceWarning>,
    pub explanations: Vec<TraceStep>,
}

impl AnalysisResult {
    pub fn final_score(&self) -> Decimal {
        self.breakdown.final_score
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.breakdown.risk_level
    }
}

/// Clamp a score into [0, 100].
pub fn clamp_score(score: Decimal) -> Decimal {
    score.max(Decimal::ZERO).min(Decimal::ONE_HUNDRED)
}
