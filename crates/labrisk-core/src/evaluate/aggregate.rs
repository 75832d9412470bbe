use crate::config::ScoringConfig;
use crate::evaluate::outcome::{clamp_score, CategoryMeans, CategoryScores, ScoreBreakdown};
use crate::model::{HazardCategory, RiskLevel};

/// Tie-break order for the dominant category.
const CATEGORY_ORDER: [HazardCategory; 3] = [
    HazardCategory::Flammability,
    HazardCategory::Toxicity,
    HazardCategory::Incompatibility,
];

/// Combine category scores into the weighted base score.
///
/// With a known dangerous reaction the incompatibility score is replaced by
/// the configured lockdown value and toxicity is raised to its floor. The
/// returned breakdown has `final_score == base_score`; the environmental
/// stage replaces it.
pub fn aggregate(
    raw: &CategoryScores,
    means: CategoryMeans,
    dangerous: bool,
    config: &ScoringConfig,
) -> ScoreBreakdown {
    let raw = raw.clamped();

    let applied = if dangerous {
        let d = &config.dangerous_reaction;
        CategoryScores {
            flammability: raw.flammability,
            toxicity: raw.toxicity.max(d.toxicity_floor),
            incompatibility: d.incompatibility_score,
        }
    } else {
        raw.clone()
    };

    let w = &config.weights;
    let weighted = CategoryScores {
        flammability: applied.flammability * w.flammability,
        toxicity: applied.toxicity * w.toxicity,
        incompatibility: applied.incompatibility * w.incompatibility,
    };

    let base_score = clamp_score(weighted.flammability + weighted.toxicity + weighted.incompatibility);
    let risk_level = config.risk_level(base_score);
    let dominant = dominant_category(&applied);

    tracing::debug!(
        base = %base_score,
        level = %risk_level,
        dominant = %dominant,
        dangerous,
        "base score aggregated"
    );

    let reason = explain(base_score, risk_level, dominant, applied.get(dominant));

    ScoreBreakdown {
        raw,
        applied,
        weighted,
        means,
        base_score,
        final_score: base_score,
        risk_level,
        dominant,
        dangerous_override: dangerous,
        reason,
    }
}

/// Highest applied score; ties resolved flammability, then toxicity, then
/// incompatibility.
pub fn dominant_category(scores: &CategoryScores) -> HazardCategory {
    let mut best = CATEGORY_ORDER[0];
    for category in CATEGORY_ORDER.iter().skip(1) {
        if scores.get(*category) > scores.get(best) {
            best = *category;
        }
    }
    best
}

fn explain(
    base: rust_decimal::Decimal,
    level: RiskLevel,
    dominant: HazardCategory,
    dominant_score: rust_decimal::Decimal,
) -> String {
    let base = base.round_dp(1);
    match level {
        RiskLevel::High => format!(
            "HIGH RISK (base score {base}/100). Main hazard: {dominant} (score {dominant_score}). \
             Handling forbidden without specific training and full PPE; consult the SDS and a safety officer."
        ),
        RiskLevel::Moderate => format!(
            "MODERATE RISK (base score {base}/100). Main hazard: {dominant} (score {dominant_score}). \
             Reinforced precautions: PPE mandatory, fume hood recommended."
        ),
        RiskLevel::Low => format!(
            "LOW RISK (base score {base}/100). Identified hazards are limited; \
             follow standard good laboratory practice."
        ),
    }
}
