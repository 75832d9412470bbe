use crate::config::ScoringConfig;
use crate::evaluate::outcome::{CategoryScores, EnvironmentAdjustment, IncompatibilityAssessment};
use crate::model::{HazardCategory, IncompatibilityLevel, LabContext, RiskLevel};
use crate::parsing::normalize::normalize;
use crate::rules::dangerous::DangerousReaction;
use crate::trace::{Trace, TraceSeverity};
use rust_decimal_macros::dec;

/// Advice when several substances were checked and no pair is incompatible.
pub const COMPATIBLE_STORAGE_ADVICE: &[&str] = &[
    "No major incompatibility detected between these substances",
    "Still follow storage by chemical family",
];

/// Storage and handling advice for one incompatible pair.
pub fn storage_recommendations(pair: &IncompatibilityAssessment) -> Vec<String> {
    let [a, b] = &pair.substances;
    let mut recs = Vec::new();

    let tags = normalize(pair.reaction_type.as_deref().unwrap_or_default());
    if tags.contains("exotherm") {
        recs.push("Exothermic reaction hazard: avoid any direct contact".to_string());
        recs.push("Provide cooling and handle slowly".to_string());
    }
    if tags.contains("toxic gas") {
        recs.push("Toxic gas release hazard".to_string());
        recs.push("Handle only under a chemical fume hood".to_string());
        recs.push("Wear a suitable filtering mask".to_string());
    }
    if tags.contains("corrosive") {
        recs.push("Corrosive reaction possible".to_string());
        recs.push("Use protective gloves and goggles".to_string());
        recs.push("Avoid any skin contact".to_string());
    }

    match pair.level {
        Some(IncompatibilityLevel::Severe) => {
            recs.push(format!("Never store {a} and {b} in the same room"));
            recs.push("Use separate buildings for storage where possible".to_string());
            recs.push("Train staff on these specific hazards".to_string());
            recs.push("Set up an emergency procedure for accidental contact".to_string());
        }
        Some(IncompatibilityLevel::High) => {
            recs.push(format!("{a} and {b} must be stored in different cabinets"));
            recs.push("Keep at least 3 metres between the storage areas".to_string());
            recs.push("Clearly label incompatible storage zones".to_string());
            recs.push("Never handle both substances at the same time".to_string());
        }
        _ => {
            recs.push(format!("{a} and {b} must be stored separately"));
            recs.push("Store by chemical family".to_string());
            recs.push("Check container seals regularly".to_string());
        }
    }
    recs
}

/// General advice for a risk level.
pub fn level_recommendations(level: RiskLevel) -> &'static [&'static str] {
    match level {
        RiskLevel::High => &[
            "Mandatory training before any handling",
            "Full PPE: lab coat, resistant gloves, sealed goggles, mask if needed",
            "Handle ONLY under an extraction fume hood",
            "Never work alone",
            "Eyewash and safety shower within immediate reach",
            "Emergency plan posted and known",
            "Keep quantities to the strict minimum",
            "Always read the SDS before handling",
        ],
        RiskLevel::Moderate => &[
            "Suitable PPE: lab coat, gloves, safety glasses",
            "Fume hood recommended",
            "Adequate room ventilation",
            "Read the SDS",
            "Know where the safety equipment is",
            "Tell a colleague about the ongoing work",
        ],
        RiskLevel::Low => &[
            "Follow good laboratory practice",
            "Wear a lab coat and safety glasses",
            "Avoid direct contact with the substance",
            "Keep the workspace clean and tidy",
            "Wash hands after handling",
        ],
    }
}

/// Full recommendation list, deduplicated in first-seen order.
///
/// `pairs` holds only the incompatible pairs; with two or more substances
/// and none of them incompatible the generic storage advice is given.
pub fn build_recommendations(
    substance_count: usize,
    pairs: &[IncompatibilityAssessment],
    raw: &CategoryScores,
    final_level: RiskLevel,
    dangerous: Option<&DangerousReaction>,
    config: &ScoringConfig,
) -> Vec<String> {
    let mut recs: Vec<String> = Vec::new();
    if substance_count >= 2 && pairs.is_empty() {
        recs.extend(COMPATIBLE_STORAGE_ADVICE.iter().map(|s| s.to_string()));
    }
    for pair in pairs {
        recs.extend(storage_recommendations(pair));
    }
    recs.extend(level_recommendations(final_level).iter().map(|s| s.to_string()));

    // Category scores at or above the FLAMMABLE, TOXIC and HIGH-pair levels.
    if raw.flammability >= config.flammability.flammable {
        recs.push("High flammability hazard: keep away from all ignition sources".to_string());
    }
    if raw.toxicity >= config.toxicity.toxic {
        recs.push("High toxicological hazard: fume hood mandatory".to_string());
    }
    if raw.incompatibility >= config.incompatibility.score(Some(IncompatibilityLevel::High)) {
        recs.push("Severe incompatibilities detected: never mix these substances".to_string());
    }
    if let Some(d) = dangerous {
        recs.push(d.recommendation.clone());
    }

    let mut seen = std::collections::HashSet::new();
    recs.retain(|r| seen.insert(r.clone()));
    recs
}

/// Attach warnings derived from the lab conditions.
pub fn context_warnings(
    trace: &mut Trace,
    context: &LabContext,
    raw: &CategoryScores,
    environment: &EnvironmentAdjustment,
) {
    let ventilated = context.is_ventilated();
    if !ventilated && raw.toxicity >= dec!(40) {
        trace.warn(
            TraceSeverity::Important,
            "No ventilation with toxic substances: increased risk of poisoning",
        );
    }
    if !ventilated && raw.flammability >= dec!(50) {
        trace.warn(
            TraceSeverity::Important,
            "No ventilation with flammable substances: vapours may accumulate",
        );
    }

    if let Some(t) = context.temperature_c {
        if environment.applied && t > dec!(50) {
            trace.warn(
                TraceSeverity::Important,
                format!(
                    "Temperature {t} °C: reaction rate multiplier ×{}",
                    environment.temperature_factor.normalize()
                ),
            );
        } else if !environment.applied && t > dec!(25) && raw.flammability >= dec!(60) {
            trace.warn(
                TraceSeverity::Important,
                format!("High temperature ({t} °C) increases the ignition risk"),
            );
        }
        if t > dec!(60) {
            trace.warn(
                TraceSeverity::Critical,
                format!("Temperature above 60 °C ({t} °C): check the chemical stability of the substances"),
            );
        }
    }

    if let Some(h) = context.humidity_percent {
        if h < dec!(30) {
            trace.warn(TraceSeverity::Info, "Low humidity: increased risk of static electricity");
        }
        if h > dec!(80) {
            trace.warn(
                TraceSeverity::Important,
                format!("Humidity above 80 % ({h} %): risk of hydrolysis or oxidation"),
            );
        }
    }

    if let (Some(t), Some(h)) = (context.temperature_c, context.humidity_percent) {
        if t > dec!(50) && h > dec!(70) {
            trace.warn(
                TraceSeverity::Critical,
                "Critical combination of heat and humidity: accelerated reactions expected",
            );
        }
    }

    if !environment.applied {
        trace.warn(
            TraceSeverity::Info,
            "Environmental adjustment skipped: temperature and humidity are both required",
        );
    }
}

/// Categories whose worst-case score reaches the moderate threshold.
pub fn risk_drivers(raw: &CategoryScores, config: &ScoringConfig) -> Vec<HazardCategory> {
    [
        HazardCategory::Flammability,
        HazardCategory::Toxicity,
        HazardCategory::Incompatibility,
    ]
    .into_iter()
    .filter(|c| raw.get(*c) >= config.thresholds.moderate)
    .collect()
}

/// One sentence describing the worst plausible outcome.
pub fn critical_scenario(
    raw: &CategoryScores,
    dangerous: Option<&DangerousReaction>,
    config: &ScoringConfig,
) -> String {
    if let Some(d) = dangerous {
        return format!(
            "KNOWN DANGEROUS REACTION: {} ({}) - {}",
            d.product, d.product_formula, d.severity
        );
    }
    let high = config.thresholds.high;
    if raw.flammability >= high && raw.toxicity >= high {
        "Accidental mixing of highly flammable and toxic substances: dangerous compounds, toxic gases and explosion possible".to_string()
    } else if raw.flammability >= high {
        "Rapid combustion of the mixture: explosion and projection of hot material possible".to_string()
    } else if raw.toxicity >= high {
        "Release of highly concentrated toxic gases: acute poisoning risk".to_string()
    } else if raw.incompatibility >= high {
        "Vigorous reaction between the substances: heat release and projections".to_string()
    } else {
        "Exposure to substances with a moderate hazard: standard safety measures required".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::outcome::IncompatibilitySource;
    use crate::model::LabContext;
    use rust_decimal::Decimal;

    fn pair(level: IncompatibilityLevel, reaction: Option<&str>) -> IncompatibilityAssessment {
        IncompatibilityAssessment {
            substances: ["A".to_string(), "B".to_string()],
            incompatible: true,
            score: dec!(60),
            level: Some(level),
            source: IncompatibilitySource::Record,
            reaction_type: reaction.map(str::to_string),
            product: None,
            product_formula: None,
            equation: None,
            justification: None,
            is_dangerous: false,
            reason: String::new(),
        }
    }

    fn scores(f: Decimal, t: Decimal, i: Decimal) -> CategoryScores {
        CategoryScores {
            flammability: f,
            toxicity: t,
            incompatibility: i,
        }
    }

    fn env(applied: bool, t: Decimal) -> EnvironmentAdjustment {
        EnvironmentAdjustment {
            applied,
            temperature_c: None,
            humidity_percent: None,
            ventilated: true,
            temperature_factor: t,
            humidity_factor: Decimal::ONE,
            ventilation_factor: Decimal::ONE,
            floor: Decimal::ZERO,
            base_score: Decimal::ZERO,
            final_score: Decimal::ZERO,
            reason: String::new(),
        }
    }

    #[test]
    fn test_storage_tags_then_level() {
        let recs = storage_recommendations(&pair(IncompatibilityLevel::High, Some("Exothermic, toxic gas")));
        assert_eq!(recs[0], "Exothermic reaction hazard: avoid any direct contact");
        assert!(recs.contains(&"Toxic gas release hazard".to_string()));
        assert!(recs.contains(&"A and B must be stored in different cabinets".to_string()));
    }

    #[test]
    fn test_severe_storage() {
        let recs = storage_recommendations(&pair(IncompatibilityLevel::Severe, None));
        assert_eq!(recs[0], "Never store A and B in the same room");
    }

    #[test]
    fn test_recommendations_deduplicated() {
        let p = pair(IncompatibilityLevel::Moderate, None);
        let recs = build_recommendations(
            2,
            &[p.clone(), p],
            &scores(dec!(0), dec!(0), dec!(30)),
            RiskLevel::Low,
            None,
            &ScoringConfig::default(),
        );
        let count = recs.iter().filter(|r| r.as_str() == "Store by chemical family").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_specific_recommendations() {
        let recs = build_recommendations(
            1,
            &[],
            &scores(dec!(90), dec!(95), dec!(0)),
            RiskLevel::High,
            None,
            &ScoringConfig::default(),
        );
        assert!(recs.iter().any(|r| r.contains("ignition sources")));
        assert!(recs.iter().any(|r| r.contains("fume hood mandatory")));
        assert!(!recs.iter().any(|r| r.contains("never mix")));
        assert!(!recs.iter().any(|r| r.contains("No major incompatibility")));
    }

    #[test]
    fn test_compatible_mixture_gets_storage_advice() {
        let recs = build_recommendations(
            2,
            &[],
            &scores(dec!(20), dec!(0), dec!(0)),
            RiskLevel::Low,
            None,
            &ScoringConfig::default(),
        );
        assert_eq!(recs[0], COMPATIBLE_STORAGE_ADVICE[0]);
        assert_eq!(recs[1], "Still follow storage by chemical family");
    }

    #[test]
    fn test_context_warnings_unventilated() {
        let mut trace = Trace::default();
        let ctx = LabContext {
            temperature_c: Some(dec!(22)),
            humidity_percent: Some(dec!(25)),
            ventilation: Some(false),
        };
        context_warnings(&mut trace, &ctx, &scores(dec!(90), dec!(45), dec!(0)), &env(true, Decimal::ONE));
        let (_, warnings) = trace.into_parts();
        let messages: Vec<&str> = warnings.iter().map(|w| w.message.as_str()).collect();
        assert_eq!(messages.len(), 3, "{messages:?}");
        assert!(messages[2].contains("static electricity"));
    }

    #[test]
    fn test_context_warnings_hot_and_humid() {
        let mut trace = Trace::default();
        let ctx = LabContext {
            temperature_c: Some(dec!(65)),
            humidity_percent: Some(dec!(85)),
            ventilation: Some(true),
        };
        context_warnings(&mut trace, &ctx, &scores(dec!(0), dec!(0), dec!(0)), &env(true, dec!(2.0)));
        let (_, warnings) = trace.into_parts();
        // multiplier, stability, hydrolysis, critical combination
        assert_eq!(warnings.len(), 4);
        assert!(warnings[0].message.contains("×2"));
    }

    #[test]
    fn test_skipped_environment_warns() {
        let mut trace = Trace::default();
        context_warnings(
            &mut trace,
            &LabContext::standard(),
            &scores(dec!(0), dec!(0), dec!(0)),
            &env(false, Decimal::ONE),
        );
        let (_, warnings) = trace.into_parts();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("skipped"));
    }

    #[test]
    fn test_risk_drivers() {
        let drivers = risk_drivers(&scores(dec!(90), dec!(39.9), dec!(40)), &ScoringConfig::default());
        assert_eq!(drivers, vec![HazardCategory::Flammability, HazardCategory::Incompatibility]);
    }

    #[test]
    fn test_critical_scenario_order() {
        let cfg = ScoringConfig::default();
        assert!(critical_scenario(&scores(dec!(90), dec!(95), dec!(0)), None, &cfg).starts_with("Accidental mixing"));
        assert!(critical_scenario(&scores(dec!(90), dec!(0), dec!(0)), None, &cfg).starts_with("Rapid combustion"));
        assert!(critical_scenario(&scores(dec!(0), dec!(0), dec!(0)), None, &cfg).starts_with("Exposure"));
    }

    #[test]
    fn test_critical_scenario_follows_configured_threshold() {
        let mut cfg = ScoringConfig::default();
        let raw = scores(dec!(60), dec!(0), dec!(0));
        assert!(critical_scenario(&raw, None, &cfg).starts_with("Exposure"));
        cfg.thresholds.high = dec!(55);
        assert!(critical_scenario(&raw, None, &cfg).starts_with("Rapid combustion"));
    }
}
