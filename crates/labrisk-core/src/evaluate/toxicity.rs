use crate::config::schema::ToxicityScoring;
use crate::evaluate::outcome::ToxicityAssessment;
use crate::model::{Substance, ToxicityLevel};
use crate::parsing::normalize::normalize;

/// Level applied when a label is missing or not recognized.
pub const DEFAULT_TOXICITY_LEVEL: ToxicityLevel = ToxicityLevel::Harmful;

/// Variants shorter than this are only matched exactly.
const MIN_CONTAINED_VARIANT_LEN: usize = 3;

/// Spelling variants found in safety data sheets, in normalized form.
///
/// The containment pass takes the longest variant found in the label, so
/// qualified forms ("moderately toxic", "not very toxic") win over the bare
/// "toxic" or "very toxic" they contain.
static TOXICITY_SYNONYMS: &[(ToxicityLevel, &[&str])] = &[
    (
        ToxicityLevel::NonToxic,
        &["non toxic", "nontoxic", "not toxic", "none"],
    ),
    (
        ToxicityLevel::SlightlyToxic,
        &["slightly toxic", "not very toxic", "low toxicity", "low"],
    ),
    (
        ToxicityLevel::VeryToxic,
        &[
            "very toxic",
            "highly toxic",
            "extremely toxic",
            "fatal",
            "cmr",
            "carcinogenic",
            "mutagenic",
            "reprotoxic",
        ],
    ),
    (ToxicityLevel::Toxic, &["toxic", "corrosive", "poison"]),
    (
        ToxicityLevel::Harmful,
        &["harmful", "moderate", "moderately toxic"],
    ),
    (
        ToxicityLevel::Irritant,
        &["irritant", "irritating", "irritation"],
    ),
];

/// Interpret a free-text toxicity label. Returns None if nothing matches.
pub fn match_toxicity_label(label: &str) -> Option<ToxicityLevel> {
    let key = normalize(label);
    if key.is_empty() {
        return None;
    }

    if let Some(level) = ToxicityLevel::ALL.iter().find(|l| l.canonical_key() == key) {
        return Some(*level);
    }

    for (level, variants) in TOXICITY_SYNONYMS {
        if variants.contains(&key.as_str()) {
            return Some(*level);
        }
    }

    // Containment is anchored at word starts so "low" does not fire
    // inside "swallowed".
    let padded = format!(" {key}");
    let mut best: Option<(ToxicityLevel, usize)> = None;
    for (level, variants) in TOXICITY_SYNONYMS {
        for v in variants.iter() {
            if v.len() < MIN_CONTAINED_VARIANT_LEN || !padded.contains(&format!(" {v}")) {
                continue;
            }
            if best.map_or(true, |(_, len)| v.len() > len) {
                best = Some((*level, v.len()));
            }
        }
    }

    best.map(|(level, _)| level)
}

/// Score the toxicity hazard of a substance. Never fails: unknown or
/// missing labels get the precautionary default.
pub fn evaluate_toxicity(substance: &Substance, scoring: &ToxicityScoring) -> ToxicityAssessment {
    let name = &substance.name;
    let matched = substance.toxicity.as_deref().and_then(match_toxicity_label);

    let (level, default_applied, reason) = match (substance.toxicity.as_deref(), matched) {
        (_, Some(level)) => (level, false, describe(name, level, scoring)),
        (None, None) => (
            DEFAULT_TOXICITY_LEVEL,
            true,
            format!("{name}: no toxicity data -> {DEFAULT_TOXICITY_LEVEL} applied as a precaution"),
        ),
        (Some(label), None) => (
            DEFAULT_TOXICITY_LEVEL,
            true,
            format!("{name}: toxicity label '{label}' not recognized -> {DEFAULT_TOXICITY_LEVEL} applied"),
        ),
    };

    ToxicityAssessment {
        score: scoring.score(level),
        level,
        default_applied,
        reason,
    }
}

fn describe(name: &str, level: ToxicityLevel, scoring: &ToxicityScoring) -> String {
    let score = scoring.score(level);
    let detail = match level {
        ToxicityLevel::VeryToxic => "serious health hazard (possible CMR, high acute toxicity); full PPE under a fume hood",
        ToxicityLevel::Toxic => "significant health hazard (toxic or corrosive); reinforced precautions",
        ToxicityLevel::Harmful => "may harm health on exposure; avoid inhalation and skin contact",
        ToxicityLevel::Irritant => "may irritate eyes, skin or airways; wear goggles and gloves",
        ToxicityLevel::SlightlyToxic => "low toxicity under normal use",
        ToxicityLevel::NonToxic => "no toxicological hazard identified",
    };
    format!("{name}: {level} (score {score}), {detail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_canonical_names() {
        assert_eq!(match_toxicity_label("VERY_TOXIC"), Some(ToxicityLevel::VeryToxic));
        assert_eq!(match_toxicity_label("Toxic"), Some(ToxicityLevel::Toxic));
        assert_eq!(match_toxicity_label("non-toxic"), Some(ToxicityLevel::NonToxic));
        assert_eq!(match_toxicity_label("Slightly toxic"), Some(ToxicityLevel::SlightlyToxic));
    }

    #[test]
    fn test_exact_variants() {
        assert_eq!(match_toxicity_label("CMR"), Some(ToxicityLevel::VeryToxic));
        assert_eq!(match_toxicity_label("corrosive"), Some(ToxicityLevel::Toxic));
        assert_eq!(match_toxicity_label("moderately toxic"), Some(ToxicityLevel::Harmful));
        assert_eq!(match_toxicity_label("irritation"), Some(ToxicityLevel::Irritant));
    }

    #[test]
    fn test_containment_variants() {
        assert_eq!(match_toxicity_label("Toxic if swallowed"), Some(ToxicityLevel::Toxic));
        assert_eq!(
            match_toxicity_label("Carcinogenic, category 1B"),
            Some(ToxicityLevel::VeryToxic)
        );
        assert_eq!(
            match_toxicity_label("highly toxic by inhalation"),
            Some(ToxicityLevel::VeryToxic)
        );
        assert_eq!(match_toxicity_label("skin irritant"), Some(ToxicityLevel::Irritant));
        assert_eq!(match_toxicity_label("Acute toxicity cat. 3"), Some(ToxicityLevel::Toxic));
        assert_eq!(match_toxicity_label("Low hazard"), Some(ToxicityLevel::SlightlyToxic));
    }

    #[test]
    fn test_qualified_label_beats_bare_toxic() {
        assert_eq!(
            match_toxicity_label("moderately toxic if swallowed"),
            Some(ToxicityLevel::Harmful)
        );
        assert_eq!(match_toxicity_label("not very toxic"), Some(ToxicityLevel::SlightlyToxic));
        assert_eq!(
            match_toxicity_label("Not very toxic to aquatic life"),
            Some(ToxicityLevel::SlightlyToxic)
        );
        assert_eq!(
            match_toxicity_label("very toxic, corrosive"),
            Some(ToxicityLevel::VeryToxic)
        );
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(match_toxicity_label("banana"), None);
        assert_eq!(match_toxicity_label(""), None);
    }

    #[test]
    fn test_missing_label_defaults_to_harmful() {
        let a = evaluate_toxicity(&Substance::new("Xyz123"), &ToxicityScoring::default());
        assert_eq!(a.level, ToxicityLevel::Harmful);
        assert_eq!(a.score, dec!(45));
        assert!(a.default_applied);
    }

    #[test]
    fn test_unrecognized_label_defaults_to_harmful() {
        let s = Substance::new("Mystery").with_toxicity("banana");
        let a = evaluate_toxicity(&s, &ToxicityScoring::default());
        assert!(a.default_applied);
        assert!(a.reason.contains("banana"));
    }

    #[test]
    fn test_very_toxic_score() {
        let s = Substance::new("Benzene").with_toxicity("VERY_TOXIC");
        let a = evaluate_toxicity(&s, &ToxicityScoring::default());
        assert_eq!(a.score, dec!(95));
        assert!(!a.default_applied);
        assert!(a.reason.starts_with("Benzene: VERY_TOXIC"));
    }
}
