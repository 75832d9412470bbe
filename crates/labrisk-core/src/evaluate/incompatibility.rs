use crate::config::schema::IncompatibilityScoring;
use crate::evaluate::outcome::{IncompatibilityAssessment, IncompatibilitySource};
use crate::model::{IncompatibilityLevel, IncompatibilityRecord, Substance};
use crate::parsing::normalize::normalize;
use crate::rules::dangerous::{find_dangerous_reaction, DangerousReaction};
use crate::rules::families::find_family_rule;

/// Incompatible pairs found among a set of substances.
#[derive(Debug, Clone, Default)]
pub struct PairFindings {
    /// Highest score first; ties keep request order.
    pub pairs: Vec<IncompatibilityAssessment>,
    /// First known dangerous reaction among `pairs`.
    pub dangerous: Option<DangerousReaction>,
}

/// Evaluate one pair: documented record first (by name, then by CAS),
/// then the generic family rules.
pub fn evaluate_pair(
    a: &Substance,
    b: &Substance,
    records: &[IncompatibilityRecord],
    scoring: &IncompatibilityScoring,
) -> IncompatibilityAssessment {
    if a.normalized_name.is_empty() || b.normalized_name.is_empty() {
        return compatible(a, b, "cannot evaluate incompatibility: substance name missing".into());
    }

    let record = records
        .iter()
        .find(|r| r.matches(&a.normalized_name, &b.normalized_name))
        .or_else(|| match (&a.cas, &b.cas) {
            (Some(cas_a), Some(cas_b)) => {
                let (key_a, key_b) = (normalize(cas_a), normalize(cas_b));
                records.iter().find(|r| r.matches(&key_a, &key_b))
            }
            _ => None,
        });

    if let Some(record) = record {
        return from_record(a, b, record, scoring);
    }

    let family_a = a.family.as_deref().unwrap_or_default();
    let family_b = b.family.as_deref().unwrap_or_default();
    if let Some(rule) = find_family_rule(family_a, family_b) {
        let level = Some(rule.level);
        let detail = format!("{} + {} ({}: {})", family_a, family_b, rule.left, rule.right);
        return IncompatibilityAssessment {
            substances: [a.name.clone(), b.name.clone()],
            incompatible: true,
            score: scoring.score(level),
            level,
            source: IncompatibilitySource::FamilyRule,
            reaction_type: None,
            product: None,
            product_formula: None,
            equation: None,
            justification: None,
            is_dangerous: false,
            reason: explain(&a.name, &b.name, level, &detail, "chemical families", Some(rule.hazard)),
        };
    }

    compatible(
        a,
        b,
        format!(
            "No known incompatibility between {} and {}. Store by chemical family regardless.",
            a.name, b.name
        ),
    )
}

/// Evaluate all N·(N−1)/2 pairs and look for known dangerous reactions
/// among the incompatible ones.
pub fn evaluate_all_pairs(
    substances: &[Substance],
    records: &[IncompatibilityRecord],
    scoring: &IncompatibilityScoring,
) -> PairFindings {
    let mut pairs = Vec::new();
    let mut pair_substances = Vec::new();

    for i in 0..substances.len() {
        for j in (i + 1)..substances.len() {
            let (a, b) = (&substances[i], &substances[j]);
            let assessment = evaluate_pair(a, b, records, scoring);
            tracing::debug!(
                a = %a.name,
                b = %b.name,
                incompatible = assessment.incompatible,
                score = %assessment.score,
                "pair evaluated"
            );
            if assessment.incompatible {
                pair_substances.push((i, j));
                pairs.push(assessment);
            }
        }
    }

    // stable sort on the pair index so request order survives ties
    let mut order: Vec<usize> = (0..pairs.len()).collect();
    order.sort_by(|&x, &y| pairs[y].score.cmp(&pairs[x].score));

    let mut sorted = Vec::with_capacity(pairs.len());
    let mut dangerous = None;
    for idx in order {
        let mut assessment = pairs[idx].clone();
        let (i, j) = pair_substances[idx];
        if let Some(hit) = find_dangerous_reaction(&substances[i], &substances[j]) {
            tracing::debug!(product = %hit.product, "dangerous reaction detected");
            assessment.is_dangerous = true;
            if dangerous.is_none() {
                dangerous = Some(hit);
            }
        }
        sorted.push(assessment);
    }

    PairFindings {
        pairs: sorted,
        dangerous,
    }
}

fn from_record(
    a: &Substance,
    b: &Substance,
    record: &IncompatibilityRecord,
    scoring: &IncompatibilityScoring,
) -> IncompatibilityAssessment {
    if record.risk_level == Some(IncompatibilityLevel::None) {
        return compatible(
            a,
            b,
            format!("{} and {} are documented as compatible.", a.name, b.name),
        );
    }

    let detail = record.reaction_type.clone().unwrap_or_default();
    IncompatibilityAssessment {
        substances: [a.name.clone(), b.name.clone()],
        incompatible: true,
        score: scoring.score(record.risk_level),
        level: record.risk_level,
        source: IncompatibilitySource::Record,
        reaction_type: record.reaction_type.clone(),
        product: record.product.clone(),
        product_formula: record.product_formula.clone(),
        equation: record.equation.clone(),
        justification: record.justification.clone(),
        is_dangerous: false,
        reason: explain(
            &a.name,
            &b.name,
            record.risk_level,
            &detail,
            "incompatibility records",
            record.justification.as_deref(),
        ),
    }
}

fn compatible(a: &Substance, b: &Substance, reason: String) -> IncompatibilityAssessment {
    IncompatibilityAssessment {
        substances: [a.name.clone(), b.name.clone()],
        incompatible: false,
        score: rust_decimal::Decimal::ZERO,
        level: None,
        source: IncompatibilitySource::None,
        reaction_type: None,
        product: None,
        product_formula: None,
        equation: None,
        justification: None,
        is_dangerous: false,
        reason,
    }
}

fn explain(
    name_a: &str,
    name_b: &str,
    level: Option<IncompatibilityLevel>,
    detail: &str,
    source: &str,
    justification: Option<&str>,
) -> String {
    let (prefix, consequence) = match level {
        Some(IncompatibilityLevel::Severe) => (
            "SEVERE incompatibility",
            "Violent reaction, explosion or lethal toxic release possible. Never store or handle together.",
        ),
        Some(IncompatibilityLevel::High) => (
            "HIGH incompatibility",
            "Violent exothermic reaction, fire or toxic gas possible. Use separate cabinets.",
        ),
        Some(IncompatibilityLevel::Moderate) | None => (
            "MODERATE incompatibility",
            "Unwanted reaction if mixed. Store separately and handle with care.",
        ),
        Some(IncompatibilityLevel::Low) | Some(IncompatibilityLevel::None) => (
            "LOW incompatibility",
            "Limited interaction possible. Follow storage by chemical family.",
        ),
    };

    let mut out = format!("{prefix} between {name_a} and {name_b}.");
    if !detail.is_empty() {
        out.push_str(&format!(" Detected: {detail}."));
    }
    out.push_str(&format!(" (Source: {source})"));
    if let Some(j) = justification.filter(|j| !j.is_empty()) {
        out.push_str(&format!(" Justification: {j}."));
    }
    out.push(' ');
    out.push_str(consequence);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn scoring() -> IncompatibilityScoring {
        IncompatibilityScoring::default()
    }

    #[test]
    fn test_family_acid_base_high() {
        let a = Substance::new("Acid X").with_family("acid");
        let b = Substance::new("Base Y").with_family("base");
        let r = evaluate_pair(&a, &b, &[], &scoring());
        assert!(r.incompatible);
        assert_eq!(r.score, dec!(60));
        assert_eq!(r.level, Some(IncompatibilityLevel::High));
        assert_eq!(r.source, IncompatibilitySource::FamilyRule);
        assert!(r.reason.contains("Acid X") && r.reason.contains("Base Y"));
    }

    #[test]
    fn test_record_takes_precedence_over_family() {
        let a = Substance::new("Acetic acid").with_family("acid");
        let b = Substance::new("Sodium hydroxide").with_family("base");
        let records = vec![
            IncompatibilityRecord::new("sodium hydroxide", "acetic acid", IncompatibilityLevel::Low)
                .with_reaction_type("exothermic"),
        ];
        let r = evaluate_pair(&a, &b, &records, &scoring());
        assert_eq!(r.score, dec!(15));
        assert_eq!(r.source, IncompatibilitySource::Record);
        assert_eq!(r.reaction_type.as_deref(), Some("exothermic"));
    }

    #[test]
    fn test_lookup_by_cas() {
        let a = Substance::new("Muriatic acid").with_cas("7647-01-0");
        let b = Substance::new("Javel").with_cas("7681-52-9");
        let records = vec![IncompatibilityRecord::new("7681-52-9", "7647-01-0", IncompatibilityLevel::Severe)];
        let r = evaluate_pair(&a, &b, &records, &scoring());
        assert_eq!(r.score, dec!(90));
    }

    #[test]
    fn test_unrecognized_level_scores_moderate() {
        let mut rec = IncompatibilityRecord::new("a1", "b1", IncompatibilityLevel::High);
        rec.risk_level = None;
        let r = evaluate_pair(&Substance::new("a1"), &Substance::new("b1"), &[rec], &scoring());
        assert!(r.incompatible);
        assert_eq!(r.score, dec!(30));
    }

    #[test]
    fn test_documented_compatible_pair() {
        let rec = IncompatibilityRecord::new("water", "ethanol", IncompatibilityLevel::None);
        let r = evaluate_pair(&Substance::new("Ethanol"), &Substance::new("Water"), &[rec], &scoring());
        assert!(!r.incompatible);
        assert_eq!(r.score, dec!(0));
    }

    #[test]
    fn test_no_incompatibility() {
        let r = evaluate_pair(&Substance::new("Ethanol"), &Substance::new("Acetone"), &[], &scoring());
        assert!(!r.incompatible);
        assert!(r.reason.contains("No known incompatibility"));
    }

    #[test]
    fn test_empty_name() {
        let r = evaluate_pair(&Substance::new(""), &Substance::new("Acetone"), &[], &scoring());
        assert!(!r.incompatible);
        assert_eq!(r.score, dec!(0));
    }

    #[test]
    fn test_all_pairs_sorted_and_stable() {
        let substances = vec![
            Substance::new("s1").with_family("oxidizer"),
            Substance::new("s2").with_family("solvent"),
            Substance::new("s3").with_family("acid"),
            Substance::new("s4").with_family("cyanide"),
        ];
        let findings = evaluate_all_pairs(&substances, &[], &scoring());
        let scores: Vec<_> = findings.pairs.iter().map(|p| p.score).collect();
        // s3+s4 severe, then s1+s2 moderate (oxidizer/solvent)
        assert_eq!(scores, vec![dec!(90), dec!(30)]);
        assert_eq!(findings.pairs[1].substances, ["s1".to_string(), "s2".to_string()]);
        assert!(findings.dangerous.is_none());
    }

    #[test]
    fn test_tie_keeps_request_order() {
        let substances = vec![
            Substance::new("b1").with_family("base"),
            Substance::new("a1").with_family("acid"),
            Substance::new("b2").with_family("base"),
        ];
        let findings = evaluate_all_pairs(&substances, &[], &scoring());
        assert_eq!(findings.pairs.len(), 2);
        assert_eq!(findings.pairs[0].substances[0], "b1");
        assert_eq!(findings.pairs[1].substances[0], "a1");
    }

    #[test]
    fn test_dangerous_pair_flagged() {
        let substances = vec![
            Substance::new("Chloroform"),
            Substance::new("Bleach"),
            Substance::new("Water"),
        ];
        let records = vec![IncompatibilityRecord::new("chloroform", "bleach", IncompatibilityLevel::Severe)];
        let findings = evaluate_all_pairs(&substances, &records, &scoring());
        assert_eq!(findings.pairs.len(), 1);
        assert!(findings.pairs[0].is_dangerous);
        assert_eq!(findings.dangerous.unwrap().product, "Phosgene");
    }

    #[test]
    fn test_dangerous_names_without_incompatibility_not_flagged() {
        // no record and no family: the pair is not incompatible, so the
        // dangerous table is never consulted
        let findings = evaluate_all_pairs(
            &[Substance::new("Chloroform"), Substance::new("Bleach")],
            &[],
            &scoring(),
        );
        assert!(findings.pairs.is_empty());
        assert!(findings.dangerous.is_none());
    }
}
