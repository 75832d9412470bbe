use crate::model::Substance;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hazard tag of the product formed by a known dangerous reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DangerSeverity {
    Lethal,
    ExtremelyHazardous,
    HighlyHazardous,
}

impl fmt::Display for DangerSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DangerSeverity::Lethal => write!(f, "LETHAL"),
            DangerSeverity::ExtremelyHazardous => write!(f, "EXTREMELY_HAZARDOUS"),
            DangerSeverity::HighlyHazardous => write!(f, "HIGHLY_HAZARDOUS"),
        }
    }
}

/// A pair of substance groups known to form an extremely hazardous
/// product. Each side lists normalized names; the pair is unordered.
#[derive(Debug, Clone, Serialize)]
pub struct DangerousReactionRule {
    pub id: &'static str,
    pub label: &'static str,
    pub side_a: &'static [&'static str],
    pub side_b: &'static [&'static str],
    pub product: &'static str,
    pub product_formula: &'static str,
    pub severity: DangerSeverity,
    /// Score the analysis is never allowed to fall below.
    pub min_risk_score: u32,
    pub min_incompatibility_score: u32,
    pub recommendation: &'static str,
}

impl DangerousReactionRule {
    /// True if the two normalized names fall on opposite sides of this rule.
    pub fn matches(&self, key_a: &str, key_b: &str) -> bool {
        (self.side_a.contains(&key_a) && self.side_b.contains(&key_b))
            || (self.side_a.contains(&key_b) && self.side_b.contains(&key_a))
    }
}

/// A dangerous reaction found between two analyzed substances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DangerousReaction {
    pub rule_id: String,
    pub substances: [String; 2],
    pub product: String,
    pub product_formula: String,
    pub severity: DangerSeverity,
    pub min_risk_score: Decimal,
    pub min_incompatibility_score: Decimal,
    pub recommendation: String,
}

const CHLOROFORM: &[&str] = &["chloroform", "chloroforme", "trichloromethane"];
const HYPOCHLORITE: &[&str] = &[
    "bleach",
    "sodium hypochlorite",
    "hypochlorite",
    "calcium hypochlorite",
    "eau de javel",
];
const HYDROCHLORIC_ACID: &[&str] = &[
    "hydrochloric acid",
    "hcl",
    "muriatic acid",
    "acide chlorhydrique",
];
const CYANIDES: &[&str] = &[
    "cyanide",
    "sodium cyanide",
    "potassium cyanide",
    "calcium cyanide",
];
const ACIDS: &[&str] = &[
    "acid",
    "hydrochloric acid",
    "hcl",
    "sulfuric acid",
    "sulphuric acid",
    "nitric acid",
    "acetic acid",
    "phosphoric acid",
    "formic acid",
];
const AMMONIA: &[&str] = &[
    "ammonia",
    "ammonium hydroxide",
    "aqueous ammonia",
    "ammoniaque",
];

pub static DANGEROUS_REACTIONS: &[DangerousReactionRule] = &[
    DangerousReactionRule {
        id: "phosgene",
        label: "Chloroform + Bleach",
        side_a: CHLOROFORM,
        side_b: HYPOCHLORITE,
        product: "Phosgene",
        product_formula: "COCl2",
        severity: DangerSeverity::ExtremelyHazardous,
        min_risk_score: 50,
        min_incompatibility_score: 50,
        recommendation: "Never mix. Strict physical separation required.",
    },
    DangerousReactionRule {
        id: "chlorine",
        label: "Hydrochloric acid + Bleach",
        side_a: HYDROCHLORIC_ACID,
        side_b: HYPOCHLORITE,
        product: "Chlorine gas",
        product_formula: "Cl2",
        severity: DangerSeverity::HighlyHazardous,
        min_risk_score: 50,
        min_incompatibility_score: 50,
        recommendation: "Mixing is strictly forbidden.",
    },
    DangerousReactionRule {
        id: "hydrogen_cyanide",
        label: "Cyanide + Acid",
        side_a: CYANIDES,
        side_b: ACIDS,
        product: "Hydrogen cyanide",
        product_formula: "HCN",
        severity: DangerSeverity::Lethal,
        min_risk_score: 50,
        min_incompatibility_score: 50,
        recommendation: "Lethal hazard. Physical separation required.",
    },
    DangerousReactionRule {
        id: "chloramines",
        label: "Ammonia + Bleach",
        side_a: AMMONIA,
        side_b: HYPOCHLORITE,
        product: "Chloramines",
        product_formula: "NH2Cl, NHCl2, NCl3",
        severity: DangerSeverity::HighlyHazardous,
        min_risk_score: 45,
        min_incompatibility_score: 50,
        recommendation: "Very dangerous mixture. Never store close together.",
    },
];

/// Find the first rule matching the two substances, in table order.
pub fn find_dangerous_reaction(a: &Substance, b: &Substance) -> Option<DangerousReaction> {
    let rule = DANGEROUS_REACTIONS
        .iter()
        .find(|r| r.matches(&a.normalized_name, &b.normalized_name))?;

    Some(DangerousReaction {
        rule_id: rule.id.to_string(),
        substances: [a.name.clone(), b.name.clone()],
        product: rule.product.to_string(),
        product_formula: rule.product_formula.to_string(),
        severity: rule.severity,
        min_risk_score: Decimal::from(rule.min_risk_score),
        min_incompatibility_score: Decimal::from(rule.min_incompatibility_score),
        recommendation: rule.recommendation.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chloroform_bleach_both_orders() {
        let a = Substance::new("Chloroform");
        let b = Substance::new("Sodium hypochlorite");
        let hit = find_dangerous_reaction(&a, &b).unwrap();
        assert_eq!(hit.product_formula, "COCl2");
        assert_eq!(hit.severity, DangerSeverity::ExtremelyHazardous);
        let hit = find_dangerous_reaction(&b, &a).unwrap();
        assert_eq!(hit.rule_id, "phosgene");
        assert_eq!(hit.substances, ["Sodium hypochlorite".to_string(), "Chloroform".to_string()]);
    }

    #[test]
    fn test_hcl_bleach_is_chlorine_not_cyanide() {
        let hit = find_dangerous_reaction(&Substance::new("HCl"), &Substance::new("Bleach")).unwrap();
        assert_eq!(hit.product, "Chlorine gas");
    }

    #[test]
    fn test_cyanide_acid() {
        let hit = find_dangerous_reaction(
            &Substance::new("Sulfuric acid"),
            &Substance::new("Potassium cyanide"),
        )
        .unwrap();
        assert_eq!(hit.severity, DangerSeverity::Lethal);
    }

    #[test]
    fn test_ammonia_bleach_floor() {
        let hit = find_dangerous_reaction(&Substance::new("Ammonia"), &Substance::new("bleach")).unwrap();
        assert_eq!(hit.min_risk_score, Decimal::from(45));
    }

    #[test]
    fn test_same_side_does_not_match() {
        assert!(find_dangerous_reaction(&Substance::new("bleach"), &Substance::new("hypochlorite")).is_none());
        assert!(find_dangerous_reaction(&Substance::new("ethanol"), &Substance::new("acetone")).is_none());
    }
}
