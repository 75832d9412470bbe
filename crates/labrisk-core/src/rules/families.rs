use crate::model::IncompatibilityLevel;
use crate::parsing::normalize::normalize;
use serde::Serialize;
use std::fmt;

/// Chemical families recognized by the generic incompatibility rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Acid,
    Base,
    Oxidizer,
    Reducer,
    Flammable,
    Solvent,
    Cyanide,
    Sulfide,
    Organic,
    Water,
    WaterReactive,
}

impl Family {
    /// Word prefixes identifying the family in free-text family labels.
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Family::Acid => &["acid"],
            Family::Base => &["base", "alkali", "caustic"],
            Family::Oxidizer => &["oxidiz", "oxidis", "oxidant"],
            Family::Reducer => &["reducer", "reducing"],
            Family::Flammable => &["flammable", "inflammable"],
            Family::Solvent => &["solvent"],
            Family::Cyanide => &["cyanide"],
            Family::Sulfide => &["sulfide", "sulphide"],
            Family::Organic => &["organic"],
            Family::Water => &["water", "aqueous"],
            Family::WaterReactive => &["water reactive", "hydrophobic reactive"],
        }
    }

    /// True if the (already normalized) family label belongs to this family.
    ///
    /// Keywords match at word starts, so "inorganic acid" is an acid but not
    /// organic matter, and "water reactive" is not plain water.
    pub fn matches(&self, family_key: &str) -> bool {
        if family_key.is_empty() {
            return false;
        }
        if *self == Family::Water && Family::WaterReactive.matches(family_key) {
            return false;
        }
        let padded = format!(" {family_key}");
        self.keywords()
            .iter()
            .any(|kw| padded.contains(&format!(" {kw}")))
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Family::Acid => "acid",
            Family::Base => "base",
            Family::Oxidizer => "oxidizer",
            Family::Reducer => "reducer",
            Family::Flammable => "flammable",
            Family::Solvent => "solvent",
            Family::Cyanide => "cyanide",
            Family::Sulfide => "sulfide",
            Family::Organic => "organic matter",
            Family::Water => "water",
            Family::WaterReactive => "water-reactive",
        };
        write!(f, "{s}")
    }
}

/// A generic incompatibility between two chemical families.
#[derive(Debug, Clone, Serialize)]
pub struct FamilyRule {
    pub left: Family,
    pub right: Family,
    pub level: IncompatibilityLevel,
    pub hazard: &'static str,
}

/// Ordered; the first matching rule wins.
pub static FAMILY_RULES: &[FamilyRule] = &[
    FamilyRule {
        left: Family::Acid,
        right: Family::Base,
        level: IncompatibilityLevel::High,
        hazard: "violent exothermic neutralization",
    },
    FamilyRule {
        left: Family::Oxidizer,
        right: Family::Reducer,
        level: IncompatibilityLevel::High,
        hazard: "fire or explosion",
    },
    FamilyRule {
        left: Family::Oxidizer,
        right: Family::Flammable,
        level: IncompatibilityLevel::High,
        hazard: "ignition of the flammable material",
    },
    FamilyRule {
        left: Family::Oxidizer,
        right: Family::Solvent,
        level: IncompatibilityLevel::Moderate,
        hazard: "oxidation of the solvent",
    },
    FamilyRule {
        left: Family::Acid,
        right: Family::Cyanide,
        level: IncompatibilityLevel::Severe,
        hazard: "release of hydrogen cyanide",
    },
    FamilyRule {
        left: Family::Acid,
        right: Family::Sulfide,
        level: IncompatibilityLevel::High,
        hazard: "release of hydrogen sulfide",
    },
    FamilyRule {
        left: Family::Oxidizer,
        right: Family::Organic,
        level: IncompatibilityLevel::Moderate,
        hazard: "ignition of organic matter",
    },
    FamilyRule {
        left: Family::Water,
        right: Family::WaterReactive,
        level: IncompatibilityLevel::Moderate,
        hazard: "violent reaction with water",
    },
    FamilyRule {
        left: Family::Base,
        right: Family::Solvent,
        level: IncompatibilityLevel::Moderate,
        hazard: "unwanted reaction with the solvent",
    },
    FamilyRule {
        left: Family::Base,
        right: Family::Flammable,
        level: IncompatibilityLevel::Moderate,
        hazard: "heat release near flammable material",
    },
];

/// Find the first family rule covering the two family labels, in either
/// order. Labels are normalized here.
pub fn find_family_rule(family_a: &str, family_b: &str) -> Option<&'static FamilyRule> {
    let a = normalize(family_a);
    let b = normalize(family_b);
    if a.is_empty() || b.is_empty() {
        return None;
    }
    FAMILY_RULES.iter().find(|rule| {
        (rule.left.matches(&a) && rule.right.matches(&b))
            || (rule.left.matches(&b) && rule.right.matches(&a))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acid_base_high() {
        let rule = find_family_rule("acid", "base").unwrap();
        assert_eq!(rule.level, IncompatibilityLevel::High);
        let rule = find_family_rule("Strong Base", "Inorganic acid").unwrap();
        assert_eq!(rule.left, Family::Acid);
    }

    #[test]
    fn test_acid_cyanide_severe() {
        let rule = find_family_rule("cyanide", "acid").unwrap();
        assert_eq!(rule.level, IncompatibilityLevel::Severe);
    }

    #[test]
    fn test_first_match_wins() {
        // an oxidizing acid against a flammable solvent: oxidizer/flammable
        // comes before oxidizer/solvent
        let rule = find_family_rule("oxidizing acid", "flammable solvent").unwrap();
        assert_eq!(rule.right, Family::Flammable);
    }

    #[test]
    fn test_word_boundaries() {
        assert!(Family::Acid.matches("inorganic acid"));
        assert!(!Family::Organic.matches("inorganic acid"));
        assert!(Family::WaterReactive.matches("water reactive metal"));
        assert!(!Family::Water.matches("water reactive metal"));
        assert!(Family::Water.matches("water"));
    }

    #[test]
    fn test_water_and_water_reactive() {
        let rule = find_family_rule("water reactive", "water").unwrap();
        assert_eq!(rule.level, IncompatibilityLevel::Moderate);
        assert!(find_family_rule("water reactive", "water reactive").is_none());
    }

    #[test]
    fn test_no_rule() {
        assert!(find_family_rule("flammable solvent", "flammable solvent").is_none());
        assert!(find_family_rule("", "acid").is_none());
        assert!(find_family_rule("unclassified", "acid").is_none());
    }
}
