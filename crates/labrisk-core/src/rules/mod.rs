pub mod dangerous;
pub mod families;

use crate::error::LabRiskError;
use crate::parsing::normalize::normalize;
use dangerous::DANGEROUS_REACTIONS;
use families::FAMILY_RULES;

/// Validate that the built-in rule tables are well-formed.
///
/// Dangerous-reaction aliases must already be in normalized form (they are
/// compared against normalized names verbatim), the two sides of a rule
/// must not overlap, and floors must be valid scores.
pub fn validate_rule_tables() -> Result<(), LabRiskError> {
    for rule in DANGEROUS_REACTIONS {
        if rule.side_a.is_empty() || rule.side_b.is_empty() {
            return Err(LabRiskError::CatalogInvalid(format!(
                "dangerous reaction '{}' has an empty side",
                rule.id
            )));
        }
        for alias in rule.side_a.iter().chain(rule.side_b.iter()) {
            if normalize(alias) != *alias {
                return Err(LabRiskError::CatalogInvalid(format!(
                    "dangerous reaction '{}' alias '{}' is not normalized",
                    rule.id, alias
                )));
            }
        }
        if let Some(shared) = rule.side_a.iter().find(|a| rule.side_b.contains(*a)) {
            return Err(LabRiskError::CatalogInvalid(format!(
                "dangerous reaction '{}' lists '{}' on both sides",
                rule.id, shared
            )));
        }
        if rule.min_risk_score > 100 || rule.min_incompatibility_score > 100 {
            return Err(LabRiskError::CatalogInvalid(format!(
                "dangerous reaction '{}' has a floor above 100",
                rule.id
            )));
        }
    }

    for (i, rule) in FAMILY_RULES.iter().enumerate() {
        if FAMILY_RULES[..i].iter().any(|earlier| {
            (earlier.left == rule.left && earlier.right == rule.right)
                || (earlier.left == rule.right && earlier.right == rule.left)
        }) {
            return Err(LabRiskError::CatalogInvalid(format!(
                "family rule {} + {} is shadowed by an earlier rule",
                rule.left, rule.right
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_valid() {
        validate_rule_tables().unwrap();
    }

    #[test]
    fn test_dangerous_table_has_four_reactions() {
        let products: Vec<&str> = DANGEROUS_REACTIONS.iter().map(|r| r.product_formula).collect();
        assert_eq!(products, vec!["COCl2", "Cl2", "HCN", "NH2Cl, NHCl2, NCl3"]);
    }
}
