use super::{loader, SubstanceCatalog};
use crate::error::LabRiskError;

const BUILTIN_SUBSTANCES: &str = include_str!("../../../../data/substances.csv");
const BUILTIN_INCOMPATIBILITIES: &str = include_str!("../../../../data/incompatibilities.csv");

/// The demo catalog compiled into the binary.
pub fn builtin_catalog() -> Result<SubstanceCatalog, LabRiskError> {
    let substances = loader::read_substances(BUILTIN_SUBSTANCES.as_bytes())?;
    let incompatibilities = loader::read_incompatibilities(BUILTIN_INCOMPATIBILITIES.as_bytes())?;
    Ok(SubstanceCatalog::new(substances, incompatibilities))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SubstanceRepository;
    use crate::model::IncompatibilityLevel;
    use crate::rules::dangerous::find_dangerous_reaction;

    #[test]
    fn test_builtin_loads() {
        let catalog = builtin_catalog().unwrap();
        assert!(catalog.len() >= 30);
        assert!(!catalog.incompatibilities().is_empty());
    }

    #[test]
    fn test_every_record_has_a_level() {
        let catalog = builtin_catalog().unwrap();
        for record in catalog.incompatibilities() {
            assert!(
                record.risk_level.is_some(),
                "{} / {}",
                record.substance_a,
                record.substance_b
            );
        }
    }

    #[test]
    fn test_record_substances_exist() {
        let catalog = builtin_catalog().unwrap();
        for record in catalog.incompatibilities() {
            assert!(catalog.find_substance(&record.substance_a).is_some(), "{}", record.substance_a);
            assert!(catalog.find_substance(&record.substance_b).is_some(), "{}", record.substance_b);
        }
    }

    #[test]
    fn test_dangerous_pairs_are_documented() {
        let catalog = builtin_catalog().unwrap();
        for (a, b) in [
            ("Chloroform", "Sodium hypochlorite"),
            ("Hydrochloric acid", "Bleach"),
            ("Sodium cyanide", "Sulfuric acid"),
            ("Ammonia", "Bleach"),
        ] {
            let sa = catalog.find_substance(a).unwrap();
            let sb = catalog.find_substance(b).unwrap();
            assert!(find_dangerous_reaction(&sa, &sb).is_some(), "{a} + {b}");
            let record = catalog
                .incompatibilities()
                .iter()
                .find(|r| r.matches(&sa.normalized_name, &sb.normalized_name))
                .unwrap();
            assert!(record.risk_level >= Some(IncompatibilityLevel::High));
        }
    }

    #[test]
    fn test_non_flammable_rows_have_no_flash_point() {
        let catalog = builtin_catalog().unwrap();
        let water = catalog.find_substance("Water").unwrap();
        assert!(water.flash_point_c.is_none());
        let acetone = catalog.find_substance("67-64-1").unwrap();
        assert_eq!(acetone.flash_point_c, Some(rust_decimal::Decimal::from(-20)));
    }
}
