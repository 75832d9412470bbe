pub mod builtin;
pub mod loader;

use crate::error::LabRiskError;
use crate::model::{IncompatibilityRecord, Substance};
use crate::parsing::normalize::normalize;
use std::collections::HashMap;
use std::path::Path;

pub const SUBSTANCES_FILE: &str = "substances.csv";
pub const INCOMPATIBILITIES_FILE: &str = "incompatibilities.csv";

/// Source of substance data for an analysis.
///
/// Implementations are read-only once built and shared by reference
/// across analyses.
pub trait SubstanceRepository: Send + Sync {
    /// Find a substance by name, or by CAS number.
    fn find_substance(&self, name_or_cas: &str) -> Option<Substance>;

    /// All documented incompatibilities.
    fn incompatibilities(&self) -> &[IncompatibilityRecord];
}

/// In-memory catalog indexed by normalized name and by CAS number.
#[derive(Debug, Clone, Default)]
pub struct SubstanceCatalog {
    substances: Vec<Substance>,
    by_name: HashMap<String, usize>,
    by_cas: HashMap<String, usize>,
    incompatibilities: Vec<IncompatibilityRecord>,
}

impl SubstanceCatalog {
    /// Build a catalog. On duplicate names or CAS numbers the first entry wins.
    pub fn new(substances: Vec<Substance>, incompatibilities: Vec<IncompatibilityRecord>) -> Self {
        let mut by_name = HashMap::new();
        let mut by_cas = HashMap::new();

        for (i, s) in substances.iter().enumerate() {
            if by_name.contains_key(&s.normalized_name) {
                tracing::warn!(substance = %s.name, "duplicate substance name, keeping first entry");
            } else {
                by_name.insert(s.normalized_name.clone(), i);
            }
            if let Some(cas) = &s.cas {
                by_cas.entry(normalize(cas)).or_insert(i);
            }
        }

        tracing::info!(
            substances = substances.len(),
            incompatibilities = incompatibilities.len(),
            "catalog loaded"
        );

        SubstanceCatalog {
            substances,
            by_name,
            by_cas,
            incompatibilities,
        }
    }

    /// Load `substances.csv` and `incompatibilities.csv` from a directory.
    /// The incompatibility file is optional.
    pub fn load_dir(dir: &Path) -> Result<Self, LabRiskError> {
        let substances = loader::load_substances(&dir.join(SUBSTANCES_FILE))?;
        let incompat_path = dir.join(INCOMPATIBILITIES_FILE);
        let incompatibilities = if incompat_path.exists() {
            loader::load_incompatibilities(&incompat_path)?
        } else {
            tracing::warn!(path = %incompat_path.display(), "no incompatibility file, family rules only");
            Vec::new()
        };
        Ok(SubstanceCatalog::new(substances, incompatibilities))
    }

    /// All substances in load order.
    pub fn substances(&self) -> &[Substance] {
        &self.substances
    }

    pub fn len(&self) -> usize {
        self.substances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.substances.is_empty()
    }
}

impl SubstanceRepository for SubstanceCatalog {
    fn find_substance(&self, name_or_cas: &str) -> Option<Substance> {
        let key = normalize(name_or_cas);
        if key.is_empty() {
            return None;
        }
        let idx = self.by_name.get(&key).or_else(|| {
            if name_or_cas.contains('-') {
                self.by_cas.get(&key)
            } else {
                None
            }
        })?;
        self.substances.get(*idx).cloned()
    }

    fn incompatibilities(&self) -> &[IncompatibilityRecord] {
        &self.incompatibilities
    }
}
