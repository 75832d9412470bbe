pub mod analyze;
pub mod catalog;
pub mod config;

use labrisk_core::catalog::builtin::builtin_catalog;
use labrisk_core::catalog::SubstanceCatalog;
use labrisk_core::config::{load_config, ScoringConfig};
use labrisk_core::error::LabRiskError;
use std::path::Path;

/// Catalog from a directory, or the bundled one.
pub fn open_catalog(dir: Option<&Path>) -> Result<SubstanceCatalog, LabRiskError> {
    match dir {
        Some(dir) => {
            tracing::debug!(dir = %dir.display(), "loading catalog");
            SubstanceCatalog::load_dir(dir)
        }
        None => builtin_catalog(),
    }
}

/// Scoring config from a file, or the built-in defaults.
pub fn open_config(path: Option<&Path>) -> Result<ScoringConfig, LabRiskError> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading scoring config");
            load_config(path)
        }
        None => Ok(ScoringConfig::default()),
    }
}
