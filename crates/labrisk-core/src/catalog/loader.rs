use crate::error::LabRiskError;
use crate::model::{IncompatibilityLevel, IncompatibilityRecord, Substance};
use crate::parsing::values::{is_empty_marker, parse_flash_point};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const SUBSTANCE_COLUMNS: &[&str] = &["cas", "name", "flash_point_c", "toxicity", "family"];
pub const INCOMPATIBILITY_COLUMNS: &[&str] = &[
    "substance_a",
    "substance_b",
    "risk_level",
    "reaction_type",
    "justification",
    "product",
    "product_formula",
    "equation",
];

/// Load substances from a `;`-delimited file.
pub fn load_substances(path: &Path) -> Result<Vec<Substance>, LabRiskError> {
    let file = open(path)?;
    read_substances(file).map_err(|e| with_path(e, path))
}

/// Load incompatibility records from a `;`-delimited file.
pub fn load_incompatibilities(path: &Path) -> Result<Vec<IncompatibilityRecord>, LabRiskError> {
    let file = open(path)?;
    read_incompatibilities(file).map_err(|e| with_path(e, path))
}

/// Read substances. Rows without a name are skipped; unparsable flash
/// points are treated as absent.
pub fn read_substances<R: Read>(reader: R) -> Result<Vec<Substance>, LabRiskError> {
    let mut reader = builder().from_reader(reader);
    let columns = Columns::resolve(reader.headers()?, &["name"])?;

    let mut substances = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let row_number = row_idx + 2;

        let Some(name) = columns.field(&record, "name") else {
            tracing::warn!(row = row_number, "substance row without a name skipped");
            continue;
        };

        let mut substance = Substance::new(&name);
        substance.cas = columns.field(&record, "cas");
        substance.toxicity = columns.field(&record, "toxicity");
        substance.family = columns.field(&record, "family");

        if let Some(raw) = columns.field(&record, "flash_point_c") {
            substance.flash_point_c = parse_flash_point(&raw);
            if substance.flash_point_c.is_none() {
                tracing::warn!(
                    row = row_number,
                    substance = %substance.name,
                    value = %raw,
                    "unparsable flash point treated as absent"
                );
            }
        }

        substances.push(substance);
    }

    Ok(substances)
}

/// Read incompatibility records. Rows missing either substance are
/// skipped; unrecognized risk levels are kept as `None`.
pub fn read_incompatibilities<R: Read>(reader: R) -> Result<Vec<IncompatibilityRecord>, LabRiskError> {
    let mut reader = builder().from_reader(reader);
    let columns = Columns::resolve(reader.headers()?, &["substance_a", "substance_b", "risk_level"])?;

    let mut records = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let row_number = row_idx + 2;

        let (Some(a), Some(b)) = (
            columns.field(&record, "substance_a"),
            columns.field(&record, "substance_b"),
        ) else {
            tracing::warn!(row = row_number, "incompatibility row without both substances skipped");
            continue;
        };

        let raw_level = columns.field(&record, "risk_level").unwrap_or_default();
        let risk_level = IncompatibilityLevel::from_str_loose(&raw_level);
        if risk_level.is_none() {
            tracing::warn!(
                row = row_number,
                level = %raw_level,
                "unrecognized risk level, scored as moderate"
            );
        }

        records.push(IncompatibilityRecord {
            substance_a: a,
            substance_b: b,
            risk_level,
            reaction_type: columns.field(&record, "reaction_type"),
            justification: columns.field(&record, "justification"),
            product: columns.field(&record, "product"),
            product_formula: columns.field(&record, "product_formula"),
            equation: columns.field(&record, "equation"),
        });
    }

    Ok(records)
}

fn builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .delimiter(b';')
        .has_headers(true)
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All);
    builder
}

fn open(path: &Path) -> Result<File, LabRiskError> {
    File::open(path).map_err(|e| LabRiskError::CatalogLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn with_path(err: LabRiskError, path: &Path) -> LabRiskError {
    match err {
        LabRiskError::CatalogLoad { .. } => err,
        other => LabRiskError::CatalogLoad {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    }
}

/// Header name to column index.
struct Columns {
    names: Vec<String>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord, required: &[&str]) -> Result<Self, LabRiskError> {
        let names: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        for column in required {
            if !names.iter().any(|n| n == column) {
                return Err(LabRiskError::CatalogInvalid(format!(
                    "missing required column '{column}'"
                )));
            }
        }
        Ok(Columns { names })
    }

    fn field(&self, record: &csv::StringRecord, column: &str) -> Option<String> {
        let index = self.names.iter().position(|n| n == column)?;
        record
            .get(index)
            .map(|s| s.trim().to_string())
            .filter(|s| !is_empty_marker(s))
    }
}
