//! CSV dataset loader.
//!
//! The dataset is a free-form tabular export whose column names vary in case
//! and spelling. Header resolution happens once, up front, producing a fixed
//! [`ColumnMap`]; after that the rest of the crate never touches raw tabular
//! data.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::knowledge::KnowledgeBase;

/// Accepted spellings per logical column, compared case-insensitively
/// against trimmed header names.
const SYMPTOM_COLUMNS: &[&str] = &["symptom", "symptoms"];
const DISEASE_COLUMNS: &[&str] = &["disease", "diseases"];
const PRECAUTION_COLUMNS: &[&str] = &["precaution", "precautions", "treatment", "possible treatment"];
const MEDICINE_COLUMNS: &[&str] = &["medicine", "medicines", "drug", "drugs"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset {path} not found or unreadable: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dataset: {0}")]
    Malformed(#[from] csv::Error),
}

/// Resolved header positions. A column that matched no known synonym is
/// `None` and yields an empty cell for every row.
#[derive(Debug, Clone, Copy, Default)]
struct ColumnMap {
    disease: Option<usize>,
    symptom: Option<usize>,
    precaution: Option<usize>,
    medicine: Option<usize>,
}

impl ColumnMap {
    fn resolve(headers: &csv::StringRecord) -> Self {
        let lowered: Vec<String> = headers
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        let find = |candidates: &[&str]| {
            candidates
                .iter()
                .find_map(|c| lowered.iter().position(|h| h == c))
        };
        Self {
            disease: find(DISEASE_COLUMNS),
            symptom: find(SYMPTOM_COLUMNS),
            precaution: find(PRECAUTION_COLUMNS),
            medicine: find(MEDICINE_COLUMNS),
        }
    }
}

/// Load the knowledge base from a CSV file.
///
/// A missing or unreadable file is a [`LoadError`]; the hosting process must
/// treat that as fatal at startup and must not serve queries from a partial
/// snapshot.
pub fn load_knowledge_base(path: impl AsRef<Path>) -> Result<KnowledgeBase, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let kb = parse_dataset(file)?;
    info!(dataset = %path.display(), diseases = kb.len(), "knowledge base loaded");
    Ok(kb)
}

/// Parse a CSV dataset from any reader.
pub fn parse_dataset(reader: impl Read) -> Result<KnowledgeBase, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnMap::resolve(csv_reader.headers()?);

    let mut kb = KnowledgeBase::new();
    for record in csv_reader.records() {
        let record = record?;
        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("").trim();

        let disease = cell(columns.disease);
        if disease.is_empty() {
            // No disease name, nothing to attach the row to.
            continue;
        }

        let symptoms = cell(columns.symptom)
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let precaution = non_missing(cell(columns.precaution));
        let medicine = non_missing(cell(columns.medicine));

        kb.add_row(disease, symptoms, precaution, medicine);
    }

    Ok(kb)
}

/// Treat empty cells and canonical missing-value markers as absent.
fn non_missing(cell: &str) -> Option<&str> {
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") || cell == "No information" {
        None
    } else {
        Some(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(data: &str) -> KnowledgeBase {
        parse_dataset(data.as_bytes()).unwrap()
    }

    #[test]
    fn resolves_column_synonyms_case_insensitively() {
        let kb = parse(
            "Diseases,SYMPTOMS,Treatment,Drugs\n\
             Flu,\"fever, cough\",rest,paracetamol\n",
        );
        let flu = kb.get("Flu").unwrap();
        assert_eq!(flu.symptoms, vec!["fever", "cough"]);
        assert_eq!(flu.precautions, vec!["rest"]);
        assert_eq!(flu.medicines, vec!["paracetamol"]);
    }

    #[test]
    fn unresolvable_columns_are_treated_as_absent() {
        let kb = parse("disease,sickness\nFlu,fever\n");
        let flu = kb.get("Flu").unwrap();
        assert!(flu.symptoms.is_empty());
        assert!(flu.precautions.is_empty());
        assert!(flu.medicines.is_empty());
    }

    #[test]
    fn rows_without_a_disease_are_skipped() {
        let kb = parse("disease,symptom\n,fever\n  ,cough\nFlu,fever\n");
        assert_eq!(kb.len(), 1);
    }

    #[test]
    fn duplicate_disease_rows_union_their_symptoms() {
        let kb = parse(
            "disease,symptom\n\
             Flu,fever\n\
             Flu,\"cough, chills\"\n",
        );
        assert_eq!(kb.len(), 1);
        assert_eq!(
            kb.get("Flu").unwrap().symptoms,
            vec!["fever", "cough", "chills"]
        );
    }

    #[test]
    fn missing_value_markers_are_skipped() {
        let kb = parse(
            "disease,symptom,precaution,medicine\n\
             Flu,fever,nan,No information\n\
             Cold,sneezing,NaN,\n",
        );
        assert!(kb.get("Flu").unwrap().precautions.is_empty());
        assert!(kb.get("Flu").unwrap().medicines.is_empty());
        assert!(kb.get("Cold").unwrap().precautions.is_empty());
        assert!(kb.get("Cold").unwrap().medicines.is_empty());
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load_knowledge_base("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "disease,symptom\nFlu,fever\n").unwrap();
        let kb = load_knowledge_base(file.path()).unwrap();
        assert_eq!(kb.len(), 1);
    }
}
