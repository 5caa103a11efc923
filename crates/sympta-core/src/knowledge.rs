//! In-memory knowledge base: disease name → symptoms, precautions, medicines.

use serde::{Deserialize, Serialize};

/// One disease with everything the dataset knows about it.
///
/// The string collections behave as sets (no duplicates) but keep first-seen
/// insertion order so that repeated loads of the same dataset produce
/// identical snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub name: String,
    pub symptoms: Vec<String>,
    pub precautions: Vec<String>,
    pub medicines: Vec<String>,
}

impl DiseaseRecord {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            symptoms: Vec::new(),
            precautions: Vec::new(),
            medicines: Vec::new(),
        }
    }

    fn push_unique(list: &mut Vec<String>, value: &str) {
        if !list.iter().any(|v| v == value) {
            list.push(value.to_string());
        }
    }

    /// First precaution after a stable sort, or "No information".
    pub fn representative_precaution(&self) -> String {
        Self::representative(&self.precautions)
    }

    /// First medicine after a stable sort, or "No information".
    pub fn representative_medicine(&self) -> String {
        Self::representative(&self.medicines)
    }

    fn representative(list: &[String]) -> String {
        list.iter()
            .min()
            .cloned()
            .unwrap_or_else(|| "No information".to_string())
    }
}

/// Immutable snapshot of the whole disease table.
///
/// Built once at startup (or on explicit reload) and shared read-only with
/// every query after that. Diseases keep the order in which they first
/// appeared in the dataset; the matcher scans them in that order, which is
/// what makes rank ties reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    diseases: Vec<DiseaseRecord>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one dataset row into the knowledge base.
    ///
    /// Rows for an already-known disease accumulate into its record (set
    /// union); they never overwrite it. Empty disease names are the caller's
    /// job to filter out.
    pub fn add_row<'a>(
        &mut self,
        disease: &str,
        symptoms: impl IntoIterator<Item = &'a str>,
        precaution: Option<&str>,
        medicine: Option<&str>,
    ) {
        let idx = match self.diseases.iter().position(|r| r.name == disease) {
            Some(existing) => existing,
            None => {
                self.diseases.push(DiseaseRecord::new(disease));
                self.diseases.len() - 1
            }
        };
        let record = &mut self.diseases[idx];

        for symptom in symptoms {
            DiseaseRecord::push_unique(&mut record.symptoms, symptom);
        }
        if let Some(p) = precaution {
            DiseaseRecord::push_unique(&mut record.precautions, p);
        }
        if let Some(m) = medicine {
            DiseaseRecord::push_unique(&mut record.medicines, m);
        }
    }

    /// Diseases in stable scan order.
    pub fn diseases(&self) -> &[DiseaseRecord] {
        &self.diseases
    }

    pub fn len(&self) -> usize {
        self.diseases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }

    pub fn get(&self, disease: &str) -> Option<&DiseaseRecord> {
        self.diseases.iter().find(|r| r.name == disease)
    }
}
