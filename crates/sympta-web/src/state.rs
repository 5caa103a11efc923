//! Shared application state for the web server.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use rusqlite::Connection;
use tokio::sync::Mutex;

use sympta_core::{build_index, load_knowledge_base, KnowledgeBase, LoadError};

/// Shared state injected into every Axum handler.
///
/// The knowledge base is an immutable snapshot behind an `Arc`; handlers
/// clone the `Arc` out and run the whole query against it, so a concurrent
/// reload never mutates data a request is reading. Reload builds a fresh
/// snapshot and swaps the pointer.
pub struct AppState {
    kb: RwLock<Arc<KnowledgeBase>>,
    symptoms: RwLock<Arc<Vec<String>>>,
    /// SQLite handle, serialised behind an async mutex.
    pub db: Mutex<Connection>,
    dataset_path: PathBuf,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(kb: KnowledgeBase, db: Connection, dataset_path: PathBuf) -> Self {
        let symptoms = build_index(&kb);
        Self {
            kb: RwLock::new(Arc::new(kb)),
            symptoms: RwLock::new(Arc::new(symptoms)),
            db: Mutex::new(db),
            dataset_path,
        }
    }

    /// Current knowledge-base snapshot.
    pub fn snapshot(&self) -> Arc<KnowledgeBase> {
        self.kb.read().expect("kb lock poisoned").clone()
    }

    /// Current autocomplete index, derived from the same snapshot.
    pub fn symptom_index(&self) -> Arc<Vec<String>> {
        self.symptoms.read().expect("symptom lock poisoned").clone()
    }

    /// Reload the dataset and atomically publish the new snapshot.
    ///
    /// On `LoadError` the previous snapshot stays live; a failed reload
    /// never leaves the server without a knowledge base.
    pub fn reload(&self) -> Result<usize, LoadError> {
        let kb = load_knowledge_base(&self.dataset_path)?;
        let count = kb.len();
        let symptoms = build_index(&kb);
        *self.kb.write().expect("kb lock poisoned") = Arc::new(kb);
        *self.symptoms.write().expect("symptom lock poisoned") = Arc::new(symptoms);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use sympta_db::open_memory_database;

    fn state_with_dataset(contents: &str) -> (AppState, tempfile::NamedTempFile) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        let kb = load_knowledge_base(file.path()).unwrap();
        let state = AppState::new(
            kb,
            open_memory_database().unwrap(),
            file.path().to_path_buf(),
        );
        (state, file)
    }

    #[test]
    fn reload_swaps_the_snapshot() {
        let (state, file) = state_with_dataset("disease,symptom\nFlu,fever\n");
        let before = state.snapshot();
        assert_eq!(before.len(), 1);

        std::fs::write(file.path(), "disease,symptom\nFlu,fever\nCold,sneezing\n").unwrap();
        assert_eq!(state.reload().unwrap(), 2);

        // The old snapshot is untouched; the new one is published.
        assert_eq!(before.len(), 1);
        assert_eq!(state.snapshot().len(), 2);
        assert!(state.symptom_index().contains(&"sneezing".to_string()));
    }

    #[test]
    fn failed_reload_keeps_previous_snapshot() {
        let (state, file) = state_with_dataset("disease,symptom\nFlu,fever\n");
        drop(std::fs::remove_file(file.path()));

        assert!(state.reload().is_err());
        assert_eq!(state.snapshot().len(), 1);
    }
}
