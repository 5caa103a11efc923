//! sympta-core — symptom-to-disease matching engine.
//!
//! The pipeline has four stages, all pure functions over an immutable
//! [`KnowledgeBase`] snapshot:
//!   - dataset loading ([`load_knowledge_base`])
//!   - autocomplete index derivation ([`build_index`])
//!   - per-disease symptom matching ([`matcher::match_diseases`])
//!   - ranking by match percentage ([`ranker::rank`])
//!
//! [`query`] wires matching and ranking together and is the entry point the
//! web layer calls once per user submission.

pub mod autocomplete;
pub mod dataset;
pub mod knowledge;
pub mod matcher;
pub mod ranker;

pub use autocomplete::build_index;
pub use dataset::{load_knowledge_base, LoadError};
pub use knowledge::{DiseaseRecord, KnowledgeBase};
pub use matcher::{match_diseases, parse_input, MatchResult};
pub use ranker::rank;

/// Run one user query end to end: parse the typed text, match it against
/// every disease in the knowledge base, and return the ranked results.
///
/// Empty or whitespace/comma-only input yields an empty vector; callers
/// render that as "no match", never as an error.
pub fn query(kb: &KnowledgeBase, raw_input: &str) -> Vec<(String, MatchResult)> {
    rank(match_diseases(kb, raw_input))
}
