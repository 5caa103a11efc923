//! Autocomplete index: every known symptom token, deduplicated and sorted.

use std::collections::HashSet;

use crate::knowledge::KnowledgeBase;

/// Collect the union of all symptom tokens across the knowledge base.
///
/// Duplicates collapse only when case-identical ("Fever" and "fever" both
/// survive); ordering is case-insensitive lexicographic, with the original
/// string as a deterministic tie-break between case variants. Derived data
/// only — recompute after every knowledge-base reload.
pub fn build_index(kb: &KnowledgeBase) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tokens: Vec<String> = kb
        .diseases()
        .iter()
        .flat_map(|record| record.symptoms.iter())
        .filter(|symptom| seen.insert(symptom.as_str()))
        .cloned()
        .collect();

    tokens.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_case_insensitively_with_exact_dedup() {
        let mut kb = KnowledgeBase::new();
        kb.add_row("A", ["Fever", "cough"], None, None);
        kb.add_row("B", ["fever", "Chills", "cough"], None, None);

        let index = build_index(&kb);
        assert_eq!(index, vec!["Chills", "cough", "Fever", "fever"]);
    }

    #[test]
    fn empty_knowledge_base_yields_empty_index() {
        assert!(build_index(&KnowledgeBase::new()).is_empty());
    }
}
