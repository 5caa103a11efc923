//! Symptom matcher: typed input → per-disease match results.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::knowledge::KnowledgeBase;

/// Outcome of matching one query against one disease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Matched disease symptoms, original casing, sorted.
    pub matched_symptoms: Vec<String>,
    /// How many symptoms the disease has in total.
    pub total_symptoms: usize,
    /// Matched count over the number of typed tokens, as a percentage
    /// rounded to two decimals.
    pub match_percent: f64,
    pub precaution: String,
    pub medicine: String,
}

/// Split the raw typed text into query tokens: comma-separated, trimmed,
/// lower-cased, empties dropped.
///
/// Duplicate tokens are kept on purpose. The match percentage divides by
/// the literal token count, so typing "fever, fever" halves every
/// percentage relative to "fever". Deduplicating here would silently
/// change user-visible ranking.
pub fn parse_input(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|piece| piece.trim().to_lowercase())
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Whether a typed token and a (lower-cased) disease symptom count as a
/// match: equality, or substring containment in either direction. The rule
/// is deliberately loose — "fever" matches "feverish" and vice versa.
fn tokens_match(input: &str, disease_symptom: &str) -> bool {
    input == disease_symptom
        || disease_symptom.contains(input)
        || input.contains(disease_symptom)
}

/// Match the typed text against every disease in the knowledge base.
///
/// Returns one entry per disease with at least one matched symptom, in
/// knowledge-base scan order. Empty input returns an empty vector without
/// touching the knowledge base (and without dividing by zero).
///
/// Note the percentage denominator is the number of *typed* tokens, not the
/// disease's own symptom count: a one-symptom disease that matches shows
/// 100%, and a disease needing ten symptoms but matching one of one typed
/// token also shows 100%. The percentage measures input coverage, not
/// disease coverage.
pub fn match_diseases(kb: &KnowledgeBase, raw_input: &str) -> Vec<(String, MatchResult)> {
    let input_symptoms = parse_input(raw_input);
    if input_symptoms.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    for record in kb.diseases() {
        // Lower-case for comparison, keep the original for display.
        let lowered: Vec<(String, &str)> = record
            .symptoms
            .iter()
            .map(|s| (s.to_lowercase(), s.as_str()))
            .collect();

        let mut matched: BTreeSet<&str> = BTreeSet::new();
        for input in &input_symptoms {
            for (lower, original) in &lowered {
                if tokens_match(input, lower) {
                    matched.insert(*original);
                }
            }
        }

        if matched.is_empty() {
            continue;
        }

        let percent = matched.len() as f64 / input_symptoms.len() as f64 * 100.0;
        results.push((
            record.name.clone(),
            MatchResult {
                matched_symptoms: matched.into_iter().map(String::from).collect(),
                total_symptoms: record.symptoms.len(),
                match_percent: round2(percent),
                precaution: record.representative_precaution(),
                medicine: record.representative_medicine(),
            },
        ));
    }

    results
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb() -> KnowledgeBase {
        let mut kb = KnowledgeBase::new();
        kb.add_row("Flu", ["fever", "cough"], Some("rest"), Some("paracetamol"));
        kb.add_row("Malaria", ["high fever", "chills"], None, None);
        kb.add_row("Tetanus", ["lockjaw"], None, None);
        kb
    }

    #[test]
    fn parse_input_trims_lowercases_and_drops_empties() {
        assert_eq!(
            parse_input(" Fever ,COUGH,, chills , "),
            vec!["fever", "cough", "chills"]
        );
        assert!(parse_input("").is_empty());
        assert!(parse_input(" , ,").is_empty());
    }

    #[test]
    fn parse_input_keeps_duplicates() {
        assert_eq!(parse_input("fever, fever"), vec!["fever", "fever"]);
    }

    #[test]
    fn only_diseases_with_matches_appear() {
        let results = match_diseases(&kb(), "fever");
        let names: Vec<&str> = results.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Flu", "Malaria"]);
        for (_, r) in &results {
            assert!(!r.matched_symptoms.is_empty());
        }
    }

    #[test]
    fn substring_matches_in_both_directions() {
        // Typed token contained in disease symptom.
        let results = match_diseases(&kb(), "fever");
        assert!(results.iter().any(|(n, _)| n == "Malaria"));

        // Disease symptom contained in typed token.
        let results = match_diseases(&kb(), "feverish and shaking");
        let flu = results.iter().find(|(n, _)| n == "Flu").unwrap();
        assert_eq!(flu.1.matched_symptoms, vec!["fever"]);
    }

    #[test]
    fn percent_is_matched_over_typed_count() {
        let results = match_diseases(&kb(), "fever, chills, lockjaw");
        let flu = results.iter().find(|(n, _)| n == "Flu").unwrap();
        let malaria = results.iter().find(|(n, _)| n == "Malaria").unwrap();
        let tetanus = results.iter().find(|(n, _)| n == "Tetanus").unwrap();
        assert_eq!(flu.1.match_percent, 33.33);
        assert_eq!(malaria.1.match_percent, 66.67);
        assert_eq!(tetanus.1.match_percent, 33.33);
    }

    #[test]
    fn duplicate_typed_tokens_inflate_the_denominator() {
        // Intentional reference behavior: "fever, fever" counts as two
        // typed tokens but can only match one Flu symptom.
        let results = match_diseases(&kb(), "fever, fever");
        let flu = results.iter().find(|(n, _)| n == "Flu").unwrap();
        assert_eq!(flu.1.match_percent, 50.0);
    }

    #[test]
    fn percent_can_exceed_disease_coverage_intuition() {
        // Tetanus has one symptom; matching it against one typed token
        // reports 100% even though the user only confirmed one symptom.
        let results = match_diseases(&kb(), "lockjaw");
        let tetanus = results.iter().find(|(n, _)| n == "Tetanus").unwrap();
        assert_eq!(tetanus.1.match_percent, 100.0);
        assert_eq!(tetanus.1.total_symptoms, 1);
    }

    #[test]
    fn matched_symptoms_keep_original_casing_sorted() {
        let mut kb = KnowledgeBase::new();
        kb.add_row("X", ["Night Sweats", "Fever"], None, None);
        let results = match_diseases(&kb, "fever, night sweats");
        assert_eq!(
            results[0].1.matched_symptoms,
            vec!["Fever", "Night Sweats"]
        );
    }

    #[test]
    fn representatives_fall_back_to_no_information() {
        let results = match_diseases(&kb(), "chills");
        let malaria = results.iter().find(|(n, _)| n == "Malaria").unwrap();
        assert_eq!(malaria.1.precaution, "No information");
        assert_eq!(malaria.1.medicine, "No information");
    }
}
