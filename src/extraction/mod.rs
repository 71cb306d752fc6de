//! Prescription extraction: turns free text or an explicit drug list
//! into canonical `ParsedDrugItem`s.
//!
//! Explicit input wins: when a non-empty drug list is supplied the text is
//! ignored entirely. Names that do not normalize are kept as given so the
//! caller still sees them, with every downstream lookup coming back empty.

pub mod dose;
pub mod frequency;
pub mod parser;
pub mod tokenizer;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::knowledge::KnowledgeBase;

pub use parser::parse_prescription;

// ═══════════════════════════════════════════
// Types
// ═══════════════════════════════════════════

/// One drug found in a prescription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDrugItem {
    /// Canonical name, or the caller's spelling when it is not in the knowledge base.
    pub drug: String,
    pub dose_mg: Option<u32>,
    pub frequency_per_day: Option<u32>,
}

/// A caller-supplied drug entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugInput {
    pub drug: String,
    #[serde(default)]
    pub dose_mg: Option<u32>,
    #[serde(default)]
    pub frequency_per_day: Option<u32>,
}

// ═══════════════════════════════════════════
// Extraction
// ═══════════════════════════════════════════

/// Produce deduplicated drug items from explicit input or free text.
pub fn extract(
    kb: &KnowledgeBase,
    text: Option<&str>,
    explicit: Option<&[DrugInput]>,
) -> Vec<ParsedDrugItem> {
    if let Some(inputs) = explicit.filter(|inputs| !inputs.is_empty()) {
        return from_explicit(kb, inputs);
    }
    match text {
        Some(text) => parse_prescription(text, kb),
        None => Vec::new(),
    }
}

/// Normalize caller-supplied names, keeping unknown names verbatim.
pub fn from_explicit(kb: &KnowledgeBase, inputs: &[DrugInput]) -> Vec<ParsedDrugItem> {
    let items = inputs
        .iter()
        .map(|input| {
            let drug = match kb.normalize(&input.drug) {
                Some(canonical) => canonical.to_string(),
                None => {
                    tracing::debug!(drug = %input.drug, "Explicit drug not in knowledge base");
                    input.drug.clone()
                }
            };
            ParsedDrugItem {
                drug,
                dose_mg: input.dose_mg,
                frequency_per_day: input.frequency_per_day,
            }
        })
        .collect();

    dedup_by_drug(items)
}

/// Keep the first item for each drug name, preserving order.
pub(crate) fn dedup_by_drug(items: Vec<ParsedDrugItem>) -> Vec<ParsedDrugItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.drug.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(drug: &str, dose_mg: Option<u32>, frequency_per_day: Option<u32>) -> DrugInput {
        DrugInput {
            drug: drug.into(),
            dose_mg,
            frequency_per_day,
        }
    }

    #[test]
    fn explicit_input_takes_precedence() {
        let kb = KnowledgeBase::load_test();
        let explicit = vec![input("ibuprofen", Some(400), Some(3))];
        let items = extract(&kb, Some("Paracetamol 500 mg twice daily"), Some(explicit.as_slice()));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].drug, "Ibuprofen");
        assert_eq!(items[0].dose_mg, Some(400));
    }

    #[test]
    fn empty_explicit_list_falls_back_to_text() {
        let kb = KnowledgeBase::load_test();
        let items = extract(&kb, Some("Paracetamol 500 mg twice daily"), Some(&[][..]));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].drug, "Paracetamol");
    }

    #[test]
    fn no_input_is_empty() {
        let kb = KnowledgeBase::load_test();
        assert!(extract(&kb, None, None).is_empty());
    }

    #[test]
    fn explicit_aliases_normalized() {
        let kb = KnowledgeBase::load_test();
        let items = from_explicit(&kb, &[input(" COUMADIN ", Some(5), Some(1))]);
        assert_eq!(items[0].drug, "Warfarin");
        assert_eq!(items[0].frequency_per_day, Some(1));
    }

    #[test]
    fn explicit_unknown_name_passes_through() {
        let kb = KnowledgeBase::load_test();
        let items = from_explicit(&kb, &[input("Mysteryzol", Some(10), None)]);
        assert_eq!(
            items,
            vec![ParsedDrugItem {
                drug: "Mysteryzol".into(),
                dose_mg: Some(10),
                frequency_per_day: None,
            }]
        );
    }

    #[test]
    fn explicit_duplicates_keep_first() {
        let kb = KnowledgeBase::load_test();
        let items = from_explicit(
            &kb,
            &[
                input("Advil", Some(200), Some(2)),
                input("Ibuprofen", Some(800), Some(4)),
                input("Aspirin", None, None),
            ],
        );
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].dose_mg, Some(200));
        assert_eq!(items[1].drug, "Aspirin");
    }

    #[test]
    fn drug_input_optional_fields_default() {
        let parsed: DrugInput = serde_json::from_str(r#"{"drug": "Aspirin"}"#).unwrap();
        assert_eq!(parsed, input("Aspirin", None, None));
    }
}
