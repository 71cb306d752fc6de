use crate::knowledge::KnowledgeBase;

use super::dose::parse_dose_mg;
use super::frequency::parse_frequency;
use super::tokenizer::tokenize;
use super::{dedup_by_drug, ParsedDrugItem};

/// Number of tokens after a drug name searched for dose and frequency cues.
pub const LOOKAHEAD_TOKENS: usize = 7;

/// Scan free text for known drugs and the dose/frequency that follow them.
///
/// Drug names are tried as a single token, then as two tokens joined by a
/// space. Names of three or more tokens are never matched. Unrecognized
/// words are skipped; text with no known drug yields an empty list.
pub fn parse_prescription(text: &str, kb: &KnowledgeBase) -> Vec<ParsedDrugItem> {
    let tokens = tokenize(text);
    let mut found = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let mut drug = kb.normalize(tokens[i]);
        if drug.is_none() && i + 1 < tokens.len() {
            drug = kb.normalize(&format!("{} {}", tokens[i], tokens[i + 1]));
            if drug.is_some() {
                i += 1;
            }
        }

        if let Some(drug) = drug {
            let end = (i + 1 + LOOKAHEAD_TOKENS).min(tokens.len());
            let window = tokens[i + 1..end].join(" ");

            found.push(ParsedDrugItem {
                drug: drug.to_string(),
                dose_mg: parse_dose_mg(&window),
                frequency_per_day: parse_frequency(&window),
            });
        }
        i += 1;
    }

    dedup_by_drug(found)
}
