use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::types::{DoseLimit, DrugRecord, InteractionRecord, KnowledgeData};
use super::{AgeTier, KnowledgeError};

/// Lower-case and collapse internal whitespace runs, so that
/// `" Folic   ACID "` and `"folic acid"` compare equal.
pub fn normalize_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Immutable drug knowledge base.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    data: KnowledgeData,
    /// Normalized name or alias → index into `data.drugs`.
    surface_forms: HashMap<String, usize>,
    /// Exact canonical name → index into `data.drugs`.
    canonical: HashMap<String, usize>,
}

impl KnowledgeBase {
    /// Load the knowledge base from a JSON data file.
    pub fn load(path: &Path) -> Result<Self, KnowledgeError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| KnowledgeError::Load(path.display().to_string(), e.to_string()))?;
        let kb = Self::from_json(&json)?;

        tracing::info!(
            path = %path.display(),
            drugs = kb.data.drugs.len(),
            interactions = kb.data.interactions.len(),
            "Knowledge base loaded"
        );

        Ok(kb)
    }

    pub fn from_json(json: &str) -> Result<Self, KnowledgeError> {
        let data: KnowledgeData =
            serde_json::from_str(json).map_err(|e| KnowledgeError::Parse(e.to_string()))?;
        Self::from_data(data)
    }

    pub fn from_data(data: KnowledgeData) -> Result<Self, KnowledgeError> {
        let mut surface_forms = HashMap::new();
        let mut canonical = HashMap::new();

        for (idx, drug) in data.drugs.iter().enumerate() {
            if canonical.insert(drug.name.clone(), idx).is_some() {
                return Err(KnowledgeError::DuplicateDrug(drug.name.clone()));
            }
            // Earlier drugs keep a contested alias.
            for form in std::iter::once(&drug.name).chain(drug.aliases.iter()) {
                surface_forms.entry(normalize_key(form)).or_insert(idx);
            }
        }

        Ok(Self {
            data,
            surface_forms,
            canonical,
        })
    }

    /// Resolve a surface form (canonical name or alias) to its canonical name.
    /// Exact match only after case and whitespace folding.
    pub fn normalize(&self, name: &str) -> Option<&str> {
        self.surface_forms
            .get(&normalize_key(name))
            .map(|&idx| self.data.drugs[idx].name.as_str())
    }

    /// Canonical names in data-file order.
    pub fn list_drugs(&self) -> Vec<&str> {
        self.data.drugs.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn drug_count(&self) -> usize {
        self.data.drugs.len()
    }

    pub fn get_drug(&self, canonical_name: &str) -> Option<&DrugRecord> {
        self.canonical
            .get(canonical_name)
            .map(|&idx| &self.data.drugs[idx])
    }

    /// Dose guidance text for the patient's age tier.
    pub fn dose_for_age_group(&self, drug: &str, age: u32) -> Option<&str> {
        self.get_drug(drug)?.dose_for_tier(AgeTier::for_age(age))
    }

    pub fn dose_limit(&self, drug: &str) -> Option<&DoseLimit> {
        self.data.max_daily_dose_mg.get(drug)
    }

    /// Maximum daily milligrams for the patient's age tier, if recorded.
    pub fn max_daily_mg(&self, drug: &str, age: u32) -> Option<u32> {
        self.dose_limit(drug)?.for_tier(AgeTier::for_age(age))
    }

    /// Every stored interaction whose pair lies entirely inside `drugs`.
    ///
    /// Records come back in data-file order, so the result does not depend
    /// on the order of `drugs` or on duplicates within it.
    pub fn interactions_among<'a, I>(&self, drugs: I) -> Vec<InteractionRecord>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let present: HashSet<&str> = drugs.into_iter().collect();
        if present.len() < 2 {
            return Vec::new();
        }

        self.data
            .interactions
            .iter()
            .filter(|rec| {
                !rec.is_self_pair()
                    && present.contains(rec.pair[0].as_str())
                    && present.contains(rec.pair[1].as_str())
            })
            .cloned()
            .collect()
    }

    pub fn alternatives_for(&self, drug: &str) -> Vec<String> {
        self.data
            .alternatives
            .get(drug)
            .cloned()
            .unwrap_or_default()
    }

    /// Built-in fixture for tests (no file I/O).
    #[cfg(test)]
    pub(crate) fn load_test() -> Self {
        Self::from_json(TEST_FIXTURE).expect("test fixture is valid")
    }
}

#[cfg(test)]
pub(crate) const TEST_FIXTURE: &str = r#"{
  "drugs": [
    {"name": "Paracetamol", "aliases": ["Acetaminophen", "Tylenol", "Calpol"],
     "adult_dose": "500-1000 mg every 4-6 hours", "child_dose": "10-15 mg/kg every 4-6 hours"},
    {"name": "Ibuprofen", "aliases": ["Advil", "Brufen"],
     "adult_dose": "200-400 mg every 4-6 hours", "child_dose": "5-10 mg/kg every 6-8 hours"},
    {"name": "Amoxicillin", "aliases": ["Amoxil"],
     "adult_dose": "250-500 mg every 8 hours", "child_dose": "20-40 mg/kg/day in divided doses"},
    {"name": "Aspirin", "aliases": ["Acetylsalicylic Acid", "ASA"],
     "adult_dose": "300-900 mg every 4-6 hours", "child_dose": "Avoid under 16 years"},
    {"name": "Warfarin", "aliases": ["Coumadin"],
     "adult_dose": "2-10 mg once daily, INR guided"},
    {"name": "Folic Acid", "aliases": ["Folate"],
     "adult_dose": "0.4-5 mg once daily", "child_dose": "0.1-0.4 mg once daily"}
  ],
  "max_daily_dose_mg": {
    "Paracetamol": {"child": 2000, "adult": 4000},
    "Ibuprofen": {"child": 1200, "adult": 2400},
    "Amoxicillin": {"child": 1500, "adult": 3000},
    "Aspirin": {"adult": 4000}
  },
  "interactions": [
    {"pair": ["Warfarin", "Aspirin"], "severity": "high", "effect": "Increased bleeding risk"},
    {"pair": ["Ibuprofen", "Aspirin"], "severity": "moderate", "effect": "Reduced antiplatelet effect of aspirin"},
    {"pair": ["Warfarin", "Ibuprofen"], "severity": "high", "effect": "Increased bleeding risk"}
  ],
  "alternatives": {
    "Ibuprofen": ["Paracetamol", "Naproxen"],
    "Aspirin": ["Clopidogrel"],
    "Paracetamol": ["Ibuprofen"]
  }
}"#;
