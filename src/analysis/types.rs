use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::extraction::ParsedDrugItem;
use crate::knowledge::InteractionRecord;

pub const DOSE_EXCEEDS_MAX_DAILY: &str = "Dose exceeds max daily limit";

/// Age-appropriate guidance for one drug. Both fields are `None` for
/// drugs the knowledge base does not know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DosageGuidance {
    pub recommended_dose_for_age: Option<String>,
    pub max_daily_mg: Option<u32>,
}

/// A computed daily total above the stored limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoseWarning {
    pub drug: String,
    pub issue: String,
    pub computed_mg_per_day: u64,
    pub max_daily_mg: u32,
}

/// Everything one analysis request produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub drugs_parsed: Vec<ParsedDrugItem>,
    pub interactions: Vec<InteractionRecord>,
    pub dosage_guidance: BTreeMap<String, DosageGuidance>,
    pub warnings: Vec<DoseWarning>,
    pub alternatives: BTreeMap<String, Vec<String>>,
}

impl AnalysisResult {
    pub fn empty() -> Self {
        Self {
            drugs_parsed: Vec::new(),
            interactions: Vec::new(),
            dosage_guidance: BTreeMap::new(),
            warnings: Vec::new(),
            alternatives: BTreeMap::new(),
        }
    }
}
