use std::collections::BTreeMap;

use crate::extraction::ParsedDrugItem;
use crate::knowledge::KnowledgeBase;

use super::types::{DosageGuidance, DoseWarning, DOSE_EXCEEDS_MAX_DAILY};

/// Guidance per drug plus any daily-limit violations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DosageEvaluation {
    pub guidance: BTreeMap<String, DosageGuidance>,
    pub warnings: Vec<DoseWarning>,
}

/// Daily total, when both dose and frequency are known.
pub fn daily_total_mg(item: &ParsedDrugItem) -> Option<u64> {
    Some(u64::from(item.dose_mg?) * u64::from(item.frequency_per_day?))
}

/// Warn only when the daily total is strictly above a stored limit.
/// Any missing value skips the check.
pub fn check_daily_limit(item: &ParsedDrugItem, max_daily_mg: Option<u32>) -> Option<DoseWarning> {
    let total = daily_total_mg(item)?;
    let max = max_daily_mg?;
    (total > u64::from(max)).then(|| DoseWarning {
        drug: item.drug.clone(),
        issue: DOSE_EXCEEDS_MAX_DAILY.to_string(),
        computed_mg_per_day: total,
        max_daily_mg: max,
    })
}

pub fn evaluate_dosage(kb: &KnowledgeBase, items: &[ParsedDrugItem], age: u32) -> DosageEvaluation {
    let mut evaluation = DosageEvaluation::default();

    for item in items {
        let max_daily_mg = kb.max_daily_mg(&item.drug, age);

        if let Some(warning) = check_daily_limit(item, max_daily_mg) {
            tracing::debug!(
                drug = %warning.drug,
                computed_mg_per_day = warning.computed_mg_per_day,
                max_daily_mg = warning.max_daily_mg,
                "Daily dose above limit"
            );
            evaluation.warnings.push(warning);
        }

        evaluation.guidance.insert(
            item.drug.clone(),
            DosageGuidance {
                recommended_dose_for_age: kb.dose_for_age_group(&item.drug, age).map(String::from),
                max_daily_mg,
            },
        );
    }

    evaluation
}
