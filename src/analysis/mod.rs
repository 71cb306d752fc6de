//! Prescription analysis: extraction, interactions, dose limits and
//! alternatives combined into one `AnalysisResult`.
//!
//! The analyzer holds only immutable shared state, so one instance serves
//! any number of concurrent requests. Ages are expected to be validated to
//! `[0, 120]` before they reach this module.

pub mod dosage;
pub mod interactions;
pub mod types;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crate::config::EnrichmentConfig;
use crate::enrichment::{
    enricher_from_config, EnrichmentError, HttpEnricher, InteractionEnricher, NoopEnricher,
};
use crate::extraction::{self, DrugInput, ParsedDrugItem};
use crate::knowledge::KnowledgeBase;

pub use dosage::{check_daily_limit, evaluate_dosage, DosageEvaluation};
pub use interactions::resolve_interactions;
pub use types::{AnalysisResult, DosageGuidance, DoseWarning, DOSE_EXCEEDS_MAX_DAILY};

/// Orchestrates extraction and the knowledge-base checks.
#[derive(Clone)]
pub struct Analyzer {
    knowledge: Arc<KnowledgeBase>,
    enricher: Arc<dyn InteractionEnricher>,
    enrichment: EnrichmentConfig,
}

impl Analyzer {
    pub fn new(knowledge: Arc<KnowledgeBase>, enricher: Arc<dyn InteractionEnricher>) -> Self {
        Self {
            knowledge,
            enricher,
            enrichment: EnrichmentConfig::default(),
        }
    }

    /// Analyzer with no enrichment provider.
    pub fn without_enrichment(knowledge: Arc<KnowledgeBase>) -> Self {
        Self::new(knowledge, Arc::new(NoopEnricher))
    }

    /// Analyzer whose provider is chosen from `config`.
    pub fn from_config(
        knowledge: Arc<KnowledgeBase>,
        config: &EnrichmentConfig,
    ) -> Result<Self, EnrichmentError> {
        let enricher: Arc<dyn InteractionEnricher> = Arc::from(enricher_from_config(config)?);
        Ok(Self {
            enrichment: config.clone(),
            ..Self::new(knowledge, enricher)
        })
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn enrichment_available(&self) -> bool {
        self.enricher.is_available()
    }

    /// HTTP provider for the configured endpoint, authenticated with a
    /// caller-supplied key. `None` when the key is blank or no endpoint is
    /// configured; the key is never sent anywhere else.
    pub fn enricher_with_key(&self, api_key: &str) -> Result<Option<HttpEnricher>, EnrichmentError> {
        let config = EnrichmentConfig {
            api_key: api_key.to_string(),
            ..self.enrichment.clone()
        };
        if !config.is_configured() {
            return Ok(None);
        }
        HttpEnricher::new(&config).map(Some)
    }

    pub fn extract(&self, text: Option<&str>, explicit: Option<&[DrugInput]>) -> Vec<ParsedDrugItem> {
        extraction::extract(&self.knowledge, text, explicit)
    }

    pub fn check(&self, items: Vec<ParsedDrugItem>, age: u32) -> AnalysisResult {
        self.check_with(items, age, self.enricher.as_ref())
    }

    /// Same as `check`, with an explicit enrichment provider for this call.
    pub fn check_with(
        &self,
        items: Vec<ParsedDrugItem>,
        age: u32,
        enricher: &dyn InteractionEnricher,
    ) -> AnalysisResult {
        let start = Instant::now();
        let kb = self.knowledge.as_ref();

        let drugs: Vec<String> = items.iter().map(|item| item.drug.clone()).collect();
        let interactions = resolve_interactions(kb, &drugs, enricher);
        let DosageEvaluation { guidance, warnings } = evaluate_dosage(kb, &items, age);
        let alternatives: BTreeMap<String, Vec<String>> = drugs
            .iter()
            .map(|drug| (drug.clone(), kb.alternatives_for(drug)))
            .collect();

        tracing::debug!(
            drug_count = items.len(),
            interactions = interactions.len(),
            warnings = warnings.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Prescription analysis complete"
        );

        AnalysisResult {
            drugs_parsed: items,
            interactions,
            dosage_guidance: guidance,
            warnings,
            alternatives,
        }
    }

    /// Extract then check.
    pub fn analyze(
        &self,
        text: Option<&str>,
        explicit: Option<&[DrugInput]>,
        age: u32,
    ) -> AnalysisResult {
        let items = self.extract(text, explicit);
        self.check(items, age)
    }
}
