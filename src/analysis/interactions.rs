use crate::enrichment::InteractionEnricher;
use crate::knowledge::{InteractionRecord, KnowledgeBase};

/// Knowledge-base interactions among `drugs`, followed by whatever the
/// enrichment provider adds. Provider failures are logged and dropped.
pub fn resolve_interactions(
    kb: &KnowledgeBase,
    drugs: &[String],
    enricher: &dyn InteractionEnricher,
) -> Vec<InteractionRecord> {
    let mut interactions = kb.interactions_among(drugs.iter().map(String::as_str));

    if enricher.is_available() {
        match enricher.enrich_interactions(drugs) {
            Ok(extra) => interactions.extend(extra),
            Err(e) => {
                tracing::warn!(error = %e, "Interaction enrichment failed, using knowledge base only");
            }
        }
    }

    interactions
}
