//! Optional interaction enrichment from an external provider.
//!
//! The analyzer only depends on the `InteractionEnricher` capability. When no
//! provider is configured a `NoopEnricher` stands in, and provider failures
//! are swallowed by the caller so they never fail an analysis.

mod http;
#[cfg(test)]
pub(crate) mod test_support;

use thiserror::Error;

use crate::config::EnrichmentConfig;
use crate::knowledge::InteractionRecord;

pub use http::HttpEnricher;

#[derive(Error, Debug)]
pub enum EnrichmentError {
    #[error("Cannot connect to enrichment provider at {0}")]
    Connection(String),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("Enrichment provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse enrichment response: {0}")]
    ResponseParsing(String),
}

/// Source of additional interaction records for a set of canonical drug names.
pub trait InteractionEnricher: Send + Sync {
    /// Whether the provider is configured to be called at all.
    fn is_available(&self) -> bool;

    fn enrich_interactions(
        &self,
        drugs: &[String],
    ) -> Result<Vec<InteractionRecord>, EnrichmentError>;
}

/// Enricher that never contributes anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnricher;

impl InteractionEnricher for NoopEnricher {
    fn is_available(&self) -> bool {
        false
    }

    fn enrich_interactions(
        &self,
        _drugs: &[String],
    ) -> Result<Vec<InteractionRecord>, EnrichmentError> {
        Ok(Vec::new())
    }
}

/// Pick the HTTP provider when credentials and endpoint are set, otherwise the no-op.
pub fn enricher_from_config(
    config: &EnrichmentConfig,
) -> Result<Box<dyn InteractionEnricher>, EnrichmentError> {
    if !config.is_configured() {
        tracing::debug!("Enrichment provider not configured");
        return Ok(Box::new(NoopEnricher));
    }
    Ok(Box::new(HttpEnricher::new(config)?))
}
