//! Drug knowledge base: immutable reference data loaded once at startup.
//!
//! Provides name normalization (canonical names and aliases), age-tiered
//! dose guidance and daily limits, pairwise interactions, and substitutes.
//! Nothing here mutates after `KnowledgeBase::load`, so a single instance
//! is shared read-only across all requests.

mod age;
mod base;
mod types;

use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Knowledge base load failed ({0}): {1}")]
    Load(String, String),

    #[error("Knowledge base parse failed: {0}")]
    Parse(String),

    #[error("Duplicate canonical drug name: {0}")]
    DuplicateDrug(String),
}

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports
// ═══════════════════════════════════════════════════════════════════════════

pub use age::{AgeGroup, AgeTier};
pub use base::{normalize_key, KnowledgeBase};
pub use types::{DoseLimit, DrugRecord, InteractionRecord, KnowledgeData};
