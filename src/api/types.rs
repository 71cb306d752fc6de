//! Shared types for the HTTP layer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisResult, Analyzer};
use crate::extraction::DrugInput;

use super::error::ApiError;

pub const MAX_AGE: i64 = 120;

// ═══════════════════════════════════════════════════════════
// API context: shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared, read-only context for all routes.
#[derive(Clone)]
pub struct ApiContext {
    pub analyzer: Arc<Analyzer>,
}

impl ApiContext {
    pub fn new(analyzer: Arc<Analyzer>) -> Self {
        Self { analyzer }
    }
}

// ═══════════════════════════════════════════════════════════
// Analyze request / response
// ═══════════════════════════════════════════════════════════

/// `POST /analyze` body. `drugs`, when non-empty, replaces the text.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub age: i64,
    #[serde(default)]
    pub prescription_text: Option<String>,
    #[serde(default)]
    pub drugs: Option<Vec<DrugInput>>,
    /// Per-request provider key. Only ever sent to the configured
    /// `ENRICHMENT_URL`; requests cannot choose the endpoint.
    #[serde(default)]
    pub enrichment_api_key: Option<String>,
}

impl AnalyzeRequest {
    /// The core assumes a pre-validated age, so the range is enforced here.
    pub fn validated_age(&self) -> Result<u32, ApiError> {
        if (0..=MAX_AGE).contains(&self.age) {
            Ok(self.age as u32)
        } else {
            Err(ApiError::BadRequest(format!(
                "age must be between 0 and {MAX_AGE}, got {}",
                self.age
            )))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub age: u32,
    #[serde(flatten)]
    pub result: AnalysisResult,
}
