//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub drug_count: usize,
    pub enrichment_available: bool,
}

/// `GET /health`: liveness plus a glance at the loaded knowledge base.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        drug_count: ctx.analyzer.knowledge().drug_count(),
        enrichment_available: ctx.analyzer.enrichment_available(),
    })
}
