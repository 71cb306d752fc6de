//! Prescription analysis endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::analysis::{AnalysisResult, Analyzer};
use crate::api::error::ApiError;
use crate::api::types::{AnalyzeRequest, AnalyzeResponse, ApiContext};

/// `POST /analyze`: extract drugs and check them for the patient's age.
///
/// The analysis is synchronous and may make a blocking enrichment call,
/// so it runs on the blocking pool.
pub async fn analyze(
    State(ctx): State<ApiContext>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let age = request.validated_age()?;

    let analyzer = ctx.analyzer.clone();
    let result = tokio::task::spawn_blocking(move || run_analysis(&analyzer, &request, age)).await?;

    tracing::info!(
        age,
        drugs = result.drugs_parsed.len(),
        interactions = result.interactions.len(),
        warnings = result.warnings.len(),
        "Analyze request served"
    );

    Ok(Json(AnalyzeResponse { age, result }))
}

fn run_analysis(analyzer: &Analyzer, request: &AnalyzeRequest, age: u32) -> AnalysisResult {
    let items = analyzer.extract(request.prescription_text.as_deref(), request.drugs.as_deref());

    let Some(api_key) = request.enrichment_api_key.as_deref() else {
        return analyzer.check(items, age);
    };

    match analyzer.enricher_with_key(api_key) {
        Ok(Some(enricher)) => analyzer.check_with(items, age, &enricher),
        Ok(None) => analyzer.check(items, age),
        Err(e) => {
            tracing::warn!(error = %e, "Per-request enrichment unavailable, using default provider");
            analyzer.check(items, age)
        }
    }
}
