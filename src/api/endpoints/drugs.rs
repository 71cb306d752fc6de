use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct DrugsResponse {
    pub drugs: Vec<String>,
}

/// `GET /drugs`: canonical names known to the knowledge base.
pub async fn list(State(ctx): State<ApiContext>) -> Json<DrugsResponse> {
    let drugs = ctx
        .analyzer
        .knowledge()
        .list_drugs()
        .into_iter()
        .map(String::from)
        .collect();

    Json(DrugsResponse { drugs })
}
