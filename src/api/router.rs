//! HTTP router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Layers (outermost → innermost): CORS → request tracing → handler.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::analysis::Analyzer;
use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the API router around a shared analyzer.
pub fn api_router(analyzer: Arc<Analyzer>) -> Router {
    build_router(ApiContext::new(analyzer))
}

fn build_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/drugs", get(endpoints::drugs::list))
        .route("/analyze", post(endpoints::analyze::analyze))
        .with_state(ctx)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::config::EnrichmentConfig;
    use crate::enrichment::test_support::serve_once;
    use crate::knowledge::KnowledgeBase;

    fn test_router() -> Router {
        let analyzer = Analyzer::without_enrichment(Arc::new(KnowledgeBase::load_test()));
        api_router(Arc::new(analyzer))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["drug_count"], 6);
        assert_eq!(json["enrichment_available"], false);
    }

    #[tokio::test]
    async fn drugs_lists_canonical_names() {
        let req = Request::builder().uri("/drugs").body(Body::empty()).unwrap();
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["drugs"][0], "Paracetamol");
        assert_eq!(json["drugs"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn analyze_free_text() {
        let req = post_json(
            "/analyze",
            r#"{"age": 30, "prescription_text": "Take Paracetamol 500mg twice daily"}"#,
        );
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["age"], 30);
        assert_eq!(
            json["drugs_parsed"],
            serde_json::json!([{"drug": "Paracetamol", "dose_mg": 500, "frequency_per_day": 2}])
        );
        assert_eq!(json["dosage_guidance"]["Paracetamol"]["max_daily_mg"], 4000);
    }

    #[tokio::test]
    async fn analyze_explicit_list_wins_over_text() {
        let req = post_json(
            "/analyze",
            r#"{"age": 45,
                "prescription_text": "Paracetamol 500 mg",
                "drugs": [{"drug": "Ibuprofen", "dose_mg": 800, "frequency_per_day": 4}]}"#,
        );
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["drugs_parsed"].as_array().unwrap().len(), 1);
        assert_eq!(json["drugs_parsed"][0]["drug"], "Ibuprofen");
        assert_eq!(json["warnings"][0]["issue"], "Dose exceeds max daily limit");
        assert_eq!(json["warnings"][0]["computed_mg_per_day"], 3200);
        assert_eq!(json["warnings"][0]["max_daily_mg"], 2400);
    }

    #[tokio::test]
    async fn analyze_without_input_is_empty() {
        let response = test_router()
            .oneshot(post_json("/analyze", r#"{"age": 5}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert!(json["drugs_parsed"].as_array().unwrap().is_empty());
        assert!(json["interactions"].as_array().unwrap().is_empty());
        assert_eq!(json["dosage_guidance"], serde_json::json!({}));
        assert_eq!(json["alternatives"], serde_json::json!({}));
    }

    #[tokio::test]
    async fn analyze_rejects_out_of_range_age() {
        for age in ["-1", "121"] {
            let body = format!(r#"{{"age": {age}, "prescription_text": "Aspirin"}}"#);
            let response = test_router()
                .oneshot(post_json("/analyze", &body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "age {age}");
            let json = json_body(response).await;
            assert_eq!(json["error"]["code"], "BAD_REQUEST");
        }
    }

    #[tokio::test]
    async fn analyze_rejects_malformed_body() {
        let response = test_router()
            .oneshot(post_json("/analyze", r#"{"prescription_text": "Aspirin"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn analyze_never_contacts_request_supplied_endpoint() {
        let (configured_url, configured) = serve_once("200 OK", r#"{"interactions": []}"#);
        let config = EnrichmentConfig {
            api_key: String::new(),
            url: configured_url,
            timeout_secs: 2,
        };
        let analyzer =
            Analyzer::from_config(Arc::new(KnowledgeBase::load_test()), &config).unwrap();

        let internal = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        internal.set_nonblocking(true).unwrap();
        let body = format!(
            r#"{{"age": 30,
                "prescription_text": "Warfarin 5 mg od, Aspirin 75 mg od",
                "enrichment_api_key": "caller-key",
                "enrichment_url": "http://{}/internal/admin"}}"#,
            internal.local_addr().unwrap()
        );

        let response = api_router(Arc::new(analyzer))
            .oneshot(post_json("/analyze", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let received = configured.join().unwrap();
        assert!(received.starts_with("POST /interactions "), "{received}");
        assert!(received.contains("Bearer caller-key"), "{received}");
        let err = internal.accept().unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::WouldBlock);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let req = Request::builder().uri("/nonexistent").body(Body::empty()).unwrap();
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
