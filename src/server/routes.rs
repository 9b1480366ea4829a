//! Route handlers for the impact API

use crate::inventory::CircuitLookup;
use crate::models::ImpactRequest;
use crate::reporters::render_compact;
use crate::scoring::ImpactScorer;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const CALCULATE_IMPACT_PATH: &str = "/calculateImpact";

/// Body served for every route other than `POST /calculateImpact`
pub const DEFAULT_BODY: &str = "Netbox Impact API";

struct AppState<L> {
    scorer: Arc<ImpactScorer<L>>,
}

impl<L> Clone for AppState<L> {
    fn clone(&self) -> Self {
        Self {
            scorer: Arc::clone(&self.scorer),
        }
    }
}

/// Build the service router around a scorer
pub fn router<L>(scorer: ImpactScorer<L>) -> Router
where
    L: CircuitLookup + Send + Sync + 'static,
{
    let state = AppState {
        scorer: Arc::new(scorer),
    };

    Router::new()
        .route(
            CALCULATE_IMPACT_PATH,
            post(calculate_impact::<L>).fallback(default_handler),
        )
        .fallback(default_handler)
        .with_state(state)
}

async fn default_handler() -> &'static str {
    DEFAULT_BODY
}

fn plain_error(status: StatusCode, message: String) -> Response {
    (status, format!("{}\n", message)).into_response()
}

async fn calculate_impact<L>(State(state): State<AppState<L>>, body: Bytes) -> Response
where
    L: CircuitLookup + Send + Sync + 'static,
{
    // Decode by hand so every malformed body maps to 400, whatever the content type.
    // A bare `null` body is an empty request.
    let request: ImpactRequest = match serde_json::from_slice::<Option<ImpactRequest>>(&body) {
        Ok(request) => request.unwrap_or_default(),
        Err(e) => {
            warn!("Rejected impact request: {}", e);
            return plain_error(StatusCode::BAD_REQUEST, "Invalid request payload".to_string());
        }
    };

    info!(
        "Impact request: {} devices, {} circuits, {} interfaces, type '{}'",
        request.device_ids.len(),
        request.circuit_ids.len(),
        request.interface_ids.len(),
        request.impact_type
    );

    let scorer = Arc::clone(&state.scorer);
    let outcome = tokio::task::spawn_blocking(move || scorer.calculate(&request)).await;

    let result = match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            error!("Impact calculation failed: {}", e);
            return plain_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error calculating impact: {}", e),
            );
        }
        Err(e) => {
            error!("Impact calculation task failed: {}", e);
            return plain_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error calculating impact: {}", e),
            );
        }
    };

    match render_compact(&result) {
        Ok(json) => ([(header::CONTENT_TYPE, "application/json")], json).into_response(),
        Err(e) => plain_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error encoding result: {}", e),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::fake::FakeInventory;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn app(inv: Arc<FakeInventory>) -> Router {
        router(ImpactScorer::new(inv))
    }

    async fn send(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, String, Option<String>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap(), content_type)
    }

    #[tokio::test]
    async fn test_calculate_returns_breakdown() {
        let inv = Arc::new(FakeInventory::default().with_circuit(1, 7, 7));
        let body = r#"{"device_ids":[],"circuit_ids":[1],"interface_ids":[],"impact_type":"incident-work"}"#;

        let (status, text, content_type) = send(app(inv), "POST", CALCULATE_IMPACT_PATH, body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!((json["total_impact"].as_f64().unwrap() - 74.0).abs() < 1e-9);
        assert_eq!(json["multiplier"], 10.0);
        assert_eq!(json["breakdown"]["implicit_devices"]["count"], 1);
        assert_eq!(json["breakdown"]["circuits"]["items"][0]["cid"], "CID-1");
    }

    #[tokio::test]
    async fn test_calculate_with_partial_body() {
        let inv = Arc::new(FakeInventory::default());
        let (status, text, _) =
            send(app(inv), "POST", CALCULATE_IMPACT_PATH, r#"{"device_ids":[1,2],"interface_ids":[10]}"#).await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["total_impact"], 11.0);
        assert_eq!(json["multiplier"], 1.0);
    }

    #[tokio::test]
    async fn test_padded_label_is_unknown() {
        let inv = Arc::new(FakeInventory::default());
        let body = r#"{"device_ids":[1],"impact_type":" incident-work "}"#;

        let (status, text, _) = send(app(inv), "POST", CALCULATE_IMPACT_PATH, body).await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["multiplier"], 1.0);
        assert_eq!(json["total_impact"], 5.0);
    }

    #[tokio::test]
    async fn test_null_fields_are_empty() {
        let inv = Arc::new(FakeInventory::default());
        let body = r#"{"device_ids":null,"circuit_ids":null,"interface_ids":[1],"impact_type":null}"#;

        let (status, text, _) = send(app(inv.clone()), "POST", CALCULATE_IMPACT_PATH, body).await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["total_impact"], 1.0);
        assert_eq!(json["breakdown"]["devices"]["count"], 0);
        assert!(inv.lookups().is_empty());
    }

    #[tokio::test]
    async fn test_null_body_is_empty_request() {
        let inv = Arc::new(FakeInventory::default());

        let (status, text, _) = send(app(inv), "POST", CALCULATE_IMPACT_PATH, "null").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["total_impact"], 0.0);
        assert_eq!(json["multiplier"], 1.0);
        assert_eq!(json["breakdown"]["circuits"]["items"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let inv = Arc::new(FakeInventory::default().with_circuit(1, 1, 2));
        for body in ["", "not json", r#"{"device_ids":"one"}"#, "[1,2,3]"] {
            let (status, text, _) = send(app(inv.clone()), "POST", CALCULATE_IMPACT_PATH, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body:?}");
            assert_eq!(text.trim(), "Invalid request payload");
        }
        assert!(inv.lookups().is_empty());
    }

    #[tokio::test]
    async fn test_failed_lookup_is_server_error() {
        let inv = Arc::new(FakeInventory::default().with_circuit(1, 1, 2));
        let body = r#"{"circuit_ids":[1,99,1],"impact_type":"planned-work"}"#;

        let (status, text, _) = send(app(inv.clone()), "POST", CALCULATE_IMPACT_PATH, body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(text.starts_with("Error calculating impact: failed to fetch circuit 99"));
        assert_eq!(inv.lookups(), vec![1, 99]);
    }

    #[tokio::test]
    async fn test_other_routes_fall_through() {
        let inv = Arc::new(FakeInventory::default());
        for (method, uri) in [
            ("GET", "/"),
            ("GET", "/health"),
            ("GET", CALCULATE_IMPACT_PATH),
            ("POST", "/calculateimpact"),
        ] {
            let (status, text, _) = send(app(inv.clone()), method, uri, "").await;
            assert_eq!(status, StatusCode::OK, "{method} {uri}");
            assert_eq!(text, DEFAULT_BODY);
        }
    }
}
