//! Mock NetBox for integration tests
//!
//! Serves a tiny fixed inventory on an ephemeral localhost port from a
//! background thread. Requests without `Authorization: Token test-token`
//! (or `Bearer test-token`) get a 403 like NetBox does.

#![allow(dead_code)]

use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

pub const TOKEN: &str = "test-token";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Token {TOKEN}") || v == format!("Bearer {TOKEN}"))
}

fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({"detail": "Invalid token"})),
    )
        .into_response()
}

fn circuit(id: i64) -> Option<Value> {
    match id {
        // Both ends on node 7
        1 => Some(json!({
            "id": 1, "cid": "AMS-AMS-RING",
            "termination_a": {"id": 7, "name": "ams-core-1"},
            "termination_b": {"id": 7, "name": "ams-core-1"}
        })),
        2 => Some(json!({
            "id": 2, "cid": "AMS-FRA-001",
            "termination_a": {"id": 7, "name": "ams-core-1"},
            "termination_b": {"id": 8, "name": "fra-core-1"}
        })),
        // Same node as circuit 1
        3 => Some(json!({
            "id": 3, "cid": "AMS-AMS-RING-2",
            "termination_a": {"id": 7, "name": "ams-core-1"},
            "termination_b": {"id": 7, "name": "ams-core-1"}
        })),
        _ => None,
    }
}

async fn devices(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return forbidden();
    }
    Json(json!({
        "count": 2, "next": null, "previous": null,
        "results": [
            {"id": 7, "name": "ams-core-1"},
            {"id": 8, "name": "fra-core-1"}
        ]
    }))
    .into_response()
}

async fn circuits(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return forbidden();
    }
    let results: Vec<Value> = (1..=3).filter_map(circuit).collect();
    Json(json!({"count": results.len(), "next": null, "previous": null, "results": results}))
        .into_response()
}

async fn circuit_detail(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !authorized(&headers) {
        return forbidden();
    }
    // Circuit 99 answers with a body that is not JSON
    if id == "99" {
        return (StatusCode::OK, "<html>maintenance</html>").into_response();
    }
    match id.parse::<i64>().ok().and_then(circuit) {
        Some(c) => Json(c).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response(),
    }
}

async fn interfaces(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return forbidden();
    }
    Json(json!({
        "count": 1, "next": null, "previous": null,
        "results": [{"id": 10, "name": "xe-0/0/0", "device": "ams-core-1"}]
    }))
    .into_response()
}

/// Start the mock and return its base URL (`http://127.0.0.1:<port>`)
pub fn spawn_netbox() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Router::new()
        .route("/api/dcim/devices/", get(devices))
        .route("/api/dcim/interfaces/", get(interfaces))
        .route("/api/circuits/circuits/", get(circuits))
        .route("/api/circuits/circuits/{id}/", get(circuit_detail));

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });

    format!("http://{addr}")
}
