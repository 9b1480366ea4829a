//! HTTP service
//!
//! Exposes the scorer on a single route:
//!
//! ```text
//! POST /calculateImpact
//! {"device_ids": [1, 2], "circuit_ids": [5], "interface_ids": [10], "impact_type": "fiber-works"}
//! ```
//!
//! Every other route and method falls through to a default handler. Uses
//! axum on a tokio multi-threaded runtime; scoring runs on the blocking pool
//! because inventory lookups are synchronous HTTP calls.

mod routes;

pub use routes::{router, CALCULATE_IMPACT_PATH, DEFAULT_BODY};

use anyhow::{Context, Result};
use axum::Router;
use tracing::info;

/// Bind `addr` and serve `app` until Ctrl-C
pub async fn serve(addr: &str, app: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    let local = listener.local_addr()?;

    info!("Impact API listening on http://{}", local);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown requested");
        })
        .await?;

    Ok(())
}
