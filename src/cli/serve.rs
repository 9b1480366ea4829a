//! Serve command handler

use crate::config::UserConfig;
use crate::inventory::NetboxClient;
use crate::scoring::ImpactScorer;
use anyhow::{Context, Result};
use tracing::info;

/// Run the HTTP service until Ctrl-C
pub fn run(config: &UserConfig, bind: Option<String>, port: Option<u16>) -> Result<()> {
    let settings = config.inventory_settings()?;
    let weights = config.weights()?;

    let bind = bind.unwrap_or_else(|| config.bind().to_string());
    let port = port.unwrap_or_else(|| config.port());
    let addr = listen_addr(&bind, port);

    info!("Using NetBox at {}", settings.base_url);
    let scorer = ImpactScorer::with_weights(NetboxClient::new(settings), weights);
    let app = crate::server::router(scorer);

    let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    runtime.block_on(crate::server::serve(&addr, app))
}

/// `host:port`, bracketing bare IPv6 addresses
fn listen_addr(bind: &str, port: u16) -> String {
    if bind.contains(':') && !bind.starts_with('[') {
        format!("[{}]:{}", bind, port)
    } else {
        format!("{}:{}", bind, port)
    }
}
