//! Calculate command - one-shot scoring from flags

use super::interactive::parse_ids;
use crate::config::UserConfig;
use crate::inventory::{CircuitLookup, NetboxClient};
use crate::models::ImpactRequest;
use crate::reporters::{report_with_format, OutputFormat};
use crate::scoring::ImpactScorer;
use anyhow::{Context, Result};
use tracing::warn;

pub fn run(
    config: &UserConfig,
    devices: &str,
    circuits: &str,
    interfaces: &str,
    impact_type: &str,
    format: OutputFormat,
) -> Result<()> {
    let request = build_request(devices, circuits, interfaces, impact_type);

    // Circuits are the only thing that needs NetBox
    let output = if request.circuit_ids.is_empty() && !config.has_token() {
        render(&Offline, config, &request, format)?
    } else {
        let client = NetboxClient::new(config.inventory_settings()?);
        render(&client, config, &request, format)?
    };

    println!("{}", output);
    Ok(())
}

fn build_request(devices: &str, circuits: &str, interfaces: &str, impact_type: &str) -> ImpactRequest {
    let request = ImpactRequest {
        device_ids: parse_ids(devices),
        circuit_ids: parse_ids(circuits),
        interface_ids: parse_ids(interfaces),
        impact_type: impact_type.trim().to_string(),
    };
    if !request.impact_type.is_empty() && request.work_type().is_none() {
        warn!("Unknown impact type '{}', using multiplier 1.0", request.impact_type);
    }
    request
}

fn render<L: CircuitLookup>(
    lookup: &L,
    config: &UserConfig,
    request: &ImpactRequest,
    format: OutputFormat,
) -> Result<String> {
    let scorer = ImpactScorer::with_weights(lookup, config.weights()?);
    let result = scorer
        .calculate(request)
        .context("Error calculating impact")?;
    report_with_format(&result, format)
}

/// Lookup used when no circuits are requested and no token is configured
struct Offline;

impl CircuitLookup for Offline {
    fn fetch_circuit(&self, id: i64) -> crate::inventory::InventoryResult<crate::models::Circuit> {
        Err(crate::inventory::InventoryError::Transport {
            endpoint: format!("/api/circuits/circuits/{}/", id),
            message: "no NetBox token configured".to_string(),
        })
    }
}
