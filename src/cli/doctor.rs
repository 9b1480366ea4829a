//! Doctor command - check configuration and NetBox reachability

use crate::config::UserConfig;
use crate::inventory::{InventoryCatalog, NetboxClient};
use anyhow::Result;

pub fn run(config: &UserConfig) -> Result<()> {
    println!("🩺 netimpact Doctor\n");

    let mut failures = 0;

    println!("✓ NetBox URL: {}", config.netbox_url());

    match config.auth_scheme() {
        Ok(scheme) => println!("✓ Auth scheme: {}", scheme),
        Err(e) => {
            println!("✗ Auth scheme: {}", e);
            failures += 1;
        }
    }

    match config.weights() {
        Ok(w) => println!(
            "✓ Weights: device={} circuit={} interface={} redundancy_discount={}",
            w.device_weight, w.circuit_weight, w.interface_weight, w.redundancy_discount
        ),
        Err(e) => {
            println!("✗ {}", e);
            failures += 1;
        }
    }

    match config.inventory_settings() {
        Ok(settings) => {
            println!(
                "✓ Token: {}",
                config.masked_token().unwrap_or_default()
            );
            let client = NetboxClient::new(settings);
            if !check_reachability(&client) {
                failures += 1;
            }
        }
        Err(e) => {
            println!("✗ {:#}", e);
            println!("○ NetBox reachability: skipped");
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{} check(s) failed", failures);
    }
    println!("\n✅ All checks passed!");
    Ok(())
}

/// One authenticated list call proves the URL, token and scheme all work
fn check_reachability<C: InventoryCatalog>(catalog: &C) -> bool {
    match catalog.list_devices() {
        Ok(devices) => {
            println!("✓ NetBox reachable ({} devices on first page)", devices.len());
            true
        }
        Err(e) => {
            println!("✗ NetBox unreachable: {}", e);
            false
        }
    }
}
