//! Text (terminal) reporter with colors and formatting

use crate::models::{CircuitImpactDetail, ImpactResult};
use anyhow::Result;

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Color by multiplier severity
fn multiplier_color(multiplier: f64) -> &'static str {
    if multiplier >= 10.0 {
        "\x1b[31m" // Red
    } else if multiplier > 1.0 {
        "\x1b[33m" // Yellow
    } else {
        "\x1b[32m" // Green
    }
}

/// Render result as formatted terminal output
pub fn render(result: &ImpactResult) -> Result<String> {
    let mut out = String::new();
    let b = &result.breakdown;

    // Header
    let mult_c = multiplier_color(result.multiplier);
    out.push_str(&format!("\n{BOLD}Impact Analysis{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Total impact: {BOLD}{}{RESET}  ({} before multiplier × {mult_c}{}{RESET})\n\n",
        format_num(result.total_impact),
        format_num(result.total_impact_before_multiplier),
        format_num(result.multiplier)
    ));

    out.push_str(&format!("{BOLD}BREAKDOWN{RESET}\n"));
    out.push_str(&format!(
        "  Devices:           {:>4} × {:<5} = {}\n",
        b.devices.count,
        format_num(b.devices.weight_per_device),
        format_num(b.devices.impact)
    ));
    out.push_str(&format!(
        "  Implicit devices:  {:>4} × {:<5} = {}\n",
        b.implicit_devices.count,
        format_num(b.implicit_devices.weight_per_device),
        format_num(b.implicit_devices.impact)
    ));
    out.push_str(&format!(
        "  Circuits:          {:>4}         = {}\n",
        b.circuits.items.len(),
        format_num(b.circuits.total_impact)
    ));
    out.push_str(&format!(
        "  Interfaces:        {:>4} × {:<5} = {}\n",
        b.interfaces.count,
        format_num(b.interfaces.weight_per_interface),
        format_num(b.interfaces.impact)
    ));

    if !b.circuits.items.is_empty() {
        out.push_str(&format!("\n{BOLD}CIRCUITS{RESET}\n"));
        out.push_str(&format!(
            "{DIM}  ID      CID                   WEIGHT  FACTOR  IMPACT{RESET}\n"
        ));
        for item in &b.circuits.items {
            out.push_str(&circuit_line(item));
        }
    }
    out.push('\n');

    Ok(out)
}

fn circuit_line(item: &CircuitImpactDetail) -> String {
    // Truncate long circuit ids on char boundaries
    let cid: String = if item.cid.chars().count() > 20 {
        let head: String = item.cid.chars().take(17).collect();
        format!("{}...", head)
    } else {
        item.cid.clone()
    };
    let marker = if item.redundancy_factor < 1.0 {
        format!("  {DIM}(redundant){RESET}")
    } else {
        String::new()
    };
    format!(
        "  {:<6}  {:<20}  {:>6}  {:>6}  {:>6}{}\n",
        item.id,
        cid,
        format_num(item.weight),
        format_num(item.redundancy_factor),
        format_num(item.impact),
        marker
    )
}

/// Two decimals at most, trailing zeros trimmed
fn format_num(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
