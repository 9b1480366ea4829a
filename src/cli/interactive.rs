//! Interactive runner - pick elements from the inventory at a prompt

use crate::config::UserConfig;
use crate::inventory::{CircuitLookup, InventoryCatalog, NetboxClient};
use crate::models::{ImpactRequest, ImpactResult, WorkType};
use crate::reporters::{report_with_format, OutputFormat};
use crate::scoring::ImpactScorer;
use anyhow::{Context, Result};
use console::style;
use std::io::{BufRead, Write};
use tracing::warn;

/// Run the interactive flow on stdin/stdout against NetBox
pub fn run(config: &UserConfig, format: OutputFormat) -> Result<()> {
    let client = NetboxClient::new(config.inventory_settings()?);
    let scorer = ImpactScorer::with_weights(&client, config.weights()?);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    run_session(&client, &scorer, stdin.lock(), &mut stdout, format)?;
    Ok(())
}

/// Parse comma-separated ids, silently dropping anything that is not an integer
pub fn parse_ids(input: &str) -> Vec<i64> {
    input
        .trim()
        .split(',')
        .filter_map(|part| part.trim().parse::<i64>().ok())
        .collect()
}

/// Print `text`, then read one line. End of input reads as an empty answer.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> Result<String> {
    write!(out, "{}", text)?;
    out.flush()?;
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}

/// Walk the operator through devices, circuits, interfaces and work type,
/// then score and print the result.
pub fn run_session<C, L, R, W>(
    catalog: &C,
    scorer: &ImpactScorer<L>,
    mut input: R,
    out: &mut W,
    format: OutputFormat,
) -> Result<ImpactResult>
where
    C: InventoryCatalog,
    L: CircuitLookup,
    R: BufRead,
    W: Write,
{
    let devices = catalog
        .list_devices()
        .context("Error fetching devices")?;
    writeln!(out, "{}", style("Available Devices:").bold())?;
    for d in &devices {
        writeln!(out, "ID: {}, Name: {}", d.id, d.name)?;
    }
    let device_ids = parse_ids(&prompt(&mut input, out, "Enter device IDs (comma-separated): ")?);

    let circuits = catalog
        .list_circuits()
        .context("Error fetching circuits")?;
    writeln!(out, "\n{}", style("Available Circuits:").bold())?;
    for c in &circuits {
        writeln!(
            out,
            "ID: {}, CID: {}, TerminationA: {}, TerminationB: {}",
            c.id, c.cid, c.termination_a.name, c.termination_b.name
        )?;
    }
    let circuit_ids = parse_ids(&prompt(&mut input, out, "Enter circuit IDs (comma-separated): ")?);

    let interfaces = catalog
        .list_interfaces()
        .context("Error fetching interfaces")?;
    writeln!(out, "\n{}", style("Available Interfaces:").bold())?;
    for i in &interfaces {
        writeln!(out, "ID: {}, Name: {}, Device: {}", i.id, i.name, i.device)?;
    }
    let interface_ids = parse_ids(&prompt(
        &mut input,
        out,
        "Enter interface IDs (comma-separated): ",
    )?);

    let labels: Vec<&str> = WorkType::all().iter().map(|w| w.label()).collect();
    let impact_type = prompt(
        &mut input,
        out,
        &format!("\nEnter impact type ({}): ", labels.join(", ")),
    )?;

    let request = ImpactRequest {
        device_ids,
        circuit_ids,
        interface_ids,
        impact_type,
    };
    if !request.impact_type.is_empty() && request.work_type().is_none() {
        warn!("Unknown impact type '{}', using multiplier 1.0", request.impact_type);
    }
    let result = scorer
        .calculate(&request)
        .context("Error calculating impact")?;

    writeln!(
        out,
        "\n{}\n{}",
        style("Detailed Impact Result:").bold(),
        report_with_format(&result, format)?
    )?;
    Ok(result)
}
