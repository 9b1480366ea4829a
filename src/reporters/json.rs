//! JSON reporter
//!
//! Outputs the full ImpactResult as indented JSON, the same document the
//! `/calculateImpact` endpoint returns.

use crate::models::ImpactResult;
use anyhow::Result;

/// Render result as pretty-printed JSON (2-space indent)
pub fn render(result: &ImpactResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Render result as compact JSON (single line)
pub fn render_compact(result: &ImpactResult) -> Result<String> {
    Ok(serde_json::to_string(result)?)
}
