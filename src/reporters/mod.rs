//! Output reporters for impact results
//!
//! Supports two output formats:
//! - `json` - Indented JSON, same shape as the HTTP response
//! - `text` - Terminal output with colors

mod json;
mod text;

use crate::models::ImpactResult;
use anyhow::{anyhow, Result};
use std::str::FromStr;

pub use json::render_compact;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: json, text",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

/// Render an impact result using an OutputFormat enum
pub fn report_with_format(result: &ImpactResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::render(result),
        OutputFormat::Text => text::render(result),
    }
}
