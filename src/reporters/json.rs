//! JSON reporter
//!
//! Outputs the full DashboardReport as pretty-printed JSON.
//! Useful for machine consumption, piping to jq, or further processing.

use crate::models::{DashboardReport, Material};
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &DashboardReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render the ledger itself in its in-memory (camelCase) shape
pub fn render_materials(materials: &[Material]) -> Result<String> {
    Ok(serde_json::to_string_pretty(materials)?)
}
