//! Score command - render the dashboard

use super::Workspace;
use crate::reporters;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

pub fn run(ws: &Workspace, format: Option<&str>, output: Option<&Path>) -> Result<()> {
    let ledger = ws.open_ledger()?;
    let report = ledger.report(&ws.config.carbon, ws.config.currency());

    let format = format.unwrap_or_else(|| ws.config.format());
    let rendered = reporters::report(&report, format)?;

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            eprintln!(
                "{} Report written to {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
