//! List command - show the ledger

use super::Workspace;
use crate::reporters::{render_ledger, render_materials};
use anyhow::Result;

pub fn run(ws: &Workspace, format: &str) -> Result<()> {
    let ledger = ws.open_ledger()?;

    match format {
        "json" => println!("{}", render_materials(ledger.materials())?),
        _ => print!("{}", render_ledger(ledger.materials(), ws.config.currency())),
    }

    Ok(())
}
