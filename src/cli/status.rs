//! Status command - show store location and sync state

use super::Workspace;
use crate::models::SyncStatus;
use crate::store::MaterialStore;
use anyhow::Result;
use console::style;

pub fn run(ws: &Workspace) -> Result<()> {
    println!("\nGreenBuild Status\n");
    println!("  Project: {}", style(ws.root.display()).cyan());
    println!("  Ledger:  {}", style(ws.store_path.display()).dim());
    println!();

    if !ws.store_path.exists() {
        println!(
            "  {} No ledger yet. Run {}",
            style("[--]").dim(),
            style("greenbuild init").cyan()
        );
        return Ok(());
    }

    let ledger = ws.open_ledger()?;
    let status = match ledger.store().ping() {
        Ok(count) => {
            println!(
                "  {} {} materials stored",
                style("[OK]").green(),
                style(count).cyan()
            );
            ledger.sync_status()
        }
        Err(e) => {
            println!("  {} {}", style("[!!]").red(), e);
            SyncStatus::Error
        }
    };

    let label = match status {
        SyncStatus::Synced => style(status.label()).green(),
        SyncStatus::Syncing => style(status.label()).yellow(),
        SyncStatus::Error => style(status.label()).red(),
    };
    println!("  Sync:    {}", label);

    Ok(())
}
