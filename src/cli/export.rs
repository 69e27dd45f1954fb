//! Export command - write the audit CSV

use super::Workspace;
use crate::reporters::{default_export_filename, write_csv};
use anyhow::{Context, Result};
use chrono::Local;
use console::style;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

pub fn run(ws: &Workspace, output: Option<&Path>) -> Result<()> {
    let ledger = ws.open_ledger()?;

    if output == Some(Path::new("-")) {
        let stdout = std::io::stdout();
        write_csv(ledger.materials(), stdout.lock())?;
        return Ok(());
    }

    let path = output.map(Path::to_path_buf).unwrap_or_else(|| {
        ws.root
            .join(default_export_filename(Local::now().date_naive()))
    });

    // Refuse before touching the filesystem
    if ledger.is_empty() {
        return Err(crate::reporters::ExportError::Empty.into());
    }

    let file = File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let rows = write_csv(ledger.materials(), BufWriter::new(file))?;
    info!("Exported {} rows to {}", rows, path.display());

    println!(
        "{} Exported {} materials to {}",
        style("✓").green(),
        rows,
        style(display_name(&path)).cyan()
    );
    Ok(())
}

/// File name for the confirmation line, or the whole path if it has none
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
