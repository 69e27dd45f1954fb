//! Init command - set up a project for material tracking

use crate::config::{config_template, CONFIG_FILE, DATA_DIR};
use crate::store::{MaterialStore, RedbStore};
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

/// Run the init command
pub fn run(path: &Path, db: Option<&Path>) -> Result<()> {
    let project = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !project.is_dir() {
        anyhow::bail!("Path is not a directory: {}", project.display());
    }

    println!("\n{} Initializing GreenBuild\n", style("🌱").bold());

    // Create .greenbuild directory
    let data_dir = project.join(DATA_DIR);
    if data_dir.exists() {
        println!(
            "{} Already initialized at {}",
            style("✓").green(),
            style(data_dir.display()).cyan()
        );
    } else {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create {} directory", DATA_DIR))?;
        println!(
            "{} Created {}",
            style("✓").green(),
            style(data_dir.display()).cyan()
        );
    }

    // Create config file
    let config_path = project.join(CONFIG_FILE);
    if config_path.exists() {
        println!(
            "{} Keeping existing {}",
            style("✓").green(),
            style(CONFIG_FILE).cyan()
        );
    } else {
        std::fs::write(&config_path, config_template())
            .with_context(|| format!("Failed to create {}", CONFIG_FILE))?;
        println!(
            "{} Created {}",
            style("✓").green(),
            style(CONFIG_FILE).cyan()
        );
    }

    // Create the store so later commands find it
    let config = crate::config::load_project_config(&project);
    let store_path = config.store_path(&project, db);
    let store = RedbStore::open(&store_path)
        .with_context(|| format!("Failed to create ledger at {}", store_path.display()))?;
    let count = store.ping().context("Ledger store is not readable")?;
    println!(
        "{} Ledger ready at {} ({} materials)",
        style("✓").green(),
        style(store_path.display()).cyan(),
        count
    );

    println!(
        "\nNext: {}",
        style("greenbuild add --name \"...\" --cost 1000").cyan()
    );

    Ok(())
}
