//! Project-level configuration support
//!
//! Loads per-project configuration from `greenbuild.toml` or
//! `.greenbuildrc.json` in the project directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # greenbuild.toml
//!
//! [store]
//! path = ".greenbuild/ledger.redb"
//!
//! [carbon]
//! national_average = 500.0     # kg CO2e per material
//! net_zero_target = 50000.0    # kg CO2e for the whole project
//!
//! [sync]
//! settle_ms = 800
//!
//! [defaults]
//! format = "text"
//! currency = "AED"
//! ```

use crate::scoring::CarbonConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// File names searched, in order
pub const CONFIG_FILE: &str = "greenbuild.toml";
pub const JSON_CONFIG_FILE: &str = ".greenbuildrc.json";

/// Project-local data directory
pub const DATA_DIR: &str = ".greenbuild";

/// Store file inside [`DATA_DIR`]
pub const DEFAULT_STORE_FILE: &str = "ledger.redb";

/// Project-level configuration loaded from greenbuild.toml or similar
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Ledger storage
    #[serde(default)]
    pub store: StoreConfig,

    /// Carbon reference thresholds
    #[serde(default)]
    pub carbon: CarbonConfig,

    /// Sync indicator timing
    #[serde(default)]
    pub sync: SyncConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Where the ledger lives
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StoreConfig {
    /// Database file; relative paths resolve against the project directory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// Milliseconds a successful write shows as syncing (default: 800)
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            settle_ms: default_settle_ms(),
        }
    }
}

fn default_settle_ms() -> u64 {
    800
}

impl SyncConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default report format (text, json, markdown)
    #[serde(default)]
    pub format: Option<String>,

    /// Currency code shown next to costs
    #[serde(default)]
    pub currency: Option<String>,
}

impl ProjectConfig {
    /// Effective store path: explicit override > config file > default.
    /// A relative `store.path` is joined to `project_dir`.
    pub fn store_path(&self, project_dir: &Path, override_path: Option<&Path>) -> PathBuf {
        let configured = override_path.or(self.store.path.as_deref());
        match configured {
            Some(p) if p.is_absolute() => p.to_path_buf(),
            Some(p) => project_dir.join(p),
            None => project_dir.join(DATA_DIR).join(DEFAULT_STORE_FILE),
        }
    }

    pub fn currency(&self) -> &str {
        self.defaults.currency.as_deref().unwrap_or("AED")
    }

    pub fn format(&self) -> &str {
        self.defaults.format.as_deref().unwrap_or("text")
    }
}

/// Load project configuration from the project directory.
///
/// Searches for configuration files in this order:
/// 1. `greenbuild.toml`
/// 2. `.greenbuildrc.json`
///
/// Returns default configuration if no config file is found or parses.
pub fn load_project_config(project_dir: &Path) -> ProjectConfig {
    // Try TOML first (preferred format)
    let toml_path = project_dir.join(CONFIG_FILE);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    // Try JSON
    let json_path = project_dir.join(JSON_CONFIG_FILE);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", json_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load configuration from a TOML file
fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Load configuration from a JSON file
fn load_json_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Commented template written by `greenbuild init`
pub fn config_template() -> &'static str {
    r#"# GreenBuild Ledger Configuration

[store]
# Ledger database file (relative to this directory)
# path = ".greenbuild/ledger.redb"

[carbon]
# Per-material intensity below which the project leads the national average
national_average = 500.0

# Net-zero budget for the whole project (kg CO2e)
net_zero_target = 50000.0

[sync]
# How long a successful save shows as syncing (ms)
settle_ms = 800

[defaults]
# Report format: text, json, markdown
format = "text"
currency = "AED"
"#
}

#[cfg(test)]
mod tests;
