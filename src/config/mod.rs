//! Configuration module for GreenBuild
//!
//! This module handles:
//! - Project-level configuration (greenbuild.toml)
//! - Store location
//! - Carbon reference thresholds
//! - CLI defaults

mod project_config;

pub use project_config::{
    config_template, load_project_config, CliDefaults, ProjectConfig, StoreConfig, SyncConfig,
    CONFIG_FILE, DATA_DIR, DEFAULT_STORE_FILE, JSON_CONFIG_FILE,
};
