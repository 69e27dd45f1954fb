use super::*;
use tempfile::tempdir;

#[test]
fn test_default_config() {
    let config = ProjectConfig::default();
    assert_eq!(config.carbon.national_average, 500.0);
    assert_eq!(config.carbon.net_zero_target, 50_000.0);
    assert_eq!(config.sync.settle_delay(), Duration::from_millis(800));
    assert_eq!(config.currency(), "AED");
    assert_eq!(config.format(), "text");
    assert!(config.store.path.is_none());
}

#[test]
fn test_load_without_file_returns_defaults() {
    let dir = tempdir().unwrap();
    let config = load_project_config(dir.path());
    assert_eq!(config.sync.settle_ms, 800);
    assert_eq!(config.carbon, CarbonConfig::default());
}

#[test]
fn test_toml_parsing() {
    let toml_str = r#"
[store]
path = "data/materials.redb"

[carbon]
national_average = 350.0

[sync]
settle_ms = 0

[defaults]
format = "markdown"
currency = "USD"
"#;
    let config: ProjectConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(config.carbon.national_average, 350.0);
    // Unset keys keep their defaults
    assert_eq!(config.carbon.net_zero_target, 50_000.0);
    assert_eq!(config.sync.settle_ms, 0);
    assert_eq!(config.format(), "markdown");
    assert_eq!(config.currency(), "USD");
    assert_eq!(
        config.store.path.as_deref(),
        Some(Path::new("data/materials.redb"))
    );
}

#[test]
fn test_template_parses() {
    let config: ProjectConfig = toml::from_str(config_template()).unwrap();
    assert_eq!(config.carbon, CarbonConfig::default());
    assert_eq!(config.sync.settle_ms, 800);
    assert_eq!(config.format(), "text");
}

#[test]
fn test_load_toml_from_disk() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE),
        "[carbon]\nnet_zero_target = 1000.0\n",
    )
    .unwrap();
    let config = load_project_config(dir.path());
    assert_eq!(config.carbon.net_zero_target, 1000.0);
}

#[test]
fn test_load_json_fallback() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join(JSON_CONFIG_FILE),
        r#"{"defaults": {"currency": "EUR"}, "sync": {"settle_ms": 250}}"#,
    )
    .unwrap();
    let config = load_project_config(dir.path());
    assert_eq!(config.currency(), "EUR");
    assert_eq!(config.sync.settle_ms, 250);
}

#[test]
fn test_invalid_toml_falls_back() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE), "[carbon\nbroken").unwrap();
    std::fs::write(
        dir.path().join(JSON_CONFIG_FILE),
        r#"{"defaults": {"format": "json"}}"#,
    )
    .unwrap();
    let config = load_project_config(dir.path());
    assert_eq!(config.format(), "json");
}

#[test]
fn test_store_path_resolution() {
    let project = Path::new("/projects/tower");
    let mut config = ProjectConfig::default();
    assert_eq!(
        config.store_path(project, None),
        PathBuf::from("/projects/tower/.greenbuild/ledger.redb")
    );

    config.store.path = Some(PathBuf::from("db/ledger.redb"));
    assert_eq!(
        config.store_path(project, None),
        PathBuf::from("/projects/tower/db/ledger.redb")
    );

    // Override beats config
    assert_eq!(
        config.store_path(project, Some(Path::new("/tmp/other.redb"))),
        PathBuf::from("/tmp/other.redb")
    );
}
