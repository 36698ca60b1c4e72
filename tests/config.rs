use medfind_drafts::config::Config;
use std::time::Duration;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.drafts.namespace, "medfind");
    assert_eq!(config.drafts.max_drafts, 10);
    assert!(config.drafts.autosave_enabled);
    assert_eq!(config.drafts.autosave_interval_secs, 30);
    assert_eq!(config.storage.quota_bytes, 5 * 1024 * 1024);
    assert!(config.storage.data_dir.is_none());
    assert!(!config.logging.enabled);
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    // Zero drafts cannot hold anything
    config.drafts.max_drafts = 0;
    assert!(config.validate().is_err());

    // Reset and test invalid autosave interval
    config.drafts.max_drafts = 5;
    config.drafts.autosave_interval_secs = 100_000;
    assert!(config.validate().is_err());

    config.drafts.autosave_interval_secs = 30;
    config.drafts.namespace = "  ".to_string();
    assert!(config.validate().is_err());

    config.drafts.namespace = "reports".to_string();
    config.logging.level = "loud".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_store_options_from_config() {
    let mut config = Config::default();
    config.drafts.max_drafts = 3;
    config.drafts.autosave_interval_secs = 5;

    let options = config.drafts.store_options();
    assert_eq!(options.max_drafts, 3);
    assert!(options.autosave_enabled);
    assert_eq!(options.autosave_interval, Duration::from_secs(5));
}

#[test]
fn test_zero_quota_means_unlimited() {
    let mut config = Config::default();
    assert_eq!(config.storage.quota(), Some(5 * 1024 * 1024));

    config.storage.quota_bytes = 0;
    assert_eq!(config.storage.quota(), None);
}

#[test]
fn test_partial_config_deserialization() {
    // Test that partial TOML configs merge with defaults
    let partial_toml = r#"
[drafts]
namespace = "search-drafts"
max_drafts = 25

[logging]
enabled = true
level = "debug"
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    // Check that specified values are used
    assert_eq!(config.drafts.namespace, "search-drafts");
    assert_eq!(config.drafts.max_drafts, 25);
    assert!(config.logging.enabled);
    assert_eq!(config.logging.level_filter().unwrap(), log::LevelFilter::Debug);

    // Check that unspecified values use defaults
    assert!(config.drafts.autosave_enabled);
    assert_eq!(config.drafts.autosave_interval_secs, 30);
    assert_eq!(config.storage.quota_bytes, 5 * 1024 * 1024);
}

#[test]
fn test_empty_config_deserialization() {
    let config: Config = toml::from_str("").unwrap();
    let default_config = Config::default();

    assert_eq!(config.drafts.namespace, default_config.drafts.namespace);
    assert_eq!(config.drafts.max_drafts, default_config.drafts.max_drafts);
    assert_eq!(config.logging.enabled, default_config.logging.enabled);
    assert_eq!(config.storage.quota_bytes, default_config.storage.quota_bytes);
}

#[test]
fn test_load_from_file_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[drafts]\nmax_drafts = 0\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("max_drafts"));
}

#[test]
fn test_generate_config_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("nested").join("config.toml");

    let result = Config::generate_default_config(&config_path);
    assert!(result.is_ok());
    assert!(config_path.exists());

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("# medfind-drafts Configuration File"));
    assert!(content.contains("namespace = \"medfind\""));

    // The generated file loads back to the defaults
    let loaded = Config::load_from_file(&config_path).unwrap();
    assert_eq!(loaded.drafts.max_drafts, 10);
}
