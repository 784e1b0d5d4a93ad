use expense_ledger::config::{Config, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_has_non_empty_fields() {
    let cfg = Config::default();

    assert_eq!(cfg.currency_symbol, "Rs");
    assert_eq!(cfg.storage_key, "expenses");
    assert!(cfg.color_enabled);
    assert!(cfg.data_dir.is_none());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut cfg = Config::default();
    cfg.currency_symbol = "$".to_string();
    cfg.data_dir = Some(dir.path().join("elsewhere"));

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert_eq!(
        loaded.resolve_store_dir(manager.base_dir()),
        dir.path().join("elsewhere")
    );
}

#[test]
fn config_files_with_retired_fields_still_load() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    std::fs::write(
        manager.config_path(),
        r#"{"locale":"en-US","currency_symbol":"EUR"}"#,
    )
    .expect("write config");

    let loaded = manager.load().expect("load config");
    assert_eq!(loaded.currency_symbol, "EUR");
    assert_eq!(loaded.storage_key, "expenses");
}
