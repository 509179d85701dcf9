//! 設定ファイルテスト

use seasoning_calc::config::{Config, DEFAULT_CATALOG_FILE};
use seasoning_calc::error::CalcError;
use std::path::PathBuf;
use tempfile::tempdir;

/// 設定ファイルが無い場合は既定値
#[test]
fn test_load_missing_config() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(
        config.resolve_catalog_path_with(None, None),
        PathBuf::from(DEFAULT_CATALOG_FILE)
    );
}

/// 保存と読み込み
#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let config = Config {
        catalog_path: Some(PathBuf::from("/srv/recipes.json")),
        default_recipe: "mapo".into(),
    };
    config.save_to(&path).expect("設定保存失敗");

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"catalogPath\""));
    assert!(content.contains("\"defaultRecipe\": \"mapo\""));

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

/// 一部の項目だけの設定ファイル
#[test]
fn test_load_partial_config() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"catalogPath": "my.json"}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.catalog_path, Some(PathBuf::from("my.json")));
    assert_eq!(config.default_recipe, "teriyaki");
}

/// 壊れた設定ファイル
#[test]
fn test_load_broken_config() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(matches!(Config::load_from(&path), Err(CalcError::JsonParse(_))));
}
