use crate::error::{CalcError, Result};
use seasoning_common::DEFAULT_RECIPE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// カタログパスを指定する環境変数
pub const CATALOG_ENV: &str = "SEASONING_CALC_CATALOG";

/// どこにも指定が無い場合のカタログ
pub const DEFAULT_CATALOG_FILE: &str = "recipes.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub catalog_path: Option<PathBuf>,
    pub default_recipe: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            default_recipe: DEFAULT_RECIPE.into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "設定を読み込みました");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CalcError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("seasoning-calc").join("config.json"))
    }

    /// カタログのパスを決める
    ///
    /// 優先順: `--catalog` > 環境変数 > 設定ファイル > `recipes.json`
    pub fn resolve_catalog_path(&self, flag: Option<&Path>) -> PathBuf {
        self.resolve_catalog_path_with(flag, std::env::var(CATALOG_ENV).ok())
    }

    pub fn resolve_catalog_path_with(&self, flag: Option<&Path>, env: Option<String>) -> PathBuf {
        if let Some(path) = flag {
            return path.to_path_buf();
        }
        if let Some(path) = env.filter(|p| !p.trim().is_empty()) {
            return PathBuf::from(path);
        }
        self.catalog_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_FILE))
    }

    pub fn set_catalog_path(&mut self, path: PathBuf) -> Result<()> {
        self.catalog_path = Some(path);
        self.save()
    }

    pub fn set_default_recipe(&mut self, key: String) -> Result<()> {
        if key.trim().is_empty() {
            return Err(CalcError::Config("レシピキーが空です".into()));
        }
        self.default_recipe = key;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_catalog_path_priority() {
        let config = Config {
            catalog_path: Some(PathBuf::from("/etc/recipes.json")),
            ..Default::default()
        };

        let flag = PathBuf::from("flag.json");
        assert_eq!(
            config.resolve_catalog_path_with(Some(&flag), Some("env.json".into())),
            PathBuf::from("flag.json")
        );
        assert_eq!(
            config.resolve_catalog_path_with(None, Some("env.json".into())),
            PathBuf::from("env.json")
        );
        assert_eq!(
            config.resolve_catalog_path_with(None, None),
            PathBuf::from("/etc/recipes.json")
        );
        assert_eq!(
            Config::default().resolve_catalog_path_with(None, Some("  ".into())),
            PathBuf::from(DEFAULT_CATALOG_FILE)
        );
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_recipe, "teriyaki");
        assert!(config.catalog_path.is_none());
    }
}
