//! レシピカタログ
//!
//! レシピJSONを読み込み、各調味料の計算式と塩分情報をコンパイルして保持する。
//!
//! 対応するドキュメント形式:
//! - スキーマ1: `{ "<key>": <recipe>, ... }`（位置方式）
//! - スキーマ2: `{ "schemaVersion": 2, "recipes": { "<key>": <recipe>, ... } }`（役割方式）

use crate::engine::{self, EvaluationResult};
use crate::error::{EvaluationError, FormulaError, LoadError};
use crate::formula::CompiledFormula;
use crate::salt::SaltInfo;
use crate::types::{CondimentRecord, Cuisine, DependencyMode, RecipeRecord, Role};
use serde_json::{Map, Value};

const SCHEMA_VERSION_KEY: &str = "schemaVersion";
const RECIPES_KEY: &str = "recipes";

/// コンパイル済みの調味料
#[derive(Debug, Clone, PartialEq)]
pub struct Condiment {
    pub name: String,
    pub unit: String,
    /// 元の計算式文字列
    pub formula: String,
    pub is_fixed_text: bool,
    /// 明示された役割、無ければ表示名から推定した役割
    pub role: Option<Role>,
    compiled: CompiledFormula,
}

impl Condiment {
    fn from_record(record: CondimentRecord) -> Self {
        let compiled = CompiledFormula::compile(&record.formula, record.is_fixed_text);
        let role = record.role.or_else(|| Role::infer(&record.name));
        Self {
            name: record.name,
            unit: record.unit,
            formula: record.formula,
            is_fixed_text: record.is_fixed_text,
            role,
            compiled,
        }
    }

    pub fn compiled(&self) -> &CompiledFormula {
        &self.compiled
    }
}

/// コンパイル済みのレシピ
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub key: String,
    pub name: String,
    pub cuisine: Cuisine,
    pub default_salt_info: String,
    pub salt_formula: Option<String>,
    /// 評価順（順序に意味がある）
    pub condiments: Vec<Condiment>,
    salt_info: SaltInfo,
    mode: DependencyMode,
}

impl Recipe {
    /// レコードからコンパイルする
    pub fn compile(key: impl Into<String>, record: RecipeRecord, mode: DependencyMode) -> Self {
        let salt_info = SaltInfo::compile(&record.default_salt_info, record.salt_formula.as_deref());
        Self {
            key: key.into(),
            name: record.name,
            cuisine: record.cuisine,
            default_salt_info: record.default_salt_info,
            salt_formula: record.salt_formula,
            condiments: record
                .condiments
                .into_iter()
                .map(Condiment::from_record)
                .collect(),
            salt_info,
            mode,
        }
    }

    pub fn salt_info(&self) -> &SaltInfo {
        &self.salt_info
    }

    pub fn mode(&self) -> DependencyMode {
        self.mode
    }

    /// コンパイルできなかった計算式の一覧
    pub fn diagnostics(&self) -> Vec<FormulaDiagnostic> {
        let mut found: Vec<FormulaDiagnostic> = self
            .condiments
            .iter()
            .filter_map(|c| {
                c.compiled.compile_error().map(|error| FormulaDiagnostic {
                    recipe_key: self.key.clone(),
                    target: c.name.clone(),
                    formula: c.formula.clone(),
                    error: error.clone(),
                })
            })
            .collect();

        if let Some(error) = self.salt_info.compile_error() {
            found.push(FormulaDiagnostic {
                recipe_key: self.key.clone(),
                target: "塩分濃度".to_string(),
                formula: self.salt_formula.clone().unwrap_or_default(),
                error: error.clone(),
            });
        }

        found
    }
}

/// 計算式の問題
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaDiagnostic {
    pub recipe_key: String,
    /// 調味料名、または塩分濃度
    pub target: String,
    pub formula: String,
    pub error: FormulaError,
}

/// レシピの絞り込み条件
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeFilter {
    /// `None` なら全ジャンル
    pub cuisine: Option<Cuisine>,
    /// レシピ名の部分一致（大文字小文字を区別しない）
    pub query: String,
}

impl RecipeFilter {
    pub fn matches(&self, recipe: &Recipe) -> bool {
        let cuisine_ok = self.cuisine.map_or(true, |c| c == recipe.cuisine);
        let query = self.query.trim().to_lowercase();
        let query_ok = query.is_empty() || recipe.name.to_lowercase().contains(&query);
        cuisine_ok && query_ok
    }
}

/// レシピカタログ
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    schema_version: u64,
    mode: DependencyMode,
    /// ドキュメント上の順序を保持
    recipes: Vec<Recipe>,
}

impl Catalog {
    /// JSON文字列から読み込む
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// JSONファイルから読み込み（非WASM環境のみ）
    #[cfg(not(feature = "wasm"))]
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    /// パース済みのJSON値から読み込む
    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        let Value::Object(root) = value else {
            return Err(LoadError::SchemaViolation(
                "ルートはオブジェクトである必要があります".into(),
            ));
        };

        let (schema_version, recipes) = split_document(root)?;
        let mode = DependencyMode::from_schema_version(schema_version).ok_or_else(|| {
            LoadError::SchemaViolation(format!(
                "未対応のスキーマバージョンです: {}",
                schema_version
            ))
        })?;

        let mut compiled = Vec::with_capacity(recipes.len());
        for (key, value) in recipes {
            let record: RecipeRecord = serde_json::from_value(value)
                .map_err(|e| LoadError::SchemaViolation(format!("レシピ `{}`: {}", key, e)))?;
            compiled.push(Recipe::compile(key, record, mode));
        }

        let catalog = Self {
            schema_version,
            mode,
            recipes: compiled,
        };

        for diagnostic in catalog.diagnostics() {
            tracing::warn!(
                recipe = %diagnostic.recipe_key,
                target = %diagnostic.target,
                formula = %diagnostic.formula,
                error = %diagnostic.error,
                "計算式を解釈できません（評価時は 0.0 になります）"
            );
        }
        tracing::debug!(
            recipes = catalog.len(),
            schema_version,
            mode = ?mode,
            "レシピカタログを読み込みました"
        );

        Ok(catalog)
    }

    pub fn schema_version(&self) -> u64 {
        self.schema_version
    }

    pub fn mode(&self) -> DependencyMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.recipes.iter().map(|r| r.key.as_str())
    }

    /// 条件に合うレシピ（ドキュメント順）
    pub fn filter<'a>(&'a self, filter: &'a RecipeFilter) -> impl Iterator<Item = &'a Recipe> + 'a {
        self.recipes.iter().filter(move |r| filter.matches(r))
    }

    /// 全レシピの計算式の問題
    pub fn diagnostics(&self) -> Vec<FormulaDiagnostic> {
        self.recipes.iter().flat_map(|r| r.diagnostics()).collect()
    }

    /// キーを指定して計算する
    pub fn evaluate(&self, key: &str, total_weight: f64) -> Result<EvaluationResult, EvaluationError> {
        let recipe = self
            .get(key)
            .ok_or_else(|| EvaluationError::UnknownRecipe(key.to_string()))?;
        engine::evaluate(recipe, total_weight)
    }
}

/// ルートオブジェクトを (スキーマバージョン, レシピ群) に分ける
fn split_document(mut root: Map<String, Value>) -> Result<(u64, Map<String, Value>), LoadError> {
    let Some(version) = root.remove(SCHEMA_VERSION_KEY) else {
        return Ok((1, root));
    };

    let version = version.as_u64().ok_or_else(|| {
        LoadError::SchemaViolation(format!("{} は正の整数である必要があります", SCHEMA_VERSION_KEY))
    })?;

    match root.remove(RECIPES_KEY) {
        Some(Value::Object(recipes)) => Ok((version, recipes)),
        Some(_) => Err(LoadError::SchemaViolation(format!(
            "{} はオブジェクトである必要があります",
            RECIPES_KEY
        ))),
        None => Err(LoadError::SchemaViolation(format!(
            "{} がありません",
            RECIPES_KEY
        ))),
    }
}

/// レシピJSONを読み込む
///
/// # Examples
/// ```
/// use seasoning_common::load_catalog;
///
/// let json = r#"{
///   "teriyaki": {
///     "name": "照り焼き",
///     "cuisine": "japanese",
///     "defaultSaltInfo": "塩分濃度: 約1.2%",
///     "condiments": [{"name": "醤油", "unit": "g", "formula": "total * 0.08"}]
///   }
/// }"#;
/// let catalog = load_catalog(json).unwrap();
/// let result = catalog.evaluate("teriyaki", 200.0).unwrap();
/// assert_eq!(result.condiments[0].value, "16.0");
/// ```
pub fn load_catalog(json: &str) -> Result<Catalog, LoadError> {
    Catalog::from_json(json)
}
