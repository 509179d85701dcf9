//! アプリケーション状態
//!
//! 画面の状態（カタログの読み込み状況、選択中のレシピ、材料の入力行、
//! 絞り込み条件、直近の計算結果）を1つの値で表す。
//! 各操作は `self` を受け取り新しい状態を返す。

use std::sync::Arc;

use crate::catalog::{Catalog, Recipe, RecipeFilter};
use crate::engine::EvaluationResult;
use crate::error::{EvaluationError, LoadError};
use crate::number::parse_leading_number;

/// 材料の入力行の上限
pub const MAX_INGREDIENTS: usize = 10;

/// 既定で選択するレシピ
pub const DEFAULT_RECIPE: &str = "teriyaki";

/// 材料の入力行
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ingredient {
    pub name: String,
    /// 入力されたままの重量文字列
    pub weight: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, weight: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight: weight.into(),
        }
    }

    /// 重量 (g)。先頭の数値部分を読み、読めなければ 0
    pub fn weight_grams(&self) -> f64 {
        parse_leading_number(&self.weight)
            .filter(|w| w.is_finite())
            .unwrap_or(0.0)
    }
}

/// カタログの読み込み状況
#[derive(Debug, Clone, Default)]
pub enum CatalogStatus {
    #[default]
    Loading,
    Ready(Arc<Catalog>),
    Failed(String),
}

/// アプリケーション状態
#[derive(Debug, Clone)]
pub struct AppState {
    catalog: CatalogStatus,
    selected: String,
    ingredients: Vec<Ingredient>,
    filter: RecipeFilter,
    last_result: Option<EvaluationResult>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            catalog: CatalogStatus::Loading,
            selected: DEFAULT_RECIPE.to_string(),
            ingredients: vec![Ingredient::default()],
            filter: RecipeFilter::default(),
            last_result: None,
        }
    }
}

impl AppState {
    /// 既定のレシピを指定して作る
    pub fn with_default_recipe(key: impl Into<String>) -> Self {
        Self {
            selected: key.into(),
            ..Self::default()
        }
    }

    /// カタログの読み込み結果を反映する
    ///
    /// 選択中のレシピが無ければ先頭のレシピを選ぶ。
    pub fn with_catalog(self, loaded: Result<Catalog, LoadError>) -> Self {
        match loaded {
            Ok(catalog) => {
                let mut state = self;
                if !catalog.contains(&state.selected) {
                    if let Some(first) = catalog.keys().next() {
                        tracing::debug!(
                            requested = %state.selected,
                            fallback = first,
                            "既定のレシピが無いため先頭のレシピを選択"
                        );
                        state.selected = first.to_string();
                    }
                }
                state.catalog = CatalogStatus::Ready(Arc::new(catalog));
                state
            }
            Err(e) => self.with_load_failure(e.to_string()),
        }
    }

    /// 読み込み失敗を反映する
    pub fn with_load_failure(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!(%message, "レシピデータの読み込みに失敗");
        self.catalog = CatalogStatus::Failed(message);
        self.last_result = None;
        self
    }

    /// レシピを選択する（入力行と計算結果はリセット）
    pub fn select_recipe(mut self, key: impl Into<String>) -> Self {
        self.selected = key.into();
        self.ingredients = vec![Ingredient::default()];
        self.last_result = None;
        self
    }

    pub fn with_filter(mut self, filter: RecipeFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn filter(&self) -> &RecipeFilter {
        &self.filter
    }

    /// 絞り込み条件に合うレシピ（カタログ未読込なら空）
    pub fn visible_recipes(&self) -> Vec<&Recipe> {
        match &self.catalog {
            CatalogStatus::Ready(catalog) => catalog.filter(&self.filter).collect(),
            _ => Vec::new(),
        }
    }

    pub fn can_add_ingredient(&self) -> bool {
        self.ingredients.len() < MAX_INGREDIENTS
    }

    /// 入力行を追加する（上限を超える場合は何もしない）
    pub fn add_ingredient(mut self) -> Self {
        if self.can_add_ingredient() {
            self.ingredients.push(Ingredient::default());
        } else {
            tracing::debug!(max = MAX_INGREDIENTS, "材料の入力行は上限に達しています");
        }
        self
    }

    /// 入力行を削除する（範囲外は無視）
    pub fn remove_ingredient(mut self, index: usize) -> Self {
        if index < self.ingredients.len() {
            self.ingredients.remove(index);
        }
        self
    }

    pub fn set_ingredient_name(mut self, index: usize, name: impl Into<String>) -> Self {
        if let Some(row) = self.ingredients.get_mut(index) {
            row.name = name.into();
        }
        self
    }

    pub fn set_ingredient_weight(mut self, index: usize, weight: impl Into<String>) -> Self {
        if let Some(row) = self.ingredients.get_mut(index) {
            row.weight = weight.into();
        }
        self
    }

    /// 入力行をまとめて置き換える（上限を超えた分は捨てる）
    pub fn with_ingredients(mut self, rows: Vec<Ingredient>) -> Self {
        self.ingredients = rows.into_iter().take(MAX_INGREDIENTS).collect();
        self
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// 材料の総重量 (g)
    pub fn total_weight(&self) -> f64 {
        self.ingredients.iter().map(Ingredient::weight_grams).sum()
    }

    pub fn selected_key(&self) -> &str {
        &self.selected
    }

    pub fn selected_recipe(&self) -> Option<&Recipe> {
        self.catalog().and_then(|c| c.get(&self.selected))
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        match &self.catalog {
            CatalogStatus::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }

    pub fn status(&self) -> &CatalogStatus {
        &self.catalog
    }

    /// 選択中のレシピで計算する
    pub fn calculate(&self) -> Result<EvaluationResult, EvaluationError> {
        let catalog = match &self.catalog {
            CatalogStatus::Loading => return Err(EvaluationError::CatalogNotReady),
            CatalogStatus::Failed(message) => {
                return Err(EvaluationError::CatalogUnavailable(message.clone()))
            }
            CatalogStatus::Ready(catalog) => catalog,
        };
        catalog.evaluate(&self.selected, self.total_weight())
    }

    pub fn with_result(mut self, result: EvaluationResult) -> Self {
        self.last_result = Some(result);
        self
    }

    pub fn last_result(&self) -> Option<&EvaluationResult> {
        self.last_result.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::load_catalog;
    use crate::types::Cuisine;

    const CATALOG: &str = r#"{
        "teriyaki": {
            "name": "鶏の照り焼き",
            "cuisine": "japanese",
            "defaultSaltInfo": "塩分濃度: 約1.2%",
            "condiments": [
                {"name": "醤油", "unit": "g", "formula": "total * 0.08"},
                {"name": "砂糖", "unit": "g", "formula": "total * 0.05"}
            ]
        },
        "mapo": {
            "name": "麻婆豆腐",
            "cuisine": "chinese",
            "defaultSaltInfo": "塩分濃度: 約1.0%",
            "condiments": [
                {"name": "醤油", "unit": "g", "formula": "total * 0.03"}
            ]
        }
    }"#;

    fn ready() -> AppState {
        AppState::default().with_catalog(load_catalog(CATALOG))
    }

    #[test]
    fn test_weight_grams_lenient() {
        assert_eq!(Ingredient::new("鶏肉", "200").weight_grams(), 200.0);
        assert_eq!(Ingredient::new("鶏肉", "12.5g").weight_grams(), 12.5);
        assert_eq!(Ingredient::new("鶏肉", "abc").weight_grams(), 0.0);
        assert_eq!(Ingredient::new("鶏肉", "").weight_grams(), 0.0);
    }

    #[test]
    fn test_calculate_before_catalog_ready() {
        let state = AppState::default();
        assert_eq!(state.calculate(), Err(EvaluationError::CatalogNotReady));
    }

    #[test]
    fn test_calculate_after_load_failure() {
        let state = AppState::default().with_catalog(load_catalog("{ broken"));
        assert!(matches!(
            state.calculate(),
            Err(EvaluationError::CatalogUnavailable(_))
        ));
        assert!(state.catalog().is_none());
        assert!(state.visible_recipes().is_empty());
    }

    #[test]
    fn test_calculate_sums_ingredients() {
        let state = ready()
            .set_ingredient_weight(0, "150")
            .add_ingredient()
            .set_ingredient_weight(1, "50g");
        assert_eq!(state.total_weight(), 200.0);

        let result = state.calculate().unwrap();
        let values: Vec<&str> = result.condiments.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["16.0", "10.0"]);
    }

    #[test]
    fn test_calculate_without_weight_is_invalid_input() {
        let state = ready().set_ingredient_name(0, "鶏肉");
        assert_eq!(state.calculate(), Err(EvaluationError::InvalidInput));
    }

    #[test]
    fn test_default_recipe_falls_back_to_first() {
        let state = AppState::with_default_recipe("missing").with_catalog(load_catalog(CATALOG));
        assert_eq!(state.selected_key(), "teriyaki");

        let state = ready();
        assert_eq!(state.selected_key(), DEFAULT_RECIPE);
        assert_eq!(state.selected_recipe().unwrap().name, "鶏の照り焼き");
    }

    #[test]
    fn test_unknown_selection_is_reported() {
        let state = ready().select_recipe("nope").set_ingredient_weight(0, "100");
        assert_eq!(
            state.calculate(),
            Err(EvaluationError::UnknownRecipe("nope".into()))
        );
    }

    #[test]
    fn test_select_recipe_resets_rows_and_result() {
        let state = ready().set_ingredient_weight(0, "200").add_ingredient();
        let result = state.calculate().unwrap();
        let state = state.with_result(result);
        assert!(state.last_result().is_some());

        let state = state.select_recipe("mapo");
        assert_eq!(state.ingredients(), &[Ingredient::default()]);
        assert!(state.last_result().is_none());
        assert_eq!(state.selected_key(), "mapo");
    }

    #[test]
    fn test_ingredient_limit() {
        let mut state = ready();
        for _ in 0..20 {
            state = state.add_ingredient();
        }
        assert_eq!(state.ingredients().len(), MAX_INGREDIENTS);
        assert!(!state.can_add_ingredient());

        let state = state.remove_ingredient(3).remove_ingredient(99);
        assert_eq!(state.ingredients().len(), MAX_INGREDIENTS - 1);
        assert!(state.can_add_ingredient());
    }

    #[test]
    fn test_with_ingredients_truncates() {
        let rows = (0..12).map(|i| Ingredient::new(format!("材料{}", i), "10")).collect();
        let state = ready().with_ingredients(rows);
        assert_eq!(state.ingredients().len(), MAX_INGREDIENTS);
        assert_eq!(state.total_weight(), 100.0);
    }

    #[test]
    fn test_visible_recipes_filtered() {
        let state = ready();
        assert_eq!(state.visible_recipes().len(), 2);

        let state = state.with_filter(RecipeFilter {
            cuisine: Some(Cuisine::Chinese),
            query: String::new(),
        });
        let keys: Vec<&str> = state.visible_recipes().iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["mapo"]);
    }
}
