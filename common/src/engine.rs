//! 調味料計算エンジン
//!
//! レシピの調味料を定義順に評価し、計算済みの値を後続の計算式へ渡す。
//!
//! ## 値の受け渡し
//! - 位置方式: それまでの値を順番通りに保持し、`soy`/`miso` は1番目、
//!   `sake` は2番目、`ginger` は3番目の値を参照する（無ければ 0）
//! - 役割方式: 調味料の役割ごとに値を保持し、未設定の役割は 0
//!
//! 計算式の評価に失敗した調味料は `0.0` を表示し、残りの計算は続ける。

use crate::catalog::Recipe;
use crate::error::EvaluationError;
use crate::expr::{Variables, TOTAL_VARIABLES};
use crate::formula::SENTINEL_VALUE;
use crate::number::{format_one_decimal, parse_leading_number};
use crate::types::{DependencyMode, Role};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 調味料1件の計算結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CondimentResult {
    pub name: String,
    /// 表示値（数値なら小数点以下1桁、固定テキストはそのまま）
    pub value: String,
    pub unit: String,
}

impl CondimentResult {
    /// 単位付きの表示文字列
    pub fn display(&self) -> String {
        if self.unit.is_empty() {
            self.value.clone()
        } else {
            format!("{} {}", self.value, self.unit)
        }
    }
}

/// 計算結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub recipe_key: String,
    pub total_weight: f64,
    /// レシピの調味料と同じ順序・同じ件数
    pub condiments: Vec<CondimentResult>,
    pub salt_info: String,
}

impl EvaluationResult {
    /// 材料総重量の表示文字列
    pub fn total_weight_display(&self) -> String {
        format!("{} g", format_one_decimal(self.total_weight))
    }

    /// 塩分情報を行ごとに
    pub fn salt_info_lines(&self) -> impl Iterator<Item = &str> {
        self.salt_info.lines()
    }
}

/// 1回の計算の間だけ使う状態
#[derive(Debug, Clone)]
pub struct EvaluationContext {
    total_weight: f64,
    mode: DependencyMode,
    /// 位置方式: これまでの値（調味料の順）
    values: Vec<f64>,
    /// 役割方式: 役割ごとの値
    roles: HashMap<Role, f64>,
}

impl EvaluationContext {
    pub fn new(total_weight: f64, mode: DependencyMode) -> Self {
        Self {
            total_weight,
            mode,
            values: Vec::new(),
            roles: HashMap::new(),
        }
    }

    /// 計算済みの値を記録する
    ///
    /// 位置方式では常に1スロット進む。役割方式では役割がある場合のみ記録する。
    pub fn record(&mut self, role: Option<Role>, value: f64) {
        self.values.push(value);
        if let Some(role) = role {
            self.roles.insert(role, value);
        }
    }

    /// 役割の現在値（未設定なら 0）
    pub fn role_value(&self, role: Role) -> f64 {
        self.roles.get(&role).copied().unwrap_or(0.0)
    }
}

impl Variables for EvaluationContext {
    fn get(&self, name: &str) -> Option<f64> {
        if TOTAL_VARIABLES.contains(&name) {
            return Some(self.total_weight);
        }
        let role = Role::from_variable(name)?;
        match self.mode {
            DependencyMode::Positional => role
                .positional_slot()
                .map(|slot| self.values.get(slot).copied().unwrap_or(0.0)),
            DependencyMode::Role => Some(self.role_value(role)),
        }
    }
}

/// レシピを計算する
///
/// # Arguments
/// * `recipe` - コンパイル済みのレシピ
/// * `total_weight` - 材料総重量 (g)
///
/// # Returns
/// * `Ok(EvaluationResult)` - 調味料ごとの表示値と塩分情報
/// * `Err(InvalidInput)` - 総重量が0以下または数値でない
pub fn evaluate(recipe: &Recipe, total_weight: f64) -> Result<EvaluationResult, EvaluationError> {
    if !total_weight.is_finite() || total_weight <= 0.0 {
        return Err(EvaluationError::InvalidInput);
    }

    let mut ctx = EvaluationContext::new(total_weight, recipe.mode());
    let mut condiments = Vec::with_capacity(recipe.condiments.len());

    for condiment in &recipe.condiments {
        let compiled = condiment.compiled();

        let value = match compiled.evaluate(&ctx) {
            Ok(output) => output.display(),
            Err(error) => {
                tracing::warn!(
                    recipe = %recipe.key,
                    condiment = %condiment.name,
                    formula = %condiment.formula,
                    %error,
                    "計算式の評価に失敗"
                );
                SENTINEL_VALUE.to_string()
            }
        };

        if compiled.is_text() {
            // 固定テキストは数値を渡さない（位置方式ではスロットだけ 0 で埋める）
            if recipe.mode() == DependencyMode::Positional {
                ctx.record(None, 0.0);
            }
        } else {
            // 表示値（丸め後）を読み戻して後続へ渡す
            let numeric = parse_leading_number(&value).unwrap_or(0.0);
            ctx.record(condiment.role, numeric);
        }

        condiments.push(CondimentResult {
            name: condiment.name.clone(),
            value,
            unit: condiment.unit.clone(),
        });
    }

    let salt_info = recipe.salt_info().render(&ctx);

    Ok(EvaluationResult {
        recipe_key: recipe.key.clone(),
        total_weight,
        condiments,
        salt_info,
    })
}

/// 計算前の表示（全調味料 `0.0` と既定の塩分文言）
pub fn placeholder(recipe: &Recipe) -> EvaluationResult {
    let condiments = recipe
        .condiments
        .iter()
        .map(|c| CondimentResult {
            name: c.name.clone(),
            value: SENTINEL_VALUE.to_string(),
            unit: c.unit.clone(),
        })
        .collect();

    EvaluationResult {
        recipe_key: recipe.key.clone(),
        total_weight: 0.0,
        condiments,
        salt_info: recipe.default_salt_info.clone(),
    }
}
