//! 調味料の計算式コンパイル
//!
//! レシピ読み込み時に計算式文字列を分類し、評価可能な形にしておく:
//! - 固定値 (`固定値:2.5`): 入力に関係なく同じ値
//! - 固定テキスト (`適量` など、または isFixedText): 文字列をそのまま表示
//! - 四則演算式: 総重量と前の調味料の値から計算
//!
//! 式として解釈できないものは `Invalid` になり、評価時に `0.0` を返す。

use crate::error::FormulaError;
use crate::expr::{parse_expression, Expr, Variables};
use crate::number::{format_one_decimal, leading_number_text};

/// 固定値マーカー
pub const FIXED_VALUE_MARKER: &str = "固定値";

/// 数値として扱わない分量表現
pub const FIXED_TEXT_PHRASES: [&str; 4] = ["適量", "お好みで", "ひたひた", "お好みで適量"];

/// 評価に失敗した調味料の表示値
pub const SENTINEL_VALUE: &str = "0.0";

/// `固定値:<数値>` の数値部分を取り出す
///
/// 値と書かれたままの数値文字列を返す。
/// 固定値マーカーでなければ `None`。数値部分が読めなければ `Some(Err)`。
pub(crate) fn split_fixed_value(raw: &str) -> Option<Result<(f64, &str), FormulaError>> {
    let rest = raw.trim().strip_prefix(FIXED_VALUE_MARKER)?;
    let rest = rest
        .strip_prefix(':')
        .or_else(|| rest.strip_prefix('：'))?;
    let parsed = leading_number_text(rest).and_then(|text| {
        text.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| (v, text))
    });
    Some(parsed.ok_or_else(|| FormulaError::InvalidFixedValue(rest.trim().to_string())))
}

/// 評価結果
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaOutput {
    Number(f64),
    Text(String),
}

impl FormulaOutput {
    /// 表示文字列（数値は小数点以下1桁）
    pub fn display(&self) -> String {
        match self {
            FormulaOutput::Number(value) => format_one_decimal(*value),
            FormulaOutput::Text(text) => text.clone(),
        }
    }
}

/// コンパイル済み計算式
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledFormula {
    /// 固定値
    Fixed(f64),
    /// 固定テキスト
    Text(String),
    /// 四則演算式
    Expression(Expr),
    /// 解釈できなかった計算式
    Invalid { source: String, error: FormulaError },
}

impl CompiledFormula {
    /// 計算式文字列を分類してコンパイルする
    pub fn compile(raw: &str, is_fixed_text: bool) -> Self {
        if is_fixed_text || FIXED_TEXT_PHRASES.contains(&raw.trim()) {
            return CompiledFormula::Text(raw.to_string());
        }

        if let Some(fixed) = split_fixed_value(raw) {
            return match fixed {
                Ok((value, _)) => CompiledFormula::Fixed(value),
                Err(error) => CompiledFormula::Invalid {
                    source: raw.to_string(),
                    error,
                },
            };
        }

        match parse_expression(raw) {
            Ok(expr) => CompiledFormula::Expression(expr),
            Err(error) => CompiledFormula::Invalid {
                source: raw.to_string(),
                error,
            },
        }
    }

    /// 固定テキストか（後続の計算に数値を渡さない）
    pub fn is_text(&self) -> bool {
        matches!(self, CompiledFormula::Text(_))
    }

    /// 評価する
    pub fn evaluate(&self, vars: &dyn Variables) -> Result<FormulaOutput, FormulaError> {
        match self {
            CompiledFormula::Fixed(value) => Ok(FormulaOutput::Number(*value)),
            CompiledFormula::Text(text) => Ok(FormulaOutput::Text(text.clone())),
            CompiledFormula::Expression(expr) => expr.evaluate(vars).map(FormulaOutput::Number),
            CompiledFormula::Invalid { error, .. } => Err(error.clone()),
        }
    }

    /// コンパイル時のエラー
    pub fn compile_error(&self) -> Option<&FormulaError> {
        match self {
            CompiledFormula::Invalid { error, .. } => Some(error),
            _ => None,
        }
    }
}
