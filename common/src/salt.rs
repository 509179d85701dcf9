//! 塩分濃度メッセージ
//!
//! レシピごとの `saltFormula` をコンパイルし、計算後に表示する文言を作る。
//! 複数行になる場合は `\n` で区切る。

use crate::error::FormulaError;
use crate::expr::{parse_expression, Expr, Variables};
use crate::formula::split_fixed_value;
use crate::number::format_one_decimal;

/// 醤油1gあたりの塩分量 (g)
pub const SOY_SALT_PER_GRAM: f64 = 0.15;
/// みそ1gあたりの塩分量 (g)
pub const MISO_SALT_PER_GRAM: f64 = 0.13;

/// 固定値マーカーにみそを含む場合の内訳
const MISO_BREAKDOWN: [&str; 2] = ["みそ塩分濃度: 0.9%", "醤油塩分濃度: 0.3%"];

fn soy_footnote() -> String {
    format!("醤油1gあたり塩分含有量: {:.2}g", SOY_SALT_PER_GRAM)
}

fn miso_footnote() -> String {
    format!("みそ1gあたり塩分含有量: {:.2}g", MISO_SALT_PER_GRAM)
}

/// コンパイル済みの塩分情報
#[derive(Debug, Clone, PartialEq)]
pub enum SaltInfo {
    /// 計算式なし: 既定の文言
    Static(String),
    /// `固定値:<n>`。数値は書かれたまま表示する
    FixedPercent { literal: String, miso_breakdown: bool },
    /// 塩分濃度(%)を求める式
    Expression { expr: Expr, fallback: String },
    /// 解釈できなかった計算式
    Invalid {
        fallback: String,
        error: FormulaError,
    },
}

impl SaltInfo {
    /// 既定の文言と計算式からコンパイルする
    pub fn compile(default_text: &str, formula: Option<&str>) -> Self {
        let formula = match formula.map(str::trim) {
            Some(f) if !f.is_empty() => f,
            _ => return SaltInfo::Static(default_text.to_string()),
        };

        if let Some(fixed) = split_fixed_value(formula) {
            return match fixed {
                Ok((_, literal)) => SaltInfo::FixedPercent {
                    literal: literal.to_string(),
                    miso_breakdown: formula.contains("みそ") || formula.contains("味噌"),
                },
                Err(error) => SaltInfo::Invalid {
                    fallback: default_text.to_string(),
                    error,
                },
            };
        }

        match parse_expression(formula) {
            Ok(expr) => SaltInfo::Expression {
                expr,
                fallback: default_text.to_string(),
            },
            Err(error) => SaltInfo::Invalid {
                fallback: default_text.to_string(),
                error,
            },
        }
    }

    /// 表示文言を作る
    ///
    /// 式の評価に失敗した場合は既定の文言を返す。
    pub fn render(&self, vars: &dyn Variables) -> String {
        match self {
            SaltInfo::Static(text) => text.clone(),
            SaltInfo::FixedPercent {
                literal,
                miso_breakdown: true,
            } => {
                let mut lines = vec![format!("塩分濃度: {}%", literal)];
                lines.extend(MISO_BREAKDOWN.iter().map(|s| s.to_string()));
                lines.join("\n")
            }
            SaltInfo::FixedPercent {
                literal,
                miso_breakdown: false,
            } => format!("塩分濃度: {}% ({})", literal, miso_footnote()),
            SaltInfo::Expression { expr, fallback } => match expr.evaluate(vars) {
                Ok(percent) => {
                    let footnote = if expr.references("miso") && !expr.references("soy") {
                        miso_footnote()
                    } else {
                        soy_footnote()
                    };
                    format!("塩分濃度: {}% ({})", format_one_decimal(percent), footnote)
                }
                Err(error) => {
                    tracing::warn!(%error, "塩分計算式の評価に失敗");
                    fallback.clone()
                }
            },
            SaltInfo::Invalid { fallback, .. } => fallback.clone(),
        }
    }

    /// コンパイル時のエラー
    pub fn compile_error(&self) -> Option<&FormulaError> {
        match self {
            SaltInfo::Invalid { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(weight: f64, soy: f64) -> impl Fn(&str) -> Option<f64> {
        move |name: &str| match name {
            "weight" | "total" => Some(weight),
            "soy" | "miso" => Some(soy),
            _ => None,
        }
    }

    #[test]
    fn test_static_when_no_formula() {
        let info = SaltInfo::compile("塩分濃度: 約1.0%", None);
        assert_eq!(info.render(&vars(100.0, 0.0)), "塩分濃度: 約1.0%");

        let info = SaltInfo::compile("塩分濃度: 約1.0%", Some("  "));
        assert_eq!(info, SaltInfo::Static("塩分濃度: 約1.0%".into()));
    }

    #[test]
    fn test_expression_with_soy_footnote() {
        let info = SaltInfo::compile("既定", Some("soy * 0.15 / weight * 100"));
        let text = info.render(&vars(300.0, 24.0));
        assert_eq!(text, "塩分濃度: 1.2% (醤油1gあたり塩分含有量: 0.15g)");
    }

    #[test]
    fn test_expression_with_miso_footnote() {
        let info = SaltInfo::compile("既定", Some("miso * 0.13 / weight * 100"));
        let text = info.render(&vars(200.0, 20.0));
        assert_eq!(text, "塩分濃度: 1.3% (みそ1gあたり塩分含有量: 0.13g)");
    }

    #[test]
    fn test_expression_failure_falls_back() {
        let info = SaltInfo::compile("既定の文言", Some("soy / 0"));
        assert_eq!(info.render(&vars(200.0, 20.0)), "既定の文言");
    }

    #[test]
    fn test_invalid_formula_falls_back() {
        let info = SaltInfo::compile("既定の文言", Some("soy *"));
        assert!(info.compile_error().is_some());
        assert_eq!(info.render(&vars(200.0, 20.0)), "既定の文言");
    }

    #[test]
    fn test_fixed_percent() {
        let info = SaltInfo::compile("既定", Some("固定値:0.8"));
        assert_eq!(
            info.render(&vars(200.0, 20.0)),
            "塩分濃度: 0.8% (みそ1gあたり塩分含有量: 0.13g)"
        );
    }

    #[test]
    fn test_fixed_percent_keeps_literal() {
        let info = SaltInfo::compile("既定", Some("固定値:0.85"));
        assert_eq!(
            info.render(&vars(200.0, 20.0)),
            "塩分濃度: 0.85% (みそ1gあたり塩分含有量: 0.13g)"
        );

        let info = SaltInfo::compile("既定", Some("固定値:1"));
        assert_eq!(
            info.render(&vars(200.0, 20.0)),
            "塩分濃度: 1% (みそ1gあたり塩分含有量: 0.13g)"
        );
    }

    #[test]
    fn test_fixed_percent_with_miso_breakdown() {
        let info = SaltInfo::compile("既定", Some("固定値:1.2 みそ"));
        let text = info.render(&vars(200.0, 20.0));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec!["塩分濃度: 1.2%", "みそ塩分濃度: 0.9%", "醤油塩分濃度: 0.3%"]
        );
    }
}
