//! 材料指定の解析
//!
//! コマンドラインの `-i` 引数と対話入力で使う書式:
//! - `鶏もも肉:250` / `鶏もも肉：250g` / `鶏もも肉=250`
//! - `250`（名前なし）

use crate::error::{CalcError, Result};
use regex::Regex;
use seasoning_common::Ingredient;

/// `名前:重量` 形式の文字列を解析
pub fn parse_ingredient(arg: &str) -> Result<Ingredient> {
    lazy_static::lazy_static! {
        static ref SPEC_RE: Regex = Regex::new(
            r"^\s*(?:(?P<name>[^:：=]*?)\s*[:：=]\s*)?(?P<weight>\d+(?:\.\d+)?)\s*(?:g|ｇ|グラム)?\s*$"
        ).unwrap();
    }

    let caps = SPEC_RE
        .captures(arg)
        .ok_or_else(|| CalcError::InvalidIngredient(arg.to_string()))?;

    let name = caps.name("name").map(|m| m.as_str().trim()).unwrap_or("");
    Ok(Ingredient::new(name, &caps["weight"]))
}

/// 複数の材料指定を解析
pub fn parse_ingredients<I, S>(specs: I) -> Result<Vec<Ingredient>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    specs.into_iter().map(|s| parse_ingredient(s.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_and_weight() {
        let ing = parse_ingredient("鶏もも肉:250").unwrap();
        assert_eq!(ing.name, "鶏もも肉");
        assert_eq!(ing.weight_grams(), 250.0);
    }

    #[test]
    fn test_parse_separators_and_unit() {
        for arg in ["豆腐：300g", "豆腐 = 300", "豆腐:300グラム", " 豆腐 : 300.0 "] {
            let ing = parse_ingredient(arg).unwrap();
            assert_eq!(ing.name, "豆腐", "{}", arg);
            assert_eq!(ing.weight_grams(), 300.0, "{}", arg);
        }
    }

    #[test]
    fn test_parse_weight_only() {
        let ing = parse_ingredient("120.5").unwrap();
        assert_eq!(ing.name, "");
        assert_eq!(ing.weight_grams(), 120.5);
    }

    #[test]
    fn test_parse_invalid() {
        for arg in ["", "鶏肉", "鶏肉:", "鶏肉:たくさん", "鶏肉:-5"] {
            assert!(
                matches!(parse_ingredient(arg), Err(CalcError::InvalidIngredient(_))),
                "{}",
                arg
            );
        }
    }
}
