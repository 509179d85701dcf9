//! 対話式の材料入力

use crate::error::{CalcError, Result};
use dialoguer::Input;
use seasoning_common::{Ingredient, Recipe, MAX_INGREDIENTS};

/// 対話式で材料を入力（名前を空のまま Enter で終了）
pub fn prompt_ingredients(recipe: &Recipe) -> Result<Vec<Ingredient>> {
    println!("🍳 {} ({})", recipe.name, recipe.cuisine);
    println!("材料を入力してください（最大{}件、名前を空のまま Enter で終了）\n", MAX_INGREDIENTS);

    let mut rows = Vec::new();

    while rows.len() < MAX_INGREDIENTS {
        let n = rows.len() + 1;

        let name: String = Input::new()
            .with_prompt(format!("[{}/{}] 材料名", n, MAX_INGREDIENTS))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| CalcError::Prompt(e.to_string()))?;

        if name.trim().is_empty() {
            break;
        }

        let weight: String = Input::new()
            .with_prompt("  重量 (g)")
            .validate_with(|input: &String| -> std::result::Result<(), &str> {
                if is_weight(input) {
                    Ok(())
                } else {
                    Err("0より大きい数値を入力してください")
                }
            })
            .interact_text()
            .map_err(|e| CalcError::Prompt(e.to_string()))?;

        rows.push(Ingredient::new(name.trim(), weight.trim()));
    }

    if rows.len() == MAX_INGREDIENTS {
        println!("材料は最大{}件までです", MAX_INGREDIENTS);
    }

    Ok(rows)
}

/// 重量として受け付けるか
fn is_weight(input: &str) -> bool {
    Ingredient::new("", input).weight_grams() > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_weight() {
        assert!(is_weight("250"));
        assert!(is_weight("12.5g"));
        assert!(!is_weight("0"));
        assert!(!is_weight("abc"));
        assert!(!is_weight(""));
    }
}
