//! 結果のテキスト出力

use seasoning_common::{EvaluationResult, FormulaDiagnostic, Recipe};
use std::fmt::Write;

/// 計算結果カード
pub fn render_result(recipe: &Recipe, result: &EvaluationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "【{}】", recipe.name);
    let _ = writeln!(out, "  材料総重量: {}", result.total_weight_display());

    let width = result
        .condiments
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);

    for c in &result.condiments {
        let pad = width.saturating_sub(c.name.chars().count());
        let _ = writeln!(out, "  {}{}  {}", c.name, "　".repeat(pad), c.display());
    }

    out.push('\n');
    for line in result.salt_info_lines() {
        let _ = writeln!(out, "  {}", line);
    }
    out
}

/// レシピ一覧
pub fn render_recipe_list(recipes: &[&Recipe]) -> String {
    if recipes.is_empty() {
        return "該当するレシピがありません\n".to_string();
    }

    let key_width = recipes.iter().map(|r| r.key.len()).max().unwrap_or(0);
    let mut out = String::new();
    for r in recipes {
        let _ = writeln!(
            out,
            "  {:<width$}  [{}] {}",
            r.key,
            r.cuisine.label(),
            r.name,
            width = key_width
        );
    }
    out
}

/// レシピ詳細（調味料と計算式）
pub fn render_recipe(recipe: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "【{}】 {} / {}", recipe.name, recipe.key, recipe.cuisine.label());

    for (i, c) in recipe.condiments.iter().enumerate() {
        let role = c.role.map(|r| format!(" <{}>", r)).unwrap_or_default();
        let unit = if c.unit.is_empty() { String::new() } else { format!(" [{}]", c.unit) };
        let _ = writeln!(out, "  {}. {}{}{}: {}", i + 1, c.name, unit, role, c.formula);
    }

    let _ = writeln!(out, "  塩分: {}", recipe.default_salt_info);
    if let Some(f) = &recipe.salt_formula {
        let _ = writeln!(out, "  塩分計算式: {}", f);
    }
    out
}

/// 計算式の問題一覧
pub fn render_diagnostics(diagnostics: &[FormulaDiagnostic]) -> String {
    let mut out = String::new();
    for d in diagnostics {
        let _ = writeln!(
            out,
            "  ⚠ {} / {}: \"{}\" ({})",
            d.recipe_key, d.target, d.formula, d.error
        );
    }
    out
}
