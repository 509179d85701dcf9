//! 材料入力から結果表示までのテスト

use seasoning_calc::ingredient::parse_ingredients;
use seasoning_calc::report;
use seasoning_common::{load_catalog, placeholder, AppState, EvaluationError, EvaluationResult};

const CATALOG: &str = r#"{
    "teriyaki": {
        "name": "鶏の照り焼き",
        "cuisine": "japanese",
        "defaultSaltInfo": "塩分濃度: 約1.2%",
        "saltFormula": "soy * 0.15 / weight * 100",
        "condiments": [
            {"name": "醤油", "unit": "g", "formula": "total * 0.08"},
            {"name": "砂糖", "unit": "g", "formula": "total * 0.05"},
            {"name": "一味", "unit": "", "formula": "お好みで"}
        ]
    },
    "bulgogi": {
        "name": "プルコギ",
        "cuisine": "korean",
        "defaultSaltInfo": "塩分濃度: 約1.2%",
        "condiments": [
            {"name": "醤油", "unit": "g", "formula": "total * 0.08"},
            {"name": "ごま油", "unit": "g", "formula": "soy * * 2"}
        ]
    }
}"#;

fn state() -> AppState {
    AppState::default().with_catalog(load_catalog(CATALOG))
}

/// コマンドライン指定の材料で計算
#[test]
fn test_calculate_from_specs() {
    let rows = parse_ingredients(["鶏もも肉:150", "玉ねぎ=50g"]).unwrap();
    let state = state().with_ingredients(rows);

    assert_eq!(state.total_weight(), 200.0);
    let result = state.calculate().unwrap();
    let values: Vec<&str> = result.condiments.iter().map(|c| c.value.as_str()).collect();
    assert_eq!(values, vec!["16.0", "10.0", "お好みで"]);
}

/// 不正な材料指定
#[test]
fn test_invalid_spec_rejected() {
    assert!(parse_ingredients(["鶏もも肉:150", "玉ねぎ"]).is_err());
}

/// 重量が0の場合
#[test]
fn test_zero_weight_rejected() {
    let rows = parse_ingredients(["鶏もも肉:0"]).unwrap();
    let state = state().with_ingredients(rows);
    assert_eq!(state.calculate(), Err(EvaluationError::InvalidInput));
}

/// 計算式の誤りは該当の調味料だけ 0.0
#[test]
fn test_broken_formula_isolated() {
    let rows = parse_ingredients(["牛肉:300"]).unwrap();
    let state = state().select_recipe("bulgogi").with_ingredients(rows);

    let result = state.calculate().unwrap();
    assert_eq!(result.condiments[0].value, "24.0");
    assert_eq!(result.condiments[1].value, "0.0");
    assert_eq!(result.salt_info, "塩分濃度: 約1.2%");
}

/// 結果カードのテキスト
#[test]
fn test_render_result() {
    let rows = parse_ingredients(["鶏もも肉:200"]).unwrap();
    let state = state().with_ingredients(rows);
    let result = state.calculate().unwrap();
    let recipe = state.selected_recipe().unwrap();

    let text = report::render_result(recipe, &result);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "【鶏の照り焼き】");
    assert_eq!(lines[1], "  材料総重量: 200.0 g");
    assert!(lines[2].starts_with("  醤油") && lines[2].ends_with("16.0 g"));
    assert!(lines[4].ends_with("お好みで"));
    assert!(text.contains("塩分濃度: 1.2% (醤油1gあたり塩分含有量: 0.15g)"));
}

/// 計算前の表示
#[test]
fn test_render_placeholder() {
    let state = state();
    let recipe = state.selected_recipe().unwrap();
    let card: EvaluationResult = placeholder(recipe);

    let text = report::render_result(recipe, &card);
    assert!(text.contains("材料総重量: 0.0 g"));
    assert!(text.contains("0.0 g"));
    assert!(text.contains("塩分濃度: 約1.2%"));
}

/// レシピ一覧と詳細
#[test]
fn test_render_list_and_detail() {
    let state = state();
    let recipes = state.visible_recipes();

    let list = report::render_recipe_list(&recipes);
    assert!(list.contains("teriyaki"));
    assert!(list.contains("[韓国風] プルコギ"));
    assert_eq!(report::render_recipe_list(&[]), "該当するレシピがありません\n");

    let detail = report::render_recipe(recipes[0]);
    assert!(detail.contains("1. 醤油 [g] <soy>: total * 0.08"));
    assert!(detail.contains("塩分計算式: soy * 0.15 / weight * 100"));
}

/// 計算式の問題一覧
#[test]
fn test_render_diagnostics() {
    let catalog = load_catalog(CATALOG).unwrap();
    let diagnostics = catalog.diagnostics();
    assert_eq!(diagnostics.len(), 1);

    let text = report::render_diagnostics(&diagnostics);
    assert!(text.contains("bulgogi / ごま油"));
    assert!(text.contains("soy * * 2"));
}
