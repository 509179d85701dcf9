//! 計算結果カード
//!
//! 計算前はレシピの調味料を `0.0` で、塩分は既定の文言で表示する。

use leptos::prelude::*;
use seasoning_common::{placeholder, AppState, EvaluationResult};

#[component]
pub fn ResultCard(state: ReadSignal<AppState>) -> impl IntoView {
    let card = move || {
        state.with(|s| {
            let recipe = s.selected_recipe()?;
            let result = s
                .last_result()
                .cloned()
                .unwrap_or_else(|| placeholder(recipe));
            Some((recipe.name.clone(), result))
        })
    };

    move || card().map(|(name, result)| render_card(name, result))
}

fn render_card(name: String, result: EvaluationResult) -> impl IntoView {
    let total = result.total_weight_display();
    let salt = result
        .salt_info_lines()
        .map(|line| view! { <p class="salt-line">{line.to_string()}</p> })
        .collect_view();
    let rows = result
        .condiments
        .into_iter()
        .map(|c| {
            let value = c.display();
            view! {
                <li class="condiment-row">
                    <span class="condiment-name">{c.name}</span>
                    <span class="condiment-value">{value}</span>
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="result-card">
            <h2>{name}</h2>
            <ul class="condiment-list">
                <li class="condiment-row total">
                    <span class="condiment-name">"材料総重量"</span>
                    <span class="condiment-value">{total}</span>
                </li>
                {rows}
            </ul>
            <div class="salt-info">{salt}</div>
        </div>
    }
}
