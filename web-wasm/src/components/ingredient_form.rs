//! 材料入力フォーム
//!
//! 材料名と重量の入力行（最大10行）と計算ボタン。

use leptos::prelude::*;
use seasoning_common::{AppState, MAX_INGREDIENTS};

#[component]
pub fn IngredientForm<FA, FR, FN, FW, FC>(
    state: ReadSignal<AppState>,
    on_add: FA,
    on_remove: FR,
    on_name: FN,
    on_weight: FW,
    on_calculate: FC,
) -> impl IntoView
where
    FA: Fn(()) + 'static + Clone + Send + Sync,
    FR: Fn(usize) + 'static + Clone + Send + Sync,
    FN: Fn((usize, String)) + 'static + Clone + Send + Sync,
    FW: Fn((usize, String)) + 'static + Clone + Send + Sync,
    FC: Fn(()) + 'static + Clone + Send + Sync,
{
    let row_count = move || state.with(|s| s.ingredients().len());
    let field = move |i: usize, pick: fn(&seasoning_common::Ingredient) -> String| {
        state.with(|s| s.ingredients().get(i).map(pick).unwrap_or_default())
    };

    view! {
        <div class="ingredient-form">
            <h2>"材料"</h2>
            <For
                each=move || 0..row_count()
                key=|i| *i
                children=move |i| {
                    let on_remove = on_remove.clone();
                    let on_name = on_name.clone();
                    let on_weight = on_weight.clone();
                    view! {
                        <div class="ingredient-row">
                            <input
                                type="text"
                                class="ingredient-name"
                                placeholder="材料名"
                                prop:value=move || field(i, |r| r.name.clone())
                                on:input=move |ev| on_name((i, event_target_value(&ev)))
                            />
                            <input
                                type="number"
                                class="ingredient-weight"
                                placeholder="重量"
                                min="0"
                                step="any"
                                prop:value=move || field(i, |r| r.weight.clone())
                                on:input=move |ev| on_weight((i, event_target_value(&ev)))
                            />
                            <span class="unit">"g"</span>
                            <button
                                class="btn btn-tertiary btn-small"
                                disabled=move || row_count() <= 1
                                on:click=move |_| on_remove(i)
                            >
                                "削除"
                            </button>
                        </div>
                    }
                }
            />

            <div class="form-actions">
                <button
                    class="btn btn-secondary"
                    disabled=move || !state.with(|s| s.can_add_ingredient())
                    on:click={
                        let on_add = on_add.clone();
                        move |_| on_add(())
                    }
                >
                    {format!("材料を追加（最大{}件）", MAX_INGREDIENTS)}
                </button>
                <button
                    class="btn btn-primary"
                    on:click={
                        let on_calculate = on_calculate.clone();
                        move |_| on_calculate(())
                    }
                >
                    "計算する"
                </button>
            </div>
        </div>
    }
}
