//! ジャンル・レシピ名での絞り込み

use leptos::prelude::*;
use seasoning_common::{AppState, Cuisine, RecipeFilter};

/// ジャンルボタンの並び（`None` は全て）
fn cuisine_options() -> Vec<(Option<Cuisine>, &'static str)> {
    std::iter::once((None, "全て"))
        .chain(Cuisine::ALL.into_iter().map(|c| (Some(c), c.label())))
        .collect()
}

#[component]
pub fn FilterBar<F>(state: ReadSignal<AppState>, on_filter: F) -> impl IntoView
where
    F: Fn(RecipeFilter) + 'static + Clone + Send + Sync,
{
    let current = move || state.with(|s| s.filter().clone());

    let buttons = cuisine_options()
        .into_iter()
        .map(|(cuisine, label)| {
            let on_filter = on_filter.clone();
            view! {
                <button
                    class="filter-btn"
                    class:active=move || current().cuisine == cuisine
                    on:click=move |_| {
                        on_filter(RecipeFilter { cuisine, ..current() })
                    }
                >
                    {label}
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="filter-bar">
            <div class="filter-buttons">{buttons}</div>
            <input
                type="search"
                class="recipe-search"
                placeholder="レシピ名で検索..."
                prop:value=move || current().query
                on:input=move |ev| {
                    on_filter(RecipeFilter { query: event_target_value(&ev), ..current() })
                }
            />
        </div>
    }
}
