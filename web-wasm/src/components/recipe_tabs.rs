//! レシピ選択タブ

use leptos::prelude::*;
use seasoning_common::AppState;

#[component]
pub fn RecipeTabs<F>(state: ReadSignal<AppState>, on_select: F) -> impl IntoView
where
    F: Fn(String) + 'static + Clone + Send + Sync,
{
    let tabs = move || {
        state.with(|s| {
            s.visible_recipes()
                .into_iter()
                .map(|r| (r.key.clone(), r.name.clone(), r.cuisine.label()))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="recipe-tabs">
            <For
                each=tabs
                key=|(key, _, _)| key.clone()
                children=move |(key, name, label)| {
                    let on_select = on_select.clone();
                    let selected_key = key.clone();
                    view! {
                        <button
                            class="tab-btn"
                            class:active=move || state.with(|s| s.selected_key() == selected_key)
                            title=label
                            on:click=move |_| on_select(key.clone())
                        >
                            {name}
                        </button>
                    }
                }
            />
            <Show when=move || tabs().is_empty()>
                <p class="text-muted">"該当するレシピがありません"</p>
            </Show>
        </div>
    }
}
