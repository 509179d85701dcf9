//! メインアプリケーションコンポーネント

use crate::api::catalog::{fetch_catalog, CATALOG_URL};
use crate::components::{
    filter_bar::FilterBar,
    header::Header,
    ingredient_form::IngredientForm,
    recipe_tabs::RecipeTabs,
    result_card::ResultCard,
    status_banner::StatusBanner,
};
use leptos::prelude::*;
use seasoning_common::{AppState, CatalogStatus, RecipeFilter};

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let (state, set_state) = signal(AppState::default());

    // レシピデータの読み込み（起動時に1回）
    wasm_bindgen_futures::spawn_local(async move {
        match fetch_catalog(CATALOG_URL).await {
            Ok(catalog) => apply(set_state, move |s| s.with_catalog(Ok(catalog))),
            Err(message) => {
                web_sys::console::error_1(&format!("レシピデータの読み込みに失敗: {}", message).into());
                apply(set_state, move |s| s.with_load_failure(message));
            }
        }
    });

    let on_filter = move |filter: RecipeFilter| apply(set_state, move |s| s.with_filter(filter));
    let on_select = move |key: String| apply(set_state, move |s| s.select_recipe(key));
    let on_add = move |_: ()| apply(set_state, |s| s.add_ingredient());
    let on_remove = move |i: usize| apply(set_state, move |s| s.remove_ingredient(i));
    let on_name = move |(i, name): (usize, String)| {
        apply(set_state, move |s| s.set_ingredient_name(i, name))
    };
    let on_weight = move |(i, weight): (usize, String)| {
        apply(set_state, move |s| s.set_ingredient_weight(i, weight))
    };

    // 計算（入力エラーはダイアログで通知）
    let on_calculate = move |_: ()| match state.with_untracked(|s| s.calculate()) {
        Ok(result) => apply(set_state, move |s| s.with_result(result)),
        Err(e) => gloo::dialogs::alert(&e.to_string()),
    };

    let is_ready = move || state.with(|s| matches!(s.status(), CatalogStatus::Ready(_)));

    view! {
        <div class="container">
            <Header />

            <Show
                when=is_ready
                fallback=move || view! { <StatusBanner state=state /> }
            >
                <FilterBar state=state on_filter=on_filter />
                <RecipeTabs state=state on_select=on_select />
                <IngredientForm
                    state=state
                    on_add=on_add
                    on_remove=on_remove
                    on_name=on_name
                    on_weight=on_weight
                    on_calculate=on_calculate
                />
                <ResultCard state=state />
            </Show>
        </div>
    }
}

/// 状態遷移はすべて AppState のメソッドを通す
fn apply(set_state: WriteSignal<AppState>, f: impl FnOnce(AppState) -> AppState) {
    set_state.update(|s| *s = f(std::mem::take(s)));
}
