//! 読み込み状況の表示

use leptos::prelude::*;
use seasoning_common::{AppState, CatalogStatus};

#[component]
pub fn StatusBanner(state: ReadSignal<AppState>) -> impl IntoView {
    let reload = move |_| {
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    };

    move || match state.with(|s| s.status().clone()) {
        CatalogStatus::Failed(message) => view! {
            <div class="status-banner error">
                <p>"レシピデータの読み込みに失敗しました。ページを再読み込みしてください。"</p>
                <p class="text-muted">{message}</p>
                <button class="btn btn-primary" on:click=reload>"再読み込み"</button>
            </div>
        }
        .into_any(),
        _ => view! {
            <div class="status-banner">
                <p>"レシピデータを読み込み中..."</p>
            </div>
        }
        .into_any(),
    }
}
