//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"調味料計算機"</h1>
            <p class="text-muted">"材料の重量から調味料の分量を計算します"</p>
        </header>
    }
}
