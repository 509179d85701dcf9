//! レシピデータの取得

use seasoning_common::{load_catalog, Catalog};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// 既定のレシピデータURL
pub const CATALOG_URL: &str = "recipes.json";

/// URLからレシピデータを取得してカタログを作る
///
/// 通信エラー、HTTPエラー、読み込みエラーはいずれも表示用のメッセージで返す。
pub async fn fetch_catalog(url: &str) -> Result<Catalog, String> {
    let text = fetch_text(url).await.map_err(|e| js_error_message(&e))?;
    load_catalog(&text).map_err(|e| e.to_string())
}

async fn fetch_text(url: &str) -> Result<String, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url)).await?;
    let resp: Response = resp_value.dyn_into()?;

    if !resp.ok() {
        return Err(JsValue::from_str(&format!("HTTP error: {}", resp.status())));
    }

    let text = JsFuture::from(resp.text()?).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("response body is not text"))
}

fn js_error_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
