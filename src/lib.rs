/// Tab Tagger - Chrome Extension for Tagging Pages
/// Built with Rust + WASM + Yew

pub mod tags;
pub mod suggest;
pub mod storage;
pub mod host;
pub mod controller;
pub mod script;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Exposed to JavaScript; not wired to a popup control
#[wasm_bindgen]
pub async fn change_background_color(color: String) -> Result<(), JsValue> {
    script::change_background_color(&host::ChromeHost, &color)
        .await
        .map_err(|e| JsValue::from_str(&e))
}
