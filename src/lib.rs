/// YT Segments - Chrome Extension for timestamped video links and segments
/// Built with Rust + WASM + Yew

pub mod canonical;
pub mod content;
pub mod error;
pub mod format;
pub mod operations;
pub mod playback;
pub mod segment;
pub mod storage;
pub mod store;
pub mod ui;

pub use error::SegmentError;
pub use segment::Segment;
pub use store::{SegmentStore, StoreConfig, STORAGE_KEY};

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export the URL helpers for JavaScript access
#[wasm_bindgen]
pub fn canonicalize_url(url: &str) -> std::result::Result<String, JsValue> {
    canonical::canonicalize(url).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub fn url_with_timestamp(url: &str, seconds: f64) -> std::result::Result<String, JsValue> {
    canonical::with_timestamp(url, canonical::playback_seconds(seconds))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub fn format_duration(seconds: u32) -> String {
    format::format_duration(seconds as u64)
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
