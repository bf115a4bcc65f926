/// Entry points for the content script running on the video page
///
/// `content.js` owns the keyboard shortcuts, the name prompt and the toasts;
/// these functions do the work behind them against the page's localStorage
/// and its first `<video>` element. The list functions are also what the
/// popup runs inside the tab, one call per action.

use crate::error::SegmentError;
use crate::operations;
use crate::playback::{PlaybackSource, PlaybackState, VideoElement};
use crate::storage::BrowserStorage;
use crate::store::SegmentStore;
use wasm_bindgen::prelude::*;

fn browser_store() -> Result<SegmentStore<BrowserStorage>, JsValue> {
    BrowserStorage::local()
        .map(SegmentStore::new)
        .map_err(to_js_error)
}

fn to_js_error(e: SegmentError) -> JsValue {
    log::warn!("{}", e);
    JsValue::from_str(&e.to_string())
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize: {:?}", e)))
}

/// URL to put on the clipboard for the copy-link shortcut
#[wasm_bindgen]
pub fn copy_link(page_url: &str) -> Result<String, JsValue> {
    let video = VideoElement::find();
    operations::link_at_playback(page_url, video.as_ref().map(|v| v as &dyn PlaybackSource))
        .map_err(to_js_error)
}

/// `{currentTime, playing}` of the page's video, or `null` without one
#[wasm_bindgen]
pub fn playback_state() -> Result<JsValue, JsValue> {
    match VideoElement::find() {
        Some(video) => to_js(&PlaybackState::of(&video)),
        None => Ok(JsValue::NULL),
    }
}

/// Save a new segment starting at the current position
#[wasm_bindgen]
pub fn start_segment(name: &str, page_url: &str) -> Result<JsValue, JsValue> {
    let mut store = browser_store()?;
    let video = VideoElement::find();
    let segment = operations::start_segment(
        &mut store,
        video.as_ref().map(|v| v as &dyn PlaybackSource),
        name,
        page_url,
    )
    .map_err(to_js_error)?;
    to_js(&segment)
}

/// Set the end of this video's latest segment to the current position
#[wasm_bindgen]
pub fn end_segment(page_url: &str) -> Result<JsValue, JsValue> {
    let mut store = browser_store()?;
    let video = VideoElement::find();
    let segment = operations::end_segment(
        &mut store,
        video.as_ref().map(|v| v as &dyn PlaybackSource),
        page_url,
    )
    .map_err(to_js_error)?;
    to_js(&segment)
}

#[wasm_bindgen]
pub fn load_segments() -> Result<JsValue, JsValue> {
    let store = browser_store()?;
    to_js(&store.load())
}

/// Delete by position; negative or past-the-end indices delete nothing
#[wasm_bindgen]
pub fn delete_segment(index: i32) -> Result<bool, JsValue> {
    let Ok(index) = usize::try_from(index) else {
        return Ok(false);
    };
    let mut store = browser_store()?;
    store.delete_at(index).map_err(to_js_error)
}

#[wasm_bindgen]
pub fn clear_segments() -> Result<(), JsValue> {
    let mut store = browser_store()?;
    store.clear().map_err(to_js_error)
}

/// Pretty JSON of every segment; `null` when the stored blob is unreadable
#[wasm_bindgen]
pub fn export_segments() -> Result<Option<String>, JsValue> {
    let store = browser_store()?;
    operations::export_for_clipboard(&store).map_err(to_js_error)
}
