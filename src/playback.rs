/// Where the current playback position comes from

use serde::Serialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlVideoElement;

pub trait PlaybackSource {
    /// Position in seconds, possibly fractional
    fn current_time_seconds(&self) -> f64;

    fn is_playing(&self) -> bool;
}

/// Position and play state at one instant, handed to the content script
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    pub current_time: f64,
    pub playing: bool,
}

impl PlaybackState {
    pub fn of(source: &dyn PlaybackSource) -> PlaybackState {
        PlaybackState {
            current_time: source.current_time_seconds(),
            playing: source.is_playing(),
        }
    }
}

impl PlaybackSource for PlaybackState {
    fn current_time_seconds(&self) -> f64 {
        self.current_time
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

/// The first `<video>` element on the page
pub struct VideoElement {
    video: HtmlVideoElement,
}

impl VideoElement {
    pub fn find() -> Option<VideoElement> {
        let document = web_sys::window()?.document()?;
        let element = document.query_selector("video").ok()??;
        let video = element.dyn_into::<HtmlVideoElement>().ok()?;
        Some(VideoElement { video })
    }
}

impl PlaybackSource for VideoElement {
    fn current_time_seconds(&self) -> f64 {
        self.video.current_time()
    }

    fn is_playing(&self) -> bool {
        !self.video.paused() && !self.video.ended()
    }
}
