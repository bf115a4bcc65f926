/// Popup UI: the saved segment list with copy and clear actions

use crate::operations::{indexed_segments, is_supported_page};
use crate::segment::Segment;
use crate::ui::components::SegmentList;
use patternfly_yew::prelude::*;
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

// Import JS bridge functions. Each page action is a single call into the
// content script's exports inside the tab.
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getActiveTab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn loadPageSegments(tab_id: i32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn deletePageSegment(tab_id: i32, index: u32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn clearPageSegments(tab_id: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn exportPageSegments(tab_id: i32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn writeClipboard(text: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn sleep(ms: u32) -> Result<(), JsValue>;
}

const FEEDBACK_MS: u32 = 2000;

#[derive(Debug, Clone, Deserialize)]
struct ActiveTab {
    id: i32,
    url: String,
}

#[derive(Clone, PartialEq)]
enum PopupState {
    Loading,
    Ready {
        segments: Vec<Segment>,
        page_url: Option<String>,
    },
}

/// Temporary button label after an action
#[derive(Clone, Copy, PartialEq)]
enum Feedback {
    Idle,
    Success(&'static str),
    Error(&'static str),
}

impl Feedback {
    fn label(self, idle: &'static str) -> &'static str {
        match self {
            Feedback::Idle => idle,
            Feedback::Success(msg) | Feedback::Error(msg) => msg,
        }
    }
}

/// Show `feedback` on a button, then go back to its normal label
fn flash(handle: UseStateHandle<Feedback>, feedback: Feedback) {
    handle.set(feedback);
    spawn_local(async move {
        let _ = sleep(FEEDBACK_MS).await;
        handle.set(Feedback::Idle);
    });
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| PopupState::Loading);
    let this_video_only = use_state(|| false);
    let copy_feedback = use_state(|| Feedback::Idle);
    let clear_feedback = use_state(|| Feedback::Idle);

    let refresh = {
        let state = state.clone();
        Callback::from(move |_: ()| {
            let state = state.clone();
            spawn_local(async move {
                let (segments, page_url) = match load_from_page().await {
                    Ok(loaded) => loaded,
                    Err(e) => {
                        log::error!("Error loading segments: {}", e);
                        (Vec::new(), None)
                    }
                };
                state.set(PopupState::Ready { segments, page_url });
            });
        })
    };

    // Load segments on mount
    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    let on_toggle_filter = {
        let this_video_only = this_video_only.clone();
        Callback::from(move |_| {
            this_video_only.set(!*this_video_only);
        })
    };

    let on_delete = {
        let refresh = refresh.clone();
        Callback::from(move |index: usize| {
            let refresh = refresh.clone();
            spawn_local(async move {
                match delete_on_page(index).await {
                    Ok(true) => refresh.emit(()),
                    Ok(false) => {}
                    Err(e) => log::error!("Error deleting segment: {}", e),
                }
            });
        })
    };

    let on_copy_json = {
        let copy_feedback = copy_feedback.clone();
        Callback::from(move |_| {
            let copy_feedback = copy_feedback.clone();
            spawn_local(async move {
                let feedback = match export_from_page().await {
                    Ok(feedback) => feedback,
                    Err(e) => {
                        log::error!("Error copying JSON: {}", e);
                        Feedback::Error("Error copying")
                    }
                };
                flash(copy_feedback, feedback);
            });
        })
    };

    let on_clear = {
        let clear_feedback = clear_feedback.clone();
        let refresh = refresh.clone();
        Callback::from(move |_| {
            if !confirm("Are you sure you want to clear all saved segments?") {
                return;
            }

            let clear_feedback = clear_feedback.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                let feedback = match clear_on_page().await {
                    Ok(feedback) => feedback,
                    Err(e) => {
                        log::error!("Error clearing data: {}", e);
                        Feedback::Error("Error clearing")
                    }
                };
                if matches!(feedback, Feedback::Success(_)) {
                    refresh.emit(());
                }
                flash(clear_feedback, feedback);
            });
        })
    };

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Saved Segments"}</h1>

            <div class="segment-actions">
                <Button onclick={on_copy_json} variant={ButtonVariant::Secondary}>
                    {copy_feedback.label("Copy JSON")}
                </Button>
                <Button onclick={on_clear} variant={ButtonVariant::Danger}>
                    {clear_feedback.label("Clear")}
                </Button>
                <Button onclick={on_toggle_filter} variant={ButtonVariant::Secondary}>
                    {if *this_video_only { "All videos" } else { "This video" }}
                </Button>
            </div>

            {match &*state {
                PopupState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                    </div>
                },
                PopupState::Ready { segments, page_url } => {
                    let filter = if *this_video_only { page_url.as_deref() } else { None };
                    html! {
                        <SegmentList
                            segments={indexed_segments(segments.clone(), filter)}
                            on_delete={on_delete}
                        />
                    }
                },
            }}
        </div>
    }
}

// Helper functions

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// The active tab, if it is a page segments are kept for
async fn active_page() -> Result<Option<ActiveTab>, String> {
    let tab_js = getActiveTab()
        .await
        .map_err(|e| format!("Failed to query tabs: {:?}", e))?;

    if tab_js.is_null() || tab_js.is_undefined() {
        return Ok(None);
    }

    let tab: ActiveTab = serde_wasm_bindgen::from_value(tab_js)
        .map_err(|e| format!("Failed to parse tab: {:?}", e))?;

    Ok(is_supported_page(&tab.url).then_some(tab))
}

async fn load_from_page() -> Result<(Vec<Segment>, Option<String>), String> {
    let Some(tab) = active_page().await? else {
        return Ok((Vec::new(), None));
    };

    let segments_js = loadPageSegments(tab.id)
        .await
        .map_err(|e| format!("Failed to load segments: {:?}", e))?;
    let segments: Vec<Segment> = serde_wasm_bindgen::from_value(segments_js)
        .map_err(|e| format!("Failed to parse segments: {:?}", e))?;

    Ok((segments, Some(tab.url)))
}

async fn delete_on_page(index: usize) -> Result<bool, String> {
    let Some(tab) = active_page().await? else {
        return Ok(false);
    };
    let index = u32::try_from(index).map_err(|e| e.to_string())?;

    let deleted = deletePageSegment(tab.id, index)
        .await
        .map_err(|e| format!("Failed to delete segment: {:?}", e))?;

    Ok(deleted.as_bool().unwrap_or(false))
}

async fn export_from_page() -> Result<Feedback, String> {
    let Some(tab) = active_page().await? else {
        return Ok(Feedback::Error("Not on YouTube"));
    };

    let json_js = exportPageSegments(tab.id)
        .await
        .map_err(|e| format!("Failed to export segments: {:?}", e))?;
    let Some(json) = json_js.as_string() else {
        return Ok(Feedback::Error("No data found"));
    };

    writeClipboard(&json)
        .await
        .map_err(|e| format!("Failed to write clipboard: {:?}", e))?;

    Ok(Feedback::Success("Copied!"))
}

async fn clear_on_page() -> Result<Feedback, String> {
    let Some(tab) = active_page().await? else {
        return Ok(Feedback::Error("Not on YouTube"));
    };

    clearPageSegments(tab.id)
        .await
        .map_err(|e| format!("Failed to clear segments: {:?}", e))?;

    Ok(Feedback::Success("Cleared!"))
}
