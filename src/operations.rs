/// Segment actions as the keyboard shortcuts and the popup trigger them

use crate::canonical::{canonicalize, playback_seconds, with_timestamp};
use crate::error::{Result, SegmentError};
use crate::playback::PlaybackSource;
use crate::segment::Segment;
use crate::storage::KeyValueStore;
use crate::store::SegmentStore;
use url::Url;

/// Deep link to the current position, or the page URL itself when there is
/// no video to read a position from
pub fn link_at_playback(page_url: &str, playback: Option<&dyn PlaybackSource>) -> Result<String> {
    match playback {
        Some(source) if source.current_time_seconds().is_finite() => {
            with_timestamp(page_url, playback_seconds(source.current_time_seconds()))
        }
        _ => Ok(page_url.to_string()),
    }
}

/// Begin a segment at the current position
pub fn start_segment<S: KeyValueStore>(
    store: &mut SegmentStore<S>,
    playback: Option<&dyn PlaybackSource>,
    name: &str,
    page_url: &str,
) -> Result<Segment> {
    let source = playback.ok_or(SegmentError::NoVideo)?;
    store.append(name, page_url, source.current_time_seconds())
}

/// End the latest segment of this video at the current position
pub fn end_segment<S: KeyValueStore>(
    store: &mut SegmentStore<S>,
    playback: Option<&dyn PlaybackSource>,
    page_url: &str,
) -> Result<Segment> {
    let source = playback.ok_or(SegmentError::NoVideo)?;
    store.update_last_matching_end(page_url, source.current_time_seconds())
}

/// JSON for the "Copy JSON" action
///
/// A missing key exports `[]`. An unreadable blob gives `None`, which the
/// popup reports as "No data found".
pub fn export_for_clipboard<S: KeyValueStore>(store: &SegmentStore<S>) -> Result<Option<String>> {
    match store.export_json() {
        Ok(json) => Ok(Some(json)),
        Err(SegmentError::StorageRead(e)) => {
            log::warn!("Nothing to export: {}", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Whether segments can be read from this tab
pub fn is_supported_page(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h == "youtube.com" || h.ends_with(".youtube.com")))
        .unwrap_or(false)
}

/// Segments paired with their stored position, for the list view
///
/// With `video_url`, only segments of that video are kept. Positions are
/// those of the full list, so they can still be passed to `delete_at`. An
/// unparseable `video_url` filters nothing.
pub fn indexed_segments(segments: Vec<Segment>, video_url: Option<&str>) -> Vec<(usize, Segment)> {
    let canonical = video_url.and_then(|url| canonicalize(url).ok());

    segments
        .into_iter()
        .enumerate()
        .filter(|(_, segment)| canonical.as_ref().is_none_or(|url| &segment.url == url))
        .collect()
}
