/// Timestamp handling for video page URLs
///
/// A video page URL carries its playback offset in a `t` (or `start`) query
/// parameter. The canonical form of a URL has both removed and is what
/// segments are keyed by.
use crate::error::{Result, SegmentError};
use url::Url;

/// Query parameters that carry a playback offset
const TIMESTAMP_KEYS: [&str; 2] = ["t", "start"];

fn is_timestamp_key(key: &str) -> bool {
    TIMESTAMP_KEYS.contains(&key)
}

fn parse(url: &str) -> Result<Url> {
    Url::parse(url.trim()).map_err(|e| SegmentError::InvalidUrl(format!("{}: {}", url, e)))
}

fn owned_pairs(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Replace the whole query string; an empty list drops the `?` entirely
fn replace_query(url: &mut Url, pairs: &[(String, String)]) {
    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
}

/// Strip every `t` and `start` parameter from a URL
///
/// Scheme, host, path, fragment and the remaining parameters (in their
/// original order) are left alone. Applying this twice gives the same result
/// as applying it once.
///
/// Examples:
/// - https://www.youtube.com/watch?v=abc&t=30s → https://www.youtube.com/watch?v=abc
/// - https://youtu.be/abc?start=12 → https://youtu.be/abc
pub fn canonicalize(url: &str) -> Result<String> {
    let mut parsed = parse(url)?;
    let pairs = owned_pairs(&parsed);

    if !pairs.iter().any(|(k, _)| is_timestamp_key(k)) {
        return Ok(parsed.into());
    }

    let kept: Vec<(String, String)> = pairs
        .into_iter()
        .filter(|(k, _)| !is_timestamp_key(k))
        .collect();
    replace_query(&mut parsed, &kept);

    Ok(parsed.into())
}

/// Set `t=<seconds>s` on a URL
///
/// An existing `t` is overwritten where it stands (later duplicates are
/// dropped); otherwise `t` is appended after the other parameters.
pub fn with_timestamp(url: &str, seconds: u64) -> Result<String> {
    let mut parsed = parse(url)?;
    let value = format!("{}s", seconds);

    let mut pairs = owned_pairs(&parsed);
    match pairs.iter().position(|(k, _)| k == "t") {
        Some(first) => {
            pairs[first].1 = value;
            let mut index = 0;
            pairs.retain(|(k, _)| {
                let keep = index <= first || k != "t";
                index += 1;
                keep
            });
        }
        None => pairs.push(("t".to_string(), value)),
    }
    replace_query(&mut parsed, &pairs);

    Ok(parsed.into())
}

/// Whole seconds of a playback position, truncated toward zero
///
/// Negative and non-finite positions (a media element that has not loaded
/// yet reports NaN) count as zero.
pub fn playback_seconds(position: f64) -> u64 {
    if position.is_finite() && position > 0.0 {
        position.trunc() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_strips_t() {
        assert_eq!(
            canonicalize("https://www.youtube.com/watch?v=abc&t=30s").unwrap(),
            "https://www.youtube.com/watch?v=abc"
        );
    }

    #[test]
    fn test_canonicalize_strips_start_and_keeps_order() {
        assert_eq!(
            canonicalize("https://www.youtube.com/watch?list=PL1&t=30s&v=abc&start=5&index=2").unwrap(),
            "https://www.youtube.com/watch?list=PL1&v=abc&index=2"
        );
    }

    #[test]
    fn test_canonicalize_strips_repeated_timestamps() {
        assert_eq!(
            canonicalize("https://x/watch?t=1&v=1&t=2s&start=3").unwrap(),
            "https://x/watch?v=1"
        );
    }

    #[test]
    fn test_canonicalize_drops_empty_query() {
        assert_eq!(canonicalize("https://youtu.be/abc?t=12").unwrap(), "https://youtu.be/abc");
    }

    #[test]
    fn test_canonicalize_keeps_fragment_and_path() {
        assert_eq!(
            canonicalize("https://example.com/videos/42?t=5&v=1#comments").unwrap(),
            "https://example.com/videos/42?v=1#comments"
        );
    }

    #[test]
    fn test_canonicalize_without_timestamp_is_unchanged() {
        assert_eq!(
            canonicalize("https://www.youtube.com/watch?v=abc&list=PL1").unwrap(),
            "https://www.youtube.com/watch?v=abc&list=PL1"
        );
    }

    #[test]
    fn test_canonicalize_does_not_touch_similar_keys() {
        assert_eq!(
            canonicalize("https://x/watch?v=1&tt=4&started=yes").unwrap(),
            "https://x/watch?v=1&tt=4&started=yes"
        );
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        let urls = [
            "https://www.youtube.com/watch?v=abc&t=30s",
            "https://x/watch?t=1&v=1&t=2s&start=3#frag",
            "https://youtu.be/abc",
            "https://x/watch?q=a%20b&t=9",
        ];
        for url in urls {
            let once = canonicalize(url).unwrap();
            let twice = canonicalize(&once).unwrap();
            assert_eq!(once, twice, "not idempotent for {}", url);
        }
    }

    #[test]
    fn test_canonicalize_invalid_url() {
        assert!(matches!(canonicalize("not a url"), Err(SegmentError::InvalidUrl(_))));
        assert!(matches!(canonicalize(""), Err(SegmentError::InvalidUrl(_))));
    }

    #[test]
    fn test_with_timestamp_appends() {
        assert_eq!(
            with_timestamp("https://www.youtube.com/watch?v=abc", 42).unwrap(),
            "https://www.youtube.com/watch?v=abc&t=42s"
        );
        assert_eq!(with_timestamp("https://youtu.be/abc", 0).unwrap(), "https://youtu.be/abc?t=0s");
    }

    #[test]
    fn test_with_timestamp_overwrites_in_place() {
        assert_eq!(
            with_timestamp("https://x/watch?t=10s&v=1", 99).unwrap(),
            "https://x/watch?t=99s&v=1"
        );
    }

    #[test]
    fn test_with_timestamp_collapses_duplicates() {
        assert_eq!(
            with_timestamp("https://x/watch?v=1&t=10s&list=L&t=20s", 5).unwrap(),
            "https://x/watch?v=1&t=5s&list=L"
        );
    }

    #[test]
    fn test_with_timestamp_keeps_start() {
        assert_eq!(
            with_timestamp("https://x/watch?v=1&start=3", 7).unwrap(),
            "https://x/watch?v=1&start=3&t=7s"
        );
    }

    #[test]
    fn test_playback_seconds_truncates() {
        assert_eq!(playback_seconds(12.7), 12);
        assert_eq!(playback_seconds(0.99), 0);
        assert_eq!(playback_seconds(3600.0), 3600);
        assert_eq!(playback_seconds(-1.5), 0);
        assert_eq!(playback_seconds(f64::NAN), 0);
    }

    #[test]
    fn test_timestamp_round_trip() {
        let link = with_timestamp("https://www.youtube.com/watch?v=abc&t=3s", 125).unwrap();
        assert_eq!(link, "https://www.youtube.com/watch?v=abc&t=125s");
        assert_eq!(canonicalize(&link).unwrap(), "https://www.youtube.com/watch?v=abc");
    }
}
