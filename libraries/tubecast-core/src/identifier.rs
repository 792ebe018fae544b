//! Video identifier extraction
//!
//! Turns whatever the user pasted into the add box (a bare id or one of the
//! common link shapes) into a [`VideoId`]. Pure, no I/O.

use crate::types::VideoId;
use url::Url;

/// Hosts that serve `watch?v=` and `embed/` links
const LONG_HOSTS: &[&str] = &["youtube.com", "www.youtube.com", "m.youtube.com"];

/// Short-link host
const SHORT_HOST: &str = "youtu.be";

/// Extract a video identifier from a bare id or a supported link
///
/// Accepted shapes:
/// - `dQw4w9WgXcQ`
/// - `https://www.youtube.com/watch?v=dQw4w9WgXcQ`
/// - `https://youtu.be/dQw4w9WgXcQ`
/// - `https://www.youtube.com/embed/dQw4w9WgXcQ`
///
/// The scheme may be omitted. Returns `None` when nothing matches.
pub fn extract_identifier(input: &str) -> Option<VideoId> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if VideoId::is_valid(input) {
        return VideoId::parse(input).ok();
    }

    let url = parse_link(input)?;
    let host = url.host_str()?.to_ascii_lowercase();

    let candidate = if host == SHORT_HOST {
        url.path_segments()?.next().map(str::to_string)
    } else if LONG_HOSTS.contains(&host.as_str()) {
        long_link_candidate(&url)
    } else {
        None
    }?;

    VideoId::parse(candidate).ok()
}

fn parse_link(input: &str) -> Option<Url> {
    if input.contains("://") {
        Url::parse(input).ok()
    } else {
        Url::parse(&format!("https://{}", input)).ok()
    }
}

fn long_link_candidate(url: &Url) -> Option<String> {
    let mut segments = url.path_segments()?;
    match segments.next()? {
        "watch" => url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned()),
        "embed" => segments.next().map(str::to_string),
        _ => None,
    }
}
