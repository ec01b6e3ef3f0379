//! Video identifier extraction from user-typed YouTube links.

use serde::Serialize;
use url::Url;

/// Path prefixes on youtube.com hosts whose next segment is the video id.
const ID_PATH_PREFIXES: &[&str] = &["embed", "shorts", "live", "v"];

/// Canonical YouTube video identifier.
///
/// Only [`extract_video_id`] produces values of this type, so holding one
/// means a link was recognized and the id is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the video id from a YouTube link.
///
/// Accepts `http`/`https` long-form links (any youtube.com path with a `v`
/// query parameter, plus the `/embed/`, `/shorts/`, `/live/` and `/v/` path
/// forms) and short links (`youtu.be/ID`). Percent-escapes are decoded the
/// same way in both forms. Anything else, including text that does not parse as a
/// URL at all, yields `None`.
pub fn extract_video_id(raw_url: &str) -> Option<VideoId> {
    let url = Url::parse(raw_url.trim()).ok()?;

    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }

    let host = url.host_str()?.to_ascii_lowercase();

    let id = if is_short_host(&host) {
        first_segment(&url)?
    } else if is_long_host(&host) {
        long_form_id(&url)?
    } else {
        return None;
    };

    if id.is_empty() {
        return None;
    }

    Some(VideoId(id))
}

fn is_long_host(host: &str) -> bool {
    host == "youtube.com" || host.ends_with(".youtube.com")
}

fn is_short_host(host: &str) -> bool {
    host == "youtu.be" || host == "www.youtu.be"
}

fn first_segment(url: &Url) -> Option<String> {
    url.path_segments()?.next().map(decode_segment)
}

/// Path segments stay percent-encoded in `Url`; query pairs do not.
fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

fn long_form_id(url: &Url) -> Option<String> {
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    match segments.next() {
        Some(prefix) if ID_PATH_PREFIXES.contains(&prefix) => segments.next().map(decode_segment),
        // Any other path carries the id in `v`
        _ => url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.trim().to_string()),
    }
}
