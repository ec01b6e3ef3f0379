pub mod http;

pub use http::TranscriptClient;

use crate::error::OperationError;
use crate::video_id::VideoId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One captioned unit of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptSegment {
    pub offset_millis: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_millis: Option<u64>,
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(offset_millis: u64, text: impl Into<String>) -> Self {
        Self {
            offset_millis,
            duration_millis: None,
            text: text.into(),
        }
    }

    pub fn with_duration(mut self, duration_millis: u64) -> Self {
        self.duration_millis = Some(duration_millis);
        self
    }

    /// Whole seconds into the video, rounded down.
    pub fn offset_secs(&self) -> u64 {
        self.offset_millis / 1000
    }
}

/// Ordered transcript of a video plus its joined text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireTranscript")]
pub struct Transcript {
    pub items: Vec<TranscriptSegment>,
    pub full_text: String,
}

impl Transcript {
    /// Build a transcript, deriving `full_text` from the segments.
    pub fn from_segments(items: Vec<TranscriptSegment>) -> Self {
        let full_text = join_segments(&items);
        Self { items, full_text }
    }

    /// True when there is nothing to translate.
    pub fn is_blank(&self) -> bool {
        self.full_text.trim().is_empty()
    }
}

/// Join segment texts with single spaces, skipping empty ones.
pub fn join_segments(items: &[TranscriptSegment]) -> String {
    items
        .iter()
        .map(|s| s.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

// The transcript service sends `offset`/`duration` as plain (sometimes
// fractional) numbers and may omit `fullText`.
#[derive(Deserialize)]
struct WireSegment {
    #[serde(alias = "offsetMillis", default)]
    offset: f64,
    #[serde(alias = "durationMillis", default)]
    duration: Option<f64>,
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireTranscript {
    #[serde(default)]
    items: Vec<WireSegment>,
    #[serde(default)]
    full_text: Option<String>,
}

fn to_millis(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value as u64
    } else {
        0
    }
}

impl From<WireTranscript> for Transcript {
    fn from(wire: WireTranscript) -> Self {
        let items: Vec<TranscriptSegment> = wire
            .items
            .into_iter()
            .map(|s| TranscriptSegment {
                offset_millis: to_millis(s.offset),
                duration_millis: s.duration.map(to_millis),
                text: s.text,
            })
            .collect();

        match wire.full_text {
            Some(full_text) => Self { items, full_text },
            None => Self::from_segments(items),
        }
    }
}

/// Source of video transcripts.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript for a video. Issues exactly one request.
    async fn fetch_transcript(&self, id: &VideoId) -> Result<Transcript, OperationError>;
    fn name(&self) -> &'static str;
}
