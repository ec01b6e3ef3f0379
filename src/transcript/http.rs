use crate::error::{ErrorKind, OperationError};
use crate::gateway::endpoint;
use crate::transcript::{Transcript, TranscriptSource};
use crate::video_id::VideoId;
use async_trait::async_trait;
use tracing::debug;

/// Client for the transcript service's `GET /transcript` endpoint.
pub struct TranscriptClient {
    client: reqwest::Client,
    base_url: String,
}

impl TranscriptClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Use an existing HTTP client (shared pool, configured timeout).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl TranscriptSource for TranscriptClient {
    async fn fetch_transcript(&self, id: &VideoId) -> Result<Transcript, OperationError> {
        let url = endpoint(&self.base_url, "transcript");
        debug!("Fetching transcript for {} from {}", id, url);

        let response = self
            .client
            .get(&url)
            .query(&[("videoId", id.as_str())])
            .send()
            .await
            .map_err(|e| OperationError::network(&e))?;

        let status = response.status();
        debug!("Transcript service response status: {}", status);

        if !status.is_success() {
            return Err(OperationError::new(
                ErrorKind::TranscriptUnavailable,
                format!("Failed to fetch transcript (HTTP {})", status.as_u16()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| OperationError::network(&e))?;

        let transcript: Transcript = serde_json::from_str(&body).map_err(|e| {
            OperationError::new(
                ErrorKind::TranscriptUnavailable,
                format!("Failed to parse transcript: {}", e),
            )
        })?;

        debug!(
            "Transcript for {}: {} segments, {} chars",
            id,
            transcript.items.len(),
            transcript.full_text.len()
        );

        Ok(transcript)
    }

    fn name(&self) -> &'static str {
        "transcript service"
    }
}
