//! HTTP client for the translation service.

use crate::error::{ErrorKind, OperationError};
use crate::gateway::endpoint;
use crate::translate::{TranslationRequest, TranslationResult, Translator};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

/// Message used when the service fails without saying why.
const GENERIC_FAILURE: &str = "Translation failed";

/// Client for the translation service's `POST /translate` endpoint.
pub struct TranslationClient {
    client: reqwest::Client,
    base_url: String,
}

impl TranslationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    error: Option<String>,
}

/// Pull the service's `error` message out of a failure body.
fn failure_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

#[async_trait]
impl Translator for TranslationClient {
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult, OperationError> {
        let url = endpoint(&self.base_url, "translate");
        debug!(
            "Translating {} chars to {} (mock: {})",
            request.text.len(),
            request.target_language,
            request.use_mock
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| OperationError::network(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| OperationError::network(&e))?;

        if !status.is_success() {
            let message = failure_message(&body);
            warn!("Translation service error ({}): {}", status, message);
            return Err(OperationError::new(ErrorKind::TranslationFailed, message));
        }

        serde_json::from_str(&body).map_err(|e| {
            OperationError::new(
                ErrorKind::TranslationFailed,
                format!("Failed to parse translation response: {}", e),
            )
        })
    }

    fn name(&self) -> &'static str {
        "translation service"
    }
}
