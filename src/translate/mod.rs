pub mod http;

pub use http::TranslationClient;

use crate::error::OperationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Body of a `POST /translate` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub text: String,
    pub target_language: String,
    /// Ask the service for its deterministic stub translator instead of the paid backend.
    pub use_mock: bool,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, target_language: impl Into<String>, use_mock: bool) -> Self {
        Self {
            text: text.into(),
            target_language: target_language.into(),
            use_mock,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub translated_text: String,
}

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate one request. Issues exactly one request, never retries.
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult, OperationError>;
    fn name(&self) -> &'static str;
}
