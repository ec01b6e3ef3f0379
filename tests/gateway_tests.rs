//! HTTP gateway tests against a local mock server.

use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use ytranslate::gateway::http_client;
use ytranslate::transcript::{TranscriptClient, TranscriptSource};
use ytranslate::translate::{TranslationClient, TranslationRequest, Translator};
use ytranslate::{extract_video_id, ErrorKind, VideoId};

fn video(id: &str) -> VideoId {
    extract_video_id(&format!("https://youtu.be/{}", id)).expect("valid short link")
}

/// Nothing listens here, so connecting fails immediately.
const DEAD_SERVICE: &str = "http://127.0.0.1:1";

// ============================================================================
// Transcript Service Tests
// ============================================================================

mod transcript_tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_transcript_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transcript"))
            .and(query_param("videoId", "abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {"offset": 0, "duration": 1500, "text": "Hello"},
                    {"offset": 1500, "duration": 1000, "text": "world"}
                ],
                "fullText": "Hello world"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = TranscriptClient::new(server.uri());
        let transcript = tokio_test::assert_ok!(client.fetch_transcript(&video("abc123")).await);

        assert_eq!(transcript.items.len(), 2);
        assert_eq!(transcript.items[1].offset_millis, 1500);
        assert_eq!(transcript.full_text, "Hello world");
    }

    #[tokio::test]
    async fn test_fetch_transcript_derives_full_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transcript"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {"offset": 0, "text": "Hello"},
                    {"offset": 1500, "text": "world"}
                ]
            })))
            .mount(&server)
            .await;

        let client = TranscriptClient::new(server.uri());
        let transcript = client.fetch_transcript(&video("abc123")).await.unwrap();
        assert_eq!(transcript.full_text, "Hello world");
    }

    #[tokio::test]
    async fn test_fetch_transcript_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transcript"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "No captions"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = TranscriptClient::new(server.uri());
        let error = tokio_test::assert_err!(client.fetch_transcript(&video("nocaps")).await);

        assert_eq!(error.kind, ErrorKind::TranscriptUnavailable);
        assert_eq!(error.message, "Failed to fetch transcript (HTTP 404)");
    }

    #[tokio::test]
    async fn test_fetch_transcript_bad_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transcript"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = TranscriptClient::new(server.uri());
        let error = client.fetch_transcript(&video("abc123")).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::TranscriptUnavailable);
    }

    #[tokio::test]
    async fn test_fetch_transcript_network_error() {
        let client = TranscriptClient::new(DEAD_SERVICE);
        let error = client.fetch_transcript(&video("abc123")).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::NetworkError);
        assert!(error.message.starts_with("Network error"));
    }

    #[tokio::test]
    async fn test_fetch_transcript_timeout_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transcript"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"items": [], "fullText": ""}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let http = http_client(Some(Duration::from_millis(200))).unwrap();
        let client = TranscriptClient::with_client(http, server.uri());
        let error = client.fetch_transcript(&video("abc123")).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::NetworkError);
    }

    #[test]
    fn test_transcript_client_name() {
        assert_eq!(TranscriptClient::new(DEAD_SERVICE).name(), "transcript service");
    }
}

// ============================================================================
// Translation Service Tests
// ============================================================================

mod translation_tests {
    use super::*;

    #[tokio::test]
    async fn test_translate_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(body_json(json!({
                "text": "Hello world",
                "targetLanguage": "Spanish",
                "useMock": true
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"translatedText": "[Spanish] Hello world"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = TranslationClient::new(server.uri());
        let result = client
            .translate(&TranslationRequest::new("Hello world", "Spanish", true))
            .await
            .unwrap();

        assert_eq!(result.translated_text, "[Spanish] Hello world");
    }

    #[tokio::test]
    async fn test_translate_error_body_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "OpenAI quota exceeded"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = TranslationClient::new(server.uri());
        let error = client
            .translate(&TranslationRequest::new("Hello", "French", false))
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::TranslationFailed);
        assert_eq!(error.message, "OpenAI quota exceeded");
    }

    #[tokio::test]
    async fn test_translate_error_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let client = TranslationClient::new(server.uri());
        let error = client
            .translate(&TranslationRequest::new("Hello", "French", false))
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::TranslationFailed);
        assert_eq!(error.message, "Translation failed");
    }

    #[tokio::test]
    async fn test_translate_malformed_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "missing field"})))
            .mount(&server)
            .await;

        let client = TranslationClient::new(server.uri());
        let error = client
            .translate(&TranslationRequest::new("Hello", "French", false))
            .await
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::TranslationFailed);
    }

    #[tokio::test]
    async fn test_translate_network_error() {
        let client = TranslationClient::new(DEAD_SERVICE);
        let error = client
            .translate(&TranslationRequest::new("Hello", "French", false))
            .await
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::NetworkError);
    }

    #[tokio::test]
    async fn test_translate_never_retries() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let client = TranslationClient::new(format!("{}/", server.uri()));
        assert!(client
            .translate(&TranslationRequest::new("Hello", "French", false))
            .await
            .is_err());
    }

    #[test]
    fn test_translation_client_name() {
        assert_eq!(TranslationClient::new(DEAD_SERVICE).name(), "translation service");
    }
}
