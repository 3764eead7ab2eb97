//! LLM Client — the single point of entry for all chat-completion calls.
//!
//! No other module talks to the OpenAI API directly; callers depend on the
//! `ChatBackend` trait so tests can substitute a canned backend.
//!
//! Model and temperature are fixed constants, not configuration.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

/// The model used for every evaluation call.
pub const MODEL: &str = "gpt-4-0613";
pub const TEMPERATURE: f64 = 0.7;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("OPENAI_API_KEY is not configured")]
    MissingApiKey,

    #[error("LLM request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM response contained no choices")]
    NoChoices,
}

/// Anything that can answer a system + user instruction pair with one text response.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f64,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text content of the first choice; a `null` content reads as "".
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|c| c.message.content.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// Wraps the OpenAI Chat Completions API. One call per request, no retries.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl LlmClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(config.llm_timeout).build()?,
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.clone(),
            timeout: config.llm_timeout,
        })
    }

    /// Makes one call to the chat completions endpoint and returns the full response object.
    pub async fn call(&self, system: &str, user: &str) -> Result<ChatResponse, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let request_body = ChatRequest {
            model: MODEL,
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| self.classify(e))?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }

    fn classify(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout(self.timeout)
        } else {
            LlmError::Http(err)
        }
    }
}

#[async_trait]
impl ChatBackend for LlmClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let response = self.call(system, user).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::NoChoices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, api_key: Option<&str>, timeout: Duration) -> LlmClient {
        let config = Config {
            openai_api_key: api_key.map(str::to_string),
            openai_base_url: server.uri(),
            llm_timeout: timeout,
            max_upload_bytes: 1024,
            upload_tmp_dir: None,
            port: 0,
            rust_log: "info".to_string(),
        };
        LlmClient::new(&config).unwrap()
    }

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 7, "total_tokens": 19 }
        })
    }

    #[tokio::test]
    async fn test_complete_sends_fixed_model_and_temperature() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4-0613",
                "temperature": 0.7,
                "messages": [
                    { "role": "system", "content": "be terse" },
                    { "role": "user", "content": "hello" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("{\"ok\":true}")))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("sk-test"), Duration::from_secs(5));
        let text = client.complete("be terse", "hello").await.unwrap();
        assert_eq!(text, "{\"ok\":true}");
    }

    #[tokio::test]
    async fn test_api_error_message_is_extracted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("sk-bad"), Duration::from_secs(5));
        let err = client.complete("s", "u").await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_calling_backend() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("{}")))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, None, Duration::from_secs(5));
        let err = client.complete("s", "u").await.unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey));
        assert_eq!(err.to_string(), "OPENAI_API_KEY is not configured");
    }

    #[tokio::test]
    async fn test_slow_backend_yields_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion("{}"))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, Some("sk-test"), Duration::from_millis(200));
        let err = client.complete("s", "u").await.unwrap_err();
        assert!(matches!(err, LlmError::Timeout(_)), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn test_null_content_reads_as_empty_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": null } }]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("sk-test"), Duration::from_secs(5));
        let text = client.complete("s", "u").await.unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_no_choices_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("sk-test"), Duration::from_secs(5));
        let err = client.complete("s", "u").await.unwrap_err();
        assert!(matches!(err, LlmError::NoChoices), "unexpected error: {err:?}");
    }
}
