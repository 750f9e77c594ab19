use crate::error::{ExtractorError, Result};
use crate::llm::types::*;
use reqwest::Client;
use std::future::Future;

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Model used when the caller does not pick one.
pub const DEFAULT_MODEL: &str = "o3-mini";

/// One JSON-mode chat completion: a system and user message go in, the raw
/// model text comes out. The API is fallible, rate-limited and
/// non-deterministic; implementations surface failures as errors and leave
/// retry policy to the caller (the extractor's policy is: none).
pub trait LlmClient {
    fn chat_json(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Chat-completions client for the OpenAI API.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: OPENAI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Point the client at a compatible endpoint (proxy, regional gateway).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl LlmClient for OpenAiClient {
    async fn chat_json(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let payload = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_prompt),
            ],
            response_format: ResponseFormat::json_object(),
        };

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ExtractorError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatCompletionResponse = res.json().await?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ExtractorError::MalformedResponse("no message content in completion".to_string())
            })
    }
}
