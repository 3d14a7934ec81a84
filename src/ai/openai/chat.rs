use super::client::OpenAiHttpClient;
use super::types::{ChatCompletionRequest, ChatMessage};
use crate::ai::PremiumTextService;
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use std::time::Duration;

const MAX_TOKENS: u32 = 150;
const TEMPERATURE: f64 = 0.9;

/// Premium caption backend backed by OpenAI chat completions.
pub struct OpenAiCaptionClient {
    http: OpenAiHttpClient,
    model: String,
}

impl OpenAiCaptionClient {
    pub fn new(model: String) -> Self {
        Self::new_with_client(model, reqwest::Client::new(), Duration::from_secs(30))
    }

    pub fn new_with_client(model: String, client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            http: OpenAiHttpClient::new_with_client(timeout, client),
            model,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    fn build_request(&self, topic: &str) -> ChatCompletionRequest {
        let system_message = ChatMessage {
            role: "system".to_string(),
            content: Some(prompts::CAPTION_SYSTEM.trim_end().to_string()),
        };

        let user_message = ChatMessage {
            role: "user".to_string(),
            content: Some(
                prompts::render(prompts::CAPTION_USER, &[("topic", topic)])
                    .trim_end()
                    .to_string(),
            ),
        };

        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![system_message, user_message],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

#[async_trait]
impl PremiumTextService for OpenAiCaptionClient {
    async fn caption_content(&self, topic: &str, api_key: &str) -> Result<String> {
        tracing::debug!("Requesting premium caption (model: {})", self.model);

        let request = self.build_request(topic);
        let response = self.http.chat_completion(api_key, &request).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::AiProvider("No response from OpenAI chat API".to_string()))
    }
}
