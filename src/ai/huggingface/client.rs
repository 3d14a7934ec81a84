use super::types::{GenerationRequest, GenerationResponse};
use crate::{Error, Result};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";

/// Lightweight Inference API client for a single hosted model.
pub struct HuggingFaceHttpClient {
    client: Client,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl HuggingFaceHttpClient {
    pub fn new_with_client(model: String, timeout: Duration, client: Client) -> Self {
        Self {
            client,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Calls `POST /models/{model}`; the bearer header is added only with a key.
    pub async fn generate(
        &self,
        api_key: Option<&str>,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse> {
        let url = format!("{}/models/{}", self.base_url, self.model);

        let mut builder = self.client.post(&url).timeout(self.timeout).json(request);
        if let Some(key) = api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!("Failed to send request to Hugging Face: {}", e);
            e
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::warn!(
                "Hugging Face API error (status {}): {}",
                status,
                error_text
            );
            return Err(Error::AiProvider(format!(
                "Hugging Face API error (status {}): {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!("Failed to parse Hugging Face response: {}\nBody: {}", e, body);
            Error::AiProvider(format!("Failed to parse Hugging Face response: {}", e))
        })
    }
}
