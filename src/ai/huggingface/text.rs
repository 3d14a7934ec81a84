use super::client::HuggingFaceHttpClient;
use super::types::{GenerationParameters, GenerationRequest};
use crate::ai::FreeTextService;
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Free caption backend backed by a hosted text-generation model.
pub struct HuggingFaceTextClient {
    http: HuggingFaceHttpClient,
}

impl HuggingFaceTextClient {
    pub fn new(model: String) -> Self {
        Self::new_with_client(model, reqwest::Client::new(), Duration::from_secs(30))
    }

    pub fn new_with_client(model: String, client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            http: HuggingFaceHttpClient::new_with_client(model, timeout, client),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

#[async_trait]
impl FreeTextService for HuggingFaceTextClient {
    async fn generate_text(&self, topic: &str, api_key: Option<&str>) -> Result<String> {
        tracing::debug!(
            "Requesting free caption (model: {}, authenticated: {})",
            self.http.model(),
            api_key.is_some()
        );

        let request = GenerationRequest {
            inputs: prompts::render(prompts::FREE_PROMPT, &[("topic", topic)])
                .trim_end()
                .to_string(),
            parameters: GenerationParameters {
                max_new_tokens: 50,
                temperature: 0.9,
                return_full_text: false,
            },
        };

        self.http
            .generate(api_key, &request)
            .await?
            .into_text()
            .ok_or_else(|| Error::AiProvider("Empty response from Hugging Face".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn make_client(server: &MockServer) -> HuggingFaceTextClient {
        HuggingFaceTextClient::new("gpt2".to_string()).with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_generate_text_reads_array_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gpt2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "generated_text": "Coffee first\nQuestions later" }
            ])))
            .mount(&server)
            .await;

        let text = make_client(&server)
            .generate_text("Coffee", None)
            .await
            .unwrap();
        assert_eq!(text, "Coffee first\nQuestions later");
    }

    #[tokio::test]
    async fn test_generate_text_sends_prompt_and_parameters() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gpt2"))
            .and(body_partial_json(serde_json::json!({
                "parameters": { "return_full_text": false, "max_new_tokens": 50 }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "generated_text": "ok" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        make_client(&server)
            .generate_text("Coffee", None)
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body["inputs"].as_str().unwrap().contains("Coffee"));
    }

    #[tokio::test]
    async fn test_bearer_header_only_with_key() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gpt2"))
            .and(header("Authorization", "Bearer hf-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "generated_text": "authed" })),
            )
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/models/gpt2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "generated_text": "anonymous" })),
            )
            .mount(&server)
            .await;

        let client = make_client(&server);
        assert_eq!(
            client.generate_text("x", Some("hf-token")).await.unwrap(),
            "authed"
        );
        assert_eq!(client.generate_text("x", None).await.unwrap(), "anonymous");

        let requests: Vec<Request> = server.received_requests().await.unwrap();
        assert!(requests[1].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_api_error_returns_ai_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gpt2"))
            .and(header_exists("content-type"))
            .respond_with(ResponseTemplate::new(503).set_body_string("model is loading"))
            .mount(&server)
            .await;

        let err = make_client(&server)
            .generate_text("Coffee", None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }

    #[tokio::test]
    async fn test_empty_array_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gpt2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let err = make_client(&server)
            .generate_text("Coffee", None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }
}
