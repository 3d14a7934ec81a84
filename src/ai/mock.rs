use super::{FreeTextService, PremiumTextService};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Scripted premium backend. Clones share responses and counters.
#[derive(Clone)]
pub struct MockPremiumClient {
    responses: Arc<Mutex<Vec<String>>>,
    should_fail: Arc<Mutex<bool>>,
    call_count: Arc<Mutex<usize>>,
    last_api_key: Arc<Mutex<Option<String>>>,
}

impl MockPremiumClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
            call_count: Arc::new(Mutex::new(0)),
            last_api_key: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push(response.into());
        self
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn last_api_key(&self) -> Option<String> {
        self.last_api_key.lock().unwrap().clone()
    }
}

impl Default for MockPremiumClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PremiumTextService for MockPremiumClient {
    async fn caption_content(&self, topic: &str, api_key: &str) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        *self.last_api_key.lock().unwrap() = Some(api_key.to_string());

        if *self.should_fail.lock().unwrap() {
            return Err(Error::AiProvider("Mock premium failure".to_string()));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Default mock response
            Ok(serde_json::json!({
                "topText": format!("Me before {}", topic),
                "bottomText": format!("Me after {}", topic),
            })
            .to_string())
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}

/// Scripted free backend. Clones share responses and counters.
#[derive(Clone)]
pub struct MockFreeClient {
    responses: Arc<Mutex<Vec<String>>>,
    should_fail: Arc<Mutex<bool>>,
    call_count: Arc<Mutex<usize>>,
    last_api_key: Arc<Mutex<Option<String>>>,
}

impl MockFreeClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
            call_count: Arc::new(Mutex::new(0)),
            last_api_key: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push(response.into());
        self
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn last_api_key(&self) -> Option<String> {
        self.last_api_key.lock().unwrap().clone()
    }
}

impl Default for MockFreeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FreeTextService for MockFreeClient {
    async fn generate_text(&self, topic: &str, api_key: Option<&str>) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        *self.last_api_key.lock().unwrap() = api_key.map(str::to_string);

        if *self.should_fail.lock().unwrap() {
            return Err(Error::AiProvider("Mock network failure".to_string()));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(format!("When {} hits\nAnd you pretend it didn't", topic))
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_premium_default_is_structured() {
        let client = MockPremiumClient::new();
        let content = client.caption_content("cats", "key").await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["topText"], "Me before cats");
        assert_eq!(client.last_api_key().as_deref(), Some("key"));
    }

    #[tokio::test]
    async fn test_mock_premium_cycles_responses() {
        let client = MockPremiumClient::new()
            .with_response("one")
            .with_response("two");

        assert_eq!(client.caption_content("x", "k").await.unwrap(), "one");
        assert_eq!(client.caption_content("x", "k").await.unwrap(), "two");
        // Should cycle back
        assert_eq!(client.caption_content("x", "k").await.unwrap(), "one");
        assert_eq!(client.get_call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_free_failure_still_counts_call() {
        let client = MockFreeClient::new().with_failure(true);
        let probe = client.clone();

        assert!(client.generate_text("x", None).await.is_err());
        assert_eq!(probe.get_call_count(), 1);
        assert_eq!(probe.last_api_key(), None);
    }
}
