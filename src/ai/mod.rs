//! AI text-generation backends for meme captions
//!
//! The premium backend is an OpenAI-compatible chat-completion API; the free
//! backend is a hosted Hugging Face text-generation model. Both are consumed
//! through the traits below so the caption orchestrator can be driven by mocks.

pub mod huggingface;
pub mod mock;
pub mod openai;

pub use huggingface::HuggingFaceTextClient;
pub use mock::{MockFreeClient, MockPremiumClient};
pub use openai::OpenAiCaptionClient;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PremiumTextService: Send + Sync {
    /// Ask for a caption about `topic` and return the raw message content.
    async fn caption_content(&self, topic: &str, api_key: &str) -> Result<String>;
}

#[async_trait]
pub trait FreeTextService: Send + Sync {
    /// Ask for caption text about `topic`; the key is sent only when present.
    async fn generate_text(&self, topic: &str, api_key: Option<&str>) -> Result<String>;
}
