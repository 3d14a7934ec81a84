//! Caption orchestration
//!
//! Decides which backend to call for a topic, normalizes the response into a
//! [`CaptionPair`], and falls back to the local catalog when the free backend
//! cannot deliver. Premium failures are reported; free failures never are.

pub mod parse;

use crate::ai::{FreeTextService, PremiumTextService};
use crate::catalog::FallbackCatalog;
use crate::models::{BackendChoice, CaptionPair, Credentials};
use crate::{Error, Result};
use tracing::{debug, error, info, warn};

/// Lifecycle of a single generation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Idle,
    Requesting,
    Succeeded,
    FallenBack,
}

/// Caption plus the terminal state of the attempt that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub caption: CaptionPair,
    pub outcome: AttemptState,
}

struct Attempt {
    backend: BackendChoice,
    state: AttemptState,
}

impl Attempt {
    fn new(backend: BackendChoice) -> Self {
        Self {
            backend,
            state: AttemptState::Idle,
        }
    }

    fn transition(&mut self, next: AttemptState) {
        debug!(
            "[{}] caption attempt {:?} -> {:?}",
            self.backend, self.state, next
        );
        self.state = next;
    }

    fn finish(mut self, caption: CaptionPair, outcome: AttemptState) -> Generation {
        self.transition(outcome);
        Generation { caption, outcome }
    }
}

pub struct CaptionOrchestrator {
    premium: Box<dyn PremiumTextService>,
    free: Box<dyn FreeTextService>,
    catalog: FallbackCatalog,
}

impl CaptionOrchestrator {
    pub fn new(premium: Box<dyn PremiumTextService>, free: Box<dyn FreeTextService>) -> Self {
        Self {
            premium,
            free,
            catalog: FallbackCatalog::builtin(),
        }
    }

    pub fn with_catalog(mut self, catalog: FallbackCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn catalog(&self) -> &FallbackCatalog {
        &self.catalog
    }

    /// Produce a caption for `topic` with the selected backend.
    ///
    /// Fails with [`Error::EmptyTopic`] for a blank topic, with
    /// [`Error::MissingCredential`] for the premium backend without a key, and
    /// with [`Error::GenerationFailed`] when the premium call fails. The free
    /// backend always yields a caption.
    pub async fn generate_caption(
        &self,
        topic: &str,
        backend: BackendChoice,
        credentials: &Credentials,
    ) -> Result<CaptionPair> {
        self.generate_with_outcome(topic, backend, credentials)
            .await
            .map(|generation| generation.caption)
    }

    pub async fn generate_with_outcome(
        &self,
        topic: &str,
        backend: BackendChoice,
        credentials: &Credentials,
    ) -> Result<Generation> {
        let topic = validate_topic(topic)?;

        match backend {
            BackendChoice::Premium => {
                let api_key = credentials
                    .get(BackendChoice::Premium)
                    .ok_or(Error::MissingCredential(BackendChoice::Premium))?;
                self.generate_premium(topic, api_key).await
            }
            BackendChoice::Free => {
                Ok(self
                    .generate_free(topic, credentials.get(BackendChoice::Free))
                    .await)
            }
        }
    }

    /// Catalog caption without any network call.
    pub fn local_caption(&self, topic: &str) -> Result<CaptionPair> {
        let topic = validate_topic(topic)?;
        let attempt = Attempt::new(BackendChoice::Free);
        Ok(attempt
            .finish(self.catalog.random_caption(topic), AttemptState::FallenBack)
            .caption)
    }

    async fn generate_premium(&self, topic: &str, api_key: &str) -> Result<Generation> {
        let mut attempt = Attempt::new(BackendChoice::Premium);
        attempt.transition(AttemptState::Requesting);

        let content = self
            .premium
            .caption_content(topic, api_key)
            .await
            .map_err(|e| {
                error!("Premium caption generation failed: {}", e);
                Error::GenerationFailed(e.to_string())
            })?;

        // An unparseable payload is not an error: it degrades to an empty pair.
        let caption = parse::run_chain(parse::PREMIUM_CHAIN, &content).unwrap_or_default();

        info!("Generated premium caption for '{}'", topic);
        Ok(attempt.finish(caption, AttemptState::Succeeded))
    }

    async fn generate_free(&self, topic: &str, api_key: Option<&str>) -> Generation {
        let mut attempt = Attempt::new(BackendChoice::Free);
        attempt.transition(AttemptState::Requesting);

        match self.free.generate_text(topic, api_key).await {
            Ok(text) => match parse::run_chain(parse::FREE_CHAIN, &text) {
                Some(caption) => {
                    info!("Generated free caption for '{}'", topic);
                    return attempt.finish(caption, AttemptState::Succeeded);
                }
                None => warn!("Free backend returned no usable lines, using catalog"),
            },
            Err(e) => warn!("Free backend failed ({}), using catalog", e),
        }

        attempt.finish(self.catalog.random_caption(topic), AttemptState::FallenBack)
    }
}

fn validate_topic(topic: &str) -> Result<&str> {
    let trimmed = topic.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyTopic);
    }
    Ok(trimmed)
}
