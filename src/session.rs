//! Per-user session state
//!
//! [`CaptionSourceSelector`] tracks which backend is active and the keys for
//! each. [`MemeSession`] holds everything else a user edits while building a
//! meme: template, topic, the current caption, and the in-progress flag.

use crate::caption::CaptionOrchestrator;
use crate::models::{BackendChoice, CaptionPair, Credentials};
use crate::templates::{self, MemeTemplate};
use crate::Result;
use tracing::info;
use uuid::Uuid;

/// Backend selection plus credentials. Setting either never validates.
#[derive(Debug, Clone, Default)]
pub struct CaptionSourceSelector {
    backend: BackendChoice,
    credentials: Credentials,
}

impl CaptionSourceSelector {
    pub fn new(backend: BackendChoice, credentials: Credentials) -> Self {
        Self {
            backend,
            credentials,
        }
    }

    pub fn backend(&self) -> BackendChoice {
        self.backend
    }

    pub fn set_backend(&mut self, backend: BackendChoice) {
        self.backend = backend;
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn set_credential(&mut self, backend: BackendChoice, key: Option<String>) {
        self.credentials.set(backend, key);
    }
}

pub struct MemeSession {
    id: Uuid,
    selector: CaptionSourceSelector,
    template: &'static MemeTemplate,
    topic: String,
    caption: CaptionPair,
    generating: bool,
}

impl MemeSession {
    pub fn new(selector: CaptionSourceSelector) -> Self {
        Self {
            id: Uuid::new_v4(),
            selector,
            template: templates::default_template(),
            topic: String::new(),
            caption: CaptionPair::default(),
            generating: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn selector(&self) -> &CaptionSourceSelector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut CaptionSourceSelector {
        &mut self.selector
    }

    pub fn template(&self) -> &'static MemeTemplate {
        self.template
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn caption(&self) -> &CaptionPair {
        &self.caption
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn select_template(&mut self, id: &str) -> Result<&'static MemeTemplate> {
        self.template = templates::find_template(id)?;
        Ok(self.template)
    }

    pub fn select_random_template(&mut self) -> &'static MemeTemplate {
        self.template = templates::random_template();
        info!("[{}] Random template selected: {}", self.id, self.template.name);
        self.template
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    pub fn use_trending_topic(&mut self, topic: &str) {
        self.topic = topic.to_string();
        info!("[{}] Topic set: {}", self.id, topic);
    }

    pub fn edit_top_text(&mut self, text: impl Into<String>) {
        self.caption.top = text.into();
    }

    pub fn edit_bottom_text(&mut self, text: impl Into<String>) {
        self.caption.bottom = text.into();
    }

    /// Generate a caption for the current topic and replace the current one.
    ///
    /// On error the previous caption is kept.
    pub async fn generate(&mut self, orchestrator: &CaptionOrchestrator) -> Result<&CaptionPair> {
        self.generating = true;
        let result = orchestrator
            .generate_caption(
                &self.topic,
                self.selector.backend(),
                self.selector.credentials(),
            )
            .await;
        self.generating = false;

        self.caption = result?;
        info!("[{}] Meme text generated", self.id);
        Ok(&self.caption)
    }

    /// Replace the caption from the local catalog without any network call.
    pub fn generate_local(&mut self, orchestrator: &CaptionOrchestrator) -> Result<&CaptionPair> {
        self.caption = orchestrator.local_caption(&self.topic)?;
        Ok(&self.caption)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{MockFreeClient, MockPremiumClient};
    use crate::templates::MEME_TEMPLATES;
    use crate::Error;

    fn orchestrator_with(premium: MockPremiumClient) -> CaptionOrchestrator {
        CaptionOrchestrator::new(Box::new(premium), Box::new(MockFreeClient::new()))
    }

    #[test]
    fn test_selector_switching_has_no_side_effects() {
        let mut selector = CaptionSourceSelector::default();
        selector.set_credential(BackendChoice::Premium, Some(String::new()));
        selector.set_backend(BackendChoice::Premium);

        assert_eq!(selector.backend(), BackendChoice::Premium);
        assert_eq!(selector.credentials().get(BackendChoice::Premium), None);

        selector.set_backend(BackendChoice::Free);
        assert_eq!(selector.backend(), BackendChoice::Free);
    }

    #[test]
    fn test_new_session_defaults() {
        let session = MemeSession::new(CaptionSourceSelector::default());
        assert_eq!(session.template().id, "drake");
        assert!(session.topic().is_empty());
        assert_eq!(session.caption(), &CaptionPair::default());
        assert!(!session.is_generating());
    }

    #[test]
    fn test_template_selection() {
        let mut session = MemeSession::new(CaptionSourceSelector::default());
        session.select_template("two-buttons").unwrap();
        assert_eq!(session.template().name, "Two Buttons");

        assert!(session.select_template("nope").is_err());
        assert_eq!(session.template().id, "two-buttons");

        let random = session.select_random_template();
        assert!(MEME_TEMPLATES.contains(random));
    }

    #[tokio::test]
    async fn test_generate_replaces_caption() {
        let premium = MockPremiumClient::new().with_response(r#"{"topText":"A","bottomText":"B"}"#);
        let orch = orchestrator_with(premium);
        let selector = CaptionSourceSelector::new(
            BackendChoice::Premium,
            Credentials::new(None, Some("sk".to_string())),
        );
        let mut session = MemeSession::new(selector);
        session.use_trending_topic("Monday morning");
        session.edit_top_text("old top");

        let caption = session.generate(&orch).await.unwrap().clone();
        assert_eq!(caption, CaptionPair::new("A", "B"));
        assert!(!session.is_generating());
    }

    #[tokio::test]
    async fn test_failed_generation_keeps_previous_caption() {
        let orch = orchestrator_with(MockPremiumClient::new().with_failure(true));
        let selector = CaptionSourceSelector::new(
            BackendChoice::Premium,
            Credentials::new(None, Some("sk".to_string())),
        );
        let mut session = MemeSession::new(selector);
        session.set_topic("Coffee addiction");
        session.edit_top_text("hand written");
        session.edit_bottom_text("caption");

        let err = session.generate(&orch).await.unwrap_err();
        assert!(matches!(err, Error::GenerationFailed(_)));
        assert_eq!(session.caption(), &CaptionPair::new("hand written", "caption"));
        assert!(!session.is_generating());
    }

    #[tokio::test]
    async fn test_generate_requires_topic() {
        let orch = orchestrator_with(MockPremiumClient::new());
        let mut session = MemeSession::new(CaptionSourceSelector::default());

        assert!(matches!(
            session.generate(&orch).await,
            Err(Error::EmptyTopic)
        ));
        assert!(matches!(session.generate_local(&orch), Err(Error::EmptyTopic)));
    }

    #[test]
    fn test_hand_edits_touch_one_side() {
        let mut session = MemeSession::new(CaptionSourceSelector::default());
        session.edit_top_text("top only");
        assert_eq!(session.caption(), &CaptionPair::new("top only", ""));
        session.edit_bottom_text("bottom");
        assert_eq!(session.caption(), &CaptionPair::new("top only", "bottom"));
    }
}
