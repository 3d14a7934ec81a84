//! Application orchestration for generating and exporting one meme.

use crate::ai::{FreeTextService, HuggingFaceTextClient, OpenAiCaptionClient, PremiumTextService};
use crate::caption::CaptionOrchestrator;
use crate::catalog::FallbackCatalog;
use crate::export::{ExportService, ExportedMeme, PngExporter};
use crate::models::{BackendChoice, CaptionPair, Config};
use crate::session::{CaptionSourceSelector, MemeSession};
use crate::templates::MemeTemplate;
use crate::Result;
use std::path::Path;
use std::time::Duration;
use tracing::{error, info};

/// Which template a run should use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateChoice {
    #[default]
    Default,
    Id(String),
    Random,
}

/// Everything the user supplies for one run.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub topic: String,
    pub backend: Option<BackendChoice>,
    pub premium_key: Option<String>,
    pub free_key: Option<String>,
    pub template: TemplateChoice,
    pub offline: bool,
    pub top_text: Option<String>,
    pub bottom_text: Option<String>,
    pub export: bool,
}

#[derive(Debug, Clone)]
pub struct MemeOutput {
    pub template: &'static MemeTemplate,
    pub caption: CaptionPair,
    pub export: Option<ExportedMeme>,
}

/// Coordinates caption generation and image export for a session.
pub struct App {
    orchestrator: CaptionOrchestrator,
    exporter: Box<dyn ExportService>,
    selector: CaptionSourceSelector,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub premium: Box<dyn PremiumTextService>,
    pub free: Box<dyn FreeTextService>,
    pub exporter: Box<dyn ExportService>,
    pub catalog: FallbackCatalog,
}

impl App {
    /// Build an app from concrete service dependencies.
    pub fn with_services(services: AppServices, selector: CaptionSourceSelector) -> Self {
        Self {
            orchestrator: CaptionOrchestrator::new(services.premium, services.free)
                .with_catalog(services.catalog),
            exporter: services.exporter,
            selector,
        }
    }

    /// Construct an app from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.http_timeout_secs);

        // Reuse one HTTP connection pool across services.
        let http_client = reqwest::Client::new();

        info!(
            "Premium backend: OpenAI-compatible (model: {})",
            config.premium_model
        );
        let premium = OpenAiCaptionClient::new_with_client(
            config.premium_model.clone(),
            http_client.clone(),
            timeout,
        )
        .with_base_url(config.premium_base_url.clone());

        info!("Free backend: Hugging Face (model: {})", config.free_model);
        let free = HuggingFaceTextClient::new_with_client(
            config.free_model.clone(),
            http_client.clone(),
            timeout,
        )
        .with_base_url(config.free_base_url.clone());

        let exporter =
            PngExporter::new_with_client(Path::new(&config.output_dir), http_client, timeout)?;

        Ok(Self::with_services(
            AppServices {
                premium: Box::new(premium),
                free: Box::new(free),
                exporter: Box::new(exporter),
                catalog: FallbackCatalog::builtin(),
            },
            CaptionSourceSelector::new(config.backend, config.credentials.clone()),
        ))
    }

    pub fn orchestrator(&self) -> &CaptionOrchestrator {
        &self.orchestrator
    }

    /// Start a session seeded with the configured backend and credentials.
    pub fn session(&self) -> MemeSession {
        MemeSession::new(self.selector.clone())
    }

    /// Generate a caption for the request and optionally export the meme.
    pub async fn run(&self, request: GenerateRequest) -> Result<MemeOutput> {
        let mut session = self.session();
        info!("[{}] Session started", session.id());

        let selector = session.selector_mut();
        if let Some(backend) = request.backend {
            selector.set_backend(backend);
        }
        if let Some(key) = request.premium_key {
            selector.set_credential(BackendChoice::Premium, Some(key));
        }
        if let Some(key) = request.free_key {
            selector.set_credential(BackendChoice::Free, Some(key));
        }

        match &request.template {
            TemplateChoice::Default => {}
            TemplateChoice::Id(id) => {
                session.select_template(id)?;
            }
            TemplateChoice::Random => {
                session.select_random_template();
            }
        }

        session.set_topic(request.topic);

        let generated = if request.offline {
            session.generate_local(&self.orchestrator).map(|_| ())
        } else {
            session.generate(&self.orchestrator).await.map(|_| ())
        };
        if let Err(e) = generated {
            error!("[{}] Caption generation failed: {}", session.id(), e);
            return Err(e);
        }

        if let Some(top) = request.top_text {
            session.edit_top_text(top);
        }
        if let Some(bottom) = request.bottom_text {
            session.edit_bottom_text(bottom);
        }

        let export = if request.export {
            Some(
                self.exporter
                    .export(session.template().image_url, session.caption())
                    .await?,
            )
        } else {
            None
        };

        Ok(MemeOutput {
            template: session.template(),
            caption: session.caption().clone(),
            export,
        })
    }
}
