//! Meme image export
//!
//! Fetches a template image, rasterizes it at export scale with the caption
//! drawn over it, and writes a downloadable PNG.

pub mod mock;
pub mod renderer;

pub use mock::MockExporter;
pub use renderer::PngExporter;

use crate::models::CaptionPair;
use crate::Result;
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ExportedMeme {
    pub path: PathBuf,
    pub data_url: String,
}

#[async_trait]
pub trait ExportService: Send + Sync {
    async fn export(&self, image_url: &str, caption: &CaptionPair) -> Result<ExportedMeme>;
}
