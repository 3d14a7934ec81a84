use super::{ExportService, ExportedMeme};
use crate::models::CaptionPair;
use crate::{Error, Result};
use ab_glyph::{FontRef, PxScale};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{imageops::FilterType, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use little_exif::exif_tag::ExifTag;
use little_exif::metadata::Metadata;
use reqwest::Client;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;

const EXPORT_SCALE: u32 = 2;
const CAPTION_FONT: &[u8] = include_bytes!("../../data/fonts/DejaVuSans-Bold.ttf");
const MIN_FONT_PX: f32 = 10.0;
const TEXT_FILL: Rgba<u8> = Rgba([255, 255, 255, 255]);
const TEXT_OUTLINE: Rgba<u8> = Rgba([0, 0, 0, 255]);

pub struct PngExporter {
    client: Client,
    output_dir: PathBuf,
    timeout: Duration,
}

/// Where one caption line sits on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Top,
    Bottom,
}

impl PngExporter {
    pub fn new(output_dir: &Path) -> Result<Self> {
        Self::new_with_client(output_dir, Client::new(), Duration::from_secs(30))
    }

    pub fn new_with_client(output_dir: &Path, client: Client, timeout: Duration) -> Result<Self> {
        std::fs::create_dir_all(output_dir)?;
        Ok(Self {
            client,
            output_dir: output_dir.to_path_buf(),
            timeout,
        })
    }

    async fn fetch_template(&self, image_url: &str) -> Result<Vec<u8>> {
        tracing::debug!("Fetching template image from {}", image_url);

        let response = self
            .client
            .get(image_url)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Template download failed (status {})", status);
            return Err(Error::Export(format!(
                "Template download failed (status {})",
                status
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn render_sync(image_data: Vec<u8>, caption: &CaptionPair) -> Result<Vec<u8>> {
        let img = image::load_from_memory(&image_data)?;
        let mut canvas = img
            .resize_exact(
                img.width() * EXPORT_SCALE,
                img.height() * EXPORT_SCALE,
                FilterType::Lanczos3,
            )
            .to_rgba8();

        let font = FontRef::try_from_slice(CAPTION_FONT)
            .map_err(|e| Error::Export(format!("Failed to load caption font: {}", e)))?;
        draw_caption_line(&mut canvas, &font, &caption.top, Edge::Top);
        draw_caption_line(&mut canvas, &font, &caption.bottom, Edge::Bottom);

        let mut png = Vec::new();
        canvas.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }

    fn next_output_path(&self) -> PathBuf {
        let stamp = chrono::Utc::now().timestamp_millis();
        let mut path = self.output_dir.join(format!("meme-{}.png", stamp));
        let mut suffix = 1;
        while path.exists() {
            path = self.output_dir.join(format!("meme-{}-{}.png", stamp, suffix));
            suffix += 1;
        }
        path
    }

    /// Render already-downloaded template bytes and write the meme file.
    pub async fn export_bytes(
        &self,
        image_data: &[u8],
        caption: &CaptionPair,
    ) -> Result<ExportedMeme> {
        let png = tokio::task::spawn_blocking({
            let image_data = image_data.to_vec();
            let caption = caption.clone();
            move || Self::render_sync(image_data, &caption)
        })
        .await
        .map_err(|e| Error::Invariant(format!("Image render task join error: {}", e)))??;

        let path = self.next_output_path();
        tokio::fs::write(&path, &png).await?;

        let mut metadata = Metadata::new();
        metadata.set_tag(ExifTag::ImageDescription(format!(
            "{} / {}",
            caption.top, caption.bottom
        )));
        if let Err(e) = metadata.write_to_file(&path) {
            tracing::warn!("Failed to write caption metadata to {}: {}", path.display(), e);
        }

        let written = tokio::fs::read(&path).await?;
        tracing::info!("Meme exported to {}", path.display());

        Ok(ExportedMeme {
            path,
            data_url: format!("data:image/png;base64,{}", STANDARD.encode(&written)),
        })
    }
}

/// Draws one caption line upper-cased and centred against `edge`, white with
/// a black outline. Text wider than the canvas is shrunk down to `MIN_FONT_PX`
/// and clipped past that.
fn draw_caption_line(canvas: &mut RgbaImage, font: &FontRef<'_>, text: &str, edge: Edge) {
    let text = text.trim().to_uppercase();
    if text.is_empty() {
        return;
    }
    let text = text.as_str();

    let (width, height) = canvas.dimensions();
    let margin = (height / 30).max(1);
    let max_width = width.saturating_sub(2 * margin).max(1);

    let mut px = (height as f32 / 8.0).max(MIN_FONT_PX);
    let (mut text_w, mut text_h) = text_size(PxScale::from(px), font, text);
    if text_w > max_width {
        px = (px * max_width as f32 / text_w as f32).max(MIN_FONT_PX);
        (text_w, text_h) = text_size(PxScale::from(px), font, text);
    }
    let scale = PxScale::from(px);

    let x = (width as i32 - text_w as i32) / 2;
    let y = match edge {
        Edge::Top => margin as i32,
        Edge::Bottom => height as i32 - margin as i32 - text_h as i32,
    };

    let outline = (px / 16.0).ceil().max(1.0) as i32;
    for dx in -outline..=outline {
        for dy in -outline..=outline {
            if dx != 0 || dy != 0 {
                draw_text_mut(canvas, TEXT_OUTLINE, x + dx, y + dy, scale, font, text);
            }
        }
    }
    draw_text_mut(canvas, TEXT_FILL, x, y, scale, font, text);
}

#[async_trait]
impl ExportService for PngExporter {
    async fn export(&self, image_url: &str, caption: &CaptionPair) -> Result<ExportedMeme> {
        let image_data = self.fetch_template(image_url).await?;
        self.export_bytes(&image_data, caption).await
    }
}
