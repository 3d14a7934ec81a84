use super::{ExportService, ExportedMeme};
use crate::models::CaptionPair;
use crate::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Records exports without touching the network or disk.
#[derive(Clone)]
pub struct MockExporter {
    exports: Arc<Mutex<Vec<(String, CaptionPair)>>>,
    base_path: String,
    should_fail: Arc<Mutex<bool>>,
}

impl MockExporter {
    pub fn new() -> Self {
        Self {
            exports: Arc::new(Mutex::new(Vec::new())),
            base_path: "/tmp".to_string(),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_base_path(mut self, path: String) -> Self {
        self.base_path = path;
        self
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_export_count(&self) -> usize {
        self.exports.lock().unwrap().len()
    }

    /// Image URL and caption of every export so far, oldest first.
    pub fn exports(&self) -> Vec<(String, CaptionPair)> {
        self.exports.lock().unwrap().clone()
    }
}

impl Default for MockExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExportService for MockExporter {
    async fn export(&self, image_url: &str, caption: &CaptionPair) -> Result<ExportedMeme> {
        if *self.should_fail.lock().unwrap() {
            return Err(crate::Error::Export("Mock failure".to_string()));
        }

        let mut exports = self.exports.lock().unwrap();
        exports.push((image_url.to_string(), caption.clone()));

        Ok(ExportedMeme {
            path: PathBuf::from(format!("{}/meme-{}.png", self.base_path, exports.len())),
            data_url: "data:image/png;base64,".to_string(),
        })
    }
}
