//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use crate::models::BackendChoice;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Please enter a topic first")]
    EmptyTopic,

    #[error("Missing API key for the {0} backend")]
    MissingCredential(BackendChoice),

    #[error("Failed to generate meme text: {0}")]
    GenerationFailed(String),

    #[error("Unknown meme template: {0}")]
    UnknownTemplate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Export error: {0}")]
    Export(String),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invariant violation: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, Error>;
