//! Meme generator - AI-captioned meme templates
//!
//! Picks an image template, asks a text-generation backend for a top/bottom
//! caption about a topic (falling back to a local joke catalog when the free
//! backend is unavailable), and exports the composed meme as a PNG.

pub mod ai;
pub mod app;
pub mod caption;
pub mod catalog;
pub mod error;
pub mod export;
pub mod models;
pub mod prompts;
pub mod session;
pub mod templates;

pub use error::{Error, Result};
