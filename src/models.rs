//! Data models and structures
//!
//! Defines the backend selection, credentials, caption output and runtime
//! configuration shared across the generator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Text-generation backend selected by the user.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum BackendChoice {
    /// Hosted open model; the key is optional and failures fall back to the catalog.
    #[default]
    Free,
    /// Chat-completion API; requires a key and surfaces failures.
    Premium,
}

impl fmt::Display for BackendChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendChoice::Free => write!(f, "free"),
            BackendChoice::Premium => write!(f, "premium"),
        }
    }
}

impl FromStr for BackendChoice {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(BackendChoice::Free),
            "premium" => Ok(BackendChoice::Premium),
            other => Err(crate::Error::Config(format!(
                "Unknown backend '{}'. Expected 'free' or 'premium'",
                other
            ))),
        }
    }
}

/// Per-backend API keys held for the session only.
///
/// Blank keys are treated as absent. `Debug` never prints key material.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    free: Option<String>,
    premium: Option<String>,
}

impl Credentials {
    pub fn new(free: Option<String>, premium: Option<String>) -> Self {
        Self { free, premium }
    }

    /// Returns the key for `backend`, or `None` when unset or blank.
    pub fn get(&self, backend: BackendChoice) -> Option<&str> {
        let slot = match backend {
            BackendChoice::Free => &self.free,
            BackendChoice::Premium => &self.premium,
        };
        slot.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }

    pub fn set(&mut self, backend: BackendChoice, key: Option<String>) {
        match backend {
            BackendChoice::Free => self.free = key,
            BackendChoice::Premium => self.premium = key,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |slot: &Option<String>| slot.as_ref().map(|_| "***");
        f.debug_struct("Credentials")
            .field("free", &redact(&self.free))
            .field("premium", &redact(&self.premium))
            .finish()
    }
}

/// Top and bottom caption text for one meme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionPair {
    pub top: String,
    pub bottom: String,
}

impl CaptionPair {
    pub fn new(top: impl Into<String>, bottom: impl Into<String>) -> Self {
        Self {
            top: top.into(),
            bottom: bottom.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.top.trim().is_empty() && self.bottom.trim().is_empty()
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendChoice,
    pub credentials: Credentials,
    pub premium_model: String,
    pub premium_base_url: String,
    pub free_model: String,
    pub free_base_url: String,
    pub http_timeout_secs: u64,
    pub output_dir: String,
}

pub const DEFAULT_PREMIUM_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_PREMIUM_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_FREE_MODEL: &str = "gpt2";
pub const DEFAULT_FREE_BASE_URL: &str = "https://api-inference.huggingface.co";

impl Config {
    /// Load configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match lookup("MEME_BACKEND") {
            Some(value) => value.parse()?,
            None => BackendChoice::default(),
        };

        let http_timeout_secs = match lookup("HTTP_TIMEOUT_SECS") {
            Some(value) => value.trim().parse::<u64>().map_err(|_| {
                crate::Error::Config(format!("HTTP_TIMEOUT_SECS must be an integer, got '{}'", value))
            })?,
            None => 30,
        };

        Ok(Self {
            backend,
            credentials: Credentials::new(lookup("HF_API_TOKEN"), lookup("OPENAI_API_KEY")),
            premium_model: lookup("PREMIUM_MODEL")
                .unwrap_or_else(|| DEFAULT_PREMIUM_MODEL.to_string()),
            premium_base_url: lookup("PREMIUM_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PREMIUM_BASE_URL.to_string()),
            free_model: lookup("FREE_MODEL").unwrap_or_else(|| DEFAULT_FREE_MODEL.to_string()),
            free_base_url: lookup("FREE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_FREE_BASE_URL.to_string()),
            http_timeout_secs,
            output_dir: lookup("OUTPUT_DIR").unwrap_or_else(|| "output".to_string()),
        })
    }
}
