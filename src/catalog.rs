//! Local fallback captions
//!
//! A fixed table of joke templates used whenever the free backend cannot
//! produce usable text. Rendering is pure string substitution, so picking from
//! the catalog cannot fail.

use crate::models::CaptionPair;
use crate::prompts;
use crate::{Error, Result};
use rand::Rng;

/// One top/bottom joke template; `{{topic}}` marks where the topic goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub top: &'static str,
    pub bottom: &'static str,
}

impl CatalogEntry {
    pub fn render(&self, topic: &str) -> CaptionPair {
        CaptionPair::new(
            prompts::render(self.top, &[("topic", topic)]),
            prompts::render(self.bottom, &[("topic", topic)]),
        )
    }
}

const BUILTIN_ENTRIES: &[CatalogEntry] = &[
    CatalogEntry {
        top: "Nobody:",
        bottom: "Absolutely no one: Me thinking about {{topic}}",
    },
    CatalogEntry {
        top: "When someone mentions {{topic}}",
        bottom: "And I've been waiting all day to talk about it",
    },
    CatalogEntry {
        top: "{{topic}} expectations",
        bottom: "{{topic}} reality",
    },
    CatalogEntry {
        top: "Me: I'll stop thinking about {{topic}}",
        bottom: "Also me: 3am, still thinking about {{topic}}",
    },
    CatalogEntry {
        top: "One does not simply",
        bottom: "Ignore {{topic}}",
    },
    CatalogEntry {
        top: "{{topic}}?",
        bottom: "Ain't nobody got time for that",
    },
    CatalogEntry {
        top: "They said {{topic}} would be easy",
        bottom: "They lied",
    },
    CatalogEntry {
        top: "Keep calm",
        bottom: "And blame it on {{topic}}",
    },
];

/// Ordered, immutable list of fallback captions. Never empty.
#[derive(Debug, Clone)]
pub struct FallbackCatalog {
    entries: Vec<CatalogEntry>,
}

impl Default for FallbackCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FallbackCatalog {
    /// The catalog shipped with the generator.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_ENTRIES.to_vec(),
        }
    }

    /// Build a custom catalog. Rejects an empty entry list.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::Invariant(
                "Fallback catalog needs at least one entry".to_string(),
            ));
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pick a uniformly random entry using `rng`.
    pub fn pick_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &CatalogEntry {
        &self.entries[rng.gen_range(0..self.entries.len())]
    }

    /// Random entry with `topic` substituted into every placeholder.
    pub fn random_caption(&self, topic: &str) -> CaptionPair {
        let mut rng = rand::thread_rng();
        self.pick_with(&mut rng).render(topic)
    }
}
