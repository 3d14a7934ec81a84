//! Built-in meme templates and trending topics

use crate::{Error, Result};
use rand::seq::SliceRandom;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemeTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub image_url: &'static str,
}

pub const MEME_TEMPLATES: &[MemeTemplate] = &[
    MemeTemplate {
        id: "drake",
        name: "Drake Pointing",
        image_url: "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?w=400&h=400&fit=crop",
    },
    MemeTemplate {
        id: "distracted",
        name: "Distracted Boyfriend",
        image_url: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=400&h=400&fit=crop",
    },
    MemeTemplate {
        id: "woman-cat",
        name: "Woman Yelling at Cat",
        image_url: "https://images.unsplash.com/photo-1514888286974-6c03e2ca1dba?w=400&h=400&fit=crop",
    },
    MemeTemplate {
        id: "expanding-brain",
        name: "Expanding Brain",
        image_url: "https://images.unsplash.com/photo-1559757148-5c350d0d3c56?w=400&h=400&fit=crop",
    },
    MemeTemplate {
        id: "success-kid",
        name: "Success Kid",
        image_url: "https://images.unsplash.com/photo-1544005313-94ddf0286df2?w=400&h=400&fit=crop",
    },
    MemeTemplate {
        id: "two-buttons",
        name: "Two Buttons",
        image_url: "https://images.unsplash.com/photo-1552058544-f2b08422138a?w=400&h=400&fit=crop",
    },
];

pub const TRENDING_TOPICS: &[&str] = &[
    "AI taking over",
    "Working from home",
    "Coffee addiction",
    "Monday morning",
    "Weekend plans",
    "Social media",
    "Online shopping",
    "Procrastination",
];

/// The template selected when a session starts.
pub fn default_template() -> &'static MemeTemplate {
    &MEME_TEMPLATES[0]
}

pub fn find_template(id: &str) -> Result<&'static MemeTemplate> {
    MEME_TEMPLATES
        .iter()
        .find(|template| template.id == id)
        .ok_or_else(|| Error::UnknownTemplate(id.to_string()))
}

pub fn random_template() -> &'static MemeTemplate {
    MEME_TEMPLATES
        .choose(&mut rand::thread_rng())
        .unwrap_or_else(default_template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_template_ids_are_unique() {
        let ids: HashSet<&str> = MEME_TEMPLATES.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), MEME_TEMPLATES.len());
    }

    #[test]
    fn test_find_template() {
        assert_eq!(find_template("success-kid").unwrap().name, "Success Kid");
        assert!(matches!(
            find_template("grumpy-cat"),
            Err(Error::UnknownTemplate(_))
        ));
    }

    #[test]
    fn test_default_template_is_first() {
        assert_eq!(default_template().id, "drake");
    }

    #[test]
    fn test_random_template_is_builtin() {
        for _ in 0..50 {
            let template = random_template();
            assert!(MEME_TEMPLATES.contains(template));
        }
    }
}
