//! Caption response parsing
//!
//! Backend output is turned into a [`CaptionPair`] by running an ordered chain
//! of parse steps; the first step that returns `Some` wins.

use crate::models::CaptionPair;

/// One parse attempt over raw backend text.
pub type ParseStep = fn(&str) -> Option<CaptionPair>;

/// Premium responses: structured JSON first, then line splitting.
pub const PREMIUM_CHAIN: &[ParseStep] = &[parse_structured, parse_lines];

/// Free responses are plain generated text.
pub const FREE_CHAIN: &[ParseStep] = &[parse_lines];

pub fn run_chain(chain: &[ParseStep], content: &str) -> Option<CaptionPair> {
    chain.iter().find_map(|step| step(content))
}

/// Parse a JSON object carrying `topText` / `bottomText`.
///
/// Strings are taken as-is. Non-zero numbers and `true` are shown as their
/// JSON text; missing, `null`, `false`, `0` and nested values become empty
/// strings. Anything that is not a JSON object yields `None`.
pub fn parse_structured(content: &str) -> Option<CaptionPair> {
    let value: serde_json::Value = serde_json::from_str(content.trim()).ok()?;
    let object = value.as_object()?;

    let field = |name: &str| object.get(name).map(field_text).unwrap_or_default();

    Some(CaptionPair::new(field("topText"), field("bottomText")))
}

fn field_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => n.to_string(),
        serde_json::Value::Bool(true) => "true".to_string(),
        _ => String::new(),
    }
}

/// First two non-blank lines become top and bottom, kept verbatim.
///
/// A single line leaves the bottom empty; no usable lines yields `None`.
pub fn parse_lines(content: &str) -> Option<CaptionPair> {
    let mut lines = content.lines().filter(|line| !line.trim().is_empty());

    let top = lines.next()?;
    let bottom = lines.next().unwrap_or_default();
    Some(CaptionPair::new(top, bottom))
}
