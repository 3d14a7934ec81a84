//! Hugging Face Inference API text-generation payloads.

use serde::{Deserialize, Serialize};

/// Request body for a text-generation model.
#[derive(Debug, Serialize)]
pub struct GenerationRequest {
    pub inputs: String,
    pub parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub return_full_text: bool,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedText {
    pub generated_text: String,
}

/// The endpoint answers with either a single object or a list of them.
///
/// Variant order matters for `#[serde(untagged)]` decoding.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GenerationResponse {
    Single(GeneratedText),
    Batch(Vec<GeneratedText>),
}

impl GenerationResponse {
    /// Text of the single object, or of the first list element.
    pub fn into_text(self) -> Option<String> {
        match self {
            GenerationResponse::Single(item) => Some(item.generated_text),
            GenerationResponse::Batch(items) => {
                items.into_iter().next().map(|item| item.generated_text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_object_shape() {
        let response: GenerationResponse =
            serde_json::from_str(r#"{"generated_text":"hello"}"#).unwrap();
        assert_eq!(response.into_text().as_deref(), Some("hello"));
    }

    #[test]
    fn test_decodes_array_shape_using_first_element() {
        let response: GenerationResponse =
            serde_json::from_str(r#"[{"generated_text":"first"},{"generated_text":"second"}]"#)
                .unwrap();
        assert_eq!(response.into_text().as_deref(), Some("first"));
    }

    #[test]
    fn test_empty_array_has_no_text() {
        let response: GenerationResponse = serde_json::from_str("[]").unwrap();
        assert_eq!(response.into_text(), None);
    }

    #[test]
    fn test_rejects_unknown_shape() {
        assert!(serde_json::from_str::<GenerationResponse>(r#"{"error":"loading"}"#).is_err());
    }
}
