pub const CAPTION_SYSTEM: &str = include_str!("../data/prompts/caption_system.txt");
pub const CAPTION_USER: &str = include_str!("../data/prompts/caption_user.txt");
pub const FREE_PROMPT: &str = include_str!("../data/prompts/free_prompt.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_var() {
        assert_eq!(
            render("Hello {{name}}!", &[("name", "world")]),
            "Hello world!"
        );
    }

    #[test]
    fn test_render_repeated_placeholder() {
        assert_eq!(
            render("{{topic}}? More like {{topic}}!", &[("topic", "Mondays")]),
            "Mondays? More like Mondays!"
        );
    }

    #[test]
    fn test_prompts_are_non_empty() {
        assert!(!CAPTION_SYSTEM.is_empty());
        assert!(!CAPTION_USER.is_empty());
        assert!(!FREE_PROMPT.is_empty());
    }

    #[test]
    fn test_system_prompt_requests_structured_fields() {
        assert!(CAPTION_SYSTEM.contains("topText"));
        assert!(CAPTION_SYSTEM.contains("bottomText"));
    }

    #[test]
    fn test_user_prompts_have_topic_placeholder() {
        assert!(CAPTION_USER.contains("{{topic}}"));
        assert!(FREE_PROMPT.contains("{{topic}}"));
    }
}
