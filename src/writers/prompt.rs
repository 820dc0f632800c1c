use crate::model::BlogStyle;

/// Template for the structured five-section blog prompt.
///
/// Loaded from `prompt.txt` at compile time. `{title}`, `{description}` and
/// `{style}` are substituted by [`build_blog_prompt`].
pub const BLOG_PROMPT_TEMPLATE: &str = include_str!("prompt.txt");

/// Build the prompt for one blog variation
pub fn build_blog_prompt(title: &str, description: &str, style: BlogStyle) -> String {
    BLOG_PROMPT_TEMPLATE
        .replace("{style}", style.description())
        .replace("{description}", description)
        .replace("{title}", title)
}
