mod groq;
mod prompt;

pub use groq::GroqWriter;
pub use prompt::{build_blog_prompt, BLOG_PROMPT_TEMPLATE};

use crate::error::BlogError;
use crate::model::BlogStyle;
use async_trait::async_trait;

/// Text generation capability producing Markdown blog posts
#[async_trait]
pub trait BlogWriter: Send + Sync {
    /// Get the writer name (e.g., "groq")
    fn writer_name(&self) -> &str;

    /// Write one blog post variation in the given style
    async fn write(
        &self,
        title: &str,
        description: &str,
        style: BlogStyle,
    ) -> Result<String, BlogError>;
}
