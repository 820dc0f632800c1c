//! Blog post generation with illustrative images.
//!
//! An LLM writes three stylistic variations of a five-section blog post;
//! images are searched on Unsplash, Openverse and Wikipedia (in that order),
//! downloaded into a static content directory and returned as plain records
//! for a rendering layer to display.

pub mod config;
pub mod error;
pub mod keywords;
pub mod model;
pub mod pipelines;
pub mod providers;
pub mod store;
pub mod writers;

pub use config::AppConfig;
pub use error::{BlogError, FetchError, StoreError};
pub use model::{
    AcquiredImage, BlogDraft, BlogStyle, FinalBlog, ImageBatch, ImageCandidate, Section,
};
pub use pipelines::blog::{BlogStudio, DraftRequest, GenerationMethod};
pub use pipelines::images::ImagePipeline;

/// Acquire an image batch for a blog post using configuration from the
/// environment and `blogforge.toml`
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), blogforge::BlogError> {
/// let batch = blogforge::generate_images(
///     "Space Exploration",
///     "Rockets, orbital mechanics and the people who fly them",
///     6,
/// )
/// .await?;
/// for image in &batch.images {
///     println!("{} ({})", image.path, image.attribution);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn generate_images(
    title: &str,
    description: &str,
    count: usize,
) -> Result<ImageBatch, BlogError> {
    let config = AppConfig::load(None)?;
    let pipeline = ImagePipeline::from_config(&config)?;
    Ok(pipeline.generate_batch(title, description, count).await)
}
