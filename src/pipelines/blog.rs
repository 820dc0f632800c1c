use crate::config::AppConfig;
use crate::error::BlogError;
use crate::model::{AcquiredImage, BlogDraft, BlogStyle, FinalBlog, ImageBatch, Section};
use crate::pipelines::images::ImagePipeline;
use crate::writers::{BlogWriter, GroqWriter};
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Number of characters kept in a draft preview
const PREVIEW_CHARS: usize = 200;

/// Sections a finished blog post must have
const REQUIRED_SECTIONS: usize = 5;

const DEFAULT_WORKERS: usize = 3;

const DEFAULT_IMAGE_COUNT: usize = 6;

/// How the description for a blog post is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationMethod {
    /// Generic description built from the title alone
    Quick,
    /// Caller-supplied description
    #[default]
    Detailed,
}

/// Input for generating blog drafts
#[derive(Debug, Clone)]
pub struct DraftRequest {
    pub title: String,
    pub description: Option<String>,
    pub method: GenerationMethod,
    pub with_images: bool,
}

/// Description actually sent to the writer for `method`
pub fn resolve_description(
    method: GenerationMethod,
    title: &str,
    description: Option<&str>,
) -> Result<String, BlogError> {
    match method {
        GenerationMethod::Quick => Ok(format!(
            "Create a comprehensive blog post about {}. Include relevant information, examples, and insights that would be valuable to readers interested in this topic.",
            title
        )),
        GenerationMethod::Detailed => description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from)
            .ok_or_else(|| {
                BlogError::InvalidInput(
                    "Please provide a blog description for detailed generation".to_string(),
                )
            }),
    }
}

/// First 200 characters of `markdown`, with an ellipsis when cut
pub fn preview(markdown: &str) -> String {
    if markdown.chars().count() > PREVIEW_CHARS {
        let cut: String = markdown.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        markdown.to_string()
    }
}

/// Split a Markdown post into its `##` sections.
///
/// Text before the first heading is dropped.
pub fn split_sections(markdown: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in markdown.lines() {
        let heading = line
            .strip_prefix("##")
            .filter(|rest| rest.starts_with(char::is_whitespace));
        match heading {
            Some(rest) => {
                if let Some((heading, body)) = current.take() {
                    sections.push(section(heading, &body));
                }
                current = Some((rest.trim().to_string(), Vec::new()));
            }
            None => {
                if let Some((_, body)) = current.as_mut() {
                    body.push(line);
                }
            }
        }
    }
    if let Some((heading, body)) = current {
        sections.push(section(heading, &body));
    }

    sections
}

fn section(heading: String, body: &[&str]) -> Section {
    Section {
        heading,
        body: body.join("\n").trim().to_string(),
    }
}

/// Write all three style variations concurrently.
///
/// At most `workers` requests run at once. Results are ordered by
/// variation. All requests run to completion; if any failed, the error of
/// the lowest-numbered failed variation is returned.
pub async fn generate_variations(
    writer: Arc<dyn BlogWriter>,
    title: &str,
    description: &str,
    workers: usize,
) -> Result<Vec<(BlogStyle, String)>, BlogError> {
    let permits = Arc::new(Semaphore::new(workers.max(1)));
    let mut tasks = JoinSet::new();

    for style in BlogStyle::ALL {
        let writer = writer.clone();
        let permits = permits.clone();
        let title = title.to_string();
        let description = description.to_string();

        tasks.spawn(async move {
            let variation_error = |source: BlogError| BlogError::Variation {
                variation: style.variation(),
                source: Box::new(source),
            };
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|e| variation_error(BlogError::Generation(e.to_string())))?;
            let text = writer
                .write(&title, &description, style)
                .await
                .map_err(variation_error)?;
            Ok::<_, BlogError>((style, text))
        });
    }

    let mut outcomes = Vec::with_capacity(BlogStyle::ALL.len());
    while let Some(joined) = tasks.join_next().await {
        outcomes.push(
            joined.map_err(|e| BlogError::Generation(format!("variation task failed: {}", e)))?,
        );
    }
    outcomes.sort_by_key(|outcome| match outcome {
        Ok((style, _)) => style.variation(),
        Err(BlogError::Variation { variation, .. }) => *variation,
        Err(_) => 0,
    });
    outcomes.into_iter().collect()
}

/// Request-level orchestration: variations, images, finalization
pub struct BlogStudio {
    writer: Arc<dyn BlogWriter>,
    images: Option<ImagePipeline>,
    workers: usize,
    image_count: usize,
}

impl BlogStudio {
    pub fn new(writer: Arc<dyn BlogWriter>, images: Option<ImagePipeline>) -> Self {
        BlogStudio {
            writer,
            images,
            workers: DEFAULT_WORKERS,
            image_count: DEFAULT_IMAGE_COUNT,
        }
    }

    /// Create a studio with the Groq writer and the configured image pipeline
    pub fn from_config(config: &AppConfig) -> Result<Self, BlogError> {
        let writer = GroqWriter::new(&config.writer)?;
        let images = ImagePipeline::from_config(config)?;
        Ok(Self::new(Arc::new(writer), Some(images))
            .with_workers(config.writer.workers)
            .with_image_count(config.images.count))
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_image_count(mut self, count: usize) -> Self {
        self.image_count = count;
        self
    }

    /// Generate the three variations offered for selection
    pub async fn draft(&self, request: &DraftRequest) -> Result<Vec<BlogDraft>, BlogError> {
        let description = resolve_description(
            request.method,
            &request.title,
            request.description.as_deref(),
        )?;
        info!("Generating 3 blog variations for: {}", request.title);

        let variations =
            generate_variations(self.writer.clone(), &request.title, &description, self.workers)
                .await?;

        let mut drafts = Vec::with_capacity(variations.len());
        for (style, content_md) in variations {
            let images = self
                .image_batch(&request.title, &description, request.with_images)
                .await;
            drafts.push(BlogDraft {
                id: style.variation(),
                style,
                preview: preview(&content_md),
                content_md,
                images,
            });
        }
        Ok(drafts)
    }

    /// Turn the selected variation into a finished post
    pub async fn finalize(
        &self,
        title: &str,
        description: &str,
        markdown: &str,
        with_images: bool,
    ) -> Result<FinalBlog, BlogError> {
        let images = if with_images {
            self.images.as_ref()
        } else {
            None
        };
        finalize_blog(title, description, markdown, images, self.image_count).await
    }

    async fn image_batch(
        &self,
        title: &str,
        description: &str,
        with_images: bool,
    ) -> Vec<AcquiredImage> {
        if !with_images {
            return Vec::new();
        }
        if self.images.is_none() {
            warn!("Images requested but no image pipeline is configured");
        }
        acquire_images(self.images.as_ref(), title, description, self.image_count)
            .await
            .images
    }
}

/// Image batch for a post, empty when there is no pipeline
async fn acquire_images(
    pipeline: Option<&ImagePipeline>,
    title: &str,
    description: &str,
    count: usize,
) -> ImageBatch {
    match pipeline {
        Some(pipeline) => pipeline.generate_batch(title, description, count).await,
        None => ImageBatch::default(),
    }
}

/// Split the selected variation into its first five sections and pair it
/// with a featured image plus content images from `images`
pub async fn finalize_blog(
    title: &str,
    description: &str,
    markdown: &str,
    images: Option<&ImagePipeline>,
    image_count: usize,
) -> Result<FinalBlog, BlogError> {
    let mut sections = split_sections(markdown);
    if sections.len() < REQUIRED_SECTIONS {
        return Err(BlogError::InvalidInput(format!(
            "Generated blog content does not contain the required {} sections (found {})",
            REQUIRED_SECTIONS,
            sections.len()
        )));
    }
    sections.truncate(REQUIRED_SECTIONS);

    let batch = acquire_images(images, title, description, image_count).await;
    Ok(FinalBlog {
        title: title.to_string(),
        description: description.to_string(),
        sections,
        featured_image: batch.featured().cloned(),
        content_images: batch.supplementary().to_vec(),
    })
}
