use serde::Serialize;
use std::path::PathBuf;

/// A remote image picked by a provider, not yet downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub url: String,
    pub attribution: String,
    /// Display name of the provider ("Unsplash", "Openverse", "Wikipedia")
    pub source: String,
}

/// An image that has been downloaded into the image store
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AcquiredImage {
    /// Public reference, e.g. `/static/images/blog_<hash>.jpg`
    pub path: String,
    /// Query the image was found for
    pub query: String,
    pub attribution: String,
    pub source: String,
    /// Position of `query` in the batch's attempted query list.
    ///
    /// Failed queries are omitted from a batch, so this is not the position
    /// of the image in [`ImageBatch::images`].
    pub index: usize,
    /// Location of the file on disk
    #[serde(skip)]
    pub file: PathBuf,
}

/// Images acquired for one blog variation
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImageBatch {
    /// Every query that was attempted, in order
    pub queries: Vec<String>,
    /// Successfully acquired images, in processing order
    pub images: Vec<AcquiredImage>,
}

impl ImageBatch {
    /// First image, shown as the featured image
    pub fn featured(&self) -> Option<&AcquiredImage> {
        self.images.first()
    }

    /// Everything after the featured image
    pub fn supplementary(&self) -> &[AcquiredImage] {
        self.images.get(1..).unwrap_or_default()
    }
}

/// Writing style of a blog variation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlogStyle {
    Informative,
    Analytical,
    Opinion,
}

impl BlogStyle {
    /// All styles, in variation order
    pub const ALL: [BlogStyle; 3] = [
        BlogStyle::Informative,
        BlogStyle::Analytical,
        BlogStyle::Opinion,
    ];

    /// 1-based variation number
    pub fn variation(&self) -> usize {
        match self {
            BlogStyle::Informative => 1,
            BlogStyle::Analytical => 2,
            BlogStyle::Opinion => 3,
        }
    }

    /// Style description inserted into the prompt
    pub fn description(&self) -> &'static str {
        match self {
            BlogStyle::Informative => {
                "Informative and educational with detailed explanations and examples"
            }
            BlogStyle::Analytical => "Comparative and analytical with pros/cons and insights",
            BlogStyle::Opinion => "Opinion-based and thought-provoking with bold perspectives",
        }
    }
}

/// One generated variation offered for selection
#[derive(Debug, Clone, Serialize)]
pub struct BlogDraft {
    pub id: usize,
    pub style: BlogStyle,
    pub content_md: String,
    pub preview: String,
    pub images: Vec<AcquiredImage>,
}

/// A `##` section of a finalized blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub heading: String,
    /// Markdown body, trimmed; empty for heading-only sections
    pub body: String,
}

/// The selected variation, split into sections and paired with images
#[derive(Debug, Clone, Serialize)]
pub struct FinalBlog {
    pub title: String,
    pub description: String,
    pub sections: Vec<Section>,
    pub featured_image: Option<AcquiredImage>,
    pub content_images: Vec<AcquiredImage>,
}
