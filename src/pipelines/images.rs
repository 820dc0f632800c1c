use crate::config::AppConfig;
use crate::error::BlogError;
use crate::keywords::extract_queries;
use crate::model::ImageBatch;
use crate::providers::{http_client, shared_rng, FallbackResolver};
use crate::store::{ImageKey, ImageStore};
use log::{info, warn};
use std::time::Duration;

/// Acquires a batch of images for a blog post
///
/// This pipeline:
/// 1. Derives search queries from the title and description
/// 2. Resolves each query through the provider fallback chain
/// 3. Downloads the chosen candidate into the image store, moving on to the
///    next provider when the download fails
///
/// Queries are processed one at a time. A query that yields no image is
/// skipped; the batch itself never fails.
pub struct ImagePipeline {
    resolver: FallbackResolver,
    store: ImageStore,
}

impl ImagePipeline {
    pub fn new(resolver: FallbackResolver, store: ImageStore) -> Self {
        ImagePipeline { resolver, store }
    }

    /// Build the provider chain and image store from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, BlogError> {
        let client = http_client(Duration::from_secs(config.images.timeout))?;
        let rng = shared_rng(config.images.seed);
        let resolver = FallbackResolver::from_config(config, &client, &rng)?;
        let store = ImageStore::from_config(&config.images, client);
        Ok(Self::new(resolver, store))
    }

    /// Acquire up to `count` images for a blog post.
    ///
    /// Every acquired image records the position of its query in
    /// [`ImageBatch::queries`] as `index`.
    pub async fn generate_batch(&self, title: &str, description: &str, count: usize) -> ImageBatch {
        let queries = extract_queries(title, description, count);
        let mut images = Vec::new();

        for (index, query) in queries.iter().enumerate() {
            info!(
                "Generating image {}/{} for query: {}",
                index + 1,
                queries.len(),
                query
            );

            let key = ImageKey {
                title,
                query,
                index,
            };
            let store = &self.store;
            let acquired = self
                .resolver
                .resolve(query, move |candidate| async move {
                    store.materialize(&candidate, &key).await
                })
                .await;

            match acquired {
                Some(image) => {
                    info!("Image acquired from {} for: {}", image.source, query);
                    images.push(image);
                }
                None => warn!("No image found for: {}", query),
            }
        }

        ImageBatch { queries, images }
    }
}
