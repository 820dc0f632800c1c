use crate::config::ImageProviderConfig;
use crate::error::FetchError;
use crate::model::ImageCandidate;
use crate::providers::{choose, ImageProvider, SharedRng, PAGE_SIZE};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://api.unsplash.com";

/// Photos narrower than this are only used when nothing wider is found
const MIN_WIDTH: u64 = 800;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    #[serde(default)]
    width: u64,
    #[serde(default)]
    urls: PhotoUrls,
    user: Option<PhotoUser>,
}

#[derive(Debug, Default, Deserialize)]
struct PhotoUrls {
    regular: Option<String>,
    small: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PhotoUser {
    name: Option<String>,
}

/// Curated photo search on Unsplash; needs an access key
pub struct UnsplashProvider {
    client: Client,
    access_key: Option<String>,
    base_url: String,
    rng: SharedRng,
}

impl UnsplashProvider {
    /// Create a new Unsplash provider from configuration
    pub fn new(config: &ImageProviderConfig, client: Client, rng: SharedRng) -> Self {
        UnsplashProvider {
            client,
            access_key: config.api_key.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            rng,
        }
    }

    #[doc(hidden)]
    pub fn with_base_url(access_key: Option<String>, base_url: String, rng: SharedRng) -> Self {
        UnsplashProvider {
            client: Client::new(),
            access_key,
            base_url,
            rng,
        }
    }
}

#[async_trait]
impl ImageProvider for UnsplashProvider {
    fn provider_name(&self) -> &str {
        "unsplash"
    }

    fn is_available(&self) -> bool {
        self.access_key.is_some()
    }

    async fn fetch(&self, query: &str) -> Result<Option<ImageCandidate>, FetchError> {
        let Some(access_key) = &self.access_key else {
            return Ok(None);
        };

        info!("Searching Unsplash for '{}'", query);
        let per_page = PAGE_SIZE.to_string();
        let response = self
            .client
            .get(format!("{}/search/photos", self.base_url))
            .query(&[
                ("query", query.trim()),
                ("per_page", per_page.as_str()),
                ("orientation", "landscape"),
                ("order_by", "relevant"),
                ("content_filter", "high"),
                ("client_id", access_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body: SearchResponse = response.json().await?;
        debug!("Unsplash returned {} results", body.results.len());

        let wide: Vec<&Photo> = body.results.iter().filter(|p| p.width >= MIN_WIDTH).collect();
        let pool: Vec<&Photo> = if wide.is_empty() {
            body.results.iter().collect()
        } else {
            wide
        };

        let Some(photo) = choose(&self.rng, &pool) else {
            return Ok(None);
        };
        let Some(url) = photo.urls.regular.clone().or_else(|| photo.urls.small.clone()) else {
            return Ok(None);
        };

        let author = photo
            .user
            .as_ref()
            .and_then(|u| u.name.as_deref())
            .unwrap_or("Unknown");

        Ok(Some(ImageCandidate {
            url,
            attribution: format!("Photo by {} on Unsplash", author),
            source: "Unsplash".to_string(),
        }))
    }
}
