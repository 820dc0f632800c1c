use crate::config::ImageProviderConfig;
use crate::error::FetchError;
use crate::model::ImageCandidate;
use crate::providers::{choose, ImageProvider, SharedRng};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org";

const DEFAULT_ATTRIBUTION: &str = "Image from Wikipedia";

#[derive(Debug, Deserialize)]
struct MediaList {
    #[serde(default)]
    items: Vec<MediaItem>,
}

#[derive(Debug, Deserialize)]
struct MediaItem {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    srcset: Vec<SrcSetEntry>,
    /// Plain string, or an object with `html` and `text`
    #[serde(default)]
    caption: Value,
}

#[derive(Debug, Deserialize)]
struct SrcSetEntry {
    src: Option<String>,
}

impl MediaItem {
    fn source_url(&self) -> Option<&str> {
        self.srcset
            .first()
            .and_then(|entry| entry.src.as_deref())
            .filter(|src| !src.is_empty())
    }

    fn caption_text(&self) -> Option<&str> {
        let text = match &self.caption {
            Value::String(text) => Some(text.as_str()),
            Value::Object(map) => map.get("text").and_then(Value::as_str),
            _ => None,
        };
        text.map(str::trim).filter(|text| !text.is_empty())
    }
}

/// Add an explicit scheme to protocol-relative URLs
fn normalize_url(src: &str) -> String {
    if src.starts_with("//") {
        format!("https:{}", src)
    } else {
        src.to_string()
    }
}

/// Media attached to the Wikipedia article matching the query; no credentials
pub struct WikipediaProvider {
    client: Client,
    base_url: String,
    rng: SharedRng,
}

impl WikipediaProvider {
    /// Create a new Wikipedia provider from configuration
    pub fn new(config: &ImageProviderConfig, client: Client, rng: SharedRng) -> Self {
        WikipediaProvider {
            client,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            rng,
        }
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String, rng: SharedRng) -> Self {
        WikipediaProvider {
            client: Client::new(),
            base_url,
            rng,
        }
    }

    /// Media-list endpoint for the article titled like `query`
    fn media_list_url(&self, query: &str) -> Result<Url, FetchError> {
        let article = query.trim().replace(' ', "_");
        let mut url =
            Url::parse(&self.base_url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["api", "rest_v1", "page", "media-list", article.as_str()]);
        Ok(url)
    }
}

#[async_trait]
impl ImageProvider for WikipediaProvider {
    fn provider_name(&self) -> &str {
        "wikipedia"
    }

    async fn fetch(&self, query: &str) -> Result<Option<ImageCandidate>, FetchError> {
        info!("Searching Wikipedia for '{}'", query);
        let url = self.media_list_url(query)?;
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body: MediaList = response.json().await?;
        let images: Vec<&MediaItem> = body
            .items
            .iter()
            .filter(|item| item.kind.as_deref() == Some("image"))
            .filter(|item| item.source_url().is_some())
            .collect();
        debug!(
            "Wikipedia returned {} items, {} usable images",
            body.items.len(),
            images.len()
        );

        Ok(choose(&self.rng, &images).and_then(|item| {
            item.source_url().map(|src| ImageCandidate {
                url: normalize_url(src),
                attribution: item.caption_text().unwrap_or(DEFAULT_ATTRIBUTION).to_string(),
                source: "Wikipedia".to_string(),
            })
        }))
    }
}
