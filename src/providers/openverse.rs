use crate::config::ImageProviderConfig;
use crate::error::FetchError;
use crate::model::ImageCandidate;
use crate::providers::{choose, ImageProvider, SharedRng, PAGE_SIZE};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "https://api.openverse.org";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Media>,
}

#[derive(Debug, Deserialize)]
struct Media {
    url: Option<String>,
    /// Either a plain name or an object with a `name` field
    #[serde(default)]
    creator: Value,
}

impl Media {
    fn creator_name(&self) -> Option<&str> {
        let name = match &self.creator {
            Value::String(name) => Some(name.as_str()),
            Value::Object(map) => map.get("name").and_then(Value::as_str),
            _ => None,
        };
        name.filter(|name| !name.trim().is_empty())
    }
}

/// Openly licensed media search on Openverse; needs an API token
pub struct OpenverseProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    rng: SharedRng,
}

impl OpenverseProvider {
    /// Create a new Openverse provider from configuration
    pub fn new(config: &ImageProviderConfig, client: Client, rng: SharedRng) -> Self {
        OpenverseProvider {
            client,
            api_key: config.api_key.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            rng,
        }
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: Option<String>, base_url: String, rng: SharedRng) -> Self {
        OpenverseProvider {
            client: Client::new(),
            api_key,
            base_url,
            rng,
        }
    }
}

#[async_trait]
impl ImageProvider for OpenverseProvider {
    fn provider_name(&self) -> &str {
        "openverse"
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch(&self, query: &str) -> Result<Option<ImageCandidate>, FetchError> {
        let Some(api_key) = &self.api_key else {
            return Ok(None);
        };

        info!("Searching Openverse for '{}'", query);
        let page_size = PAGE_SIZE.to_string();
        let response = self
            .client
            .get(format!("{}/v1/images/", self.base_url))
            .bearer_auth(api_key)
            .query(&[
                ("q", query.trim()),
                ("page_size", page_size.as_str()),
                ("license_type", "all-cc"),
                ("source", "wordpress,flickr"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body: SearchResponse = response.json().await?;
        debug!("Openverse returned {} results", body.results.len());

        let usable: Vec<&Media> = body
            .results
            .iter()
            .filter(|m| m.url.as_deref().is_some_and(|u| !u.is_empty()))
            .collect();

        Ok(choose(&self.rng, &usable).and_then(|media| {
            media.url.clone().map(|url| ImageCandidate {
                url,
                attribution: format!(
                    "Image by {} on Openverse",
                    media.creator_name().unwrap_or("Unknown")
                ),
                source: "Openverse".to_string(),
            })
        }))
    }
}
