use crate::config::AppConfig;
use crate::error::BlogError;
use crate::model::ImageCandidate;
use crate::providers::{ImageProvider, ProviderFactory, SharedRng};
use log::{debug, info, warn};
use reqwest::Client;
use std::future::Future;

/// Tries image providers in priority order until one yields a candidate
pub struct FallbackResolver {
    providers: Vec<Box<dyn ImageProvider>>,
}

impl FallbackResolver {
    /// Create a resolver over `providers`, tried first to last.
    ///
    /// Fails when no provider can ever be queried.
    pub fn new(providers: Vec<Box<dyn ImageProvider>>) -> Result<Self, BlogError> {
        if providers.is_empty() {
            return Err(BlogError::Config(
                "No image providers available in configuration".to_string(),
            ));
        }
        if !providers.iter().any(|p| p.is_available()) {
            return Err(BlogError::Config(
                "No image provider has the credentials it needs".to_string(),
            ));
        }

        for provider in &providers {
            if provider.is_available() {
                info!("Added '{}' to image fallback chain", provider.provider_name());
            } else {
                warn!(
                    "Image provider '{}' has no credentials and will be skipped",
                    provider.provider_name()
                );
            }
        }

        Ok(FallbackResolver { providers })
    }

    /// Create a resolver from configuration
    pub fn from_config(
        config: &AppConfig,
        client: &Client,
        rng: &SharedRng,
    ) -> Result<Self, BlogError> {
        Self::new(ProviderFactory::create_chain(config, client, rng)?)
    }

    /// Find one usable image for `query`.
    ///
    /// Every candidate is handed to `accept`; the first one it turns into a
    /// value ends the search. A rejected candidate, a provider error or an
    /// empty result all move on to the next provider.
    pub async fn resolve<T, F, Fut>(&self, query: &str, mut accept: F) -> Option<T>
    where
        F: FnMut(ImageCandidate) -> Fut,
        Fut: Future<Output = Option<T>>,
    {
        for provider in &self.providers {
            let name = provider.provider_name();
            if !provider.is_available() {
                debug!("Skipping '{}': not configured", name);
                continue;
            }

            match provider.fetch(query).await {
                Ok(Some(candidate)) => {
                    debug!("'{}' found {} for '{}'", name, candidate.url, query);
                    match accept(candidate).await {
                        Some(accepted) => return Some(accepted),
                        None => warn!("'{}' candidate for '{}' was rejected", name, query),
                    }
                }
                Ok(None) => debug!("'{}' has no image for '{}'", name, query),
                Err(e) => warn!("'{}' fetch failed for '{}': {}", name, query, e),
            }
        }

        None
    }
}
