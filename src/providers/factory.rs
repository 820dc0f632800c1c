use crate::config::{AppConfig, ImageProviderConfig};
use crate::error::BlogError;
use crate::providers::{
    ImageProvider, OpenverseProvider, SharedRng, UnsplashProvider, WikipediaProvider,
};
use reqwest::Client;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ImageProviderConfig,
        client: Client,
        rng: SharedRng,
    ) -> Result<Box<dyn ImageProvider>, BlogError> {
        if !config.enabled {
            return Err(BlogError::Config(format!(
                "Image provider '{}' is not enabled in configuration",
                provider_name
            )));
        }

        match provider_name {
            "unsplash" => Ok(Box::new(UnsplashProvider::new(config, client, rng))),
            "openverse" => Ok(Box::new(OpenverseProvider::new(config, client, rng))),
            "wikipedia" => Ok(Box::new(WikipediaProvider::new(config, client, rng))),
            _ => Err(BlogError::Config(format!(
                "Unknown image provider: {} (expected one of: {})",
                provider_name,
                Self::available_providers().join(", ")
            ))),
        }
    }

    /// Create every enabled provider, in the configured priority order
    pub fn create_chain(
        config: &AppConfig,
        client: &Client,
        rng: &SharedRng,
    ) -> Result<Vec<Box<dyn ImageProvider>>, BlogError> {
        let mut providers = Vec::new();
        for name in &config.images.order {
            let provider_config = config.image_provider(name);
            if !provider_config.enabled {
                continue;
            }
            providers.push(Self::create(
                name,
                &provider_config,
                client.clone(),
                rng.clone(),
            )?);
        }
        Ok(providers)
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["unsplash", "openverse", "wikipedia"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::shared_rng;

    fn provider_config() -> ImageProviderConfig {
        ImageProviderConfig {
            enabled: true,
            api_key: Some("test-key".to_string()),
            base_url: None,
        }
    }

    #[test]
    fn test_create_known_providers() {
        for name in ProviderFactory::available_providers() {
            let provider =
                ProviderFactory::create(name, &provider_config(), Client::new(), shared_rng(None))
                    .unwrap();
            assert_eq!(provider.provider_name(), name);
        }
    }

    #[test]
    fn test_create_unknown_provider() {
        let result =
            ProviderFactory::create("flickr", &provider_config(), Client::new(), shared_rng(None));
        assert!(matches!(
            result,
            Err(BlogError::Config(msg))
                if msg == "Unknown image provider: flickr (expected one of: unsplash, openverse, wikipedia)"
        ));
    }

    #[test]
    fn test_create_disabled_provider() {
        let mut config = provider_config();
        config.enabled = false;
        let result =
            ProviderFactory::create("unsplash", &config, Client::new(), shared_rng(None));
        assert!(matches!(result, Err(BlogError::Config(msg)) if msg.contains("not enabled")));
    }

    #[test]
    fn test_chain_follows_order_and_skips_disabled() {
        let mut config = AppConfig::default();
        config.images.order = vec!["wikipedia".to_string(), "unsplash".to_string()];
        config.images.providers.insert(
            "unsplash".to_string(),
            ImageProviderConfig {
                enabled: false,
                ..Default::default()
            },
        );

        let chain =
            ProviderFactory::create_chain(&config, &Client::new(), &shared_rng(None)).unwrap();
        let names: Vec<&str> = chain.iter().map(|p| p.provider_name()).collect();
        assert_eq!(names, vec!["wikipedia"]);
    }

    #[test]
    fn test_chain_without_credentials_keeps_providers() {
        let config = AppConfig::default();
        let chain =
            ProviderFactory::create_chain(&config, &Client::new(), &shared_rng(None)).unwrap();
        assert_eq!(chain.len(), 3);
        assert!(!chain[0].is_available());
        assert!(!chain[1].is_available());
        assert!(chain[2].is_available());
    }
}
