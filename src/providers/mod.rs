mod factory;
mod fallback;
mod openverse;
mod unsplash;
mod wikipedia;

pub use factory::ProviderFactory;
pub use fallback::FallbackResolver;
pub use openverse::OpenverseProvider;
pub use unsplash::UnsplashProvider;
pub use wikipedia::WikipediaProvider;

use crate::error::FetchError;
use crate::model::ImageCandidate;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use reqwest::Client;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// User agent sent with every image search and download request
pub const USER_AGENT: &str = "BlogForge/1.0 (+https://github.com/blogforge/blogforge)";

/// Number of results requested from search endpoints
pub(crate) const PAGE_SIZE: u32 = 20;

/// Seedable random source shared by providers for candidate selection
pub type SharedRng = Arc<Mutex<StdRng>>;

/// Create a random source, deterministic when `seed` is given
pub fn shared_rng(seed: Option<u64>) -> SharedRng {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Arc::new(Mutex::new(rng))
}

/// Pick one element uniformly at random
pub(crate) fn choose<'a, T>(rng: &SharedRng, items: &'a [T]) -> Option<&'a T> {
    // A poisoned lock still holds a usable generator
    let mut rng = rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    items.choose(&mut *rng)
}

/// HTTP client used by providers and the image store
pub fn http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// Uniform contract for image search services
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Provider name as used in configuration (e.g. "unsplash")
    fn provider_name(&self) -> &str;

    /// Whether the provider has the credentials it needs
    fn is_available(&self) -> bool {
        true
    }

    /// Search for `query` and pick at most one candidate image
    async fn fetch(&self, query: &str) -> Result<Option<ImageCandidate>, FetchError>;
}

#[cfg(test)]
pub(crate) mod testing;
