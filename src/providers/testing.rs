//! Provider doubles for unit tests.

use crate::error::FetchError;
use crate::model::ImageCandidate;
use crate::providers::ImageProvider;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::{Arc, Mutex};

/// What a scripted provider answers with
#[derive(Clone, Copy)]
pub(crate) enum Reply {
    Found,
    Nothing,
    Fails,
}

/// Provider double recording every call as "name:query" into a shared log
pub(crate) struct ScriptedProvider {
    name: &'static str,
    available: bool,
    reply: Reply,
    image_url: String,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProvider {
    pub(crate) fn new(name: &'static str, reply: Reply, calls: &Arc<Mutex<Vec<String>>>) -> Self {
        ScriptedProvider {
            name,
            available: true,
            reply,
            image_url: format!("https://{}.example/image.jpg", name),
            calls: calls.clone(),
        }
    }

    pub(crate) fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub(crate) fn serving(mut self, image_url: String) -> Self {
        self.image_url = image_url;
        self
    }
}

#[async_trait]
impl ImageProvider for ScriptedProvider {
    fn provider_name(&self) -> &str {
        self.name
    }

    fn is_available(&self) -> bool {
        self.available
    }

    async fn fetch(&self, query: &str) -> Result<Option<ImageCandidate>, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.name, query));
        match self.reply {
            Reply::Found => Ok(Some(ImageCandidate {
                url: self.image_url.clone(),
                attribution: format!("by {}", self.name),
                source: self.name.to_string(),
            })),
            Reply::Nothing => Ok(None),
            Reply::Fails => Err(FetchError::Status(StatusCode::SERVICE_UNAVAILABLE)),
        }
    }
}
