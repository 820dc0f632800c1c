//! Local content storage for downloaded images.

use crate::config::ImagesConfig;
use crate::error::StoreError;
use crate::model::{AcquiredImage, ImageCandidate};
use log::{error, info};
use reqwest::Client;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Extension used for every stored image
const IMAGE_EXTENSION: &str = "jpg";

/// Distinguishes in-flight temporary files written by this process
static PARTIAL_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Deterministic identity of an image within a blog batch
#[derive(Debug, Clone, Copy)]
pub struct ImageKey<'a> {
    pub title: &'a str,
    pub query: &'a str,
    pub index: usize,
}

impl ImageKey<'_> {
    /// File name derived from a 128-bit hash of the key
    pub fn file_name(&self) -> String {
        let digest = Sha256::digest(format!("{}_{}_{}", self.title, self.query, self.index));
        format!("blog_{}.{}", hex::encode(&digest[..16]), IMAGE_EXTENSION)
    }
}

/// Downloads candidate images into a directory served as static content
pub struct ImageStore {
    client: Client,
    dir: PathBuf,
    public_prefix: String,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>, public_prefix: impl Into<String>, client: Client) -> Self {
        ImageStore {
            client,
            dir: dir.into(),
            public_prefix: public_prefix.into(),
        }
    }

    /// Create a store from configuration
    pub fn from_config(config: &ImagesConfig, client: Client) -> Self {
        Self::new(&config.output_dir, &config.public_prefix, client)
    }

    /// Public reference for a stored file
    pub fn public_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.public_prefix.trim_end_matches('/'), file_name)
    }

    /// Download `candidate` under the file name derived from `key`.
    ///
    /// Returns `None` and logs when the download or the write fails. The same
    /// key always maps to the same file, which is overwritten.
    pub async fn materialize(
        &self,
        candidate: &ImageCandidate,
        key: &ImageKey<'_>,
    ) -> Option<AcquiredImage> {
        let file_name = key.file_name();
        match self.download(&candidate.url, &file_name).await {
            Ok(file) => Some(AcquiredImage {
                path: self.public_path(&file_name),
                query: key.query.to_string(),
                attribution: candidate.attribution.clone(),
                source: candidate.source.clone(),
                index: key.index,
                file,
            }),
            Err(e) => {
                error!("Failed to download image from {}: {}", candidate.url, e);
                None
            }
        }
    }

    async fn download(&self, url: &str, file_name: &str) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.dir).await?;

        info!("Downloading image from {}", url);
        let mut response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(StoreError::Status(response.status()));
        }

        // The target only ever holds a complete image
        let partial = self.dir.join(format!(
            "{}.{}-{}.part",
            file_name,
            std::process::id(),
            PARTIAL_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        let mut file = fs::File::create(&partial).await?;
        let written: Result<(), StoreError> = async {
            while let Some(chunk) = response.chunk().await? {
                file.write_all(&chunk).await?;
            }
            file.flush().await?;
            Ok(())
        }
        .await;
        drop(file);

        if let Err(e) = written {
            let _ = fs::remove_file(&partial).await;
            return Err(e);
        }

        let target = self.dir.join(file_name);
        if let Err(e) = fs::rename(&partial, &target).await {
            let _ = fs::remove_file(&partial).await;
            return Err(e.into());
        }
        Ok(target)
    }
}
