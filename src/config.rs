use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Top-level application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Image acquisition settings
    #[serde(default)]
    pub images: ImagesConfig,
    /// Text generation settings
    #[serde(default)]
    pub writer: WriterConfig,
}

/// Configuration for the image acquisition pipeline
#[derive(Debug, Deserialize, Clone)]
pub struct ImagesConfig {
    /// Order in which image providers are tried (first to last)
    #[serde(default = "default_image_order")]
    pub order: Vec<String>,
    /// Per-provider settings, keyed by provider name
    #[serde(default)]
    pub providers: HashMap<String, ImageProviderConfig>,
    /// Timeout for every provider and download request, in seconds
    #[serde(default = "default_image_timeout")]
    pub timeout: u64,
    /// Number of images acquired per batch
    #[serde(default = "default_image_count")]
    pub count: usize,
    /// Directory downloaded images are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Public path prefix under which `output_dir` is served
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,
    /// Seed for candidate selection; random when absent
    pub seed: Option<u64>,
}

/// Configuration for a single image provider
#[derive(Debug, Deserialize, Clone)]
pub struct ImageProviderConfig {
    /// Whether this provider takes part in the fallback chain
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Access credential (Unsplash access key, Openverse token)
    pub api_key: Option<String>,
    /// Base URL override (for proxies and tests)
    pub base_url: Option<String>,
}

/// Configuration for the LLM blog writer
#[derive(Debug, Deserialize, Clone)]
pub struct WriterConfig {
    /// API key (can also be set via GROQ_API_KEY)
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible endpoint
    #[serde(default = "default_writer_base_url")]
    pub base_url: String,
    /// Model identifier
    #[serde(default = "default_writer_model")]
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate per variation
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds
    #[serde(default = "default_writer_timeout")]
    pub timeout: u64,
    /// Number of variations generated at the same time
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            order: default_image_order(),
            providers: HashMap::new(),
            timeout: default_image_timeout(),
            count: default_image_count(),
            output_dir: default_output_dir(),
            public_prefix: default_public_prefix(),
            seed: None,
        }
    }
}

impl Default for ImageProviderConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_key: None,
            base_url: None,
        }
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_writer_base_url(),
            model: default_writer_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout: default_writer_timeout(),
            workers: default_workers(),
        }
    }
}

// Default value functions
fn default_image_order() -> Vec<String> {
    vec![
        "unsplash".to_string(),
        "openverse".to_string(),
        "wikipedia".to_string(),
    ]
}

fn default_image_timeout() -> u64 {
    15
}

fn default_image_count() -> usize {
    6
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("static/images")
}

fn default_public_prefix() -> String {
    "/static/images".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_writer_base_url() -> String {
    "https://api.groq.com".to_string()
}

fn default_writer_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_writer_timeout() -> u64 {
    60
}

fn default_workers() -> usize {
    3
}

/// Plain environment variables accepted for credentials, by provider name
const CREDENTIAL_VARS: &[(&str, &str)] = &[
    ("unsplash", "UNSPLASH_ACCESS_KEY"),
    ("openverse", "OPENVERSE_API_KEY"),
];

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with BLOGFORGE__ prefix
    /// 2. `path`, or blogforge.toml in the current directory
    /// 3. Default values
    ///
    /// Credentials that are still missing afterwards are taken from
    /// UNSPLASH_ACCESS_KEY, OPENVERSE_API_KEY and GROQ_API_KEY.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = load_config(path)?;
        config.apply_env_fallbacks(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Fill in credentials that are not configured from `lookup`
    pub fn apply_env_fallbacks<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for (provider, var) in CREDENTIAL_VARS {
            let entry = self
                .images
                .providers
                .entry(provider.to_string())
                .or_default();
            if entry.api_key.is_none() {
                entry.api_key = lookup(var).filter(|v| !v.trim().is_empty());
            }
        }
        if self.writer.api_key.is_none() {
            self.writer.api_key = lookup("GROQ_API_KEY").filter(|v| !v.trim().is_empty());
        }
    }

    /// Settings for the named image provider, defaults when unconfigured
    pub fn image_provider(&self, name: &str) -> ImageProviderConfig {
        self.images
            .providers
            .get(name)
            .cloned()
            .unwrap_or_default()
    }
}

/// Read the raw configuration sources without credential fallbacks
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        // Optional config file (can be missing)
        None => File::with_name("blogforge").required(false),
    };

    let settings = Config::builder()
        .add_source(file)
        // Use double underscore for nested: BLOGFORGE__IMAGES__PROVIDERS__UNSPLASH__API_KEY
        .add_source(
            Environment::with_prefix("BLOGFORGE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
