use crate::config::WriterConfig;
use crate::error::BlogError;
use crate::model::BlogStyle;
use crate::providers::USER_AGENT;
use crate::writers::{build_blog_prompt, BlogWriter};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Blog writer backed by Groq's OpenAI-compatible chat completions API
pub struct GroqWriter {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GroqWriter {
    /// Create a new Groq writer from configuration
    pub fn new(config: &WriterConfig) -> Result<Self, BlogError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| BlogError::Config("GROQ_API_KEY not found in config or environment".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(GroqWriter {
            client,
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        GroqWriter {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 1500,
        }
    }
}

#[async_trait]
impl BlogWriter for GroqWriter {
    fn writer_name(&self) -> &str {
        "groq"
    }

    async fn write(
        &self,
        title: &str,
        description: &str,
        style: BlogStyle,
    ) -> Result<String, BlogError> {
        info!(
            "Generating blog variation {} for title: {}",
            style.variation(),
            title
        );

        let response = self
            .client
            .post(format!("{}/openai/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "user", "content": build_blog_prompt(title, description, style)}
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(BlogError::Generation(format!(
                "Groq API error ({}): {}",
                status, error_text
            )));
        }

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);

        let content = response_body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::trim)
            .unwrap_or_default();
        if content.is_empty() {
            return Err(BlogError::Generation(
                "Empty response from Groq API".to_string(),
            ));
        }

        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_write() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/openai/v1/chat/completions")
            .match_header("authorization", "Bearer fake_api_key")
            .match_body(Matcher::PartialJson(json!({
                "model": "llama-3.1-8b-instant",
                "max_tokens": 1500
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r###"{
                    "choices": [{
                        "message": {
                            "content": "\n## Introduction\nTea is great.\n\n## Conclusion\nDrink tea.\n"
                        }
                    }]
                }"###,
            )
            .create_async()
            .await;

        let writer = GroqWriter::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "llama-3.1-8b-instant".to_string(),
        );
        let result = writer
            .write("Tea", "All about tea", BlogStyle::Informative)
            .await
            .unwrap();

        assert!(result.starts_with("## Introduction"));
        assert!(result.ends_with("Drink tea."));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_write_api_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/openai/v1/chat/completions")
            .with_status(429)
            .with_body(r#"{"error": {"message": "Rate limit reached"}}"#)
            .create_async()
            .await;

        let writer = GroqWriter::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "llama-3.1-8b-instant".to_string(),
        );
        let result = writer.write("Tea", "All about tea", BlogStyle::Opinion).await;
        assert!(matches!(result, Err(BlogError::Generation(msg)) if msg.contains("429")));
    }

    #[tokio::test]
    async fn test_write_empty_content() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/openai/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices": [{"message": {"content": "   "}}]}"#)
            .create_async()
            .await;

        let writer = GroqWriter::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "llama-3.1-8b-instant".to_string(),
        );
        let result = writer.write("Tea", "All about tea", BlogStyle::Opinion).await;
        assert!(matches!(result, Err(BlogError::Generation(msg)) if msg.contains("Empty response")));
    }

    #[test]
    fn test_new_requires_api_key() {
        let result = GroqWriter::new(&WriterConfig::default());
        assert!(matches!(result, Err(BlogError::Config(msg)) if msg.contains("GROQ_API_KEY")));
    }

    #[test]
    fn test_writer_name() {
        let config = WriterConfig {
            api_key: Some("key".to_string()),
            ..Default::default()
        };
        let writer = GroqWriter::new(&config).unwrap();
        assert_eq!(writer.writer_name(), "groq");
    }
}
