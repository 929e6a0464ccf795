use anyhow::Result;
use async_trait::async_trait;

use crate::providers::google::GoogleGenAiProvider;

/// Model used when nothing else is requested.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Text-generation capability consumed by the answer dispatcher
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Generate a raw (untrimmed) text response for a given prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the model name being used
    fn model_name(&self) -> &str;

    /// Check if the provider is usable with its current configuration
    async fn is_available(&self) -> bool {
        true
    }
}

/// Create the generator backing the pipeline.
///
/// A missing API key is not an error here: the provider is still built and
/// every `generate` call reports the missing credential instead.
#[must_use]
pub fn create_generator(api_key: Option<String>, model: &str) -> Box<dyn AnswerGenerator> {
    if api_key.is_none() {
        log::warn!("No API key configured; every answer request will fail");
    }
    Box::new(GoogleGenAiProvider::new(api_key, model))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_generator_uses_requested_model() {
        let generator = create_generator(Some("key".to_string()), "gemini-1.5-pro");
        assert_eq!(generator.model_name(), "gemini-1.5-pro");
    }

    #[tokio::test]
    async fn test_generator_without_key_is_unavailable() {
        let generator = create_generator(None, DEFAULT_MODEL);
        assert!(!generator.is_available().await);
    }
}
