use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::ai_provider::AnswerGenerator;
use crate::http::ResponseExt;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Google GenAI (Gemini) Provider
pub struct GoogleGenAiProvider {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl GoogleGenAiProvider {
    #[must_use]
    pub fn new(api_key: Option<String>, model: &str) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{API_BASE}/{}:generateContent", self.model)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Pull the answer text out of a `generateContent` response.
///
/// Text from `candidates[0].content.parts[*]` is concatenated in order.
fn extract_text(response: GenerateContentResponse) -> Result<String> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        anyhow::bail!("Google AI returned no answer ({reason})");
    };

    let finish_reason = candidate.finish_reason;
    let texts: Vec<String> = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if texts.is_empty() {
        anyhow::bail!(
            "Google AI response contained no text (finish reason: {})",
            finish_reason.as_deref().unwrap_or("unknown")
        );
    }

    Ok(texts.concat())
}

#[async_trait]
impl AnswerGenerator for GoogleGenAiProvider {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .context("API_KEY is not set; Google AI requests cannot be authenticated")?;

        let body = json!({
            "contents": [{
                "parts": [{
                    "text": prompt
                }]
            }]
        });

        log::debug!("Sending {} prompt chars to {}", prompt.len(), self.model);

        // Key travels in a header so it never shows up in URL-bearing errors.
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Google AI")?
            .ensure_success("Google AI")
            .await?;

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Google AI response")?;

        extract_text(parsed)
    }

    async fn is_available(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}
