//! HTTP utilities for the generation backends.

use anyhow::Result;
use serde::Deserialize;

/// Error envelope returned by Google APIs on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Reduce an error body to a single readable line.
///
/// Google-style `{"error": {...}}` envelopes collapse to `STATUS: message`;
/// anything else is passed through trimmed.
pub(crate) fn describe_error_body(body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(status) => format!("{status}: {}", envelope.error.message),
            None => envelope.error.message,
        },
        Err(_) => body.trim().to_string(),
    }
}

/// Extension trait for reqwest::Response to handle common error patterns.
#[async_trait::async_trait]
pub trait ResponseExt {
    /// Ensure the response status is successful, returning an error with details if not.
    ///
    /// # Errors
    ///
    /// Returns an error if the response status is not successful (2xx),
    /// including the status code and the decoded error message.
    async fn ensure_success(self, api_name: &str) -> Result<Self>
    where
        Self: Sized;
}

#[async_trait::async_trait]
impl ResponseExt for reqwest::Response {
    async fn ensure_success(self, api_name: &str) -> Result<Self> {
        let status = self.status();
        if !status.is_success() {
            let body = self.text().await.unwrap_or_default();
            anyhow::bail!("{api_name} API error ({status}): {}", describe_error_body(&body));
        }
        Ok(self)
    }
}
