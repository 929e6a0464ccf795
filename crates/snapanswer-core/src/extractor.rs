use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

use crate::deadline::run_with_deadline;
use crate::error::PipelineError;

/// OCR capability consumed by the text extractor
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Recognize the text in `image` using the given language code
    async fn recognize(&self, image: &Path, language: &str) -> Result<String>;

    /// Human-readable engine name
    fn engine_name(&self) -> &str;

    /// Check if the engine can be invoked
    async fn is_available(&self) -> bool {
        true
    }
}

/// Runs the `tesseract` command-line engine
pub struct TesseractRecognizer {
    binary: PathBuf,
}

impl TesseractRecognizer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_binary("tesseract")
    }

    #[must_use]
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextRecognizer for TesseractRecognizer {
    async fn recognize(&self, image: &Path, language: &str) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(language)
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("Failed to run {}", self.binary.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("tesseract exited with {}: {}", output.status, stderr.trim());
        }

        String::from_utf8(output.stdout).context("tesseract produced non-UTF-8 output")
    }

    fn engine_name(&self) -> &str {
        "tesseract"
    }

    async fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .kill_on_drop(true)
            .output()
            .await
            .is_ok_and(|o| o.status.success())
    }
}

/// Turns one screenshot into text.
pub struct TextExtractor {
    recognizer: Box<dyn TextRecognizer>,
    language: String,
    timeout: Option<Duration>,
}

impl TextExtractor {
    #[must_use]
    pub fn new(
        recognizer: Box<dyn TextRecognizer>,
        language: &str,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            recognizer,
            language: language.to_string(),
            timeout,
        }
    }

    pub async fn is_available(&self) -> bool {
        self.recognizer.is_available().await
    }

    /// Extract the text of `path`; the result may be empty.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionFailed` if the engine fails or exceeds the timeout.
    pub async fn extract(&self, path: &Path) -> Result<String, PipelineError> {
        log::debug!(
            "Running {} ({}) on {}",
            self.recognizer.engine_name(),
            self.language,
            path.display()
        );

        let recognition = self.recognizer.recognize(path, &self.language);
        let text = run_with_deadline(self.timeout, "OCR", recognition)
            .await
            .map_err(|source| PipelineError::ExtractionFailed {
                path: path.to_path_buf(),
                source,
            })?;

        log::debug!("Extracted {} chars from {}", text.len(), path.display());
        Ok(text)
    }
}
