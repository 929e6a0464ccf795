//! In-memory capabilities for exercising the pipeline without OCR, network or clipboard.

use anyhow::Result;
use async_trait::async_trait;
use snapanswer_ai::AnswerGenerator;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::extractor::TextRecognizer;
use crate::sink::ClipboardWriter;

type Shared<T> = Arc<Mutex<Vec<T>>>;

pub(crate) struct FakeRecognizer {
    outcome: Result<String, String>,
    delay: Option<Duration>,
    calls: Shared<(PathBuf, String)>,
}

impl FakeRecognizer {
    pub(crate) fn returning(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
            delay: None,
            calls: Arc::default(),
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            ..Self::returning("")
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> Shared<(PathBuf, String)> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl TextRecognizer for FakeRecognizer {
    async fn recognize(&self, image: &Path, language: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((image.to_path_buf(), language.to_string()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone().map_err(|m| anyhow::anyhow!(m))
    }

    fn engine_name(&self) -> &str {
        "fake-ocr"
    }
}

pub(crate) struct FakeGenerator {
    outcome: Result<String, String>,
    delay: Option<Duration>,
    prompts: Shared<String>,
}

impl FakeGenerator {
    pub(crate) fn replying(answer: &str) -> Self {
        Self {
            outcome: Ok(answer.to_string()),
            delay: None,
            prompts: Arc::default(),
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            ..Self::replying("")
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn prompts(&self) -> Shared<String> {
        Arc::clone(&self.prompts)
    }
}

#[async_trait]
impl AnswerGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone().map_err(|m| anyhow::anyhow!(m))
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

pub(crate) struct FakeClipboard {
    fail: bool,
    writes: Shared<String>,
}

impl FakeClipboard {
    pub(crate) fn new() -> Self {
        Self {
            fail: false,
            writes: Arc::default(),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub(crate) fn writes(&self) -> Shared<String> {
        Arc::clone(&self.writes)
    }
}

impl ClipboardWriter for FakeClipboard {
    fn write(&self, text: &str) -> Result<()> {
        if self.fail {
            anyhow::bail!("no clipboard service in this session");
        }
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
