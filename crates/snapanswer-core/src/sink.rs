use anyhow::{Context, Result};

use crate::error::PipelineError;

/// Clipboard capability consumed by the delivery sink
pub trait ClipboardWriter: Send + Sync {
    /// Replace the clipboard contents with `text`
    fn write(&self, text: &str) -> Result<()>;
}

/// System clipboard backed by arboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("No clipboard available")?;
        clipboard
            .set_text(text.to_owned())
            .context("Failed to set clipboard text")
    }
}

/// Key chord the operator uses to paste.
#[must_use]
pub fn paste_shortcut() -> &'static str {
    if cfg!(target_os = "macos") {
        "Cmd + V"
    } else {
        "Ctrl + V"
    }
}

/// Hands answers to the operator
pub struct DeliverySink {
    clipboard: Box<dyn ClipboardWriter>,
}

impl DeliverySink {
    #[must_use]
    pub fn new(clipboard: Box<dyn ClipboardWriter>) -> Self {
        Self { clipboard }
    }

    /// Copy `answer` to the clipboard and tell the operator.
    ///
    /// # Errors
    ///
    /// Returns `ClipboardWriteFailed` if the clipboard rejects the write.
    pub fn deliver(&self, answer: &str) -> Result<(), PipelineError> {
        self.clipboard
            .write(answer)
            .map_err(|source| PipelineError::ClipboardWriteFailed { source })?;

        log::info!("Answer delivered to clipboard ({} chars)", answer.len());
        println!("Correct Answer: {answer}");
        println!(
            "The correct answer is in your clipboard. ({} to paste)",
            paste_shortcut()
        );
        Ok(())
    }
}
