use snapanswer_ai::AnswerGenerator;
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::{
    config::PipelineConfig,
    dispatcher::AnswerDispatcher,
    drainer::drain,
    error::PipelineError,
    extractor::{TextExtractor, TextRecognizer},
    selector::{list_entries, select_latest},
    sink::{ClipboardWriter, DeliverySink},
};

/// What a completed cycle did with its screenshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// An answer reached the clipboard
    Delivered { source: PathBuf, answer: String },
    /// OCR found nothing to ask about
    NoText { source: PathBuf },
}

/// Counters reported when the loop stops
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub polls: u64,
    pub cycles: u64,
}

pub struct Supervisor {
    config: PipelineConfig,
    extractor: TextExtractor,
    dispatcher: AnswerDispatcher,
    sink: DeliverySink,
    summary: RunSummary,
}

impl Supervisor {
    #[must_use]
    pub fn new(
        config: PipelineConfig,
        recognizer: Box<dyn TextRecognizer>,
        generator: Box<dyn AnswerGenerator>,
        clipboard: Box<dyn ClipboardWriter>,
    ) -> Self {
        let extractor = TextExtractor::new(recognizer, &config.language, config.ocr_timeout);
        let dispatcher = AnswerDispatcher::new(generator, config.generation_timeout);
        Self {
            config,
            extractor,
            dispatcher,
            sink: DeliverySink::new(clipboard),
            summary: RunSummary::default(),
        }
    }

    #[must_use]
    pub fn extractor(&self) -> &TextExtractor {
        &self.extractor
    }

    #[must_use]
    pub fn dispatcher(&self) -> &AnswerDispatcher {
        &self.dispatcher
    }

    #[must_use]
    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Run until Ctrl-C or the first pipeline failure.
    ///
    /// # Errors
    ///
    /// Returns the error that ended the loop.
    pub async fn run_with_signals(&mut self) -> Result<RunSummary, PipelineError> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for Ctrl-C: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Poll the watched directory on every tick until `shutdown` resolves.
    ///
    /// Shutdown is honoured while waiting for the timer, the OCR engine or the
    /// generation service; an interrupted cycle leaves the directory untouched.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error raised by a cycle.
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<RunSummary, PipelineError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let mut ticker = interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        println!(
            "Using Gemini API ({}). Waiting for screenshots. Type Ctrl+C to Stop.",
            self.dispatcher.model_name()
        );
        log::info!(
            "Supervisor started on {} (every {:?})",
            self.config.watch_dir.display(),
            self.config.poll_interval
        );

        loop {
            tokio::select! {
                biased;
                () = &mut shutdown => {
                    log::info!("Received stop signal, shutting down...");
                    break;
                }
                result = self.next_poll(&mut ticker) => {
                    match result {
                        Ok(_) => {}
                        Err(e) if e.is_fatal() => {
                            log::debug!("Cycle failed ({}): {e}", e.kind());
                            return Err(e);
                        }
                        Err(e) => log::warn!("Cycle skipped ({}): {e}", e.kind()),
                    }
                }
            }
        }

        log::info!(
            "Supervisor stopped after {} polls and {} cycles",
            self.summary.polls,
            self.summary.cycles
        );
        Ok(self.summary)
    }

    async fn next_poll(
        &mut self,
        ticker: &mut Interval,
    ) -> Result<Option<CycleOutcome>, PipelineError> {
        ticker.tick().await;
        self.poll_once().await
    }

    /// Look at the watched directory once and run a full cycle if it holds anything.
    ///
    /// Only the most recent entry is processed; the drain removes the rest.
    ///
    /// # Errors
    ///
    /// Returns the error of the failing stage. Nothing is drained in that case.
    pub async fn poll_once(&mut self) -> Result<Option<CycleOutcome>, PipelineError> {
        self.summary.polls += 1;
        let dir = self.config.watch_dir.clone();

        let entries = list_entries(&dir).map_err(|source| PipelineError::DrainFailed {
            path: dir.clone(),
            source,
        })?;
        if entries.is_empty() {
            return Ok(None);
        }

        let latest = select_latest(&dir, &entries)?.path.clone();
        if entries.len() > 1 {
            log::info!(
                "{} older entries will be discarded unprocessed",
                entries.len() - 1
            );
        }

        let outcome = self.process_image(&latest).await?;

        let removed = drain(&dir)?;
        log::debug!("Drained {removed} entries from {}", dir.display());
        self.summary.cycles += 1;

        println!("Waiting for screenshots. Type Ctrl+C to Stop.");
        Ok(Some(outcome))
    }

    /// Extract, ask and deliver for a single image. Does not touch the directory.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionFailed`, `GenerationFailed` or `ClipboardWriteFailed`.
    pub async fn process_image(&self, image: &Path) -> Result<CycleOutcome, PipelineError> {
        log::info!("Processing {}", image.display());
        let text = self.extractor.extract(image).await?;

        if text.trim().is_empty() {
            log::warn!("No text recognized in {}", image.display());
            println!("No text found in {}; skipping.", image.display());
            return Ok(CycleOutcome::NoText {
                source: image.to_path_buf(),
            });
        }

        let answer = self.dispatcher.dispatch(&text).await?;
        self.sink.deliver(&answer)?;

        Ok(CycleOutcome::Delivered {
            source: image.to_path_buf(),
            answer,
        })
    }
}
