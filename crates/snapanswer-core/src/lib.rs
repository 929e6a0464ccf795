pub mod config;
mod deadline;
pub mod dispatcher;
pub mod drainer;
pub mod error;
pub mod extractor;
pub mod selector;
pub mod sink;
pub mod supervisor;

#[cfg(test)]
pub(crate) mod testing;

pub use config::PipelineConfig;
pub use dispatcher::{build_prompt, AnswerDispatcher};
pub use drainer::drain;
pub use error::{ErrorKind, PipelineError};
pub use extractor::{TesseractRecognizer, TextExtractor, TextRecognizer};
pub use selector::{list_entries, select_latest, ScreenshotFile};
pub use sink::{ClipboardWriter, DeliverySink, SystemClipboard};
pub use supervisor::{CycleOutcome, RunSummary, Supervisor};
