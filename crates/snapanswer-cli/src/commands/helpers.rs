//! Helper utility functions for CLI commands

use snapanswer_core::{ErrorKind, PipelineError};

/// Operator-facing hint for a failed cycle.
pub fn failure_hint(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::EmptyDirectory => "The screenshot folder was empty when a cycle started.",
        ErrorKind::ExtractionFailed => {
            "Could not read text from the screenshot. Is tesseract installed and on PATH?"
        }
        ErrorKind::GenerationFailed => {
            "Could not get an answer. Check API_KEY, your quota and the network connection."
        }
        ErrorKind::ClipboardWriteFailed => {
            "Could not reach the clipboard. Is a desktop session available?"
        }
        ErrorKind::DrainFailed => {
            "Could not clean the screenshot folder. \
             Check its permissions and remove leftovers by hand."
        }
    }
}

/// Tell the operator what went wrong and turn the error into the process result.
pub fn report_failure(err: PipelineError) -> anyhow::Error {
    eprintln!("{}", failure_hint(err.kind()));
    let err = anyhow::Error::new(err);
    log::error!("{err:#}");
    err
}

/// "1 entry" / "3 entries"
pub fn entries_label(count: usize) -> String {
    if count == 1 {
        "1 entry".to_string()
    } else {
        format!("{count} entries")
    }
}
