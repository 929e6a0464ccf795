use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by a pipeline stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no screenshots in {}", dir.display())]
    EmptyDirectory { dir: PathBuf },

    #[error("text extraction failed for {}", path.display())]
    ExtractionFailed {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("answer generation failed")]
    GenerationFailed {
        #[source]
        source: anyhow::Error,
    },

    #[error("could not write the answer to the clipboard")]
    ClipboardWriteFailed {
        #[source]
        source: anyhow::Error,
    },

    #[error("could not drain {}", path.display())]
    DrainFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Stage-independent tag for a [`PipelineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyDirectory,
    ExtractionFailed,
    GenerationFailed,
    ClipboardWriteFailed,
    DrainFailed,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::EmptyDirectory => "EmptyDirectory",
            Self::ExtractionFailed => "ExtractionFailed",
            Self::GenerationFailed => "GenerationFailed",
            Self::ClipboardWriteFailed => "ClipboardWriteFailed",
            Self::DrainFailed => "DrainFailed",
        };
        f.write_str(name)
    }
}

impl PipelineError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyDirectory { .. } => ErrorKind::EmptyDirectory,
            Self::ExtractionFailed { .. } => ErrorKind::ExtractionFailed,
            Self::GenerationFailed { .. } => ErrorKind::GenerationFailed,
            Self::ClipboardWriteFailed { .. } => ErrorKind::ClipboardWriteFailed,
            Self::DrainFailed { .. } => ErrorKind::DrainFailed,
        }
    }

    /// Whether the supervisor must stop when this error ends a cycle.
    ///
    /// Every kind is currently fatal: there is no retry and no restart.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        match self.kind() {
            ErrorKind::EmptyDirectory
            | ErrorKind::ExtractionFailed
            | ErrorKind::GenerationFailed
            | ErrorKind::ClipboardWriteFailed
            | ErrorKind::DrainFailed => true,
        }
    }
}
