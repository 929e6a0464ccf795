pub mod ask;
pub mod check;
pub mod helpers;
pub mod watch;

use anyhow::Result;
use clap::Args;
use snapanswer_ai::create_generator;
use snapanswer_core::{
    config::{DEFAULT_GENERATION_TIMEOUT, DEFAULT_OCR_TIMEOUT},
    PipelineConfig, Supervisor, SystemClipboard, TesseractRecognizer,
};
use std::path::Path;
use std::time::Duration;

/// Limits on the external calls; 0 disables a limit
#[derive(Args, Debug, Clone, Copy)]
pub struct TimeoutArgs {
    /// Seconds to wait for the OCR engine (0 = no limit)
    #[arg(long, default_value_t = DEFAULT_OCR_TIMEOUT.as_secs())]
    pub ocr_timeout_secs: u64,
    /// Seconds to wait for the generated answer (0 = no limit)
    #[arg(long, default_value_t = DEFAULT_GENERATION_TIMEOUT.as_secs())]
    pub generation_timeout_secs: u64,
}

impl Default for TimeoutArgs {
    fn default() -> Self {
        Self {
            ocr_timeout_secs: DEFAULT_OCR_TIMEOUT.as_secs(),
            generation_timeout_secs: DEFAULT_GENERATION_TIMEOUT.as_secs(),
        }
    }
}

fn limit(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Build the startup configuration from the environment plus CLI limits.
pub fn load_config(env_file: Option<&Path>, timeouts: TimeoutArgs) -> Result<PipelineConfig> {
    let config = match env_file {
        Some(path) => PipelineConfig::from_env_file(path)?,
        None => PipelineConfig::from_env()?,
    }
        .with_ocr_timeout(limit(timeouts.ocr_timeout_secs))
        .with_generation_timeout(limit(timeouts.generation_timeout_secs));
    log::debug!("Loaded {config:?}");
    Ok(config)
}

/// Wire the production capabilities into a supervisor.
pub fn build_supervisor(config: PipelineConfig) -> Supervisor {
    let generator = create_generator(config.api_key.clone(), &config.model);
    Supervisor::new(
        config,
        Box::new(TesseractRecognizer::new()),
        generator,
        Box::new(SystemClipboard::new()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_env_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("snapanswer.env");
        assert!(load_config(Some(&missing), TimeoutArgs::default()).is_err());
    }

    #[test]
    fn test_zero_disables_limit() {
        assert_eq!(limit(0), None);
        assert_eq!(limit(15), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_default_timeouts_match_core_defaults() {
        let timeouts = TimeoutArgs::default();
        assert_eq!(limit(timeouts.ocr_timeout_secs), Some(DEFAULT_OCR_TIMEOUT));
        assert_eq!(
            limit(timeouts.generation_timeout_secs),
            Some(DEFAULT_GENERATION_TIMEOUT)
        );
    }
}
