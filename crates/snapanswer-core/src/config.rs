use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use snapanswer_ai::DEFAULT_MODEL;

/// Environment variable holding the generation-service credential.
pub const API_KEY_ENV: &str = "API_KEY";

/// OCR language handed to the recognizer.
pub const DEFAULT_LANGUAGE: &str = "eng";

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_OCR_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Get the screenshot directory watched by the pipeline (`~/Desktop/Screenshots`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn get_watch_dir() -> Result<PathBuf> {
    let mut path = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Failed to get home dir"))?;
    path.push("Desktop");
    path.push("Screenshots");
    Ok(path)
}

/// Immutable pipeline settings, built once at startup.
#[derive(Clone)]
pub struct PipelineConfig {
    pub watch_dir: PathBuf,
    pub poll_interval: Duration,
    pub language: String,
    pub model: String,
    pub api_key: Option<String>,
    /// `None` disables the limit.
    pub ocr_timeout: Option<Duration>,
    /// `None` disables the limit.
    pub generation_timeout: Option<Duration>,
}

impl PipelineConfig {
    #[must_use]
    pub fn new(watch_dir: PathBuf) -> Self {
        Self {
            watch_dir,
            poll_interval: DEFAULT_POLL_INTERVAL,
            language: DEFAULT_LANGUAGE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            ocr_timeout: Some(DEFAULT_OCR_TIMEOUT),
            generation_timeout: Some(DEFAULT_GENERATION_TIMEOUT),
        }
    }

    /// Resolve the fixed watch path and read the credential from the environment.
    ///
    /// A `.env` file in the working directory (or one of its parents) is loaded
    /// first; variables already set in the process environment take precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => log::warn!("Ignoring unreadable .env file: {e}"),
        }
        Self::read_env()
    }

    /// Same as [`Self::from_env`], but loads the given env file instead of searching for `.env`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or the home directory cannot be determined.
    pub fn from_env_file(path: &Path) -> Result<Self> {
        dotenvy::from_path(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        Self::read_env()
    }

    fn read_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty());
        Ok(Self::new(get_watch_dir()?).with_api_key(api_key))
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[must_use]
    pub fn with_ocr_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.ocr_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_generation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.generation_timeout = timeout;
        self
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Create the watch directory if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_watch_dir(&self) -> Result<()> {
        if !self.watch_dir.is_dir() {
            log::info!("Creating watch directory {}", self.watch_dir.display());
            std::fs::create_dir_all(&self.watch_dir).with_context(|| {
                format!("Failed to create {}", self.watch_dir.display())
            })?;
        }
        Ok(())
    }
}

impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("watch_dir", &self.watch_dir)
            .field("poll_interval", &self.poll_interval)
            .field("language", &self.language)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("ocr_timeout", &self.ocr_timeout)
            .field("generation_timeout", &self.generation_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_dir_is_under_desktop() {
        let dir = get_watch_dir().unwrap();
        assert!(dir.ends_with("Desktop/Screenshots"));
    }

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::new(PathBuf::from("/tmp/shots"));
        assert_eq!(config.poll_interval, Duration::from_millis(500));
        assert_eq!(config.language, "eng");
        assert_eq!(config.model, "gemini-2.0-flash");
        assert!(!config.has_api_key());
        assert_eq!(config.ocr_timeout, Some(DEFAULT_OCR_TIMEOUT));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = PipelineConfig::new(PathBuf::from("/tmp/shots"))
            .with_api_key(Some("super-secret".to_string()));
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn test_ensure_watch_dir_creates_missing_dir() {
        let root = tempfile::tempdir().unwrap();
        let watch = root.path().join("Desktop").join("Screenshots");
        let config = PipelineConfig::new(watch.clone());

        config.ensure_watch_dir().unwrap();
        assert!(watch.is_dir());

        // Second call is a no-op
        config.ensure_watch_dir().unwrap();
    }

    // Single test because it mutates the process-wide API_KEY variable
    #[test]
    fn test_env_file_supplies_key_without_overriding_environment() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join(".env");
        std::fs::write(&env_file, "API_KEY=from-dotenv\n").unwrap();

        std::env::remove_var(API_KEY_ENV);
        let config = PipelineConfig::from_env_file(&env_file).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("from-dotenv"));

        std::env::set_var(API_KEY_ENV, "from-shell");
        std::fs::write(&env_file, "API_KEY=stale\n").unwrap();
        let config = PipelineConfig::from_env_file(&env_file).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("from-shell"));

        std::env::remove_var(API_KEY_ENV);
    }

    #[test]
    fn test_missing_env_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PipelineConfig::from_env_file(&dir.path().join(".env")).unwrap_err();
        assert!(err.to_string().contains("Failed to load"));
    }
}
