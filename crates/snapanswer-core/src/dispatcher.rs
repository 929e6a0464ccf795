use snapanswer_ai::AnswerGenerator;
use std::time::Duration;

use crate::deadline::run_with_deadline;
use crate::error::PipelineError;

pub const PROMPT_PREFIX: &str =
    "If this is a multiple choice question, give me only the letter of the correct answer.";
pub const PROMPT_SUFFIX: &str = "If not, provide the answer without any explanations.";
pub const PROMPT_SEPARATOR: &str = "----> ";

/// Build the prompt sent for a question.
#[must_use]
pub fn build_prompt(question: &str) -> String {
    format!("{PROMPT_PREFIX}{PROMPT_SUFFIX}{PROMPT_SEPARATOR}{question}")
}

/// Sends extracted questions to the text-generation service
pub struct AnswerDispatcher {
    generator: Box<dyn AnswerGenerator>,
    timeout: Option<Duration>,
}

impl AnswerDispatcher {
    #[must_use]
    pub fn new(generator: Box<dyn AnswerGenerator>, timeout: Option<Duration>) -> Self {
        Self { generator, timeout }
    }

    #[must_use]
    pub fn model_name(&self) -> &str {
        self.generator.model_name()
    }

    pub async fn is_available(&self) -> bool {
        self.generator.is_available().await
    }

    /// Ask the service about `question` and return the trimmed answer.
    ///
    /// # Errors
    ///
    /// Returns `GenerationFailed` on any service error or when the timeout expires.
    pub async fn dispatch(&self, question: &str) -> Result<String, PipelineError> {
        let prompt = build_prompt(question);
        log::debug!("Prompt: {prompt}");

        let generation = self.generator.generate(&prompt);
        let raw = run_with_deadline(self.timeout, "answer generation", generation)
            .await
            .map_err(|source| PipelineError::GenerationFailed { source })?;

        Ok(raw.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::FakeGenerator;
    use snapanswer_ai::{create_generator, DEFAULT_MODEL};

    #[test]
    fn test_build_prompt_is_deterministic() {
        let first = build_prompt("2+2=?");
        let second = build_prompt("2+2=?");
        assert_eq!(first, second);
        assert_eq!(
            first,
            "If this is a multiple choice question, give me only the letter of the correct answer.\
             If not, provide the answer without any explanations.----> 2+2=?"
        );
    }

    #[test]
    fn test_build_prompt_puts_question_last() {
        let question = "What is the capital of France? A) Paris B) Rome";
        let prompt = build_prompt(question);
        assert!(prompt.starts_with(PROMPT_PREFIX));
        assert!(prompt.ends_with(&format!("{PROMPT_SEPARATOR}{question}")));
    }

    #[tokio::test]
    async fn test_dispatch_trims_answer() {
        let generator = FakeGenerator::replying("  A \n");
        let prompts = generator.prompts();
        let dispatcher = AnswerDispatcher::new(Box::new(generator), None);

        let answer = dispatcher.dispatch("2+2=? A) 3 B) 4").await.unwrap();
        assert_eq!(answer, "A");
        assert_eq!(*prompts.lock().unwrap(), [build_prompt("2+2=? A) 3 B) 4")]);
    }

    #[tokio::test]
    async fn test_dispatch_wraps_service_error() {
        let generator = FakeGenerator::failing("quota exceeded");
        let dispatcher = AnswerDispatcher::new(Box::new(generator), None);

        let err = dispatcher.dispatch("2+2=?").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GenerationFailed);
    }

    #[tokio::test]
    async fn test_unconfigured_provider_is_unavailable() {
        let without_key = AnswerDispatcher::new(create_generator(None, DEFAULT_MODEL), None);
        assert!(!without_key.is_available().await);

        let with_key = AnswerDispatcher::new(
            create_generator(Some("test-key".to_string()), DEFAULT_MODEL),
            None,
        );
        assert!(with_key.is_available().await);
        assert_eq!(with_key.model_name(), DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn test_dispatch_times_out() {
        let generator = FakeGenerator::replying("A").with_delay(Duration::from_secs(5));
        let dispatcher =
            AnswerDispatcher::new(Box::new(generator), Some(Duration::from_millis(20)));

        let err = dispatcher.dispatch("2+2=?").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GenerationFailed);
    }
}
