pub mod ai_provider;
pub mod http;
pub mod providers;

pub use ai_provider::{create_generator, AnswerGenerator, DEFAULT_MODEL};
pub use providers::google::GoogleGenAiProvider;
