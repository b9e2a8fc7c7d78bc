// ── Xyna Atoms: Capability Traits ──────────────────────────────────────────
// Narrow interfaces for every externally supplied capability. The engine
// only ever holds these behind `Option<Box<dyn …>>`; an absent capability
// degrades to a rule-based default, never to a failure.

use crate::atoms::error::{EngineError, EngineResult};
use crate::atoms::types::ChatRequest;
use async_trait::async_trait;
use thiserror::Error;

/// text → intent label (`question`, `greeting`, …).
pub trait IntentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> EngineResult<String>;
}

/// text → sentiment label (`positive`, `negative`, `neutral`, …).
pub trait SentimentAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> EngineResult<String>;
}

/// (question, context) → extracted answer.
pub trait QuestionAnswerer: Send + Sync {
    fn answer(&self, question: &str, context: &str) -> EngineResult<String>;
}

/// prompt → generated continuation.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> EngineResult<String>;
}

/// Already-fitted text vectorizer: strings → numeric vectors of equal length.
pub trait TextVectorizer: Send + Sync {
    /// Whether the vectorizer has been fitted and can produce vectors.
    fn is_fitted(&self) -> bool {
        true
    }

    fn vectorize(&self, texts: &[&str]) -> EngineResult<Vec<Vec<f32>>>;
}

/// Executes one serialized action or step. The return value is never
/// inspected by the core.
pub trait ActionExecutor: Send + Sync {
    fn execute(&self, action: &serde_json::Value);
}

// ── Remote generation ──────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport: {0}")]
    Transport(String),
    #[error("auth: {0}")]
    Auth(String),
    #[error("rate limited: {message}")]
    RateLimited { message: String, retry_after_secs: Option<u64> },
    #[error("api {status}: {message}")]
    Api { status: u16, message: String },
    #[error("parse: {0}")]
    Parse(String),
}

impl From<ProviderError> for EngineError {
    fn from(e: ProviderError) -> Self {
        EngineError::provider("remote", e.to_string())
    }
}

/// Remote chat-completion capability.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Send one request and return the first choice's message text.
    async fn complete(&self, request: &ChatRequest) -> Result<String, ProviderError>;
}
