// ── Xyna Atoms: Error Types ────────────────────────────────────────────────
// One `thiserror` enum for every fallible engine call. Parsing helpers return
// Option instead; an absent match is never an error. Response producers turn
// an EngineError into an apology through `Display`, so messages must stay
// free of API keys.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Vectorizer files, step payloads, history files.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Client construction or transport below the provider's retry loop.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Knowledge cache.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Remote generation failed after retries.
    #[error("Provider error: {provider}: {message}")]
    Provider { provider: String, message: String },

    /// An injected classifier, generator, QA model or vectorizer failed.
    #[error("Capability error: {capability}: {message}")]
    Capability { capability: String, message: String },

    /// Rejected or unparsable configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl EngineError {
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider { provider: provider.into(), message: message.into() }
    }

    pub fn capability(capability: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Capability { capability: capability.into(), message: message.into() }
    }
}

impl From<toml::de::Error> for EngineError {
    fn from(e: toml::de::Error) -> Self {
        EngineError::Config(e.to_string())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
