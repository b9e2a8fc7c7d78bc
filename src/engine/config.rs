// Xyna Engine — Assistant Configuration
//
// Resolution order (highest priority first):
//   1. Runtime environment (OPENROUTER_API_KEY, OPENROUTER_MODEL, XYNA_CACHE_DIR)
//   2. TOML config file
//   3. Build-time defaults forwarded from `.env` by build.rs
//   4. Compiled defaults

use crate::atoms::constants::{
    DEFAULT_HISTORY_WINDOW, DEFAULT_MAX_TOKENS, DEFAULT_ONLINE_RECHECK_SECS,
    DEFAULT_QA_CONTEXT_CHARS, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TEMPERATURE,
    OPENROUTER_BASE_URL, OPENROUTER_DEFAULT_MODEL, OPENROUTER_REFERER,
};
use crate::atoms::error::{EngineError, EngineResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// `[openrouter]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenRouterConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub referer: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Overall request timeout. None: wait as long as the remote takes.
    pub timeout_secs: Option<u64>,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: OPENROUTER_DEFAULT_MODEL.to_string(),
            base_url: OPENROUTER_BASE_URL.to_string(),
            referer: OPENROUTER_REFERER.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub openrouter: OpenRouterConfig,
    /// Holds `knowledge.db` and `tfidf_vectorizer.json`.
    pub cache_dir: PathBuf,
    pub similarity_threshold: f64,
    /// User turns considered when summarising history for the remote model.
    pub history_window: usize,
    pub qa_context_chars: usize,
    pub online_recheck_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            openrouter: OpenRouterConfig::default(),
            cache_dir: default_cache_dir(),
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            history_window: DEFAULT_HISTORY_WINDOW,
            qa_context_chars: DEFAULT_QA_CONTEXT_CHARS,
            online_recheck_secs: DEFAULT_ONLINE_RECHECK_SECS,
        }
    }
}

/// The `[openrouter]` keys a config file actually spells out.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExplicitKeys {
    openrouter: ExplicitOpenRouterKeys,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExplicitOpenRouterKeys {
    api_key: Option<String>,
    model: Option<String>,
}

/// `~/.xyna`, or `./.xyna` when no home directory is known.
pub fn default_cache_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".xyna")
}

/// Default config file location: `~/.xyna/config.toml`.
pub fn default_config_path() -> PathBuf {
    default_cache_dir().join("config.toml")
}

impl AssistantConfig {
    /// Resolve the full configuration. A missing file at `path` is not an
    /// error; an unreadable or invalid one is.
    pub fn load(path: Option<&Path>) -> EngineResult<Self> {
        let mut config = Self::default();
        config.apply_build_defaults();

        let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
        if path.exists() {
            let text = std::fs::read_to_string(&path)?;
            config = Self::layer_file(&text, &config)?;
            info!("[config] Loaded {}", path.display());
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(text: &str) -> EngineResult<Self> {
        Ok(toml::from_str(text)?)
    }

    fn apply_build_defaults(&mut self) {
        if let Some(key) = option_env!("OPENROUTER_API_KEY") {
            self.openrouter.api_key = key.to_string();
        }
        if let Some(model) = option_env!("OPENROUTER_MODEL") {
            self.openrouter.model = model.to_string();
        }
    }

    /// Parse a config file over `base`: keys the file sets win, and the
    /// build-time key and model survive wherever the file is silent.
    fn layer_file(text: &str, base: &Self) -> EngineResult<Self> {
        let mut config = Self::from_toml(text)?;
        let explicit: ExplicitKeys = toml::from_str(text)?;
        if explicit.openrouter.api_key.is_none() {
            config.openrouter.api_key = base.openrouter.api_key.clone();
        }
        if explicit.openrouter.model.is_none() {
            config.openrouter.model = base.openrouter.model.clone();
        }
        Ok(config)
    }

    /// Apply environment overrides through `lookup` (injectable for tests).
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("OPENROUTER_API_KEY").filter(|v| !v.is_empty()) {
            self.openrouter.api_key = key;
        }
        if let Some(model) = lookup("OPENROUTER_MODEL").filter(|v| !v.is_empty()) {
            self.openrouter.model = model;
        }
        if let Some(dir) = lookup("XYNA_CACHE_DIR").filter(|v| !v.is_empty()) {
            self.cache_dir = PathBuf::from(dir);
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(EngineError::Config(format!(
                "similarity_threshold must be between 0.0 and 1.0, got {}",
                self.similarity_threshold
            )));
        }
        if self.history_window == 0 {
            return Err(EngineError::Config("history_window must be at least 1".into()));
        }
        Ok(())
    }
}
