// Xyna Engine — Capability Bundle
// Optional pluggable models, constructed once and handed to the offline
// assistant. A missing capability selects the rule-based fallback.

use crate::atoms::constants::VECTORIZER_FILE;
use crate::atoms::traits::{
    IntentClassifier, QuestionAnswerer, SentimentAnalyzer, TextGenerator, TextVectorizer,
};
use crate::engine::vectorizer::TfidfVectorizer;
use log::{info, warn};
use std::path::Path;

#[derive(Default)]
pub struct Capabilities {
    pub intent_classifier: Option<Box<dyn IntentClassifier>>,
    pub sentiment_analyzer: Option<Box<dyn SentimentAnalyzer>>,
    pub question_answerer: Option<Box<dyn QuestionAnswerer>>,
    pub text_generator: Option<Box<dyn TextGenerator>>,
    pub vectorizer: Option<Box<dyn TextVectorizer>>,
}

impl Capabilities {
    /// No capabilities: every stage uses its rule-based fallback.
    pub fn none() -> Self {
        Self::default()
    }

    /// Load whatever is persisted under `cache_dir`. Currently only the
    /// TF-IDF vectorizer is stored on disk; a corrupt file is logged and
    /// treated as absent.
    pub fn load(cache_dir: &Path) -> Self {
        let mut caps = Self::none();
        let path = cache_dir.join(VECTORIZER_FILE);
        if path.exists() {
            match TfidfVectorizer::load(&path) {
                Ok(v) => caps.vectorizer = Some(Box::new(v)),
                Err(e) => warn!("[capabilities] Ignoring unreadable vectorizer {:?}: {}", path, e),
            }
        }
        caps.log_summary();
        caps
    }

    pub fn with_intent_classifier(mut self, c: impl IntentClassifier + 'static) -> Self {
        self.intent_classifier = Some(Box::new(c));
        self
    }

    pub fn with_sentiment_analyzer(mut self, s: impl SentimentAnalyzer + 'static) -> Self {
        self.sentiment_analyzer = Some(Box::new(s));
        self
    }

    pub fn with_question_answerer(mut self, q: impl QuestionAnswerer + 'static) -> Self {
        self.question_answerer = Some(Box::new(q));
        self
    }

    pub fn with_text_generator(mut self, g: impl TextGenerator + 'static) -> Self {
        self.text_generator = Some(Box::new(g));
        self
    }

    pub fn with_vectorizer(mut self, v: impl TextVectorizer + 'static) -> Self {
        self.vectorizer = Some(Box::new(v));
        self
    }

    pub fn vectorizer(&self) -> Option<&dyn TextVectorizer> {
        self.vectorizer.as_deref()
    }

    /// Log which stages run on rules instead of a model.
    pub fn log_summary(&self) {
        let missing: Vec<&str> = [
            ("intent classifier", self.intent_classifier.is_none()),
            ("sentiment analyzer", self.sentiment_analyzer.is_none()),
            ("question answerer", self.question_answerer.is_none()),
            ("text generator", self.text_generator.is_none()),
            ("vectorizer", self.vectorizer().map(|v| !v.is_fitted()).unwrap_or(true)),
        ]
        .iter()
        .filter(|(_, absent)| *absent)
        .map(|(name, _)| *name)
        .collect();

        if missing.is_empty() {
            info!("[capabilities] All capabilities available");
        } else {
            info!("[capabilities] Using rule-based fallback for: {}", missing.join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_from_empty_dir_has_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let caps = Capabilities::load(dir.path());
        assert!(caps.vectorizer().is_none());
        assert!(caps.text_generator.is_none());
    }

    #[test]
    fn load_picks_up_saved_vectorizer() {
        let dir = tempfile::tempdir().unwrap();
        TfidfVectorizer::fit(&["hello there"]).save(&dir.path().join(VECTORIZER_FILE)).unwrap();
        let caps = Capabilities::load(dir.path());
        assert!(caps.vectorizer().is_some_and(|v| v.is_fitted()));
    }

    #[test]
    fn corrupt_vectorizer_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(VECTORIZER_FILE), b"not json").unwrap();
        assert!(Capabilities::load(dir.path()).vectorizer().is_none());
    }
}
