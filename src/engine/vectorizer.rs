// Xyna Engine — TF-IDF Vectorizer
//
// Native stand-in for the externally fitted vectorizer the knowledge cache
// consumes. Vocabulary: lowercase alphanumeric tokens of two or more chars.
// idf is smoothed: ln((1 + n) / (1 + df)) + 1. Output rows are L2-normalised.
// Persisted as a single JSON document.

use crate::atoms::error::EngineResult;
use crate::atoms::traits::TextVectorizer;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// token → column index
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f32>,
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fitted vectorizer from `corpus`.
    pub fn fit<S: AsRef<str>>(corpus: &[S]) -> Self {
        let mut df: BTreeMap<String, usize> = BTreeMap::new();
        for doc in corpus {
            let mut seen: Vec<String> = tokenize(doc.as_ref());
            seen.sort();
            seen.dedup();
            for token in seen {
                *df.entry(token).or_insert(0) += 1;
            }
        }

        let n = corpus.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(df.len());
        for (idx, (token, count)) in df.into_iter().enumerate() {
            idf.push((((1.0 + n) / (1.0 + count as f64)).ln() + 1.0) as f32);
            vocabulary.insert(token, idx);
        }
        Self { vocabulary, idf }
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// tf·idf row for one document, L2-normalised. Unknown tokens are ignored.
    pub fn transform(&self, text: &str) -> Vec<f32> {
        let mut row = vec![0.0f32; self.vocabulary.len()];
        let mut counts: HashMap<usize, f32> = HashMap::new();
        for token in tokenize(text) {
            if let Some(&col) = self.vocabulary.get(&token) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }
        for (col, tf) in counts {
            row[col] = tf * self.idf[col];
        }
        let norm = row.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut row {
                *v /= norm;
            }
        }
        row
    }

    pub fn save(&self, path: &Path) -> EngineResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_vec(self)?)?;
        info!("[vectorizer] Saved {} terms to {}", self.vocabulary.len(), path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> EngineResult<Self> {
        let bytes = std::fs::read(path)?;
        let vectorizer: Self = serde_json::from_slice(&bytes)?;
        info!("[vectorizer] Loaded {} terms from {}", vectorizer.vocabulary.len(), path.display());
        Ok(vectorizer)
    }
}

impl TextVectorizer for TfidfVectorizer {
    fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    fn vectorize(&self, texts: &[&str]) -> EngineResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.transform(t)).collect())
    }
}
