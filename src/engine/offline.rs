// Xyna Engine — Offline Assistant
//
// Fallback chain, first success wins:
//   1. knowledge cache hit               → returned as-is, nothing written
//   2. question + question answerer      → answer over the transcript tail
//   3. text generator                    → structured prompt, text after the
//                                          last "Assistant:" marker
//   4. templated reply keyed by intent   → topic substituted into `{}`
// Every non-empty result from 2–4 is appended to the cache under the input.

use crate::atoms::constants::{
    DEFAULT_QA_CONTEXT_CHARS, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOPIC, FALLBACK_TEMPLATES,
    GREETING_WORDS, NEGATIVE_WORDS, POSITIVE_WORDS, QUESTION_WORDS, TOPIC_STOP_WORDS,
    TOPIC_WORD_LIMIT, URGENT_WORDS,
};
use crate::atoms::error::EngineResult;
use crate::atoms::types::{HistoryTurn, TurnKind};
use crate::engine::capabilities::Capabilities;
use crate::engine::knowledge::KnowledgeStore;
use crate::engine::markers::{after_last, contains_any};
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::sync::Arc;

pub struct OfflineAssistant {
    capabilities: Capabilities,
    knowledge: Option<Arc<KnowledgeStore>>,
    similarity_threshold: f64,
    qa_context_chars: usize,
}

impl OfflineAssistant {
    pub fn new(capabilities: Capabilities, knowledge: Option<Arc<KnowledgeStore>>) -> Self {
        Self {
            capabilities,
            knowledge,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            qa_context_chars: DEFAULT_QA_CONTEXT_CHARS,
        }
    }

    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_qa_context_chars(mut self, chars: usize) -> Self {
        self.qa_context_chars = chars;
        self
    }

    pub fn knowledge(&self) -> Option<&Arc<KnowledgeStore>> {
        self.knowledge.as_ref()
    }

    /// Answer `input`, converting any internal failure into an apology.
    pub fn process_input(&self, input: &str, history: &[HistoryTurn]) -> String {
        match self.try_process_input(input, history) {
            Ok(response) => response,
            Err(e) => {
                warn!("[offline] Failed to answer: {}", e);
                format!("I'm currently in offline mode and encountered an error: {}", e)
            }
        }
    }

    pub fn try_process_input(&self, input: &str, history: &[HistoryTurn]) -> EngineResult<String> {
        if let Some(store) = &self.knowledge {
            if let Some(cached) =
                store.find_similar(input, self.similarity_threshold, self.capabilities.vectorizer())?
            {
                info!("[offline] Knowledge cache hit");
                return Ok(cached);
            }
        }

        let intent = self.classify_intent(input)?;
        let sentiment = self.analyze_sentiment(input)?;
        let transcript = render_transcript(history);
        debug!("[offline] intent={} sentiment={}", intent, sentiment);

        let response = match (&self.capabilities.question_answerer, &self.capabilities.text_generator) {
            (Some(qa), _) if intent == "question" => {
                qa.answer(input, tail_chars(&transcript, self.qa_context_chars))?
            }
            (_, Some(generator)) => {
                let prompt = build_prompt(&transcript, input, &intent, &sentiment);
                let generated = generator.generate(&prompt)?;
                after_last(&generated, "Assistant:").trim().to_string()
            }
            _ => fallback_response(&intent, input),
        };

        if !response.is_empty() {
            if let Some(store) = &self.knowledge {
                store.add_entry(input, &response, &intent)?;
            }
        }
        Ok(response)
    }

    fn classify_intent(&self, text: &str) -> EngineResult<String> {
        match &self.capabilities.intent_classifier {
            Some(classifier) => classifier.classify(text),
            None => Ok(rule_intent(text).to_string()),
        }
    }

    fn analyze_sentiment(&self, text: &str) -> EngineResult<String> {
        match &self.capabilities.sentiment_analyzer {
            Some(analyzer) => analyzer.analyze(text),
            None => Ok(rule_sentiment(text).to_string()),
        }
    }
}

/// Keyword intent: urgent, then question, then greeting, else statement.
/// Substring matching, so "hi" also fires inside "this".
pub fn rule_intent(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    if contains_any(&lower, URGENT_WORDS) {
        "urgent"
    } else if contains_any(&lower, QUESTION_WORDS) {
        "question"
    } else if contains_any(&lower, GREETING_WORDS) {
        "greeting"
    } else {
        "statement"
    }
}

/// Majority vote of distinct positive vs negative words; ties are neutral.
pub fn rule_sentiment(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    let words: HashSet<&str> = lower.split_whitespace().collect();
    let pos = words.iter().filter(|w| POSITIVE_WORDS.contains(*w)).count();
    let neg = words.iter().filter(|w| NEGATIVE_WORDS.contains(*w)).count();
    match pos.cmp(&neg) {
        std::cmp::Ordering::Greater => "positive",
        std::cmp::Ordering::Less => "negative",
        std::cmp::Ordering::Equal => "neutral",
    }
}

/// First few non-stopword tokens, or a default phrase.
pub fn extract_topic(text: &str) -> String {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split_whitespace()
        .filter(|w| !TOPIC_STOP_WORDS.contains(w))
        .take(TOPIC_WORD_LIMIT)
        .collect();
    if words.is_empty() {
        DEFAULT_TOPIC.to_string()
    } else {
        words.join(" ")
    }
}

pub fn templates_for(intent: &str) -> &'static [&'static str] {
    FALLBACK_TEMPLATES
        .iter()
        .find(|(label, _)| *label == intent)
        .or_else(|| FALLBACK_TEMPLATES.iter().find(|(label, _)| *label == "statement"))
        .map(|(_, templates)| *templates)
        .unwrap_or(&[])
}

fn fallback_response(intent: &str, input: &str) -> String {
    let topic = extract_topic(input);
    templates_for(intent)
        .choose(&mut rand::thread_rng())
        .map(|t| t.replace("{}", &topic))
        .unwrap_or_default()
}

/// One `TYPE: content` line per turn.
pub fn render_transcript(history: &[HistoryTurn]) -> String {
    history
        .iter()
        .map(|turn| {
            let label = match turn.kind {
                TurnKind::User => "USER",
                TurnKind::Assistant => "ASSISTANT",
            };
            format!("{}: {}", label, turn.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn tail_chars(text: &str, n: usize) -> &str {
    let count = text.chars().count();
    if count <= n {
        return text;
    }
    let start = text.char_indices().nth(count - n).map(|(i, _)| i).unwrap_or(0);
    &text[start..]
}

fn build_prompt(transcript: &str, input: &str, intent: &str, sentiment: &str) -> String {
    format!(
        "Chat History: {}\nUser Intent: {}\nUser Sentiment: {}\nCurrent Time: {}\nUser: {}\nAssistant:",
        transcript,
        intent,
        sentiment,
        chrono::Local::now().format("%Y-%m-%d %H:%M"),
        input
    )
}
