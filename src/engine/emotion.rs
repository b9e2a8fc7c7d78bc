// Xyna Engine — Emotion Scoring
// Lexicon-based scoring with one-shot intensity modifiers.

use crate::atoms::constants::{
    ANGER_WORDS, FEAR_WORDS, INTENSITY_MODIFIERS, JOY_WORDS, NEUTRAL_WORDS, SADNESS_WORDS,
    SURPRISE_WORDS,
};
use crate::atoms::types::{Emotion, EmotionProfile};
use std::collections::BTreeMap;

fn lexicon(emotion: Emotion) -> &'static [&'static str] {
    match emotion {
        Emotion::Joy => JOY_WORDS,
        Emotion::Sadness => SADNESS_WORDS,
        Emotion::Anger => ANGER_WORDS,
        Emotion::Fear => FEAR_WORDS,
        Emotion::Surprise => SURPRISE_WORDS,
        Emotion::Neutral => NEUTRAL_WORDS,
    }
}

fn modifier(word: &str) -> Option<f64> {
    INTENSITY_MODIFIERS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, m)| *m)
}

/// Score every emotion over the whitespace tokens of `text`.
///
/// A modifier sets the multiplier for the next word only; any non-modifier
/// word consumes it, whether or not that word is an emotion keyword. The
/// dominant emotion is the first maximum in [`Emotion::ALL`] order.
pub fn analyze_emotion(text: &str) -> EmotionProfile {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();

    let mut scores: BTreeMap<Emotion, f64> = Emotion::ALL.iter().map(|e| (*e, 0.0)).collect();
    let mut multiplier = 1.0;

    for word in &words {
        if let Some(m) = modifier(word) {
            multiplier = m;
            continue;
        }
        for emotion in Emotion::ALL {
            if lexicon(emotion).contains(word) {
                *scores.entry(emotion).or_insert(0.0) += multiplier;
            }
        }
        multiplier = 1.0;
    }

    let mut dominant = Emotion::Joy;
    let mut best = f64::MIN;
    for emotion in Emotion::ALL {
        let score = scores.get(&emotion).copied().unwrap_or(0.0);
        if score > best {
            best = score;
            dominant = emotion;
        }
    }

    let total: f64 = scores.values().sum();
    let intensity = if words.is_empty() { 0.0 } else { total / words.len() as f64 };
    let confidence = best / if total > 0.0 { total } else { 1.0 };

    EmotionProfile {
        dominant_emotion: dominant,
        intensity,
        emotion_scores: scores,
        confidence,
        word_count: words.len(),
        emotional_words: total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn modifiers_scale_next_keyword() {
        let p = analyze_emotion("I am very happy and extremely excited");
        assert_eq!(p.dominant_emotion, Emotion::Joy);
        assert!(approx(p.emotion_scores[&Emotion::Joy], 5.0));
        assert!(approx(p.intensity, 5.0 / 7.0));
        assert!(approx(p.confidence, 1.0));
        assert_eq!(p.word_count, 7);
    }

    #[test]
    fn modifier_consumed_by_non_keyword() {
        let p = analyze_emotion("very much sad");
        assert!(approx(p.emotion_scores[&Emotion::Sadness], 1.0));
    }

    #[test]
    fn consecutive_modifiers_last_wins() {
        let p = analyze_emotion("slightly extremely angry");
        assert!(approx(p.emotion_scores[&Emotion::Anger], 3.0));
    }

    #[test]
    fn tie_breaks_in_fixed_order() {
        let p = analyze_emotion("scared but happy");
        assert_eq!(p.dominant_emotion, Emotion::Joy);
        assert!(approx(p.confidence, 0.5));
    }

    #[test]
    fn empty_text_defaults() {
        let p = analyze_emotion("");
        assert_eq!(p.dominant_emotion, Emotion::Joy);
        assert_eq!(p.intensity, 0.0);
        assert_eq!(p.confidence, 0.0);
        assert_eq!(p.emotion_scores.len(), Emotion::ALL.len());
    }

    #[test]
    fn punctuation_is_not_stripped() {
        let p = analyze_emotion("happy!");
        assert_eq!(p.emotional_words, 0.0);
    }
}
