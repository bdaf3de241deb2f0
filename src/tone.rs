use crate::language::Language;
use crate::lexicon;
use crate::tokenizer::Tokenizer;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneCategory {
    Positive,
    Negative,
    Urgent,
}

impl ToneCategory {
    pub const ALL: [ToneCategory; 3] = [
        ToneCategory::Positive,
        ToneCategory::Negative,
        ToneCategory::Urgent,
    ];
}

/// Lexicon hit counts per tone category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionalTone {
    pub positive: usize,
    pub negative: usize,
    pub urgent: usize,
}

fn count_tokens(tokens: &[String], language: Language, category: ToneCategory) -> usize {
    let lexicon = lexicon::tone_words(language, category);
    tokens.iter().filter(|t| lexicon.contains(t.as_str())).count()
}

/// Count normalized tokens that exactly match the `(language, category)` lexicon
pub fn count_emotional_words(text: &str, language: Language, category: ToneCategory) -> usize {
    let tokens = Tokenizer::new(language).analyze(text);
    count_tokens(&tokens, language, category)
}

/// All three tone counts over already-normalized tokens
pub fn emotional_tone(tokens: &[String], language: Language) -> EmotionalTone {
    EmotionalTone {
        positive: count_tokens(tokens, language, ToneCategory::Positive),
        negative: count_tokens(tokens, language, ToneCategory::Negative),
        urgent: count_tokens(tokens, language, ToneCategory::Urgent),
    }
}
