use crate::keywords;
use crate::language::Language;
use crate::tokenizer::Tokenizer;
use crate::tone::{self, EmotionalTone};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Words read per minute when estimating reading time
pub const WORDS_PER_MINUTE: usize = 200;

/// Words longer than this many characters count as complex
pub const COMPLEX_WORD_CHARS: usize = 6;

/// Descriptive metrics derived from a text and its language
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStatistics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub average_sentence_length: usize,
    pub complex_words: usize,
    pub reading_time_minutes: usize,
    pub top_keywords: Vec<String>,
    pub emotional_tone: EmotionalTone,
    pub unique_words: usize,
    pub average_word_length: f64,
}

/// Compute statistics for `text`. Empty input yields the all-zero record.
pub fn compute_statistics(text: &str, language: Language) -> ContentStatistics {
    let tokenizer = Tokenizer::new(language);
    let segments = tokenizer.segment(text);
    let tokens = tokenizer.analyze(text);

    let words = &segments.words;
    let word_count = words.len();
    let sentence_count = segments.sentences.len();

    let average_sentence_length = if sentence_count == 0 {
        0
    } else {
        (word_count as f64 / sentence_count as f64).round() as usize
    };

    let lengths: Vec<usize> = words.iter().map(|w| w.chars().count()).collect();
    let complex_words = lengths.iter().filter(|&&len| len > COMPLEX_WORD_CHARS).count();
    let average_word_length = lengths.iter().sum::<usize>() as f64 / word_count.max(1) as f64;

    let unique_words = words
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<HashSet<_>>()
        .len();

    ContentStatistics {
        word_count,
        sentence_count,
        paragraph_count: segments.paragraphs.len(),
        average_sentence_length,
        complex_words,
        reading_time_minutes: word_count.div_ceil(WORDS_PER_MINUTE),
        top_keywords: keywords::top_keywords(&tokens, language),
        emotional_tone: tone::emotional_tone(&tokens, language),
        unique_words,
        average_word_length,
    }
}
