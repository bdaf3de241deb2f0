use crate::language::Language;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static::lazy_static! {
    // Letters, combining marks, digits and apostrophes survive normalization.
    // Marks are kept so Indic vowel signs stay attached to their consonants.
    static ref NON_WORD_CHARS: Regex = Regex::new(r"[^\p{L}\p{M}\p{N}']").unwrap();
    static ref BLANK_LINES: Regex = Regex::new(r"\n[ \t\r\f\v]*\n(?:[ \t\r\f\v]*\n)*").unwrap();
}

/// Raw segmentation of a text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segments {
    pub words: Vec<String>,
    pub sentences: Vec<String>,
    pub paragraphs: Vec<String>,
}

pub struct Tokenizer {
    language: Language,
}

impl Tokenizer {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Whitespace-delimited words, punctuation left in place
    pub fn words(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn is_sentence_terminator(&self, c: char) -> bool {
        match c {
            '.' | '!' | '?' => true,
            '।' | '॥' => self.language.uses_devanagari(),
            _ => false,
        }
    }

    /// Sentences split on terminal punctuation, empty fragments dropped
    pub fn sentences(&self, text: &str) -> Vec<String> {
        text.split(|c: char| self.is_sentence_terminator(c))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Paragraphs separated by one or more blank lines
    pub fn paragraphs(&self, text: &str) -> Vec<String> {
        BLANK_LINES
            .split(text)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn segment(&self, text: &str) -> Segments {
        Segments {
            words: self.words(text),
            sentences: self.sentences(text),
            paragraphs: self.paragraphs(text),
        }
    }

    /// Strip everything but letters, marks, digits and apostrophes, then lowercase
    pub fn normalize(&self, word: &str) -> String {
        NON_WORD_CHARS.replace_all(word, "").to_lowercase()
    }

    /// Normalized tokens in text order; words that normalize to nothing are dropped
    pub fn analyze(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|w| self.normalize(w))
            .filter(|t| !t.is_empty())
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

/// Segment `text` into words, sentences and paragraphs
pub fn tokenize(text: &str, language: Language) -> Segments {
    Tokenizer::new(language).segment(text)
}
