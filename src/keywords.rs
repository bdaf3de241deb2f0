use crate::language::Language;
use crate::lexicon;
use crate::tokenizer::Tokenizer;
use std::collections::HashMap;

/// Maximum number of keywords reported for a text
pub const MAX_KEYWORDS: usize = 5;

/// Tokens shorter than this many characters never become keywords
const MIN_KEYWORD_CHARS: usize = 3;

/// Frequency table that remembers first-occurrence order
#[derive(Debug, Default)]
struct FrequencyTable {
    positions: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl FrequencyTable {
    fn add(&mut self, key: String) {
        match self.positions.get(&key) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    /// Entries by descending count; ties keep first-occurrence order
    fn ranked(mut self) -> Vec<(String, usize)> {
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        self.entries
    }
}

fn is_candidate(token: &str, language: Language) -> bool {
    token.chars().count() >= MIN_KEYWORD_CHARS && !lexicon::is_stopword(language, token)
}

/// Rank unigrams and adjacent-pair bigrams in one pool
pub fn rank_terms(tokens: &[String], language: Language) -> Vec<(String, usize)> {
    let mut table = FrequencyTable::default();
    let mut previous: Option<&str> = None;

    for token in tokens {
        if !is_candidate(token, language) {
            previous = None;
            continue;
        }

        table.add(token.clone());
        if let Some(prev) = previous {
            table.add(format!("{} {}", prev, token));
        }
        previous = Some(token.as_str());
    }

    table.ranked()
}

/// Top keywords from already-normalized tokens
pub fn top_keywords(tokens: &[String], language: Language) -> Vec<String> {
    rank_terms(tokens, language)
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(term, _)| term)
        .collect()
}

/// Up to five keywords of `text`, most frequent first
pub fn extract_keywords(text: &str, language: Language) -> Vec<String> {
    let tokens = Tokenizer::new(language).analyze(text);
    top_keywords(&tokens, language)
}
