use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static::lazy_static! {
    static ref DOI_PATTERN: Regex =
        Regex::new(r#"(?i)\b(?:doi:\s*)?10\.\d{4,9}/[^\s"<>“”]+"#).unwrap();
    static ref QUOTE_PATTERN: Regex = Regex::new(r#""([^"]+)"|“([^”]+)”"#).unwrap();
    static ref URL_PATTERN: Regex = Regex::new(r#"https?://[^\s<>"“”]+"#).unwrap();
}

/// Sentence punctuation that trails a DOI or URL rather than belonging to it
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '\''];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationSet {
    pub academic: Vec<String>,
    pub quotes: Vec<String>,
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citations {
    pub has_citations: bool,
    pub citation_count: usize,
    pub citations: CitationSet,
}

fn trimmed_matches(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(TRAILING_PUNCTUATION))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn quoted_spans(text: &str) -> Vec<String> {
    QUOTE_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Collect DOIs, quoted spans and links from `text`, each in order of appearance
pub fn extract_citations(text: &str) -> Citations {
    let citations = CitationSet {
        academic: trimmed_matches(&DOI_PATTERN, text),
        quotes: quoted_spans(text),
        urls: trimmed_matches(&URL_PATTERN, text),
    };
    let citation_count = citations.academic.len() + citations.quotes.len() + citations.urls.len();

    Citations {
        has_citations: citation_count > 0,
        citation_count,
        citations,
    }
}
