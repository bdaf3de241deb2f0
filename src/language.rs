use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages with their own stopword and tone tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    #[default]
    English,
    Hindi,
    Gujarati,
    Marathi,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::Hindi,
        Language::Gujarati,
        Language::Marathi,
    ];

    /// Resolve a language code. Unknown codes fall back to English.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "hi" => Language::Hindi,
            "gu" => Language::Gujarati,
            "mr" => Language::Marathi,
            _ => Language::English,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Gujarati => "gu",
            Language::Marathi => "mr",
        }
    }

    /// Hindi and Marathi are written in Devanagari and end sentences with danda marks
    pub fn uses_devanagari(self) -> bool {
        matches!(self, Language::Hindi | Language::Marathi)
    }
}

impl From<String> for Language {
    fn from(code: String) -> Self {
        Language::from_code(&code)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.code().to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
