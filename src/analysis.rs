use crate::error::EngineError;
use crate::language::Language;
use crate::statistics::{compute_statistics, ContentStatistics};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Highest credibility score the scoring service can return
pub const MAX_CREDIBILITY_SCORE: u8 = 100;

/// One scored evaluation of a text.
///
/// The credibility score, warnings and explanation come from the external
/// scoring service; statistics are computed locally from `source_text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub source_text: String,
    pub language: Language,
    pub credibility_score: u8,
    pub statistics: ContentStatistics,
    pub warnings: Vec<String>,
    pub fact_check_explanation: String,
}

impl Analysis {
    /// Build an analysis stamped now, with statistics computed from the text.
    ///
    /// Scores outside `0..=100` are rejected with `EngineError::InvalidScore`.
    pub fn new(
        source_text: String,
        language: Language,
        credibility_score: i64,
    ) -> Result<Self, EngineError> {
        let credibility_score = u8::try_from(credibility_score)
            .ok()
            .filter(|s| *s <= MAX_CREDIBILITY_SCORE)
            .ok_or(EngineError::InvalidScore(credibility_score))?;

        let statistics = compute_statistics(&source_text, language);
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            source_text,
            language,
            credibility_score,
            statistics,
            warnings: Vec::new(),
            fact_check_explanation: String::new(),
        })
    }

    pub fn with_id(mut self, id: String) -> Self {
        self.id = id;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn with_explanation(mut self, explanation: String) -> Self {
        self.fact_check_explanation = explanation;
        self
    }
}
