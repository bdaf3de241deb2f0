use thiserror::Error;

/// Domain failures of the history engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("analysis '{0}' not found")]
    NotFound(String),

    #[error("pattern detection needs at least 2 analyses, history has {found}")]
    InsufficientHistory { found: usize },

    #[error("credibility score {0} is outside 0..=100")]
    InvalidScore(i64),
}
