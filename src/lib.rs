// Re-export main components
pub mod analysis;
pub mod api;
pub mod citations;
pub mod config;
pub mod engine;
pub mod error;
pub mod keywords;
pub mod language;
pub mod lexicon;
pub mod patterns;
pub mod similarity;
pub mod statistics;
pub mod storage;
pub mod threads;
pub mod timeline;
pub mod tokenizer;
pub mod tone;

// Re-export commonly used types
pub use analysis::Analysis;
pub use citations::{extract_citations, Citations};
pub use config::Settings;
pub use engine::{Comparison, HistoryEngine, NewAnalysis};
pub use error::EngineError;
pub use keywords::extract_keywords;
pub use language::Language;
pub use patterns::{detect_patterns, PatternReport};
pub use similarity::similarity_matrix;
pub use statistics::{compute_statistics, ContentStatistics};
pub use storage::Storage;
pub use threads::{build_threads, Comment, CommentNode, CommentThreads, MAX_THREAD_DEPTH};
pub use timeline::{extract_timeline, Timeline};
pub use tokenizer::{tokenize, Tokenizer};
pub use tone::{count_emotional_words, EmotionalTone, ToneCategory};

// Re-export error types
pub use anyhow::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
