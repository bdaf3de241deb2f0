use crate::analysis::Analysis;
use crate::error::EngineError;
use crate::language::Language;
use crate::patterns::{detect_patterns, PatternReport};
use crate::similarity::similarity_matrix;
use crate::storage::Storage;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Input for recording a new analysis. Score and warnings come from the scoring service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnalysis {
    pub text: String,
    #[serde(default)]
    pub language: Option<Language>,
    pub credibility_score: i64,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub fact_check_explanation: String,
}

/// Similarity of stored analyses, rows in the requested order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub ids: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
}

/// Analysis history backed by persistent storage
pub struct HistoryEngine {
    storage: Storage,
    default_language: Language,
}

impl HistoryEngine {
    /// Open a history engine on a storage path
    pub fn new(storage_path: &str, default_language: Language) -> Result<Self> {
        let storage = Storage::open(storage_path)?;
        tracing::info!(
            path = storage_path,
            analyses = storage.count_analyses()?,
            "opened analysis history"
        );
        Ok(Self {
            storage,
            default_language,
        })
    }

    /// Create an in-memory history engine (for testing)
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            storage: Storage::in_memory()?,
            default_language: Language::default(),
        })
    }

    pub fn default_language(&self) -> Language {
        self.default_language
    }

    /// Compute statistics for the text and store the new analysis
    pub fn record(&self, input: NewAnalysis) -> Result<Analysis> {
        let language = input.language.unwrap_or(self.default_language);

        let analysis = Analysis::new(input.text, language, input.credibility_score)?
            .with_warnings(input.warnings)
            .with_explanation(input.fact_check_explanation);

        self.storage.save_analysis(&analysis)?;
        tracing::info!(
            id = %analysis.id,
            language = %language,
            score = analysis.credibility_score,
            words = analysis.statistics.word_count,
            "recorded analysis"
        );

        Ok(analysis)
    }

    /// Store an analysis built elsewhere, keeping its id and timestamp
    pub fn import(&self, analysis: &Analysis) -> Result<()> {
        self.storage.save_analysis(analysis)?;
        tracing::debug!(id = %analysis.id, "imported analysis");
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Option<Analysis>> {
        self.storage.get_analysis(id)
    }

    fn require(&self, id: &str) -> Result<Analysis> {
        self.get(id)?
            .ok_or_else(|| EngineError::NotFound(id.to_string()).into())
    }

    /// All analyses by ascending timestamp, id breaking ties
    pub fn history(&self) -> Result<Vec<Analysis>> {
        let mut analyses = self.storage.get_all_analyses()?;
        analyses.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(analyses)
    }

    /// Remove an analysis from history
    pub fn delete(&self, id: &str) -> Result<()> {
        if !self.storage.delete_analysis(id)? {
            return Err(EngineError::NotFound(id.to_string()).into());
        }
        tracing::info!(id, "deleted analysis");
        Ok(())
    }

    /// Pairwise similarity of the stored texts of `ids`
    pub fn compare(&self, ids: &[String]) -> Result<Comparison> {
        let texts = ids
            .iter()
            .map(|id| self.require(id).map(|a| a.source_text))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(count = texts.len(), "comparing analyses");
        Ok(Comparison {
            ids: ids.to_vec(),
            matrix: similarity_matrix(&texts),
        })
    }

    /// Trends across the whole history
    pub fn patterns(&self) -> Result<PatternReport> {
        let history = self.history()?;
        let found = history.len();
        detect_patterns(&history).ok_or_else(|| EngineError::InsufficientHistory { found }.into())
    }

    pub fn count(&self) -> Result<usize> {
        self.storage.count_analyses()
    }

    /// Flush all changes to disk
    pub fn flush(&self) -> Result<()> {
        self.storage.flush()
    }

    /// Clear all data
    pub fn clear(&self) -> Result<()> {
        self.storage.clear()?;
        tracing::info!("cleared analysis history");
        Ok(())
    }
}
