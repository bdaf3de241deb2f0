use crate::analysis::Analysis;
use anyhow::{Context, Result};
use sled::Db;
use std::path::Path;

const ANALYSES_TREE: &str = "analyses";

pub struct Storage {
    db: Db,
}

impl Storage {
    /// Open or create a storage database
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path).context("Failed to open database")?;
        Ok(Self { db })
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> Result<Self> {
        let config = sled::Config::new().temporary(true);
        let db = config.open().context("Failed to create in-memory database")?;
        Ok(Self { db })
    }

    /// Save an analysis under its id
    pub fn save_analysis(&self, analysis: &Analysis) -> Result<()> {
        let tree = self.db.open_tree(ANALYSES_TREE)?;
        let serialized = bincode::serialize(analysis)?;
        tree.insert(analysis.id.as_bytes(), serialized)?;
        Ok(())
    }

    /// Get an analysis by id
    pub fn get_analysis(&self, id: &str) -> Result<Option<Analysis>> {
        let tree = self.db.open_tree(ANALYSES_TREE)?;
        match tree.get(id.as_bytes())? {
            Some(data) => {
                let analysis = bincode::deserialize(&data)
                    .with_context(|| format!("Corrupt analysis record '{}'", id))?;
                Ok(Some(analysis))
            }
            None => Ok(None),
        }
    }

    /// Delete an analysis, reporting whether it existed
    pub fn delete_analysis(&self, id: &str) -> Result<bool> {
        let tree = self.db.open_tree(ANALYSES_TREE)?;
        Ok(tree.remove(id.as_bytes())?.is_some())
    }

    /// All stored analyses, in key order
    pub fn get_all_analyses(&self) -> Result<Vec<Analysis>> {
        let tree = self.db.open_tree(ANALYSES_TREE)?;
        let mut analyses = Vec::new();

        for item in tree.iter() {
            let (_, value) = item?;
            let analysis: Analysis = bincode::deserialize(&value)?;
            analyses.push(analysis);
        }

        Ok(analyses)
    }

    pub fn count_analyses(&self) -> Result<usize> {
        let tree = self.db.open_tree(ANALYSES_TREE)?;
        Ok(tree.len())
    }

    /// Flush all changes to disk
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    /// Clear all data
    pub fn clear(&self) -> Result<()> {
        self.db.drop_tree(ANALYSES_TREE)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    #[test]
    fn test_storage_roundtrip() -> Result<()> {
        let storage = Storage::in_memory()?;
        let analysis = Analysis::new("Stored claim text".to_string(), Language::Hindi, 64)?
            .with_warnings(vec!["single source".to_string()])
            .with_explanation("Partially supported".to_string());

        storage.save_analysis(&analysis)?;
        let loaded = storage.get_analysis(&analysis.id)?;

        assert_eq!(loaded, Some(analysis));
        assert_eq!(storage.count_analyses()?, 1);

        Ok(())
    }

    #[test]
    fn test_delete_and_clear() -> Result<()> {
        let storage = Storage::in_memory()?;
        let a = Analysis::new("first".to_string(), Language::English, 10)?;
        let b = Analysis::new("second".to_string(), Language::English, 20)?;
        storage.save_analysis(&a)?;
        storage.save_analysis(&b)?;

        assert!(storage.delete_analysis(&a.id)?);
        assert!(!storage.delete_analysis(&a.id)?);
        assert_eq!(storage.get_all_analyses()?, vec![b]);

        storage.clear()?;
        assert_eq!(storage.count_analyses()?, 0);

        Ok(())
    }
}
