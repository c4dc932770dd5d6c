/// JSON persistence for scraped chapter sets
use super::ChapterSet;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A chapter set file on disk. Every save rewrites the whole file.
#[derive(Debug, Clone)]
pub struct ChapterStore {
    path: PathBuf,
}

impl ChapterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the chapter set. A missing file is an error.
    pub async fn load(&self) -> Result<ChapterSet> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let set: ChapterSet = serde_json::from_str(&content)?;
        debug!("Loaded {} chapter records from {}", set.len(), self.path.display());
        Ok(set)
    }

    /// Replace the file with `set`. Written to a sibling temp file first and
    /// renamed over the target, so a crash mid-write leaves the previous
    /// snapshot intact.
    pub async fn save(&self, set: &ChapterSet) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json_content = serde_json::to_string_pretty(set)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json_content).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        debug!("💾 Saved {} chapter records to {}", set.len(), self.path.display());
        Ok(())
    }
}
