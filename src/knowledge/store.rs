//! Knowledge file persisted as a single text blob
//!
//! The file holds the text format verbatim, so it stays hand-editable.
//! Identities are regenerated on every load.

use super::parser::parse;
use super::serializer::serialize;
use super::types::KnowledgeBase;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// A knowledge base stored at one filesystem path
#[derive(Debug, Clone)]
pub struct KnowledgeFile {
    path: PathBuf,
}

impl KnowledgeFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location (~/.kbtext/knowledge.txt)
    pub fn default_path() -> PathBuf {
        dirs_next::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".kbtext")
            .join("knowledge.txt")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load and parse the file; a missing file is an empty knowledge base
    pub fn load(&self) -> Result<KnowledgeBase> {
        if !self.exists() {
            tracing::debug!("No knowledge file at {}", self.path.display());
            return Ok(KnowledgeBase::default());
        }

        let text = std::fs::read_to_string(&self.path)?;
        Ok(parse(&text)?)
    }

    /// Serialize and write, creating parent directories as needed
    pub fn save(&self, kb: &KnowledgeBase) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(&self.path, serialize(kb))?;
        tracing::info!(
            entities = kb.entity_count(),
            "Saved knowledge base to {}",
            self.path.display()
        );
        Ok(())
    }
}
