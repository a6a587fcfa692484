//! # Document Sink
//!
//! Filesystem-backed invoice output. Each saved invoice becomes one text
//! file named after its bill id under the platform data directory (or a
//! caller-chosen directory), pages separated by form feeds so a line
//! printer can split them.

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

use anvil_core::Document;

use crate::error::{WorkflowError, WorkflowResult};
use crate::ports::DocumentSink;

// =============================================================================
// Filesystem Sink
// =============================================================================

#[derive(Debug, Clone)]
pub struct FsDocumentSink {
    directory: PathBuf,
}

impl FsDocumentSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Sink rooted at the platform data directory.
    pub fn default_sink() -> WorkflowResult<Self> {
        let dirs = directories::ProjectDirs::from("com", "anvil", "pos").ok_or_else(|| {
            WorkflowError::DocumentSaveFailed("No data directory available".into())
        })?;
        Ok(Self::new(dirs.data_dir().join("invoices")))
    }

    pub fn directory(&self) -> &PathBuf {
        &self.directory
    }
}

#[async_trait]
impl DocumentSink for FsDocumentSink {
    async fn save(&self, document: &Document) -> WorkflowResult<PathBuf> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| WorkflowError::DocumentSaveFailed(e.to_string()))?;

        let path = self
            .directory
            .join(format!("{}.txt", document.file_stem()));
        tokio::fs::write(&path, document.text())
            .await
            .map_err(|e| WorkflowError::DocumentSaveFailed(e.to_string()))?;

        info!(?path, pages = document.page_count(), "Invoice saved");
        Ok(path)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
