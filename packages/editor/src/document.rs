//! # Document Handle
//!
//! A Document is one layout document and its editing state. Documents can be:
//! - **Memory-backed**: Temporary, for testing or in-memory operations
//! - **File-backed**: Single-user editing with disk persistence
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Parse/Migrate → Edit → Save
//!   ↓          ↓           ↓      ↓
//! File    DocumentTree  Mutations File
//! ```
//!
//! Legacy section documents are migrated on load; saving always writes the
//! row/cell shape.

use crate::{EditorError, Mutation, MutationResult};
use quire_document::{DocumentTree, IdGenerator};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Editable layout document
#[derive(Debug)]
pub struct Document {
    /// Path to source file (if any)
    pub path: PathBuf,

    /// Current version number (increments on each applied mutation)
    pub version: u64,

    /// Backing storage strategy
    storage: DocumentStorage,

    ids: IdGenerator,
}

/// Storage backend for document
#[derive(Debug)]
pub enum DocumentStorage {
    /// In-memory only (for testing, temp docs)
    Memory { tree: DocumentTree },

    /// File-backed (single-user editing)
    File { tree: DocumentTree, dirty: bool },
}

impl Document {
    /// Create document from JSON text (memory-backed)
    pub fn from_source(path: PathBuf, source: &str) -> Result<Self, EditorError> {
        let mut ids = IdGenerator::new(&path.to_string_lossy());
        let tree = DocumentTree::from_json(source, &mut ids)?;

        Ok(Self {
            path,
            version: 0,
            storage: DocumentStorage::Memory { tree },
            ids,
        })
    }

    /// Wrap an existing tree (memory-backed)
    pub fn from_tree(path: PathBuf, tree: DocumentTree) -> Self {
        let ids = IdGenerator::new(&path.to_string_lossy());
        Self {
            path,
            version: 0,
            storage: DocumentStorage::Memory { tree },
            ids,
        }
    }

    /// Load document from file (file-backed)
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EditorError> {
        let path = path.as_ref().to_path_buf();
        let source = std::fs::read_to_string(&path)?;
        let mut ids = IdGenerator::new(&path.to_string_lossy());
        let tree = DocumentTree::from_json(&source, &mut ids)?;

        info!(path = %path.display(), rows = tree.rows.len(), "Loaded document");

        Ok(Self {
            path,
            version: 0,
            storage: DocumentStorage::File { tree, dirty: false },
            ids,
        })
    }

    pub fn tree(&self) -> &DocumentTree {
        match &self.storage {
            DocumentStorage::Memory { tree } | DocumentStorage::File { tree, .. } => tree,
        }
    }

    /// Apply a mutation.
    ///
    /// The version only moves when the mutation succeeds.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let created_id = match &mut self.storage {
            DocumentStorage::Memory { tree } => mutation.apply(tree, &mut self.ids)?,
            DocumentStorage::File { tree, dirty } => {
                let created = mutation.apply(tree, &mut self.ids)?;
                *dirty = true;
                created
            }
        };

        self.version += 1;
        debug!(version = self.version, "Applied mutation");

        Ok(MutationResult {
            version: self.version,
            created_id,
        })
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        match &self.storage {
            DocumentStorage::File { dirty, .. } => *dirty,
            DocumentStorage::Memory { .. } => false,
        }
    }

    /// Save document to disk (if file-backed)
    pub fn save(&mut self) -> Result<(), EditorError> {
        match &mut self.storage {
            DocumentStorage::File { tree, dirty } => {
                std::fs::write(&self.path, tree.to_json_pretty()?)?;
                *dirty = false;
                info!(path = %self.path.display(), "Saved document");
                Ok(())
            }
            DocumentStorage::Memory { .. } => Err(EditorError::NotFileBacked),
        }
    }

    /// Serialized row/cell form of the current tree
    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(self.tree().to_json_pretty()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"{
        "rows": [
            { "id": "r1", "cells": [ { "id": "c1", "resources": [
                { "type": "block", "block": { "type": "text", "id": "t1", "content": "Hi" } }
            ] } ] }
        ]
    }"#;

    #[test]
    fn test_create_memory_document() {
        let doc = Document::from_source(PathBuf::from("test.json"), SOURCE).unwrap();

        assert_eq!(doc.version, 0);
        assert!(!doc.is_dirty());
        assert_eq!(doc.tree().rows.len(), 1);
    }

    #[test]
    fn test_version_increments_only_on_success() {
        let mut doc = Document::from_source(PathBuf::from("test.json"), SOURCE).unwrap();

        let result = doc
            .apply(Mutation::UpdateText {
                block_id: "t1".to_string(),
                content: "Hello".to_string(),
            })
            .unwrap();
        assert_eq!(result.version, 1);

        let failed = doc.apply(Mutation::RemoveBlock {
            block_id: "missing".to_string(),
        });
        assert!(failed.is_err());
        assert_eq!(doc.version, 1);
    }

    #[test]
    fn test_memory_document_cannot_save() {
        let mut doc = Document::from_source(PathBuf::from("test.json"), SOURCE).unwrap();
        assert!(matches!(doc.save(), Err(EditorError::NotFileBacked)));
    }
}
