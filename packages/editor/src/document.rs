//! # Document Handle
//!
//! Core document abstraction for API description editing.
//!
//! A Document represents a single description file and its editing state.
//! Documents can be:
//! - **Memory-backed**: Temporary, for testing or in-memory operations
//! - **File-backed**: Single-user editing with disk persistence
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Parse → Edit → Save
//!   ↓      ↓       ↓      ↓
//! File   Tree  Commands  File
//! ```

use crate::{Command, EditorError, Outcome};
use oasedit_model::{parse, Dialect, OasDocument};
use std::path::PathBuf;

/// Editable API description document
#[derive(Debug)]
pub struct Document {
    /// Path to source file (if any)
    pub path: PathBuf,

    /// Current version number (increments on each applied change)
    pub version: u64,

    /// Backing storage strategy
    storage: DocumentStorage,
}

/// Storage backend for document
#[derive(Debug)]
pub enum DocumentStorage {
    /// In-memory only (for testing, temp docs)
    Memory { tree: OasDocument },

    /// File-backed (single-user editing)
    File { tree: OasDocument, dirty: bool },
}

impl Document {
    /// Create document from source text (memory-backed)
    pub fn from_source(path: PathBuf, source: &str) -> Result<Self, EditorError> {
        let tree = parse(source)?;

        Ok(Self {
            path,
            version: 0,
            storage: DocumentStorage::Memory { tree },
        })
    }

    /// Load document from file (file-backed)
    pub fn load(path: PathBuf) -> Result<Self, EditorError> {
        let source = std::fs::read_to_string(&path)?;
        let tree = parse(&source)?;

        Ok(Self {
            path,
            version: 0,
            storage: DocumentStorage::File { tree, dirty: false },
        })
    }

    pub fn dialect(&self) -> Dialect {
        self.tree().dialect()
    }

    /// Get the current tree
    pub fn tree(&self) -> &OasDocument {
        match &self.storage {
            DocumentStorage::Memory { tree } => tree,
            DocumentStorage::File { tree, .. } => tree,
        }
    }

    /// Get a mutable tree reference (marks file-backed documents dirty)
    pub fn tree_mut(&mut self) -> &mut OasDocument {
        match &mut self.storage {
            DocumentStorage::Memory { tree } => tree,
            DocumentStorage::File { tree, dirty } => {
                *dirty = true;
                tree
            }
        }
    }

    /// Tree access for commands: dirty and version are left to `mark_changed`
    pub(crate) fn tree_for_command(&mut self) -> &mut OasDocument {
        match &mut self.storage {
            DocumentStorage::Memory { tree } => tree,
            DocumentStorage::File { tree, .. } => tree,
        }
    }

    /// Record that a command changed the tree
    pub(crate) fn mark_changed(&mut self) {
        self.version += 1;
        if let DocumentStorage::File { dirty, .. } = &mut self.storage {
            *dirty = true;
        }
    }

    /// Execute a command against this document
    ///
    /// Version and dirty flag only move when the command's targets resolved.
    pub fn execute(&mut self, command: &mut dyn Command) -> Outcome {
        let outcome = command.execute(self.tree_for_command());
        if outcome.is_resolved() {
            self.mark_changed();
        }
        outcome
    }

    /// Revert a previously executed command
    pub fn undo(&mut self, command: &mut dyn Command) -> Outcome {
        let outcome = command.undo(self.tree_for_command());
        if outcome.is_resolved() {
            self.mark_changed();
        }
        outcome
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        match &self.storage {
            DocumentStorage::File { dirty, .. } => *dirty,
            _ => false,
        }
    }

    /// Save document to disk (if file-backed)
    pub fn save(&mut self) -> Result<(), EditorError> {
        match &mut self.storage {
            DocumentStorage::File { tree, dirty } => {
                std::fs::write(&self.path, tree.to_json_pretty()?)?;
                *dirty = false;
                Ok(())
            }
            _ => Err(EditorError::NotFileBacked),
        }
    }

    /// Serialize the current tree
    pub fn source(&self) -> Result<String, EditorError> {
        Ok(self.tree().to_json()?)
    }
}
