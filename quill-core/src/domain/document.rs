//! Output document domain types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Prefix marking a content body that is an error placeholder rather than
/// real document text. The backend writes a file's directory entry and its
/// content in two non-atomic steps, so a fetch can fail permanently even
/// for a listed file; the placeholder keeps the document visible.
pub const ERROR_SENTINEL_PREFIX: &str = "Error loading content:";

/// Metadata for one output file, without its content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentDescriptor {
    /// Unique key within a job
    pub filename: String,
    pub size: u64,
    pub modified_at: chrono::DateTime<chrono::Utc>,
}

/// The retrieved body of one output file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentContent {
    pub filename: String,
    /// Real content, or an error sentinel when retrieval permanently failed
    pub body: String,
}

impl DocumentContent {
    /// Creates a content record holding real document text
    pub fn new(filename: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            body: body.into(),
        }
    }

    /// Creates an error-sentinel record in place of unretrievable content
    pub fn error(filename: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self {
            filename: filename.into(),
            body: format!("{ERROR_SENTINEL_PREFIX} {reason}"),
        }
    }

    /// Whether this body is an error sentinel rather than real content
    pub fn is_error(&self) -> bool {
        self.body.starts_with(ERROR_SENTINEL_PREFIX)
    }
}

/// The atomic pair produced by one directory reconciliation round
///
/// Invariant: every descriptor has a matching entry in `contents` (possibly
/// a sentinel) and vice versa. A snapshot always replaces the previously
/// published one whole; it is never merged or partially updated, which is
/// what prevents a filename ever being visible without its content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectorySnapshot {
    pub documents: Vec<DocumentDescriptor>,
    pub contents: HashMap<String, DocumentContent>,
}

impl DirectorySnapshot {
    /// Creates a snapshot from a matched descriptor list and content map
    pub fn new(
        documents: Vec<DocumentDescriptor>,
        contents: HashMap<String, DocumentContent>,
    ) -> Self {
        let snapshot = Self {
            documents,
            contents,
        };
        debug_assert!(snapshot.is_consistent());
        snapshot
    }

    /// Checks the pairing invariant: identical key sets on both sides
    pub fn is_consistent(&self) -> bool {
        self.documents.len() == self.contents.len()
            && self
                .documents
                .iter()
                .all(|doc| self.contents.contains_key(&doc.filename))
    }

    /// Looks up the content for a listed filename
    pub fn content(&self, filename: &str) -> Option<&DocumentContent> {
        self.contents.get(filename)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
