//! Output-directory DTOs

use serde::{Deserialize, Serialize};

use crate::domain::document::DocumentDescriptor;

/// Listing of the files currently present in a job's output directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryListing {
    pub files: Vec<DocumentDescriptor>,
}

/// Content of one output file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileContentResponse {
    pub filename: String,
    pub content: String,
}
