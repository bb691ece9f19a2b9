use serde::{Deserialize, Serialize};

/// One physical page of extracted text, as produced by the extraction
/// collaborator. Page numbers are 1-based and arrive in page order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page {
    pub page_number: u32,
    pub text: String,
}

/// The atomic unit of ranking: 1-6 paragraphs from a single page.
/// Immutable once built by the chunker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    pub document_filename: String,
    pub document_title: String,
    pub page_number: u32,
    pub chunk_text: String,
    pub chunk_id: String,
}

/// One document entry from a collection config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentRef {
    pub filename: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Persona {
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobToBeDone {
    pub task: String,
}

/// Per-collection configuration, consumed (never produced) by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub persona: Persona,
    pub job_to_be_done: JobToBeDone,
    pub documents: Vec<DocumentRef>,
}

impl CollectionConfig {
    /// Combined persona/task query string used for semantic search.
    pub fn query(&self) -> String {
        format!("{}: {}", self.persona.role, self.job_to_be_done.task)
    }
}
