mod chunk;
mod document;
mod embedding;
mod error;
mod extract;
mod format;
mod matcher;
mod rank;

pub use chunk::{Chunker, ChunkerConfig};
pub use document::{
    Chunk, CollectionConfig, DocumentRef, JobToBeDone, Page, Persona,
};
pub use embedding::{EmbeddingCapability, HashEmbedder, HashEmbedderConfig};
pub use error::{MinerError, Result};
pub use extract::extract_text_per_page;
pub use format::{format_section, section_title, Confidence, FormattedSection};
pub use matcher::{
    build_report, MatchOptions, Report, ReportMetadata, SemanticMatcher, SubsectionRecord,
};
pub use rank::{cosine_similarity, rank_chunks, Score, ScoredChunk};
