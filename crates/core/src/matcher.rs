use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::document::{Chunk, CollectionConfig};
use crate::embedding::EmbeddingCapability;
use crate::error::Result;
use crate::format::{format_section, FormattedSection};
use crate::rank::{rank_chunks, ScoredChunk};

#[derive(Debug, Clone, Copy)]
pub struct MatchOptions {
    pub threshold: f32,
    pub max_chunks: Option<usize>,
    /// How many keywords to derive from the task when none are supplied.
    pub keyword_top_n: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.45,
            max_chunks: Some(5),
            keyword_top_n: 6,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsectionRecord {
    pub document: String,
    pub refined_text: String,
    pub page_number: u32,
}

/// Final output artifact for one collection. Both sequences follow the
/// ranker's output order (importance_rank ascending).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub extracted_sections: Vec<FormattedSection>,
    pub subsection_analysis: Vec<SubsectionRecord>,
}

/// Orchestrates query embedding, chunk embedding and ranking over a
/// long-lived embedding capability. The capability is expensive to
/// initialize; hold one matcher per process and reuse it across
/// collections. Nothing here mutates capability state after construction.
pub struct SemanticMatcher {
    capability: Arc<dyn EmbeddingCapability>,
}

impl SemanticMatcher {
    pub fn new(capability: Arc<dyn EmbeddingCapability>) -> Self {
        Self { capability }
    }

    /// Ranks `chunks` against the persona/task query. When `keywords` is
    /// `None` they are derived from the task description. Returns the
    /// ranked chunks together with the keyword list that was in effect,
    /// for post-hoc matched-keyword annotation.
    ///
    /// Capability failures abort the whole operation; an empty chunk list
    /// short-circuits to an empty result without touching the capability.
    pub fn match_chunks(
        &self,
        role: &str,
        task: &str,
        chunks: &[Chunk],
        keywords: Option<Vec<String>>,
        options: &MatchOptions,
    ) -> Result<(Vec<ScoredChunk>, Vec<String>)> {
        if chunks.is_empty() {
            return Ok((Vec::new(), keywords.unwrap_or_default()));
        }
        let keywords = match keywords {
            Some(list) => list,
            None => self
                .capability
                .extract_keywords(task, options.keyword_top_n)?,
        };
        let query = format!("{role}: {task}");
        tracing::debug!(query = %query, candidates = chunks.len(), "matching chunks");
        let query_embedding = self.capability.embed(&query)?;
        let texts: Vec<String> = chunks.iter().map(|c| c.chunk_text.clone()).collect();
        let chunk_embeddings = self.capability.embed_many(&texts)?;
        let ranked = rank_chunks(
            &query_embedding,
            &chunk_embeddings,
            chunks,
            &keywords,
            options.threshold,
            options.max_chunks,
        );
        Ok((ranked, keywords))
    }
}

/// Assembles the final report artifact from ranked chunks. Section and
/// subsection order both follow rank order.
pub fn build_report(
    config: &CollectionConfig,
    ranked: &[ScoredChunk],
    keywords: &[String],
) -> Report {
    let extracted_sections = ranked
        .iter()
        .map(|scored| format_section(scored, keywords))
        .collect();
    let subsection_analysis = ranked
        .iter()
        .map(|scored| SubsectionRecord {
            document: scored.chunk.document_filename.clone(),
            refined_text: scored.chunk.chunk_text.clone(),
            page_number: scored.chunk.page_number,
        })
        .collect();
    Report {
        metadata: ReportMetadata {
            input_documents: config
                .documents
                .iter()
                .map(|doc| doc.filename.clone())
                .collect(),
            persona: config.persona.role.clone(),
            job_to_be_done: config.job_to_be_done.task.clone(),
        },
        extracted_sections,
        subsection_analysis,
    }
}
