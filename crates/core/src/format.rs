use serde::{Deserialize, Serialize};

use crate::rank::ScoredChunk;

const TITLE_CHAR_LIMIT: usize = 60;

/// Coarse confidence band over a semantic cosine score. Lower bounds are
/// inclusive. Banding a keyword-fallback match count through these
/// thresholds is a known scale mismatch carried over from the original
/// product behavior; `Score` stays tagged so callers can tell which scale
/// produced the number.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.75 {
            Confidence::High
        } else if score >= 0.5 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

/// Presentation record for one ranked chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedSection {
    pub document: String,
    pub section_title: String,
    pub importance_rank: u32,
    pub page_number: u32,
    pub chunk_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched_keywords: Vec<String>,
}

/// Synthesizes a section title from chunk text: the first 60 characters,
/// with an ellipsis marker iff the text is longer than that.
pub fn section_title(chunk_text: &str) -> String {
    let mut title: String = chunk_text.chars().take(TITLE_CHAR_LIMIT).collect();
    if chunk_text.chars().count() > TITLE_CHAR_LIMIT {
        title.push_str("...");
    }
    title
}

/// Builds the presentation record for one scored chunk. Pure function;
/// the score is rounded to 3 decimal places.
pub fn format_section(scored: &ScoredChunk, keywords: &[String]) -> FormattedSection {
    let chunk = &scored.chunk;
    let value = scored.score.value();
    let haystack = chunk.chunk_text.to_lowercase();
    let matched_keywords = keywords
        .iter()
        .filter(|keyword| haystack.contains(&keyword.to_lowercase()))
        .cloned()
        .collect();
    FormattedSection {
        document: chunk.document_filename.clone(),
        section_title: section_title(&chunk.chunk_text),
        importance_rank: scored.rank,
        page_number: chunk.page_number,
        chunk_id: chunk.chunk_id.clone(),
        relevance_score: Some(round3(value)),
        confidence: Some(Confidence::from_score(value)),
        matched_keywords,
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
