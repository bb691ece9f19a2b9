use crate::document::Chunk;

/// Score attached to a ranked chunk. The two variants are incomparable
/// scales and never appear together in one ranked list: semantic scores
/// are cosine similarities in [-1, 1], keyword scores are match counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    Semantic(f32),
    KeywordMatches(u32),
}

impl Score {
    pub fn value(&self) -> f64 {
        match self {
            Score::Semantic(score) => f64::from(*score),
            Score::KeywordMatches(count) => f64::from(*count),
        }
    }

    pub fn is_semantic(&self) -> bool {
        matches!(self, Score::Semantic(_))
    }
}

#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: Score,
    pub rank: u32,
}

/// Cosine similarity between two vectors. Mismatched dimensions or a
/// zero-norm operand score 0.0 rather than erroring.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Ranks `chunks` against a query embedding, index-aligned with
/// `chunk_embeddings`.
///
/// Semantic cosine scores drive the ordering unless `keywords` is
/// non-empty and every semantic score falls below `threshold`; in that
/// regime the semantic ranking is discarded wholesale and chunks are
/// re-ranked by case-insensitive keyword match count. The trigger is
/// all-or-nothing so one result list never mixes the two scales.
///
/// Ties break by original candidate order. Ranks are dense `1..=k` over
/// the returned subset, where `k = min(max_chunks, candidates)`;
/// `max_chunks` of `None` or zero returns every candidate.
pub fn rank_chunks(
    query_embedding: &[f32],
    chunk_embeddings: &[Vec<f32>],
    chunks: &[Chunk],
    keywords: &[String],
    threshold: f32,
    max_chunks: Option<usize>,
) -> Vec<ScoredChunk> {
    let semantic: Vec<f32> = chunk_embeddings
        .iter()
        .map(|embedding| cosine_similarity(query_embedding, embedding))
        .collect();

    let mut order: Vec<usize> = (0..chunks.len().min(semantic.len())).collect();
    // Stable sort keeps the original candidate order on equal scores.
    order.sort_by(|a, b| semantic[*b].total_cmp(&semantic[*a]));

    let all_below = order.iter().all(|idx| semantic[*idx] < threshold);
    let scored: Vec<(usize, Score)> = if !keywords.is_empty() && all_below {
        tracing::debug!(
            threshold,
            candidates = chunks.len(),
            "semantic scores uninformative, falling back to keyword ranking"
        );
        let counts: Vec<u32> = chunks
            .iter()
            .map(|chunk| keyword_match_count(&chunk.chunk_text, keywords))
            .collect();
        let mut keyword_order: Vec<usize> = (0..counts.len()).collect();
        keyword_order.sort_by(|a, b| counts[*b].cmp(&counts[*a]));
        keyword_order
            .into_iter()
            .map(|idx| (idx, Score::KeywordMatches(counts[idx])))
            .collect()
    } else {
        order
            .into_iter()
            .map(|idx| (idx, Score::Semantic(semantic[idx])))
            .collect()
    };

    let cap = match max_chunks {
        Some(0) | None => scored.len(),
        Some(cap) => cap,
    };
    scored
        .into_iter()
        .take(cap)
        .enumerate()
        .map(|(position, (idx, score))| ScoredChunk {
            chunk: chunks[idx].clone(),
            score,
            rank: position as u32 + 1,
        })
        .collect()
}

fn keyword_match_count(text: &str, keywords: &[String]) -> u32 {
    let haystack = text.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| haystack.contains(&keyword.to_lowercase()))
        .count() as u32
}
