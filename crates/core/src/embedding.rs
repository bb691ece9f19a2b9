use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use once_cell::sync::Lazy;

use crate::error::Result;

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "have", "in",
        "into", "is", "it", "its", "of", "on", "or", "that", "the", "their", "this", "to",
        "was", "were", "which", "will", "with",
    ]
    .into_iter()
    .collect()
});

/// Maps text to fixed-dimension vectors and extracts salient keywords.
///
/// The underlying model is expensive to initialize: construct one instance
/// per process and share it read-only across collection runs. Failures are
/// fatal for the matching operation that triggered them; implementations
/// must never substitute a default vector.
pub trait EmbeddingCapability: Send + Sync {
    /// Embeds one text. Deterministic for identical input on one instance.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embeds many texts, order-preserving. Overriding this is a batching
    /// optimization only; output must match repeated [`embed`] calls.
    ///
    /// [`embed`]: EmbeddingCapability::embed
    fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|text| self.embed(text)).collect()
    }

    /// Extracts up to `top_n` keywords from free text, most salient first.
    fn extract_keywords(&self, text: &str, top_n: usize) -> Result<Vec<String>>;
}

#[derive(Debug, Clone, Copy)]
pub struct HashEmbedderConfig {
    pub dimensions: usize,
    pub seed: u64,
}

impl Default for HashEmbedderConfig {
    fn default() -> Self {
        Self {
            dimensions: 64,
            seed: 1337,
        }
    }
}

/// Deterministic token-bucket embedder. Each whitespace token hashes into
/// one of `dimensions` buckets; the bucket histogram is L2-normalized.
/// Keyword salience is term frequency over non-stopword tokens.
#[derive(Clone)]
pub struct HashEmbedder {
    config: HashEmbedderConfig,
}

impl HashEmbedder {
    pub fn new(config: HashEmbedderConfig) -> Self {
        Self { config }
    }

    fn bucket_for(&self, token: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        hasher.write_u64(self.config.seed);
        token.to_lowercase().hash(&mut hasher);
        (hasher.finish() as usize) % self.config.dimensions.max(1)
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(HashEmbedderConfig::default())
    }
}

impl EmbeddingCapability for HashEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let dims = self.config.dimensions.max(1);
        let mut vector = vec![0f32; dims];
        for token in text.split_whitespace() {
            vector[self.bucket_for(token)] += 1.0;
        }
        normalize(&mut vector);
        Ok(vector)
    }

    fn extract_keywords(&self, text: &str, top_n: usize) -> Result<Vec<String>> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut order: Vec<String> = Vec::new();
        for raw in text.split_whitespace() {
            let token: String = raw
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase();
            if token.len() < 2 || STOPWORDS.contains(token.as_str()) {
                continue;
            }
            match counts.get_mut(&token) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(token.clone(), 1);
                    order.push(token);
                }
            }
        }
        // Ties keep first-occurrence order so output is deterministic.
        let mut ranked: Vec<(usize, String)> = order
            .into_iter()
            .map(|token| (counts[&token], token))
            .collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(ranked
            .into_iter()
            .take(top_n)
            .map(|(_, token)| token)
            .collect())
    }
}

fn normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm == 0.0 {
        return;
    }
    for value in vector.iter_mut() {
        *value /= norm;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embed_is_deterministic_and_normalized() {
        let embedder = HashEmbedder::default();
        let a = embedder.embed("plan a city trip with friends").unwrap();
        let b = embedder.embed("plan a city trip with friends").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        let norm: f32 = a.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn empty_text_embeds_to_zero_vector() {
        let embedder = HashEmbedder::default();
        let vector = embedder.embed("   ").unwrap();
        assert!(vector.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn embed_many_matches_individual_embeds() {
        let embedder = HashEmbedder::default();
        let texts = vec![
            "first chunk".to_string(),
            "second chunk of text".to_string(),
        ];
        let batched = embedder.embed_many(&texts).unwrap();
        for (text, vector) in texts.iter().zip(&batched) {
            assert_eq!(&embedder.embed(text).unwrap(), vector);
        }
    }

    #[test]
    fn keywords_rank_by_frequency_and_skip_stopwords() {
        let embedder = HashEmbedder::default();
        let keywords = embedder
            .extract_keywords("the beach trip and the beach hotel near beach", 2)
            .unwrap();
        assert_eq!(keywords, vec!["beach".to_string(), "trip".to_string()]);
    }

    #[test]
    fn keyword_ties_keep_first_occurrence_order() {
        let embedder = HashEmbedder::default();
        let keywords = embedder.extract_keywords("alpha beta gamma", 3).unwrap();
        assert_eq!(
            keywords,
            vec![
                "alpha".to_string(),
                "beta".to_string(),
                "gamma".to_string()
            ]
        );
    }
}
