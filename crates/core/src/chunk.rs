use crate::document::{Chunk, Page};
use crate::error::{MinerError, Result};

/// Paragraph-grouping bounds for chunk construction. Blocks close inside
/// the `min..=max` window: once a block holds `min_block_paragraphs` it is
/// closed, unless doing so would strand a tail shorter than the minimum on
/// the same page, in which case the block keeps growing up to
/// `max_block_paragraphs`.
#[derive(Debug, Clone, Copy)]
pub struct ChunkerConfig {
    pub min_block_paragraphs: usize,
    pub max_block_paragraphs: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            min_block_paragraphs: 4,
            max_block_paragraphs: 6,
        }
    }
}

impl ChunkerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_block_paragraphs == 0 {
            return Err(MinerError::InvalidChunkerConfig(
                "min_block_paragraphs must be at least 1",
            ));
        }
        if self.max_block_paragraphs < self.min_block_paragraphs {
            return Err(MinerError::InvalidChunkerConfig(
                "max_block_paragraphs must not be below min_block_paragraphs",
            ));
        }
        Ok(())
    }
}

pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Groups a document's page texts into paragraph blocks, attaching
    /// provenance metadata. Blocks never span a page boundary; the last
    /// block of a page is flushed even when it is short of the minimum, so
    /// no paragraph is dropped. The chunk-id counter spans the whole
    /// document, not a single page.
    pub fn chunk_document(&self, pages: &[Page], filename: &str, title: &str) -> Vec<Chunk> {
        let min = self.config.min_block_paragraphs;
        let max = self.config.max_block_paragraphs;
        let mut chunks = Vec::new();
        let mut chunk_counter = 0usize;

        for page in pages {
            let paragraphs: Vec<&str> = page
                .text
                .split("\n\n")
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect();

            let mut block: Vec<&str> = Vec::new();
            for (idx, paragraph) in paragraphs.iter().enumerate() {
                block.push(paragraph);
                let remaining = paragraphs.len() - idx - 1;
                let at_capacity = block.len() >= max;
                // Closing at the minimum is skipped when it would leave a
                // sub-minimum tail on this page.
                let window_close = block.len() >= min && remaining >= min;
                if at_capacity || window_close || remaining == 0 {
                    chunk_counter += 1;
                    chunks.push(Chunk {
                        document_filename: filename.to_string(),
                        document_title: title.to_string(),
                        page_number: page.page_number,
                        chunk_text: block.join("\n\n"),
                        chunk_id: format!(
                            "{filename}_page{}_chunk{chunk_counter}",
                            page.page_number
                        ),
                    });
                    block.clear();
                }
            }
        }
        chunks
    }
}
