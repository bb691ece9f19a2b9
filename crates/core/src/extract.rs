use std::path::Path;

use crate::document::Page;
use crate::error::{MinerError, Result};

/// Extracts plain text per page from a PDF, 1-based page numbering.
/// Extraction failures surface as [`MinerError::Extraction`] so callers
/// can skip the document without aborting the collection.
pub fn extract_text_per_page(path: &Path) -> Result<Vec<Page>> {
    let pages = pdf_extract::extract_text_by_pages(path).map_err(|e| MinerError::Extraction {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    tracing::debug!(path = %path.display(), pages = pages.len(), "extracted pdf text");
    Ok(pages
        .into_iter()
        .enumerate()
        .map(|(idx, text)| Page {
            page_number: idx as u32 + 1,
            text,
        })
        .collect())
}
