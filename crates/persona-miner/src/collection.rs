use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use persona_miner_core::{
    build_report, extract_text_per_page, Chunk, Chunker, ChunkerConfig, CollectionConfig,
    MatchOptions, MinerError, Page, SemanticMatcher,
};

/// On-disk layout of one collection directory:
///
/// ```text
/// <root>/input.json                             collection config
/// <root>/pdfs/<filename>                        source documents
/// <root>/processed_chunks/<name>_chunks.json    intermediate chunk set
/// <root>/output.json                            final report
/// ```
pub struct CollectionPaths {
    root: PathBuf,
}

impl CollectionPaths {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn name(&self) -> String {
        self.root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "collection".to_string())
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("input.json")
    }

    pub fn pdfs_dir(&self) -> PathBuf {
        self.root.join("pdfs")
    }

    pub fn chunks_path(&self) -> PathBuf {
        self.root
            .join("processed_chunks")
            .join(format!("{}_chunks.json", self.name()))
    }

    pub fn report_path(&self) -> PathBuf {
        self.root.join("output.json")
    }
}

pub fn load_config(paths: &CollectionPaths) -> Result<CollectionConfig> {
    let path = paths.config_path();
    let raw = fs::read_to_string(&path).map_err(|e| MinerError::Config {
        path: path.clone(),
        reason: format!("unreadable: {e}"),
    })?;
    let config = serde_json::from_str(&raw).map_err(|e| MinerError::Config {
        path: path.clone(),
        reason: format!("malformed: {e}"),
    })?;
    Ok(config)
}

/// Extracts and chunks every configured document, then persists the
/// collection's chunk set. Unreadable or missing documents are skipped
/// with a warning; their chunks are simply absent. Returns the number of
/// chunks written.
pub fn run_chunk_stage(paths: &CollectionPaths) -> Result<usize> {
    run_chunk_stage_with(paths, extract_text_per_page)
}

pub fn run_chunk_stage_with<F>(paths: &CollectionPaths, extract_fn: F) -> Result<usize>
where
    F: Fn(&Path) -> persona_miner_core::Result<Vec<Page>>,
{
    let config = load_config(paths)?;
    let chunker = Chunker::new(ChunkerConfig::default())?;
    let mut all_chunks: Vec<Chunk> = Vec::new();

    for doc in &config.documents {
        if doc.filename.is_empty() {
            tracing::warn!("skipping a document entry with an empty filename");
            continue;
        }
        let pdf_path = paths.pdfs_dir().join(&doc.filename);
        if !pdf_path.exists() {
            tracing::warn!(path = %pdf_path.display(), "document not found, skipping");
            continue;
        }
        println!(
            "[persona-miner] processing {} ({})",
            doc.title, doc.filename
        );
        let pages = match extract_fn(&pdf_path) {
            Ok(pages) => pages,
            Err(err) => {
                tracing::warn!(
                    path = %pdf_path.display(),
                    error = %err,
                    "extraction failed, skipping document"
                );
                continue;
            }
        };
        let chunks = chunker.chunk_document(&pages, &doc.filename, &doc.title);
        println!(
            "[persona-miner] {} produced {} chunks",
            doc.filename,
            chunks.len()
        );
        all_chunks.extend(chunks);
    }

    let chunks_path = paths.chunks_path();
    if let Some(parent) = chunks_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&all_chunks)?;
    fs::write(&chunks_path, json)
        .with_context(|| format!("failed to write chunk set {}", chunks_path.display()))?;
    println!(
        "[persona-miner] {} chunks saved to {}",
        all_chunks.len(),
        chunks_path.display()
    );
    Ok(all_chunks.len())
}

/// Loads the persisted chunk set, ranks it against the collection's
/// persona/task query and writes the report artifact.
pub fn run_match_stage(
    paths: &CollectionPaths,
    matcher: &SemanticMatcher,
    options: &MatchOptions,
) -> Result<()> {
    let config = load_config(paths)?;
    let chunks_path = paths.chunks_path();
    let raw = fs::read_to_string(&chunks_path)
        .with_context(|| format!("missing chunk set {}", chunks_path.display()))?;
    let chunks: Vec<Chunk> = serde_json::from_str(&raw)
        .with_context(|| format!("malformed chunk set {}", chunks_path.display()))?;

    let (ranked, keywords) = matcher.match_chunks(
        &config.persona.role,
        &config.job_to_be_done.task,
        &chunks,
        None,
        options,
    )?;
    let report = build_report(&config, &ranked, &keywords);

    let report_path = paths.report_path();
    let json = serde_json::to_string_pretty(&report)?;
    fs::write(&report_path, json)
        .with_context(|| format!("failed to write report {}", report_path.display()))?;
    println!(
        "[persona-miner] report with {} sections saved to {}",
        report.extracted_sections.len(),
        report_path.display()
    );
    Ok(())
}
