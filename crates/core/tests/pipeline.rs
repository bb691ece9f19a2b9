use std::sync::Arc;

use persona_miner_core::{
    build_report, Chunker, ChunkerConfig, CollectionConfig, DocumentRef, HashEmbedder,
    JobToBeDone, MatchOptions, Page, Persona, SemanticMatcher,
};

fn sample_config() -> CollectionConfig {
    CollectionConfig {
        persona: Persona {
            role: "Travel Planner".to_string(),
        },
        job_to_be_done: JobToBeDone {
            task: "plan a coastal trip with beaches and seafood".to_string(),
        },
        documents: vec![DocumentRef {
            filename: "south.pdf".to_string(),
            title: "South of France".to_string(),
        }],
    }
}

fn sample_pages() -> Vec<Page> {
    let query_echo = "Travel Planner: plan a coastal trip with beaches and seafood";
    vec![
        Page {
            page_number: 1,
            text: format!(
                "{query_echo}\n\nThe region has a long history of winemaking.\n\n\
                 Trains connect the major towns.\n\nMarkets open early in summer."
            ),
        },
        Page {
            page_number: 2,
            text: "Museum hours vary by season.\n\nParking is scarce in old towns."
                .to_string(),
        },
    ]
}

#[test]
fn chunk_match_report_end_to_end() {
    let config = sample_config();
    let chunker = Chunker::new(ChunkerConfig::default()).unwrap();
    let chunks = chunker.chunk_document(&sample_pages(), "south.pdf", "South of France");
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].page_number, 1);
    assert_eq!(chunks[1].page_number, 2);

    let matcher = SemanticMatcher::new(Arc::new(HashEmbedder::default()));
    let (ranked, keywords) = matcher
        .match_chunks(
            &config.persona.role,
            &config.job_to_be_done.task,
            &chunks,
            None,
            &MatchOptions::default(),
        )
        .unwrap();

    assert!(!keywords.is_empty());
    assert_eq!(ranked.len(), 2);
    let ranks: Vec<u32> = ranked.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2]);
    // The page-1 chunk opens with the query text verbatim, so it shares
    // every query token and must outrank the page-2 chunk.
    assert_eq!(ranked[0].chunk.page_number, 1);

    let report = build_report(&config, &ranked, &keywords);
    assert_eq!(report.metadata.input_documents, vec!["south.pdf".to_string()]);
    assert_eq!(report.metadata.persona, "Travel Planner");
    assert_eq!(report.extracted_sections.len(), 2);
    assert_eq!(report.subsection_analysis.len(), 2);
    assert_eq!(
        report.extracted_sections[0].page_number,
        report.subsection_analysis[0].page_number
    );
    assert_eq!(
        report.subsection_analysis[0].refined_text,
        ranked[0].chunk.chunk_text
    );

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["metadata"]["job_to_be_done"].is_string());
    assert!(json["extracted_sections"][0]["section_title"].is_string());
    assert!(json["extracted_sections"][0]["importance_rank"].is_u64());
}

#[test]
fn matching_twice_is_deterministic() {
    let config = sample_config();
    let chunker = Chunker::new(ChunkerConfig::default()).unwrap();
    let chunks = chunker.chunk_document(&sample_pages(), "south.pdf", "South of France");
    let matcher = SemanticMatcher::new(Arc::new(HashEmbedder::default()));
    let run = || {
        let (ranked, _) = matcher
            .match_chunks(
                &config.persona.role,
                &config.job_to_be_done.task,
                &chunks,
                None,
                &MatchOptions::default(),
            )
            .unwrap();
        ranked
            .iter()
            .map(|r| (r.chunk.chunk_id.clone(), r.rank))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn chunk_collection_round_trips_through_json() {
    let chunker = Chunker::new(ChunkerConfig::default()).unwrap();
    let chunks = chunker.chunk_document(&sample_pages(), "south.pdf", "South of France");
    let json = serde_json::to_string_pretty(&chunks).unwrap();
    let restored: Vec<persona_miner_core::Chunk> = serde_json::from_str(&json).unwrap();
    assert_eq!(chunks, restored);
}
