mod cli;
mod collection;
mod logging;
mod run;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use persona_miner_core::{HashEmbedder, MatchOptions, SemanticMatcher};

use crate::cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    // One embedding capability per process, shared across collections.
    let matcher = SemanticMatcher::new(Arc::new(HashEmbedder::default()));
    match cli.command {
        Command::Chunk { collection } => {
            let paths = collection::CollectionPaths::new(PathBuf::from(collection));
            collection::run_chunk_stage(&paths)?;
            Ok(())
        }
        Command::Match {
            collection,
            threshold,
            max_chunks,
        } => {
            let paths = collection::CollectionPaths::new(PathBuf::from(collection));
            let options = MatchOptions {
                threshold,
                max_chunks: Some(max_chunks),
                ..MatchOptions::default()
            };
            collection::run_match_stage(&paths, &matcher, &options)
        }
        Command::Run {
            collections,
            threshold,
            max_chunks,
        } => {
            let options = MatchOptions {
                threshold,
                max_chunks: Some(max_chunks),
                ..MatchOptions::default()
            };
            run::run(&PathBuf::from(collections), &matcher, &options)
        }
    }
}
