use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "persona-miner", about = "persona-driven document section miner")]
pub struct Cli {
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract and chunk every configured document in one collection.
    Chunk { collection: String },
    /// Rank a collection's persisted chunks and write the report.
    Match {
        collection: String,
        #[arg(long, default_value_t = 0.45)]
        threshold: f32,
        #[arg(long, default_value_t = 5)]
        max_chunks: usize,
    },
    /// Chunk and match every collection under a directory.
    Run {
        #[arg(long, default_value = "collections")]
        collections: String,
        #[arg(long, default_value_t = 0.45)]
        threshold: f32,
        #[arg(long, default_value_t = 5)]
        max_chunks: usize,
    },
}
