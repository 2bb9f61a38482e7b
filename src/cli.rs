//! src/cli.rs
use clap::Parser;
use std::path::PathBuf;

/// Counts word frequencies of a text file using concurrent, line-aligned chunks.
#[derive(Parser, Debug, Clone)]
#[command(name = "wordcount", version)]
pub struct Cli {
    /// Text file to count
    pub source: PathBuf,

    /// Report file to create
    pub destination: PathBuf,

    /// Number of chunks (one worker each)
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub chunks: u32,
}
