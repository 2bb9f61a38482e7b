//! src/error.rs
use std::path::PathBuf;

pub fn error_chain_fmt(
    f: &mut std::fmt::Formatter<'_>,
    e: &impl std::error::Error,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

/// Failures while computing chunk offsets. These abort the run.
#[derive(thiserror::Error)]
pub enum SplitError {
    #[error("Failed to open source file {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read metadata of source file {}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "Failed to scan source file {} for a line boundary near byte {position}",
        .path.display()
    )]
    Scan {
        path: PathBuf,
        position: u64,
        #[source]
        source: std::io::Error,
    },
    #[error("Chunk count must be at least 1")]
    NoChunks,
}

impl std::fmt::Debug for SplitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(f, self)
    }
}

/// Failure that stopped a chunk worker early.
#[derive(thiserror::Error)]
#[error("Chunk {index} stopped at byte {position}")]
pub struct ChunkError {
    pub index: usize,
    pub position: u64,
    #[source]
    pub source: std::io::Error,
}

impl std::fmt::Debug for ChunkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(f, self)
    }
}

#[derive(thiserror::Error)]
pub enum ReportError {
    #[error("Failed to create report file {}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write report")]
    Write(#[from] std::io::Error),
}

impl std::fmt::Debug for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(f, self)
    }
}
