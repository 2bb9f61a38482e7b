//! src/worker.rs
use crate::{
    error::ChunkError,
    file_splitter::ChunkSpec,
    frequency::FrequencyTable,
    mappers::{Mapper, WordCounter},
    registry::WorkerState,
};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::PathBuf;
use std::sync::Arc;

/// What a worker hands back to the coordinator.
#[derive(Debug)]
pub enum ChunkOutcome {
    Complete(FrequencyTable),
    /// Reading stopped early; `table` holds what was counted before the failure.
    Partial {
        table: FrequencyTable,
        error: ChunkError,
    },
}

impl ChunkOutcome {
    pub fn table(&self) -> &FrequencyTable {
        match self {
            ChunkOutcome::Complete(table) => table,
            ChunkOutcome::Partial { table, .. } => table,
        }
    }

    pub fn into_table(self) -> FrequencyTable {
        match self {
            ChunkOutcome::Complete(table) => table,
            ChunkOutcome::Partial { table, .. } => table,
        }
    }

    pub fn error(&self) -> Option<&ChunkError> {
        match self {
            ChunkOutcome::Complete(_) => None,
            ChunkOutcome::Partial { error, .. } => Some(error),
        }
    }

    pub fn is_partial(&self) -> bool {
        self.error().is_some()
    }
}

/// Completion of `chunk` once the read cursor sits at `position`.
/// Empty chunks are complete by definition.
pub fn chunk_percentage(chunk: &ChunkSpec, position: u64) -> u8 {
    if chunk.is_empty() {
        return 100;
    }
    let done = position.saturating_sub(chunk.start) as u128 * 100;
    (done / chunk.len() as u128).min(100) as u8
}

/// Counts the words of one chunk with its own read cursor on the source file.
pub struct ChunkWorker<M = WordCounter> {
    chunk: ChunkSpec,
    path: PathBuf,
    state: Arc<WorkerState>,
    mapper: M,
}

impl ChunkWorker<WordCounter> {
    pub fn new(chunk: ChunkSpec, path: impl Into<PathBuf>, state: Arc<WorkerState>) -> Self {
        Self::with_mapper(chunk, path, state, WordCounter)
    }
}

impl<M: Mapper> ChunkWorker<M> {
    pub fn with_mapper(
        chunk: ChunkSpec,
        path: impl Into<PathBuf>,
        state: Arc<WorkerState>,
        mapper: M,
    ) -> Self {
        Self {
            chunk,
            path: path.into(),
            state,
            mapper,
        }
    }

    /// Reads the chunk line by line. Never fails: an I/O error ends the
    /// chunk early and is returned inside [`ChunkOutcome::Partial`].
    #[tracing::instrument(
        name = "Count chunk",
        skip(self),
        fields(index = self.chunk.index, start = self.chunk.start, end = self.chunk.end)
    )]
    pub fn run(self) -> ChunkOutcome {
        let mut table = FrequencyTable::new();
        let result = self.count_into(&mut table);
        self.state.mark_finished();

        match result {
            Ok(()) => {
                tracing::debug!(words = table.len(), "Chunk complete");
                ChunkOutcome::Complete(table)
            }
            Err(error) => {
                tracing::warn!(
                    error = ?error,
                    percentage = self.state.percentage(),
                    "Chunk stopped early, its counts are partial"
                );
                ChunkOutcome::Partial { table, error }
            }
        }
    }

    fn count_into(&self, table: &mut FrequencyTable) -> Result<(), ChunkError> {
        if self.chunk.is_empty() {
            self.state.set_percentage(100);
            return Ok(());
        }

        let mut position = self.chunk.start;
        let stopped_at = |position: u64| {
            move |source: std::io::Error| ChunkError {
                index: self.chunk.index,
                position,
                source,
            }
        };

        let file = File::open(&self.path).map_err(stopped_at(position))?;
        let mut reader = BufReader::new(file);
        reader
            .seek(SeekFrom::Start(self.chunk.start))
            .map_err(stopped_at(position))?;

        let mut line = Vec::new();
        while position < self.chunk.end {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .map_err(stopped_at(position))?;
            if read == 0 {
                return Err(stopped_at(position)(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "source file ended before the chunk did",
                )));
            }
            position += read as u64;

            self.mapper.map(&line, table);
            self.state
                .set_percentage(chunk_percentage(&self.chunk, position));
        }
        Ok(())
    }
}
