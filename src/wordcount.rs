//! src/wordcount.rs
use crate::{
    configuration::Settings,
    error::{ChunkError, ReportError},
    file_splitter::{ChunkSpec, FileSplitter},
    frequency::FrequencyTable,
    mappers::{Mapper, WordCounter},
    monitor::{BarDisplay, MonitorOutcome, ProgressMonitor},
    reducers::{Adder, Reducer},
    registry::WorkerRegistry,
    report::{RunMetadata, write_report_file},
    worker::{ChunkOutcome, ChunkWorker},
};
use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use uuid::Uuid;

/// Result of the split, map and reduce phases.
#[derive(Debug)]
pub struct CountResult {
    pub table: FrequencyTable,
    pub chunks: Vec<ChunkSpec>,
    pub partial_chunks: Vec<usize>,
    pub monitor: Option<MonitorOutcome>,
}

#[derive(Debug)]
pub struct RunSummary {
    pub max_threads: usize,
    pub chunks: usize,
    pub elapsed: Duration,
    pub distinct_words: usize,
    pub total_words: u64,
    pub partial_chunks: Vec<usize>,
    pub monitor: Option<MonitorOutcome>,
    /// Set when the report could not be written. The run still counts as done.
    pub report_error: Option<ReportError>,
}

impl RunSummary {
    /// Elapsed wall time in milliseconds, saturating at `u64::MAX`.
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Counts the words of `source` over `chunks` concurrent workers and writes
/// the report to `destination`.
#[derive(Debug)]
pub struct WordCount<M = WordCounter> {
    run_id: Uuid,
    source: PathBuf,
    destination: PathBuf,
    chunks: usize,
    settings: Settings,
    mapper: M,
}

impl WordCount<WordCounter> {
    pub fn new(
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        chunks: usize,
        settings: Settings,
    ) -> Self {
        WordCount {
            run_id: Uuid::new_v4(),
            source: source.into(),
            destination: destination.into(),
            chunks,
            settings,
            mapper: WordCounter,
        }
    }
}

impl<M> WordCount<M>
where
    M: Mapper + Clone + Send + 'static,
{
    /// Same job, tokenized by `mapper` in every chunk worker.
    pub fn with_mapper<N>(self, mapper: N) -> WordCount<N> {
        WordCount {
            run_id: self.run_id,
            source: self.source,
            destination: self.destination,
            chunks: self.chunks,
            settings: self.settings,
            mapper,
        }
    }

    pub fn max_threads(&self) -> usize {
        self.settings.pool.max_threads()
    }

    /// Split, count and write the report. Only a failure to split the source
    /// aborts; anything later degrades into the summary.
    #[tracing::instrument(
        name = "Word count run",
        skip_all,
        fields(run_id = %self.run_id, source = %self.source.display(), chunks = self.chunks)
    )]
    pub async fn run(&self, display: BarDisplay) -> Result<RunSummary, anyhow::Error> {
        let started = Instant::now();
        let counted = self.count(display).await?;

        let metadata = RunMetadata {
            max_threads: self.max_threads(),
            workers: counted.chunks.len(),
            elapsed: started.elapsed(),
        };
        let report_error = match write_report_file(&self.destination, &counted.table, &metadata) {
            Ok(()) => None,
            Err(e) => {
                tracing::error!(error = ?e, destination = %self.destination.display(), "Failed to write report");
                Some(e)
            }
        };

        Ok(RunSummary {
            max_threads: metadata.max_threads,
            chunks: metadata.workers,
            elapsed: started.elapsed(),
            distinct_words: counted.table.len(),
            total_words: counted.table.total(),
            partial_chunks: counted.partial_chunks,
            monitor: counted.monitor,
            report_error,
        })
    }

    /// Split, count and reduce without writing anything.
    pub async fn count(&self, display: BarDisplay) -> Result<CountResult, anyhow::Error> {
        let splitter = FileSplitter::new(&self.source, self.chunks);
        let chunks = tokio::task::spawn_blocking(move || splitter.split())
            .await
            .context("Offset computation panicked")?
            .context("Failed to split source file")?;
        tracing::info!(chunks = chunks.len(), "Computed chunk offsets");

        let (outcomes, monitor) = self.map(&chunks, display).await?;

        let partial_chunks: Vec<usize> = outcomes
            .iter()
            .filter_map(|outcome| outcome.error().map(|e| e.index))
            .collect();
        if !partial_chunks.is_empty() {
            tracing::warn!(?partial_chunks, "Some chunks were only partly counted");
        }

        let table = Adder.reduce(outcomes.into_iter().map(ChunkOutcome::into_table));

        Ok(CountResult {
            table,
            chunks,
            partial_chunks,
            monitor,
        })
    }

    /// Starts the monitor, then one worker per chunk, and waits for all of
    /// them. Outcomes come back in chunk order.
    async fn map(
        &self,
        chunks: &[ChunkSpec],
        display: BarDisplay,
    ) -> Result<(Vec<ChunkOutcome>, Option<MonitorOutcome>), anyhow::Error> {
        let registry = Arc::new(WorkerRegistry::with_capacity(chunks.len()));
        let monitor = tokio::spawn(
            ProgressMonitor::new(registry.clone(), display, &self.settings.monitor).run(),
        );

        let max_threads = self.max_threads();
        let permits = Arc::new(Semaphore::new(max_threads));
        tracing::debug!(max_threads, "Submitting chunk workers");

        let mut handles = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            let state = registry
                .register()
                .context("Worker registry has no free slot")?;
            let worker =
                ChunkWorker::with_mapper(*chunk, &self.source, state.clone(), self.mapper.clone());
            let permits = permits.clone();
            let handle = tokio::spawn(async move {
                let _permit = permits.acquire_owned().await?;
                let outcome = tokio::task::spawn_blocking(move || worker.run()).await?;
                Ok::<_, anyhow::Error>(outcome)
            });
            handles.push((*chunk, state, handle));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (chunk, state, handle) in handles {
            let outcome = match handle.await {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(e)) => crashed(chunk, e),
                Err(e) => crashed(chunk, e.into()),
            };
            // A crashed worker never flags itself.
            state.mark_finished();
            outcomes.push(outcome);
        }

        let monitor = match monitor.await {
            Ok((outcome, _)) => Some(outcome),
            Err(e) => {
                tracing::warn!(error = %e, "Progress monitor stopped abnormally");
                None
            }
        };

        Ok((outcomes, monitor))
    }
}

fn crashed(chunk: ChunkSpec, error: anyhow::Error) -> ChunkOutcome {
    tracing::error!(chunk = chunk.index, error = ?error, "Chunk worker did not complete");
    ChunkOutcome::Partial {
        table: FrequencyTable::new(),
        error: ChunkError {
            index: chunk.index,
            position: chunk.start,
            source: std::io::Error::other(error.to_string()),
        },
    }
}
