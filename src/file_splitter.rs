//! src/file_splitter.rs
use crate::error::SplitError;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::PathBuf;

/// Half-open byte range `[start, end)` of the source file handled by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSpec {
    pub index: usize,
    pub start: u64,
    pub end: u64,
}

impl ChunkSpec {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Computes line-aligned chunk offsets on a source file.
#[derive(Debug)]
pub struct FileSplitter {
    path: PathBuf,
    chunks: usize,
}

impl FileSplitter {
    pub fn new(path: impl Into<PathBuf>, chunks: usize) -> Self {
        FileSplitter {
            path: path.into(),
            chunks,
        }
    }

    /// Returns `chunks` ascending start offsets together with the file length.
    ///
    /// Offset `i` (for `i >= 1`) is the position just past the first line
    /// terminator found at or after `i * len / chunks`, or the end of the
    /// file if none is found. Several offsets may collapse onto the same
    /// position when there are fewer lines than chunks.
    #[tracing::instrument(name = "Compute chunk offsets", skip(self), fields(path = %self.path.display(), chunks = self.chunks))]
    pub fn offsets(&self) -> Result<(Vec<u64>, u64), SplitError> {
        if self.chunks == 0 {
            return Err(SplitError::NoChunks);
        }

        let file = File::open(&self.path).map_err(|source| SplitError::Open {
            path: self.path.clone(),
            source,
        })?;
        let length = file
            .metadata()
            .map_err(|source| SplitError::Metadata {
                path: self.path.clone(),
                source,
            })?
            .len();

        let mut offsets = vec![0u64; self.chunks];
        if self.chunks == 1 {
            return Ok((offsets, length));
        }

        let mut reader = BufReader::new(file);
        let chunks = self.chunks as u128;
        for (i, offset) in offsets.iter_mut().enumerate().skip(1) {
            let target = (i as u128 * length as u128 / chunks) as u64;
            *offset = next_line_start(&mut reader, target).map_err(|source| SplitError::Scan {
                path: self.path.clone(),
                position: target,
                source,
            })?;
            tracing::debug!(chunk = i, target, offset = *offset, "Aligned chunk offset");
        }

        Ok((offsets, length))
    }

    /// Offsets turned into the chunk ranges the workers consume.
    pub fn split(&self) -> Result<Vec<ChunkSpec>, SplitError> {
        let (offsets, length) = self.offsets()?;
        Ok(chunk_specs(&offsets, length))
    }
}

/// Seeks to `position` and scans forward to just past the next `\n`,
/// stopping at end of file.
fn next_line_start<R: BufRead + Seek>(reader: &mut R, position: u64) -> std::io::Result<u64> {
    let mut cursor = reader.seek(SeekFrom::Start(position))?;
    loop {
        let buf = match reader.fill_buf() {
            Ok(buf) => buf,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if buf.is_empty() {
            return Ok(cursor);
        }
        match buf.iter().position(|byte| *byte == b'\n') {
            Some(at) => {
                reader.consume(at + 1);
                return Ok(cursor + at as u64 + 1);
            }
            None => {
                let read = buf.len();
                reader.consume(read);
                cursor += read as u64;
            }
        }
    }
}

/// Pairs each offset with the next one (or `length` for the last chunk).
pub fn chunk_specs(offsets: &[u64], length: u64) -> Vec<ChunkSpec> {
    offsets
        .iter()
        .enumerate()
        .map(|(index, &start)| ChunkSpec {
            index,
            start,
            end: offsets.get(index + 1).copied().unwrap_or(length),
        })
        .collect()
}
