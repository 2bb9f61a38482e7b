//! src/report.rs
use crate::error::ReportError;
use crate::frequency::FrequencyTable;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

pub const RULE: &str = "-----------------------------------------------";
pub const COLUMN_HEADER: &str = "    Occurrences    Word";
const WORD_INDENT: &str = "        ";

/// Run facts printed above the word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunMetadata {
    pub max_threads: usize,
    pub workers: usize,
    pub elapsed: Duration,
}

/// Writes the header, one `<word> <count>` line per word in lexicographic
/// order, and the closing rule (without a trailing newline).
pub fn write_report<W: Write>(
    out: &mut W,
    table: &FrequencyTable,
    metadata: &RunMetadata,
) -> std::io::Result<()> {
    writeln!(out, "Max Processors: {}", metadata.max_threads)?;
    writeln!(
        out,
        "Duration({}): {} ms",
        metadata.workers,
        metadata.elapsed.as_millis()
    )?;
    writeln!(out, "{COLUMN_HEADER}")?;
    writeln!(out, "{RULE}")?;
    for (word, count) in table.iter() {
        writeln!(out, "{WORD_INDENT}{word} {count}")?;
    }
    write!(out, "{RULE}")?;
    Ok(())
}

/// Creates (or truncates) `destination` and writes the report into it. The
/// file is closed when this returns, whatever the result.
#[tracing::instrument(name = "Write report", skip(table, metadata), fields(words = table.len()))]
pub fn write_report_file(
    destination: &Path,
    table: &FrequencyTable,
    metadata: &RunMetadata,
) -> Result<(), ReportError> {
    let file = File::create(destination).map_err(|source| ReportError::Create {
        path: destination.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_report(&mut writer, table, metadata)?;
    writer.flush()?;
    Ok(())
}
