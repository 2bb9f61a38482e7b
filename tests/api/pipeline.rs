//! tests/api/pipeline.rs
use crate::helpers::{test_data_dir, write_source};
use claims::assert_ok;
use std::collections::HashMap;
use wordcount::file_splitter::FileSplitter;
use wordcount::frequency::FrequencyTable;
use wordcount::reducers::{Adder, Reducer};
use wordcount::registry::WorkerRegistry;
use wordcount::worker::ChunkWorker;

fn single_pass(data: &str) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for word in data.split_ascii_whitespace() {
        *counts.entry(word.to_owned()).or_insert(0) += 1;
    }
    counts
}

fn chunk_tables(source: &std::path::Path, chunks: usize) -> Vec<FrequencyTable> {
    let specs = assert_ok!(FileSplitter::new(source, chunks).split());
    let registry = WorkerRegistry::with_capacity(specs.len());
    specs
        .into_iter()
        .map(|chunk| {
            let state = registry.register().expect("Registry is full");
            let outcome = ChunkWorker::new(chunk, source, state).run();
            assert!(!outcome.is_partial());
            outcome.into_table()
        })
        .collect()
}

fn as_map(table: &FrequencyTable) -> HashMap<String, u64> {
    table
        .iter()
        .map(|(word, count)| (word.to_owned(), count))
        .collect()
}

#[test]
fn chunked_tokens_equal_a_single_pass_for_many_chunk_counts() {
    let mut source = test_data_dir();
    source.push("small_test.txt");
    let data = std::fs::read_to_string(&source).expect("Failed to read fixture");
    let expected = single_pass(&data);

    for chunks in 1..=32 {
        let global = Adder.reduce(chunk_tables(&source, chunks));
        assert_eq!(as_map(&global), expected, "chunks = {chunks}");
    }
}

#[test]
fn long_lines_are_never_split_between_chunks() {
    let line = "supercalifragilistic ".repeat(50);
    let data = format!("{line}\n{line}\nshort\n");
    let source = write_source(&data);

    for chunks in [2, 3, 5, 8] {
        let global = Adder.reduce(chunk_tables(&source, chunks));
        assert_eq!(global.get("supercalifragilistic"), Some(100));
        assert_eq!(global.get("short"), Some(1));
        assert_eq!(global.len(), 2);
    }
}

#[test]
fn reduce_order_does_not_change_counts() {
    let mut source = test_data_dir();
    source.push("small_test.txt");
    let tables = chunk_tables(&source, 7);

    let forward = Adder.reduce(tables.clone());
    let backward = Adder.reduce(tables.iter().rev().cloned());
    let mut interleaved: Vec<FrequencyTable> = tables.iter().step_by(2).cloned().collect();
    interleaved.extend(tables.iter().skip(1).step_by(2).cloned());

    assert_eq!(forward, backward);
    assert_eq!(forward, Adder.reduce(interleaved));
}

#[test]
fn single_chunk_spans_the_whole_file() {
    let source = write_source("one two\nthree\n");
    let specs = assert_ok!(FileSplitter::new(&source, 1).split());
    assert_eq!(specs.len(), 1);
    assert_eq!((specs[0].start, specs[0].end), (0, 14));
}
