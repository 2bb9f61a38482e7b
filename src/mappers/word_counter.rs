//! src/mappers/word_counter.rs
use crate::mappers::{MapEmitter, Mapper};

/// Space, tab, newline, carriage return and form feed.
pub fn is_token_delimiter(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0c)
}

/// Emits every whitespace-delimited token of a line with a count of one.
/// Tokens keep their case and punctuation.
#[derive(Debug, Default, Clone, Copy)]
pub struct WordCounter;

impl Mapper for WordCounter {
    fn map<E: MapEmitter>(&self, line: &[u8], emitter: &mut E) {
        for token in line
            .split(|byte| is_token_delimiter(*byte))
            .filter(|token| !token.is_empty())
        {
            match std::str::from_utf8(token) {
                Ok(word) => emitter.emit(word, 1),
                Err(_) => emitter.emit(&String::from_utf8_lossy(token), 1),
            }
        }
    }
}
