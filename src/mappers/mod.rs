//! src/mappers/mod.rs

pub trait MapEmitter {
    fn emit(&mut self, key: &str, value: u64);
}

/// Turns one line of input into `(word, count)` emissions.
pub trait Mapper {
    fn map<E: MapEmitter>(&self, line: &[u8], emitter: &mut E);
}

mod word_counter;
pub use word_counter::{WordCounter, is_token_delimiter};
