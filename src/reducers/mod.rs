//! src/reducers/mod.rs
use crate::frequency::FrequencyTable;

/// Folds per-chunk tables into one.
pub trait Reducer {
    fn reduce<I>(&self, tables: I) -> FrequencyTable
    where
        I: IntoIterator<Item = FrequencyTable>;
}

mod adder;
pub use adder::Adder;
