//! src/reducers/adder.rs
use crate::frequency::FrequencyTable;
use crate::reducers::Reducer;

/// Sums the counts of each word across tables, visiting tables in the order
/// given.
#[derive(Debug, Default, Clone, Copy)]
pub struct Adder;

impl Reducer for Adder {
    #[tracing::instrument(name = "Reduce chunk tables", skip_all)]
    fn reduce<I>(&self, tables: I) -> FrequencyTable
    where
        I: IntoIterator<Item = FrequencyTable>,
    {
        let mut global = FrequencyTable::new();
        let mut merged = 0usize;
        for table in tables {
            for (word, count) in table {
                global.add(&word, count);
            }
            merged += 1;
        }
        tracing::debug!(tables = merged, words = global.len(), "Merged chunk tables");
        global
    }
}

#[cfg(test)]
mod tests {
    use super::Adder;
    use crate::frequency::FrequencyTable;
    use crate::reducers::Reducer;
    use claims::assert_some_eq;

    fn table(entries: &[(&str, u64)]) -> FrequencyTable {
        entries.iter().map(|(w, c)| (*w, *c)).collect()
    }

    fn tables() -> Vec<FrequencyTable> {
        vec![
            table(&[("a", 1), ("b", 2)]),
            table(&[("b", 3), ("c", 1)]),
            FrequencyTable::new(),
            table(&[("a", 4), ("d", 1)]),
        ]
    }

    #[test]
    fn sums_counts_of_shared_words() {
        let global = Adder.reduce(tables());
        assert_some_eq!(global.get("a"), 5);
        assert_some_eq!(global.get("b"), 5);
        assert_some_eq!(global.get("c"), 1);
        assert_some_eq!(global.get("d"), 1);
        assert_eq!(global.total(), 12);
    }

    #[test]
    fn order_of_tables_does_not_matter() {
        let forward = Adder.reduce(tables());
        let mut reversed = tables();
        reversed.reverse();
        assert_eq!(Adder.reduce(reversed), forward);

        let mut rotated = tables();
        rotated.rotate_left(1);
        assert_eq!(Adder.reduce(rotated), forward);
    }

    #[test]
    fn nothing_to_reduce_gives_an_empty_table() {
        assert!(Adder.reduce(Vec::new()).is_empty());
    }
}
