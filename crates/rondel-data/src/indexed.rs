//! Flat indexable list source.

use crate::{DataSource, FactoryError};

/// A source over an in-memory item list, optionally wrapping at the ends.
pub struct IndexedSource<T> {
    items: Vec<T>,
    init_index: usize,
    looping: bool,
}

impl<T: Clone + PartialEq> IndexedSource<T> {
    /// Fails fast on an empty list or an out-of-range initial index.
    pub fn new(items: Vec<T>, init_index: usize, looping: bool) -> Result<Self, FactoryError> {
        if items.is_empty() {
            return Err(FactoryError::EmptyItems);
        }
        if init_index >= items.len() {
            return Err(FactoryError::InitOutOfRange {
                index: init_index,
                len: items.len(),
            });
        }
        Ok(Self {
            items,
            init_index,
            looping,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn index_of(&self, value: &T) -> Option<usize> {
        self.items.iter().position(|item| item == value)
    }
}

impl<T: Clone + PartialEq + std::fmt::Display> DataSource<T> for IndexedSource<T> {
    fn init(&self) -> Option<T> {
        Some(self.items[self.init_index].clone())
    }

    fn prev(&self, current: &Option<T>) -> Option<T> {
        let index = self.index_of(current.as_ref()?)?;
        if index > 0 {
            Some(self.items[index - 1].clone())
        } else if self.looping {
            Some(self.items[self.items.len() - 1].clone())
        } else {
            None
        }
    }

    fn next(&self, current: &Option<T>) -> Option<T> {
        let index = self.index_of(current.as_ref()?)?;
        if index + 1 < self.items.len() {
            Some(self.items[index + 1].clone())
        } else if self.looping {
            Some(self.items[0].clone())
        } else {
            None
        }
    }

    fn text(&self, current: &Option<T>) -> String {
        match current {
            Some(value) => value.to_string(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(looping: bool) -> IndexedSource<char> {
        IndexedSource::new(vec!['a', 'b', 'c', 'd'], 1, looping).unwrap()
    }

    #[test]
    fn init_is_configured_item() {
        let source = letters(false);
        assert_eq!(source.init(), Some('b'));
        assert_eq!(source.len(), 4);
        assert!(!source.is_empty());
    }

    #[test]
    fn steps_both_directions() {
        let source = letters(false);
        assert_eq!(source.next(&Some('b')), Some('c'));
        assert_eq!(source.prev(&Some('b')), Some('a'));
    }

    #[test]
    fn bounded_edges_return_none() {
        let source = letters(false);
        assert_eq!(source.prev(&Some('a')), None);
        assert_eq!(source.next(&Some('d')), None);
        assert_eq!(source.prev(&None), None);
        assert_eq!(source.next(&None), None);
    }

    #[test]
    fn looping_edges_wrap() {
        let source = letters(true);
        assert_eq!(source.prev(&Some('a')), Some('d'));
        assert_eq!(source.next(&Some('d')), Some('a'));
    }

    #[test]
    fn round_trip_away_from_edges() {
        let source = letters(false);
        for value in ['b', 'c', 'd'] {
            let prev = source.prev(&Some(value));
            assert_eq!(source.next(&prev), Some(value));
        }
    }

    #[test]
    fn text_formats_value_and_empty_none() {
        let source = letters(false);
        assert_eq!(source.text(&Some('c')), "c");
        assert_eq!(source.text(&None), "");
    }

    #[test]
    fn rejects_bad_configuration() {
        assert!(matches!(
            IndexedSource::<char>::new(vec![], 0, false),
            Err(FactoryError::EmptyItems)
        ));
        assert!(matches!(
            IndexedSource::new(vec!['a'], 3, false),
            Err(FactoryError::InitOutOfRange { index: 3, len: 1 })
        ));
    }
}
