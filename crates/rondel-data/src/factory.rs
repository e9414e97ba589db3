//! Column-set factories.

use crate::{DataSource, FactoryError, IndexedSource};

/// Builds the ordered set of [`DataSource`]s behind a multi-column picker.
///
/// A *cascadable* factory must be re-consulted whenever a column value is
/// committed: [`change`](Self::change) recomputes the sources for every
/// column after the one that moved. Non-cascadable factories still implement
/// `change` for the reset path (cancel / programmatic set).
pub trait SourceFactory<T: Clone + PartialEq> {
    /// Whether committing column `i` invalidates columns `i+1..`.
    fn cascadable(&self) -> bool;

    /// One pre-seeded source per column, in column order.
    fn create(&self) -> Vec<Box<dyn DataSource<T>>>;

    /// Updated sources for the columns after `from`, given the just-committed
    /// tuple. `from == None` rebuilds every column (external reset);
    /// `from == Some(i)` returns sources for columns `i+1..` only. Columns at
    /// or before `from` keep their existing sources — their commitment
    /// already happened.
    fn change(
        &self,
        values: &[Option<T>],
        from: Option<usize>,
    ) -> Vec<Box<dyn DataSource<T>>>;
}

/// Independent flat columns: no cascade, each column its own item list.
pub struct ListFactory<T> {
    columns: Vec<ListColumn<T>>,
}

struct ListColumn<T> {
    items: Vec<T>,
    init_index: usize,
    looping: bool,
}

impl<T: Clone + PartialEq + std::fmt::Display + 'static> ListFactory<T> {
    pub fn new() -> Self {
        Self { columns: Vec::new() }
    }

    /// Appends a column. Fails fast on an empty list or out-of-range index.
    pub fn column(
        mut self,
        items: Vec<T>,
        init_index: usize,
        looping: bool,
    ) -> Result<Self, FactoryError> {
        if items.is_empty() {
            return Err(FactoryError::EmptyItems);
        }
        if init_index >= items.len() {
            return Err(FactoryError::InitOutOfRange {
                index: init_index,
                len: items.len(),
            });
        }
        self.columns.push(ListColumn {
            items,
            init_index,
            looping,
        });
        Ok(self)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn source_for(&self, column: &ListColumn<T>, seed: Option<&T>) -> Box<dyn DataSource<T>> {
        let index = seed
            .and_then(|value| column.items.iter().position(|item| item == value))
            .unwrap_or(column.init_index);
        let source = IndexedSource::new(column.items.clone(), index, column.looping)
            .unwrap_or_else(|_| unreachable!("column validated at construction"));
        Box::new(source)
    }
}

impl<T: Clone + PartialEq + std::fmt::Display + 'static> Default for ListFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + PartialEq + std::fmt::Display + 'static> SourceFactory<T> for ListFactory<T> {
    fn cascadable(&self) -> bool {
        false
    }

    fn create(&self) -> Vec<Box<dyn DataSource<T>>> {
        self.columns
            .iter()
            .map(|column| self.source_for(column, None))
            .collect()
    }

    fn change(
        &self,
        values: &[Option<T>],
        from: Option<usize>,
    ) -> Vec<Box<dyn DataSource<T>>> {
        let first = from.map_or(0, |i| i + 1);
        self.columns
            .iter()
            .enumerate()
            .skip(first)
            .map(|(i, column)| {
                self.source_for(column, values.get(i).and_then(Option::as_ref))
            })
            .collect()
    }
}
