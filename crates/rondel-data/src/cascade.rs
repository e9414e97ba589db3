//! Tree-shaped cascading factory (province → city → district).

use crate::{DataSource, FactoryError, IndexedSource, SourceFactory};

/// One node of a cascade tree: a selectable value plus the options it opens
/// up in the next column.
#[derive(Clone, Debug)]
pub struct CascadeNode<T> {
    pub value: T,
    pub children: Vec<CascadeNode<T>>,
}

impl<T> CascadeNode<T> {
    pub fn leaf(value: T) -> Self {
        Self {
            value,
            children: Vec::new(),
        }
    }

    pub fn with_children(value: T, children: Vec<CascadeNode<T>>) -> Self {
        Self { value, children }
    }
}

/// Cascadable factory over a fixed-depth value tree. Column `i` offers the
/// siblings at depth `i` along the currently selected path; committing a
/// value re-resolves everything below it.
pub struct CascadeFactory<T> {
    roots: Vec<CascadeNode<T>>,
    depth: usize,
}

impl<T: Clone + PartialEq + std::fmt::Display + 'static> CascadeFactory<T> {
    /// Fails fast on an empty tree or any path shallower than `depth`.
    pub fn new(roots: Vec<CascadeNode<T>>, depth: usize) -> Result<Self, FactoryError> {
        if roots.is_empty() {
            return Err(FactoryError::EmptyCascade);
        }
        check_depth(&roots, depth, 0)?;
        Ok(Self { roots, depth })
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Walks the tree selecting `values` where present (first sibling
    /// otherwise), emitting a source per level from `emit_from` on.
    fn build(&self, values: &[Option<T>], emit_from: usize) -> Vec<Box<dyn DataSource<T>>> {
        let mut siblings = &self.roots;
        let mut sources: Vec<Box<dyn DataSource<T>>> = Vec::new();

        for level in 0..self.depth {
            let requested = values.get(level).and_then(Option::as_ref);
            let chosen_index = match requested {
                Some(value) => match siblings.iter().position(|node| node.value == *value) {
                    Some(index) => index,
                    None => {
                        log::debug!(
                            "cascade value at level {level} no longer exists; using first sibling"
                        );
                        0
                    }
                },
                None => 0,
            };

            if level >= emit_from {
                let items: Vec<T> = siblings.iter().map(|node| node.value.clone()).collect();
                let source = IndexedSource::new(items, chosen_index, false)
                    .unwrap_or_else(|_| unreachable!("tree depth validated at construction"));
                sources.push(Box::new(source));
            }

            siblings = &siblings[chosen_index].children;
        }
        sources
    }
}

fn check_depth<T>(
    nodes: &[CascadeNode<T>],
    declared: usize,
    level: usize,
) -> Result<(), FactoryError> {
    if level >= declared {
        return Ok(());
    }
    if nodes.is_empty() {
        return Err(FactoryError::RaggedCascade {
            declared,
            found: level,
        });
    }
    for node in nodes {
        check_depth(&node.children, declared, level + 1)?;
    }
    Ok(())
}

impl<T: Clone + PartialEq + std::fmt::Display + 'static> SourceFactory<T> for CascadeFactory<T> {
    fn cascadable(&self) -> bool {
        true
    }

    fn create(&self) -> Vec<Box<dyn DataSource<T>>> {
        self.build(&[], 0)
    }

    fn change(
        &self,
        values: &[Option<T>],
        from: Option<usize>,
    ) -> Vec<Box<dyn DataSource<T>>> {
        self.build(values, from.map_or(0, |i| i + 1))
    }
}
