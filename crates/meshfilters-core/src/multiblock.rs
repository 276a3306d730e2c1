//! A labeled, indexed collection of datasets.

use crate::bounds::Bounds;
use crate::dataset::Dataset;

/// One entry of a [`MultiBlock`].
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    index: usize,
    name: String,
    dataset: Dataset,
}

impl Block {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }
}

/// An ordered collection of `(index, name, dataset)` blocks with unique indices.
///
/// Blocks are kept sorted by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiBlock {
    blocks: Vec<Block>,
}

impl MultiBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the block at `index`, replacing any block already stored there.
    pub fn set(&mut self, index: usize, name: impl Into<String>, dataset: Dataset) {
        let block = Block {
            index,
            name: name.into(),
            dataset,
        };
        match self.blocks.binary_search_by_key(&index, |b| b.index) {
            Ok(pos) => self.blocks[pos] = block,
            Err(pos) => self.blocks.insert(pos, block),
        }
    }

    /// Returns the dataset at `index`.
    pub fn get(&self, index: usize) -> Option<&Dataset> {
        self.block(index).map(Block::dataset)
    }

    /// Returns the block at `index`.
    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks
            .binary_search_by_key(&index, |b| b.index)
            .ok()
            .map(|pos| &self.blocks[pos])
    }

    /// Returns the first dataset whose block has the given name.
    pub fn get_by_name(&self, name: &str) -> Option<&Dataset> {
        self.blocks
            .iter()
            .find(|b| b.name == name)
            .map(Block::dataset)
    }

    /// Returns the number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns the block names in index order.
    pub fn names(&self) -> Vec<&str> {
        self.blocks.iter().map(Block::name).collect()
    }

    /// Iterates over the blocks in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    /// Returns the union of the bounds of all non-empty blocks.
    pub fn bounds(&self) -> Option<Bounds> {
        self.blocks
            .iter()
            .filter(|b| b.dataset.n_points() > 0)
            .map(|b| b.dataset.bounds())
            .reduce(|a, b| a.union(&b))
    }
}

impl IntoIterator for MultiBlock {
    type Item = Block;
    type IntoIter = std::vec::IntoIter<Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}

impl<'a> IntoIterator for &'a MultiBlock {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
