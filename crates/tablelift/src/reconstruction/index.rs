use ahash::AHashMap;

use crate::blocks::{Block, BlockType};
use crate::{Result, TableliftError};

/// Id → block lookup over one recognition response, plus its TABLE blocks in
/// response order.
///
/// Borrows the response; built once per request and read-only afterwards.
#[derive(Debug, Default)]
pub struct BlockIndex<'a> {
    blocks: AHashMap<&'a str, &'a Block>,
    tables: Vec<&'a Block>,
}

impl<'a> BlockIndex<'a> {
    /// Index `blocks`. An empty slice produces an empty index with no tables.
    ///
    /// A duplicated id keeps the last block seen under it.
    pub fn build(blocks: &'a [Block]) -> Self {
        let mut index = Self {
            blocks: AHashMap::with_capacity(blocks.len()),
            tables: Vec::new(),
        };

        for block in blocks {
            index.blocks.insert(block.id.as_str(), block);
            if block.block_type == BlockType::Table {
                index.tables.push(block);
            }
        }

        index
    }

    /// Resolve `id`, failing with a structural error when the graph is not closed.
    pub fn get(&self, id: &str) -> Result<&'a Block> {
        self.blocks
            .get(id)
            .copied()
            .ok_or_else(|| TableliftError::structure(format!("Block '{}' is referenced but missing from the response", id)))
    }

    /// Resolve every `CHILD` id of `parent`, in order.
    pub fn children(&self, parent: &'a Block) -> impl Iterator<Item = Result<&'a Block>> + '_ {
        parent.child_ids().map(move |id| {
            self.get(id).map_err(|_| {
                TableliftError::structure(format!(
                    "Block '{}' references missing child '{}'",
                    parent.id, id
                ))
            })
        })
    }

    /// TABLE blocks in the order they appeared in the response.
    pub fn tables(&self) -> &[&'a Block] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
