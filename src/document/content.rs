use std::ops::RangeInclusive;

use super::block::{BlockKey, BlockType, ContentBlock};
use super::selection::Selection;

/// The body of a document: an ordered, never empty sequence of blocks.
///
/// Every editing operation produces a new `ContentState` and records the
/// selection the edit should leave behind in `selection_after`.
#[derive(Debug, Clone)]
pub struct ContentState {
    blocks: Vec<ContentBlock>,
    selection_before: Selection,
    selection_after: Selection,
}

impl ContentState {
    /// Builds content from `blocks`; an empty list becomes one empty
    /// unstyled block.
    pub fn new(mut blocks: Vec<ContentBlock>) -> Self {
        if blocks.is_empty() {
            blocks.push(ContentBlock::empty(BlockKey::generate(), BlockType::Unstyled));
        }
        let start = Selection::collapsed(blocks[0].key().clone(), 0);
        Self {
            blocks,
            selection_before: start.clone(),
            selection_after: start,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn first_block(&self) -> &ContentBlock {
        &self.blocks[0]
    }

    pub fn last_block(&self) -> &ContentBlock {
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn block_for_key(&self, key: &BlockKey) -> Option<&ContentBlock> {
        self.blocks.iter().find(|block| block.key() == key)
    }

    pub fn index_of(&self, key: &BlockKey) -> Option<usize> {
        self.blocks.iter().position(|block| block.key() == key)
    }

    pub fn block_before(&self, key: &BlockKey) -> Option<&ContentBlock> {
        let index = self.index_of(key)?;
        index.checked_sub(1).map(|i| &self.blocks[i])
    }

    pub fn block_after(&self, key: &BlockKey) -> Option<&ContentBlock> {
        let index = self.index_of(key)?;
        self.blocks.get(index + 1)
    }

    pub fn selection_before(&self) -> &Selection {
        &self.selection_before
    }

    pub fn selection_after(&self) -> &Selection {
        &self.selection_after
    }

    /// Whether any block holds text.
    pub fn has_text(&self) -> bool {
        self.blocks.len() > 1 || !self.blocks[0].is_empty()
    }

    /// Text of all blocks joined by newlines.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(ContentBlock::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Selection from anchor to focus with the direction filled in. Offsets
    /// are clamped to the block lengths; unknown keys fall back to the
    /// document start.
    pub fn selection(
        &self,
        anchor: (&BlockKey, usize),
        focus: (&BlockKey, usize),
    ) -> Selection {
        let (anchor_index, anchor_offset) = self.clamp_point(anchor);
        let (focus_index, focus_offset) = self.clamp_point(focus);
        let is_backward = (focus_index, focus_offset) < (anchor_index, anchor_offset);
        Selection::new(
            self.blocks[anchor_index].key().clone(),
            anchor_offset,
            self.blocks[focus_index].key().clone(),
            focus_offset,
            is_backward,
        )
    }

    /// Indices of the blocks touched by `selection`.
    pub fn block_range(&self, selection: &Selection) -> RangeInclusive<usize> {
        let start = self.index_of(selection.start_key()).unwrap_or(0);
        let end = self.index_of(selection.end_key()).unwrap_or(start);
        start..=end.max(start)
    }

    /// A key not used by any block in this document.
    pub fn generate_key(&self) -> BlockKey {
        loop {
            let key = BlockKey::generate();
            if self.block_for_key(&key).is_none() {
                return key;
            }
        }
    }

    fn clamp_point(&self, (key, offset): (&BlockKey, usize)) -> (usize, usize) {
        match self.index_of(key) {
            Some(index) => (index, offset.min(self.blocks[index].len())),
            None => (0, 0),
        }
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut Vec<ContentBlock> {
        &mut self.blocks
    }

    pub(crate) fn block_mut(&mut self, key: &BlockKey) -> Option<&mut ContentBlock> {
        self.blocks.iter_mut().find(|block| block.key() == key)
    }

    pub(crate) fn with_selections(mut self, before: Selection, after: Selection) -> Self {
        self.selection_before = before;
        self.selection_after = after;
        self
    }
}

impl Default for ContentState {
    fn default() -> Self {
        Self::empty()
    }
}

/// Two contents are equal when their blocks are; the selection bookkeeping
/// of the edit that produced them is ignored.
impl PartialEq for ContentState {
    fn eq(&self, other: &Self) -> bool {
        self.blocks == other.blocks
    }
}

impl Eq for ContentState {}
