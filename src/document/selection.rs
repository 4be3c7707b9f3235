use super::block::BlockKey;

/// A range between an anchor and a focus position.
///
/// `is_backward` records whether the focus precedes the anchor in document
/// order; it is computed by [`ContentState::selection`](super::ContentState::selection)
/// when both ends are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    anchor_key: BlockKey,
    anchor_offset: usize,
    focus_key: BlockKey,
    focus_offset: usize,
    is_backward: bool,
}

impl Selection {
    /// A cursor with no selected range.
    pub fn collapsed(key: BlockKey, offset: usize) -> Self {
        Self {
            anchor_key: key.clone(),
            anchor_offset: offset,
            focus_key: key,
            focus_offset: offset,
            is_backward: false,
        }
    }

    pub(crate) fn new(
        anchor_key: BlockKey,
        anchor_offset: usize,
        focus_key: BlockKey,
        focus_offset: usize,
        is_backward: bool,
    ) -> Self {
        Self {
            anchor_key,
            anchor_offset,
            focus_key,
            focus_offset,
            is_backward,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor_key == self.focus_key && self.anchor_offset == self.focus_offset
    }

    pub fn is_backward(&self) -> bool {
        self.is_backward
    }

    pub fn anchor_key(&self) -> &BlockKey {
        &self.anchor_key
    }

    pub fn anchor_offset(&self) -> usize {
        self.anchor_offset
    }

    pub fn focus_key(&self) -> &BlockKey {
        &self.focus_key
    }

    pub fn focus_offset(&self) -> usize {
        self.focus_offset
    }

    pub fn start_key(&self) -> &BlockKey {
        if self.is_backward { &self.focus_key } else { &self.anchor_key }
    }

    pub fn start_offset(&self) -> usize {
        if self.is_backward { self.focus_offset } else { self.anchor_offset }
    }

    pub fn end_key(&self) -> &BlockKey {
        if self.is_backward { &self.anchor_key } else { &self.focus_key }
    }

    pub fn end_offset(&self) -> usize {
        if self.is_backward { self.anchor_offset } else { self.focus_offset }
    }
}
