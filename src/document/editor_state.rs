use std::sync::Arc;

use super::block::StyleSet;
use super::content::ContentState;
use super::selection::Selection;

/// Maximum number of content versions kept for undo.
const UNDO_LIMIT: usize = 100;

/// Kind of edit that produced a content version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    InsertCharacters,
    InsertFragment,
    BackspaceCharacter,
    DeleteCharacter,
    RemoveRange,
    SplitBlock,
    ChangeBlockType,
    ChangeInlineStyle,
    AdjustDepth,
}

impl ChangeType {
    /// Consecutive edits of these kinds collapse into one undo step.
    fn coalesces(self) -> bool {
        matches!(
            self,
            ChangeType::InsertCharacters
                | ChangeType::BackspaceCharacter
                | ChangeType::DeleteCharacter
        )
    }
}

/// Immutable snapshot of the editor: content, selection and undo history.
///
/// Operations never mutate a state in place; they return a new one.
#[derive(Debug, Clone)]
pub struct EditorState {
    content: Arc<ContentState>,
    selection: Selection,
    inline_style_override: Option<StyleSet>,
    last_change_type: Option<ChangeType>,
    undo_stack: Vec<Arc<ContentState>>,
    redo_stack: Vec<Arc<ContentState>>,
}

impl EditorState {
    pub fn create_empty() -> Self {
        Self::create_with_content(ContentState::empty())
    }

    /// Wraps `content` with the cursor at the start of the first block.
    pub fn create_with_content(content: ContentState) -> Self {
        let selection = Selection::collapsed(content.first_block().key().clone(), 0);
        Self {
            content: Arc::new(content),
            selection,
            inline_style_override: None,
            last_change_type: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn content(&self) -> &ContentState {
        &self.content
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn last_change_type(&self) -> Option<ChangeType> {
        self.last_change_type
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Style that newly typed text will carry.
    ///
    /// An explicit override wins. Otherwise a collapsed cursor takes the
    /// style of the character before it (the first character at offset 0),
    /// and a range takes the style of its first character. When the block
    /// offers nothing, the last character of the nearest non-empty preceding
    /// block is used.
    pub fn current_inline_style(&self) -> StyleSet {
        if let Some(styles) = &self.inline_style_override {
            return styles.clone();
        }

        let key = self.selection.start_key();
        let offset = self.selection.start_offset();
        let Some(block) = self.content.block_for_key(key) else {
            return StyleSet::new();
        };

        if self.selection.is_collapsed() {
            if offset > 0 {
                return block.inline_style_at(offset - 1);
            }
            if !block.is_empty() {
                return block.inline_style_at(0);
            }
        } else if offset < block.len() {
            return block.inline_style_at(offset);
        }

        self.look_upward_for_inline_style()
    }

    fn look_upward_for_inline_style(&self) -> StyleSet {
        let index = self.content.index_of(self.selection.start_key()).unwrap_or(0);
        self.content.blocks()[..index]
            .iter()
            .rev()
            .find(|block| !block.is_empty())
            .map(|block| block.inline_style_at(block.len() - 1))
            .unwrap_or_default()
    }

    /// New version with `content` and the selection it recorded as
    /// `selection_after`. Records an undo step unless the edit continues a
    /// run of typing.
    pub fn push(&self, content: ContentState, change_type: ChangeType) -> Self {
        let continues_run = change_type.coalesces()
            && self.last_change_type == Some(change_type)
            && content.selection_before() == &self.selection;

        let mut undo_stack = self.undo_stack.clone();
        if !continues_run || undo_stack.is_empty() {
            undo_stack.push(Arc::clone(&self.content));
            if undo_stack.len() > UNDO_LIMIT {
                undo_stack.remove(0);
            }
        }

        Self {
            selection: content.selection_after().clone(),
            content: Arc::new(content),
            inline_style_override: None,
            last_change_type: Some(change_type),
            undo_stack,
            redo_stack: Vec::new(),
        }
    }

    /// Same content with a different selection.
    pub fn with_selection(&self, selection: Selection) -> Self {
        Self {
            selection,
            inline_style_override: None,
            last_change_type: None,
            ..self.clone()
        }
    }

    pub fn with_inline_style_override(&self, styles: StyleSet) -> Self {
        Self {
            inline_style_override: Some(styles),
            ..self.clone()
        }
    }

    /// Restores the previous content version, if any.
    pub fn undo(&self) -> Option<Self> {
        let mut undo_stack = self.undo_stack.clone();
        let previous = undo_stack.pop()?;
        let mut redo_stack = self.redo_stack.clone();
        redo_stack.push(Arc::clone(&self.content));

        Some(Self {
            selection: clamp_selection(&previous, self.content.selection_before()),
            content: previous,
            inline_style_override: None,
            last_change_type: None,
            undo_stack,
            redo_stack,
        })
    }

    /// Re-applies the most recently undone content version, if any.
    pub fn redo(&self) -> Option<Self> {
        let mut redo_stack = self.redo_stack.clone();
        let next = redo_stack.pop()?;
        let mut undo_stack = self.undo_stack.clone();
        undo_stack.push(Arc::clone(&self.content));

        Some(Self {
            selection: clamp_selection(&next, next.selection_after()),
            content: next,
            inline_style_override: None,
            last_change_type: None,
            undo_stack,
            redo_stack,
        })
    }
}

/// `selection` re-anchored in `content`, whose blocks may be shorter than
/// those the selection was recorded against.
fn clamp_selection(content: &ContentState, selection: &Selection) -> Selection {
    content.selection(
        (selection.anchor_key(), selection.anchor_offset()),
        (selection.focus_key(), selection.focus_offset()),
    )
}

impl Default for EditorState {
    fn default() -> Self {
        Self::create_empty()
    }
}
