//! Default editing behaviour: what happens to keystrokes and commands that
//! no custom handler claimed. Typing, deletion, block splitting, cursor
//! motion, clipboard fragments and undo/redo live here.

use super::block::{BlockKey, BlockType};
use super::editor_state::{ChangeType, EditorState};
use super::modifier;
use super::selection::Selection;
use crate::command::KeyCommand;

/// Direction of a cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
}

/// Built-in handling for `command`. Returns `None` when the command changes
/// nothing (for example backspace at the start of the document).
pub fn apply_default_command(state: &EditorState, command: &KeyCommand) -> Option<EditorState> {
    match command {
        KeyCommand::SplitBlock => Some(split_block(state)),
        KeyCommand::Backspace => backspace(state),
        KeyCommand::Delete => delete(state),
        KeyCommand::Undo => state.undo(),
        KeyCommand::Redo => state.redo(),
        KeyCommand::SelectAll => Some(select_all(state)),
        _ => None,
    }
}

/// Types `text` at the selection in the current inline style.
pub fn insert_characters(state: &EditorState, text: &str) -> EditorState {
    let content = modifier::insert_text(
        state.content(),
        state.selection(),
        text,
        &state.current_inline_style(),
    );
    state.push(content, ChangeType::InsertCharacters)
}

/// Inserts plain text that may span several lines; each line after the
/// first starts a new block.
pub fn insert_fragment(state: &EditorState, text: &str) -> EditorState {
    let style = state.current_inline_style();
    let mut content = modifier::remove_range(state.content(), state.selection());

    for (i, line) in text.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if i > 0 {
            let cursor = content.selection_after().clone();
            content = modifier::split_block(&content, &cursor);
        }
        let cursor = content.selection_after().clone();
        content = modifier::insert_text(&content, &cursor, line, &style);
    }

    let after = content.selection_after().clone();
    let content = content.with_selections(state.selection().clone(), after);
    state.push(content, ChangeType::InsertFragment)
}

/// Removes the selected range, if any.
pub fn remove_selection(state: &EditorState) -> Option<EditorState> {
    if state.selection().is_collapsed() {
        return None;
    }
    let content = modifier::remove_range(state.content(), state.selection());
    Some(state.push(content, ChangeType::RemoveRange))
}

/// Plain text of the selection, blocks separated by newlines.
pub fn selected_text(state: &EditorState) -> String {
    let selection = state.selection();
    let content = state.content();
    let range = content.block_range(selection);
    let (first, last) = (*range.start(), *range.end());

    content.blocks()[range]
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let index = first + i;
            let from = if index == first { selection.start_offset() } else { 0 };
            let to = if index == last { selection.end_offset() } else { block.len() };
            let to = to.min(block.len());
            block.slice(from.min(to)..to)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn split_block(state: &EditorState) -> EditorState {
    let content = modifier::split_block(state.content(), state.selection());
    state.push(content, ChangeType::SplitBlock)
}

/// Inserts an empty block of `block_type` after `key` and moves the cursor
/// into it.
pub fn insert_block_after(state: &EditorState, key: &BlockKey, block_type: BlockType) -> EditorState {
    let content = modifier::insert_block_after(state.content(), state.selection(), key, block_type);
    state.push(content, ChangeType::SplitBlock)
}

fn backspace(state: &EditorState) -> Option<EditorState> {
    if let Some(removed) = remove_selection(state) {
        return Some(removed);
    }

    let selection = state.selection();
    let key = selection.start_key();
    let offset = selection.start_offset();
    let content = state.content();

    if offset == 0 {
        content.block_before(key)?;
        let merged = modifier::merge_with_previous(content, selection, key);
        return Some(state.push(merged, ChangeType::BackspaceCharacter));
    }

    let range = content.selection((key, offset - 1), (key, offset));
    let next = modifier::remove_range(content, &range).with_selections(
        selection.clone(),
        Selection::collapsed(key.clone(), offset - 1),
    );
    Some(state.push(next, ChangeType::BackspaceCharacter))
}

fn delete(state: &EditorState) -> Option<EditorState> {
    if let Some(removed) = remove_selection(state) {
        return Some(removed);
    }

    let selection = state.selection();
    let key = selection.start_key();
    let offset = selection.start_offset();
    let content = state.content();
    let block = content.block_for_key(key)?;

    if offset >= block.len() {
        let following = content.block_after(key)?.key().clone();
        let merged = modifier::merge_with_previous(content, selection, &following);
        return Some(state.push(merged, ChangeType::DeleteCharacter));
    }

    let range = content.selection((key, offset), (key, offset + 1));
    let next = modifier::remove_range(content, &range)
        .with_selections(selection.clone(), selection.clone());
    Some(state.push(next, ChangeType::DeleteCharacter))
}

pub fn select_all(state: &EditorState) -> EditorState {
    let content = state.content();
    let first = content.first_block();
    let last = content.last_block();
    let selection = content.selection((first.key(), 0), (last.key(), last.len()));
    state.with_selection(selection)
}

/// Places a collapsed cursor at `offset` in block `key`.
pub fn place_cursor(state: &EditorState, key: &BlockKey, offset: usize) -> EditorState {
    let selection = state.content().selection((key, offset), (key, offset));
    state.with_selection(selection)
}

/// Moves the focus end of the selection to `offset` in block `key`, keeping
/// the anchor where it is.
pub fn extend_selection(state: &EditorState, key: &BlockKey, offset: usize) -> EditorState {
    let current = state.selection();
    let selection = state
        .content()
        .selection((current.anchor_key(), current.anchor_offset()), (key, offset));
    state.with_selection(selection)
}

/// Moves the cursor by `motion`. With `extend` the anchor stays put and the
/// selection grows; otherwise a range collapses toward the motion first.
pub fn move_cursor(state: &EditorState, motion: Motion, extend: bool) -> EditorState {
    let selection = state.selection();
    let content = state.content();

    if !extend && !selection.is_collapsed() {
        match motion {
            Motion::Left => {
                return place_cursor(state, selection.start_key(), selection.start_offset());
            }
            Motion::Right => {
                return place_cursor(state, selection.end_key(), selection.end_offset());
            }
            _ => {}
        }
    }

    let key = selection.focus_key();
    let offset = selection.focus_offset();
    let Some(index) = content.index_of(key) else {
        return state.clone();
    };
    let blocks = content.blocks();
    let block = &blocks[index];

    let (target_key, target_offset) = match motion {
        Motion::Left if offset > 0 => (key, offset - 1),
        Motion::Left => match index.checked_sub(1) {
            Some(i) => (blocks[i].key(), blocks[i].len()),
            None => (key, 0),
        },
        Motion::Right if offset < block.len() => (key, offset + 1),
        Motion::Right => match blocks.get(index + 1) {
            Some(next) => (next.key(), 0),
            None => (key, block.len()),
        },
        Motion::Up => match index.checked_sub(1) {
            Some(i) => (blocks[i].key(), offset.min(blocks[i].len())),
            None => (key, 0),
        },
        Motion::Down => match blocks.get(index + 1) {
            Some(next) => (next.key(), offset.min(next.len())),
            None => (key, block.len()),
        },
        Motion::LineStart => (key, 0),
        Motion::LineEnd => (key, block.len()),
        Motion::DocumentStart => (content.first_block().key(), 0),
        Motion::DocumentEnd => {
            let last = content.last_block();
            (last.key(), last.len())
        }
    };

    if extend {
        extend_selection(state, target_key, target_offset)
    } else {
        place_cursor(state, target_key, target_offset)
    }
}
