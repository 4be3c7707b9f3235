//! Rich text commands built on the content modifiers: style toggles,
//! indentation, soft newlines and the named key command table.

use super::block::{BlockType, InlineStyle};
use super::editor_state::{ChangeType, EditorState};
use super::modifier;
use crate::command::KeyCommand;

/// Applies the rich text meaning of `command`, or returns `None` when the
/// command has none and default editing should take over.
pub fn handle_key_command(state: &EditorState, command: &KeyCommand) -> Option<EditorState> {
    match command {
        KeyCommand::Bold => Some(toggle_inline_style(state, InlineStyle::Bold)),
        KeyCommand::Italic => Some(toggle_inline_style(state, InlineStyle::Italic)),
        KeyCommand::Underline => Some(toggle_inline_style(state, InlineStyle::Underline)),
        KeyCommand::Code => Some(toggle_inline_style(state, InlineStyle::Code)),
        KeyCommand::Strikethrough => Some(toggle_inline_style(state, InlineStyle::Strikethrough)),
        KeyCommand::Backspace => on_backspace(state),
        _ => None,
    }
}

/// Toggles `style` on the selection. A collapsed cursor only changes the
/// style that the next typed characters will carry.
pub fn toggle_inline_style(state: &EditorState, style: InlineStyle) -> EditorState {
    let selection = state.selection();
    let mut current = state.current_inline_style();

    if selection.is_collapsed() {
        if !current.remove(&style) {
            current.insert(style);
        }
        return state.with_inline_style_override(current);
    }

    let content = if current.contains(&style) {
        modifier::remove_inline_style(state.content(), selection, style)
    } else {
        modifier::apply_inline_style(state.content(), selection, style)
    };
    state.push(content, ChangeType::ChangeInlineStyle)
}

/// Sets `block_type` on the selected blocks, or resets them to unstyled when
/// the first selected block already has that type.
///
/// A selection ending at offset zero of a later block (as left by a triple
/// click) stops at the end of the block before it, so that block is not
/// retyped.
pub fn toggle_block_type(state: &EditorState, block_type: BlockType) -> EditorState {
    let selection = state.selection();
    let content = state.content();
    let current = content
        .block_for_key(selection.start_key())
        .map(|block| block.block_type());

    let mut target = selection.clone();
    if selection.start_key() != selection.end_key() && selection.end_offset() == 0 {
        if let Some(before) = content.block_before(selection.end_key()) {
            target = content.selection(
                (selection.start_key(), selection.start_offset()),
                (before.key(), before.len()),
            );
        }
    }

    let block_type = if current == Some(block_type) {
        BlockType::Unstyled
    } else {
        block_type
    };
    let next = modifier::set_block_type(content, &target, block_type);
    state.push(next, ChangeType::ChangeBlockType)
}

/// Indents (or with `shift`, outdents) the list item under a single-block
/// selection by one level. Only an item directly below another list item
/// can move, and never deeper than one level past that item or
/// `max_depth`. Anything else returns the state unchanged.
pub fn on_tab(state: &EditorState, shift: bool, max_depth: u8) -> EditorState {
    let selection = state.selection();
    if selection.anchor_key() != selection.focus_key() {
        return state.clone();
    }

    let content = state.content();
    let key = selection.anchor_key();
    let Some(block) = content.block_for_key(key) else {
        return state.clone();
    };
    if !block.block_type().is_list_item() {
        return state.clone();
    }

    let Some(above) = content.block_before(key) else {
        return state.clone();
    };
    if !above.block_type().is_list_item() {
        return state.clone();
    }

    let depth = block.depth();
    if (!shift && depth >= max_depth) || (shift && depth == 0) {
        return state.clone();
    }

    let max_depth = max_depth.min(above.depth().saturating_add(1));
    let adjustment = if shift { -1 } else { 1 };
    let next = modifier::adjust_block_depth(content, selection, adjustment, max_depth);
    if next == *content {
        return state.clone();
    }
    state.push(next, ChangeType::AdjustDepth)
}

/// Inserts a line break inside the current block, in the current style.
pub fn insert_soft_newline(state: &EditorState) -> EditorState {
    let content = modifier::insert_text(
        state.content(),
        state.selection(),
        "\n",
        &state.current_inline_style(),
    );
    state.push(content, ChangeType::InsertCharacters)
}

/// Backspace at the very start of a styled block removes the block style
/// instead of joining it with the block above.
pub fn on_backspace(state: &EditorState) -> Option<EditorState> {
    let selection = state.selection();
    if !selection.is_collapsed() || selection.anchor_offset() != 0 {
        return None;
    }
    try_to_remove_block_style(state)
}

/// Resets the block under a cursor at offset zero to unstyled. A code block
/// following a non-empty code block is left alone so the two can be joined.
pub fn try_to_remove_block_style(state: &EditorState) -> Option<EditorState> {
    let selection = state.selection();
    if !selection.is_collapsed() || selection.start_offset() != 0 {
        return None;
    }

    let content = state.content();
    let key = selection.start_key();
    let block = content.block_for_key(key)?;
    let block_type = block.block_type();

    if block_type == BlockType::CodeBlock {
        let before = content.block_before(key);
        if before.is_some_and(|b| b.block_type() == BlockType::CodeBlock && !b.is_empty()) {
            return None;
        }
    }

    if block_type == BlockType::Unstyled {
        return None;
    }

    let next = modifier::set_block_type(content, selection, BlockType::Unstyled);
    Some(state.push(next, ChangeType::ChangeBlockType))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ContentBlock, ContentState, Selection};

    fn state_with(blocks: Vec<ContentBlock>, selection: Selection) -> EditorState {
        EditorState::create_with_content(ContentState::new(blocks)).with_selection(selection)
    }

    #[test]
    fn collapsed_toggle_sets_an_override() {
        let state = state_with(
            vec![ContentBlock::new("a".into(), BlockType::Unstyled, "abc")],
            Selection::collapsed("a".into(), 3),
        );
        let next = toggle_inline_style(&state, InlineStyle::Bold);
        assert!(next.current_inline_style().contains(&InlineStyle::Bold));
        assert_eq!(next.content(), state.content());
    }

    #[test]
    fn range_toggle_removes_a_style_already_present() {
        let block = ContentBlock::new("a".into(), BlockType::Unstyled, "abc")
            .with_style(0..3, InlineStyle::Bold);
        let content = ContentState::new(vec![block]);
        let selection = content.selection((&"a".into(), 0), (&"a".into(), 2));
        let state = EditorState::create_with_content(content).with_selection(selection);

        let next = toggle_inline_style(&state, InlineStyle::Bold);
        let block = next.content().first_block();
        assert!(block.inline_style_at(1).is_empty());
        assert!(block.inline_style_at(2).contains(&InlineStyle::Bold));
    }

    #[test]
    fn toggle_block_type_twice_returns_to_unstyled() {
        let state = state_with(
            vec![ContentBlock::new("a".into(), BlockType::Unstyled, "abc")],
            Selection::collapsed("a".into(), 0),
        );
        let quoted = toggle_block_type(&state, BlockType::Blockquote);
        assert_eq!(quoted.content().first_block().block_type(), BlockType::Blockquote);
        let plain = toggle_block_type(&quoted, BlockType::Blockquote);
        assert_eq!(plain.content().first_block().block_type(), BlockType::Unstyled);
    }

    #[test]
    fn backspace_at_start_of_heading_removes_the_heading() {
        let state = state_with(
            vec![ContentBlock::new("a".into(), BlockType::HeaderTwo, "Title")],
            Selection::collapsed("a".into(), 0),
        );
        let next = handle_key_command(&state, &KeyCommand::Backspace).unwrap();
        assert_eq!(next.content().first_block().block_type(), BlockType::Unstyled);
        assert_eq!(next.content().first_block().text(), "Title");
    }

    #[test]
    fn split_block_is_not_a_rich_text_command() {
        let state = EditorState::create_empty();
        assert!(handle_key_command(&state, &KeyCommand::SplitBlock).is_none());
    }

    #[test]
    fn triple_click_selection_leaves_the_next_block_alone() {
        let content = ContentState::new(vec![
            ContentBlock::new("a".into(), BlockType::Unstyled, "first"),
            ContentBlock::new("b".into(), BlockType::Unstyled, "second"),
        ]);
        let selection = content.selection((&"a".into(), 0), (&"b".into(), 0));
        let state = EditorState::create_with_content(content).with_selection(selection);

        let next = toggle_block_type(&state, BlockType::HeaderOne);
        let blocks = next.content().blocks();
        assert_eq!(blocks[0].block_type(), BlockType::HeaderOne);
        assert_eq!(blocks[1].block_type(), BlockType::Unstyled);
        assert_eq!(next.selection().end_key(), blocks[0].key());
        assert_eq!(next.selection().end_offset(), 5);
    }

    #[test]
    fn tab_nests_at_most_one_level_below_the_item_above() {
        let state = state_with(
            vec![
                ContentBlock::new("a".into(), BlockType::UnorderedListItem, "one"),
                ContentBlock::new("b".into(), BlockType::UnorderedListItem, "two"),
            ],
            Selection::collapsed("b".into(), 0),
        );
        let once = on_tab(&state, false, 4);
        assert_eq!(once.content().blocks()[1].depth(), 1);
        let twice = on_tab(&once, false, 4);
        assert_eq!(twice.content().blocks()[1].depth(), 1);
        let undone = twice.undo().map(|s| s.content().blocks()[1].depth());
        assert_eq!(undone, Some(0));
    }

    #[test]
    fn tab_on_first_list_item_changes_nothing() {
        let state = state_with(
            vec![ContentBlock::new("a".into(), BlockType::OrderedListItem, "one")],
            Selection::collapsed("a".into(), 0),
        );
        let next = on_tab(&state, false, 4);
        assert_eq!(next.content().first_block().depth(), 0);
        assert!(!next.can_undo());
    }
}
