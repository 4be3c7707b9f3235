//! Content transformations. Each function takes a content version and a
//! selection and returns a new content version whose `selection_after`
//! tells where the cursor belongs after the edit.

use super::block::{BlockKey, BlockType, ContentBlock, InlineStyle, StyleSet};
use super::content::ContentState;
use super::selection::Selection;

/// Deletes the selected range, joining the first and last touched blocks.
/// The cursor ends up collapsed at the start of the range.
pub fn remove_range(content: &ContentState, selection: &Selection) -> ContentState {
    let start_key = selection.start_key().clone();
    let start_offset = selection.start_offset();
    let after = Selection::collapsed(start_key.clone(), start_offset);

    if selection.is_collapsed() {
        return content.clone().with_selections(selection.clone(), after);
    }

    let range = content.block_range(selection);
    let mut next = content.clone();
    let blocks = next.blocks_mut();

    let (tail_text, tail_styles) = {
        let end_block = &mut blocks[*range.end()];
        end_block.split_off(selection.end_offset())
    };

    let start_block = &mut blocks[*range.start()];
    start_block.split_off(start_offset);
    start_block.append(&tail_text, &tail_styles);

    blocks.drain(range.start() + 1..=*range.end());
    next.with_selections(selection.clone(), after)
}

/// Inserts `text` at the selection, replacing any selected range. Every
/// inserted character carries `style`.
pub fn insert_text(
    content: &ContentState,
    selection: &Selection,
    text: &str,
    style: &StyleSet,
) -> ContentState {
    let removed = remove_range(content, selection);
    let cursor = removed.selection_after().clone();
    let key = cursor.start_key().clone();
    let offset = cursor.start_offset();

    let mut next = removed;
    if let Some(block) = next.block_mut(&key) {
        block.replace_range(offset..offset, text, style);
    }
    let after = Selection::collapsed(key, offset + text.chars().count());
    next.with_selections(selection.clone(), after)
}

/// Splits the block at the cursor into two blocks of the same type.
///
/// An empty list item is not split: it is outdented by one level, or turned
/// into an unstyled block when already at depth zero.
pub fn split_block(content: &ContentState, selection: &Selection) -> ContentState {
    let removed = remove_range(content, selection);
    let cursor = removed.selection_after().clone();
    let key = cursor.start_key().clone();
    let offset = cursor.start_offset();

    let Some(index) = removed.index_of(&key) else {
        return removed;
    };
    let new_key = removed.generate_key();
    let mut next = removed;
    let blocks = next.blocks_mut();
    let block = &mut blocks[index];

    if block.block_type().is_list_item() && block.is_empty() {
        if block.depth() > 0 {
            block.set_depth(block.depth() - 1);
        } else {
            block.set_type(BlockType::Unstyled);
        }
        return next.with_selections(selection.clone(), cursor);
    }

    let (tail_text, tail_styles) = block.split_off(offset);
    let new_block = ContentBlock::from_parts(
        new_key.clone(),
        block.block_type(),
        tail_text,
        tail_styles,
        block.depth(),
    );
    blocks.insert(index + 1, new_block);
    next.with_selections(selection.clone(), Selection::collapsed(new_key, 0))
}

/// Inserts an empty block of `block_type` right after the block `key`, with
/// the cursor placed inside it.
pub fn insert_block_after(
    content: &ContentState,
    selection: &Selection,
    key: &BlockKey,
    block_type: BlockType,
) -> ContentState {
    let Some(index) = content.index_of(key) else {
        return content.clone();
    };
    let new_key = content.generate_key();
    let mut next = content.clone();
    next.blocks_mut()
        .insert(index + 1, ContentBlock::empty(new_key.clone(), block_type));
    next.with_selections(selection.clone(), Selection::collapsed(new_key, 0))
}

/// Joins the block `key` onto the end of the block before it. The cursor
/// lands at the join point.
pub fn merge_with_previous(
    content: &ContentState,
    selection: &Selection,
    key: &BlockKey,
) -> ContentState {
    let Some(index) = content.index_of(key).filter(|&i| i > 0) else {
        return content.clone();
    };
    let mut next = content.clone();
    let blocks = next.blocks_mut();
    let removed = blocks.remove(index);
    let previous = &mut blocks[index - 1];
    let join = previous.len();
    previous.append(removed.text(), removed.styles());
    let after = Selection::collapsed(previous.key().clone(), join);
    next.with_selections(selection.clone(), after)
}

/// Sets the type of every block touched by `selection`.
pub fn set_block_type(
    content: &ContentState,
    selection: &Selection,
    block_type: BlockType,
) -> ContentState {
    let range = content.block_range(selection);
    let mut next = content.clone();
    for block in &mut next.blocks_mut()[range] {
        block.set_type(block_type);
    }
    next.with_selections(selection.clone(), selection.clone())
}

/// Shifts the depth of every block touched by `selection` by `adjustment`,
/// keeping it within `0..=max_depth`.
pub fn adjust_block_depth(
    content: &ContentState,
    selection: &Selection,
    adjustment: i8,
    max_depth: u8,
) -> ContentState {
    let range = content.block_range(selection);
    let mut next = content.clone();
    for block in &mut next.blocks_mut()[range] {
        let depth = (i16::from(block.depth()) + i16::from(adjustment))
            .clamp(0, i16::from(max_depth));
        block.set_depth(depth as u8);
    }
    next.with_selections(selection.clone(), selection.clone())
}

pub fn apply_inline_style(
    content: &ContentState,
    selection: &Selection,
    style: InlineStyle,
) -> ContentState {
    modify_inline_style(content, selection, |set| {
        set.insert(style);
    })
}

pub fn remove_inline_style(
    content: &ContentState,
    selection: &Selection,
    style: InlineStyle,
) -> ContentState {
    modify_inline_style(content, selection, |set| {
        set.remove(&style);
    })
}

fn modify_inline_style(
    content: &ContentState,
    selection: &Selection,
    mut modify: impl FnMut(&mut StyleSet),
) -> ContentState {
    let range = content.block_range(selection);
    let (first, last) = (*range.start(), *range.end());
    let mut next = content.clone();

    for (index, block) in next.blocks_mut().iter_mut().enumerate() {
        if index < first || index > last {
            continue;
        }
        let from = if index == first { selection.start_offset() } else { 0 };
        let to = if index == last { selection.end_offset() } else { block.len() };
        let to = to.min(block.len());
        for set in &mut block.styles_mut()[from.min(to)..to] {
            modify(set);
        }
    }

    next.with_selections(selection.clone(), selection.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_blocks() -> ContentState {
        ContentState::new(vec![
            ContentBlock::new("a".into(), BlockType::Unstyled, "Hello world"),
            ContentBlock::new("b".into(), BlockType::Blockquote, "Second line"),
        ])
    }

    #[test]
    fn remove_range_across_blocks_joins_them() {
        let content = two_blocks();
        let selection = content.selection((&"a".into(), 5), (&"b".into(), 6));
        let next = remove_range(&content, &selection);
        assert_eq!(next.blocks().len(), 1);
        assert_eq!(next.first_block().text(), "Hello line");
        assert_eq!(next.selection_after(), &Selection::collapsed("a".into(), 5));
    }

    #[test]
    fn backward_selection_removes_the_same_range() {
        let content = two_blocks();
        let selection = content.selection((&"a".into(), 11), (&"a".into(), 6));
        assert!(selection.is_backward());
        let next = remove_range(&content, &selection);
        assert_eq!(next.first_block().text(), "Hello ");
    }

    #[test]
    fn split_block_keeps_type_and_moves_cursor() {
        let content = two_blocks();
        let selection = Selection::collapsed("b".into(), 6);
        let next = split_block(&content, &selection);
        assert_eq!(next.blocks().len(), 3);
        assert_eq!(next.blocks()[1].text(), "Second");
        assert_eq!(next.blocks()[2].text(), " line");
        assert_eq!(next.blocks()[2].block_type(), BlockType::Blockquote);
        assert_eq!(next.selection_after().start_key(), next.blocks()[2].key());
    }

    #[test]
    fn split_empty_list_item_outdents_instead() {
        let content = ContentState::new(vec![
            ContentBlock::empty("a".into(), BlockType::UnorderedListItem).with_depth(1),
        ]);
        let selection = Selection::collapsed("a".into(), 0);
        let outdented = split_block(&content, &selection);
        assert_eq!(outdented.blocks().len(), 1);
        assert_eq!(outdented.first_block().depth(), 0);

        let unstyled = split_block(&outdented, &selection);
        assert_eq!(unstyled.first_block().block_type(), BlockType::Unstyled);
    }

    #[test]
    fn apply_style_only_touches_the_selected_characters() {
        let content = two_blocks();
        let selection = content.selection((&"a".into(), 6), (&"b".into(), 6));
        let next = apply_inline_style(&content, &selection, InlineStyle::Italic);
        let first = next.first_block();
        assert!(!first.inline_style_at(5).contains(&InlineStyle::Italic));
        assert!(first.inline_style_at(6).contains(&InlineStyle::Italic));
        let second = &next.blocks()[1];
        assert!(second.inline_style_at(5).contains(&InlineStyle::Italic));
        assert!(!second.inline_style_at(6).contains(&InlineStyle::Italic));
    }
}
