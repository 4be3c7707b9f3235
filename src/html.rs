//! HTML rendering of the block tree and the HTMLBook chapter export.

use crate::document::{BlockType, ContentBlock, ContentState, EditorState, InlineStyle, StyleSet};

/// Renders one chapter: the title as its heading and the body below.
///
/// The title is inserted as-is; callers wanting literal text must escape it.
pub fn export_html_book(title: &str, state: &EditorState) -> String {
    let body = render_blocks(state.content());
    format!(
        "<section data-type=\"chapter\">\n  <header>\n    <h1>{title}</h1>\n  </header>\n  {body}\n</section>"
    )
}

/// Renders every block of `content` to markup, one top-level element per
/// line. Consecutive list items are grouped into `<ul>`/`<ol>` wrappers and
/// deeper items nest inside the item before them.
pub fn render_blocks(content: &ContentState) -> String {
    let blocks = content.blocks();
    let mut lines = Vec::new();
    let mut index = 0;

    while index < blocks.len() {
        let block = &blocks[index];
        if block.block_type().is_list_item() {
            index = render_list(blocks, index, 0, &mut lines);
        } else {
            lines.push(render_block(block));
            index += 1;
        }
    }

    lines.join("\n")
}

fn list_tag(block_type: BlockType) -> &'static str {
    if block_type == BlockType::OrderedListItem { "ol" } else { "ul" }
}

/// Renders the list starting at `start` and returns the index of the first
/// block that does not belong to it.
fn render_list(blocks: &[ContentBlock], start: usize, indent: usize, lines: &mut Vec<String>) -> usize {
    let first = &blocks[start];
    let (block_type, depth) = (first.block_type(), first.depth());
    let tag = list_tag(block_type);
    let pad = "  ".repeat(indent);

    lines.push(format!("{pad}<{tag}>"));
    let mut index = start;
    while let Some(item) = blocks.get(index) {
        if item.block_type() != block_type || item.depth() != depth {
            break;
        }
        let inner = render_inline(item);
        index += 1;

        let nested = blocks
            .get(index)
            .is_some_and(|next| next.block_type().is_list_item() && next.depth() > depth);
        if nested {
            lines.push(format!("{pad}  <li>{inner}"));
            index = render_list(blocks, index, indent + 2, lines);
            lines.push(format!("{pad}  </li>"));
        } else {
            lines.push(format!("{pad}  <li>{inner}</li>"));
        }
    }
    lines.push(format!("{pad}</{tag}>"));
    index
}

fn render_block(block: &ContentBlock) -> String {
    let inner = render_inline(block);
    match block.block_type() {
        BlockType::Blockquote => format!("<blockquote>{inner}</blockquote>"),
        BlockType::CodeBlock => format!("<pre><code>{inner}</code></pre>"),
        block_type => match block_type.heading_level() {
            Some(level) => format!("<h{level}>{inner}</h{level}>"),
            None => format!("<p>{inner}</p>"),
        },
    }
}

/// Styled text of one block. An empty block renders a single line break.
fn render_inline(block: &ContentBlock) -> String {
    if block.is_empty() {
        return "<br>".to_owned();
    }

    let in_code_block = block.block_type() == BlockType::CodeBlock;
    let mut out = String::new();
    for (range, styles) in block.style_runs() {
        let mut text = escape(block.slice(range));
        if !in_code_block {
            text = text.replace('\n', "<br>\n");
        }
        out.push_str(&wrap_styles(text, styles));
    }
    out
}

fn wrap_styles(mut text: String, styles: &StyleSet) -> String {
    // Innermost first: code, then strikethrough, underline, italic, bold.
    for style in [
        InlineStyle::Code,
        InlineStyle::Strikethrough,
        InlineStyle::Underline,
        InlineStyle::Italic,
        InlineStyle::Bold,
    ] {
        if styles.contains(&style) {
            let tag = style_tag(style);
            text = format!("<{tag}>{text}</{tag}>");
        }
    }
    text
}

fn style_tag(style: InlineStyle) -> &'static str {
    match style {
        InlineStyle::Bold => "strong",
        InlineStyle::Italic => "em",
        InlineStyle::Underline => "u",
        InlineStyle::Strikethrough => "del",
        InlineStyle::Code => "code",
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_text() {
        assert_eq!(escape("a < b & c > d\u{a0}"), "a &lt; b &amp; c &gt; d&nbsp;");
    }

    #[test]
    fn styles_nest_bold_outermost() {
        let mut styles = StyleSet::new();
        styles.insert(InlineStyle::Italic);
        styles.insert(InlineStyle::Bold);
        assert_eq!(wrap_styles("x".into(), &styles), "<strong><em>x</em></strong>");
    }
}
