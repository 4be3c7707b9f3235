use magicbook::document::{BlockKey, BlockType, ContentBlock, ContentState, InlineStyle};
use magicbook::html::{export_html_book, render_blocks};
use magicbook::{EditorConfig, EditorController, EditorState, MemoryStore};

fn block(key: &str, block_type: BlockType, text: &str) -> ContentBlock {
    ContentBlock::new(BlockKey::new(key), block_type, text)
}

fn state_with(blocks: Vec<ContentBlock>) -> EditorState {
    EditorState::create_with_content(ContentState::new(blocks))
}

#[test]
fn test_export_wraps_body_in_chapter_section() {
    let state = state_with(vec![block("a", BlockType::Unstyled, "Hello world")]);

    let html = export_html_book("Chapter One", &state);

    assert_eq!(
        html,
        "<section data-type=\"chapter\">\n  <header>\n    <h1>Chapter One</h1>\n  </header>\n  <p>Hello world</p>\n</section>"
    );
}

#[test]
fn test_controller_export_uses_current_title() {
    let store = MemoryStore::new();
    let mut controller = EditorController::load(&store, EditorConfig::default());
    controller.on_title_change("Chapter One".into(), 0.0);
    controller.on_content_change(
        state_with(vec![block("a", BlockType::Unstyled, "Hello world")]),
        0.0,
    );

    let html = controller.export_html();

    assert!(html.contains("<h1>Chapter One</h1>"));
    assert!(html.contains("<p>Hello world</p>"));
}

#[test]
fn test_title_is_inserted_verbatim() {
    let state = EditorState::create_empty();

    let html = export_html_book("Tom & <em>Jerry</em>", &state);

    assert!(html.contains("<h1>Tom & <em>Jerry</em></h1>"));
}

#[test]
fn test_empty_document_renders_line_break_paragraph() {
    let html = export_html_book("T", &EditorState::create_empty());

    assert!(html.contains("\n  <p><br></p>\n"));
}

#[test]
fn test_inline_styles_map_to_tags() {
    let styled = block("a", BlockType::Unstyled, "bold plain")
        .with_style(0..4, InlineStyle::Bold)
        .with_style(5..10, InlineStyle::Code);

    let html = render_blocks(&ContentState::new(vec![styled]));

    assert_eq!(html, "<p><strong>bold</strong> <code>plain</code></p>");
}

#[test]
fn test_block_types_map_to_elements() {
    let content = ContentState::new(vec![
        block("a", BlockType::HeaderTwo, "Part"),
        block("b", BlockType::Blockquote, "Said"),
        block("c", BlockType::CodeBlock, "let x = 1;\nx < 2"),
        block("d", BlockType::Unstyled, "one\ntwo"),
    ]);

    let html = render_blocks(&content);

    assert_eq!(
        html,
        "<h2>Part</h2>\n<blockquote>Said</blockquote>\n<pre><code>let x = 1;\nx &lt; 2</code></pre>\n<p>one<br>\ntwo</p>"
    );
}

#[test]
fn test_list_items_are_grouped_and_nested() {
    let content = ContentState::new(vec![
        block("a", BlockType::UnorderedListItem, "One"),
        block("b", BlockType::UnorderedListItem, "Nested").with_depth(1),
        block("c", BlockType::UnorderedListItem, "Two"),
        block("d", BlockType::OrderedListItem, "First"),
        block("e", BlockType::Unstyled, "After"),
    ]);

    let html = render_blocks(&content);

    assert_eq!(
        html,
        [
            "<ul>",
            "  <li>One",
            "    <ul>",
            "      <li>Nested</li>",
            "    </ul>",
            "  </li>",
            "  <li>Two</li>",
            "</ul>",
            "<ol>",
            "  <li>First</li>",
            "</ol>",
            "<p>After</p>",
        ]
        .join("\n")
    );
}
